//! Trim policy: the immutable description of when and where to cut.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::char_len;

/// Literal inserted between the kept text and the collapsed affordance.
pub const ELLIPSIS: &str = "... ";

pub const DEFAULT_TRIM_LENGTH: usize = 240;

pub const DEFAULT_TRIM_LINES: usize = 2;

pub const DEFAULT_COLLAPSED_TEXT: &str = "Read more";

pub const DEFAULT_EXPANDED_TEXT: &str = "Read less";

/// How the trim budget is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimMode {
    /// Budget in rendered lines. Needs layout feedback.
    #[default]
    Lines,
    /// Budget in raw chars. No layout feedback.
    Length,
}

impl TrimMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Length => "length",
        }
    }

    #[must_use]
    pub const fn needs_measurement(self) -> bool {
        matches!(self, Self::Lines)
    }
}

#[derive(Debug, Error)]
#[error("unknown trim mode {0:?} (expected \"lines\" or \"length\")")]
pub struct TrimModeError(String);

impl FromStr for TrimMode {
    type Err = TrimModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" | "line" => Ok(Self::Lines),
            "length" | "chars" => Ok(Self::Length),
            other => Err(TrimModeError(other.to_string())),
        }
    }
}

/// Color of the affordance span.
///
/// `Accent` defers to the host theme; `Rgb` is an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AffordanceColor {
    #[default]
    Accent,
    Rgb(u8, u8, u8),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AffordanceColorError {
    #[error("color must be \"accent\" or \"#rrggbb\", got {0:?}")]
    Format(String),
    #[error("invalid hex digits in color {0:?}")]
    Hex(String),
}

impl FromStr for AffordanceColor {
    type Err = AffordanceColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case("accent") {
            return Ok(Self::Accent);
        }
        let Some(hex) = raw.strip_prefix('#') else {
            return Err(AffordanceColorError::Format(raw.to_string()));
        };
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(AffordanceColorError::Format(raw.to_string()));
        }
        // from_str_radix tolerates a leading sign
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AffordanceColorError::Hex(raw.to_string()));
        }
        let channel = |range: Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| AffordanceColorError::Hex(raw.to_string()))
        };
        Ok(Self::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for AffordanceColor {
    type Error = AffordanceColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AffordanceColor> for String {
    fn from(value: AffordanceColor) -> Self {
        value.to_string()
    }
}

impl fmt::Display for AffordanceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accent => f.write_str("accent"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// Immutable trim configuration.
///
/// Construction never fails. Out-of-range budgets are tolerated here and
/// clamped where they are used. Hosts reconfigure by replacing the whole
/// policy; the `with_*` methods return a modified copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimPolicy {
    mode: TrimMode,
    max_lines: usize,
    max_length: usize,
    collapsed_text: String,
    expanded_text: String,
    show_expanded_affordance: bool,
    affordance_color: AffordanceColor,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self {
            mode: TrimMode::Lines,
            max_lines: DEFAULT_TRIM_LINES,
            max_length: DEFAULT_TRIM_LENGTH,
            collapsed_text: DEFAULT_COLLAPSED_TEXT.to_string(),
            expanded_text: DEFAULT_EXPANDED_TEXT.to_string(),
            show_expanded_affordance: true,
            affordance_color: AffordanceColor::Accent,
        }
    }
}

impl TrimPolicy {
    /// Line-count policy with default affordance strings.
    #[must_use]
    pub fn lines(max_lines: usize) -> Self {
        Self::default()
            .with_mode(TrimMode::Lines)
            .with_max_lines(max_lines)
    }

    /// Character-length policy with default affordance strings.
    #[must_use]
    pub fn length(max_length: usize) -> Self {
        Self::default()
            .with_mode(TrimMode::Length)
            .with_max_length(max_length)
    }

    pub fn with_mode(mut self, mode: TrimMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_collapsed_text(mut self, text: impl Into<String>) -> Self {
        self.collapsed_text = text.into();
        self
    }

    pub fn with_expanded_text(mut self, text: impl Into<String>) -> Self {
        self.expanded_text = text.into();
        self
    }

    pub fn with_show_expanded_affordance(mut self, show: bool) -> Self {
        self.show_expanded_affordance = show;
        self
    }

    pub fn with_affordance_color(mut self, color: AffordanceColor) -> Self {
        self.affordance_color = color;
        self
    }

    #[must_use]
    pub fn mode(&self) -> TrimMode {
        self.mode
    }

    #[must_use]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Zero-based index of the line whose end bounds the collapsed text.
    /// A budget of `0` still measures the first line.
    #[must_use]
    pub fn target_line_index(&self) -> usize {
        self.max_lines.saturating_sub(1)
    }

    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    #[must_use]
    pub fn collapsed_text(&self) -> &str {
        &self.collapsed_text
    }

    #[must_use]
    pub fn expanded_text(&self) -> &str {
        &self.expanded_text
    }

    #[must_use]
    pub fn show_expanded_affordance(&self) -> bool {
        self.show_expanded_affordance
    }

    #[must_use]
    pub fn affordance_color(&self) -> AffordanceColor {
        self.affordance_color
    }

    /// Chars reserved at the end of the last visible line for the ellipsis,
    /// the collapsed affordance, and one char of slack so the pair does not
    /// wrap onto a line of its own.
    #[must_use]
    pub fn collapsed_reserve(&self) -> usize {
        char_len(ELLIPSIS) + char_len(&self.collapsed_text) + 1
    }

    /// Whether replacing `self` with `next` invalidates line geometry.
    #[must_use]
    pub fn geometry_changed(&self, next: &Self) -> bool {
        self.mode != next.mode || self.max_lines != next.max_lines
    }
}

#[cfg(test)]
mod tests {
    use super::{AffordanceColor, AffordanceColorError, ELLIPSIS, TrimMode, TrimPolicy};

    #[test]
    fn defaults_match_widget_defaults() {
        let policy = TrimPolicy::default();
        assert_eq!(policy.mode(), TrimMode::Lines);
        assert_eq!(policy.max_lines(), 2);
        assert_eq!(policy.max_length(), 240);
        assert_eq!(policy.collapsed_text(), "Read more");
        assert_eq!(policy.expanded_text(), "Read less");
        assert!(policy.show_expanded_affordance());
        assert_eq!(policy.affordance_color(), AffordanceColor::Accent);
    }

    #[test]
    fn ellipsis_is_four_chars() {
        assert_eq!(ELLIPSIS.chars().count(), 4);
    }

    #[test]
    fn zero_lines_targets_first_line() {
        let policy = TrimPolicy::lines(0);
        assert_eq!(policy.max_lines(), 0);
        assert_eq!(policy.target_line_index(), 0);
    }

    #[test]
    fn target_line_is_last_allowed_line() {
        assert_eq!(TrimPolicy::lines(3).target_line_index(), 2);
    }

    #[test]
    fn collapsed_reserve_counts_chars() {
        let policy = TrimPolicy::default().with_collapsed_text("Más");
        assert_eq!(policy.collapsed_reserve(), 4 + 3 + 1);
    }

    #[test]
    fn geometry_change_only_on_mode_or_lines() {
        let base = TrimPolicy::lines(2);
        assert!(!base.geometry_changed(&base.clone().with_collapsed_text("More")));
        assert!(!base.geometry_changed(&base.clone().with_max_length(5)));
        assert!(base.geometry_changed(&base.clone().with_max_lines(3)));
        assert!(base.geometry_changed(&base.clone().with_mode(TrimMode::Length)));
    }

    #[test]
    fn trim_mode_parses_aliases() {
        assert_eq!("Lines".parse::<TrimMode>().unwrap(), TrimMode::Lines);
        assert_eq!(" length ".parse::<TrimMode>().unwrap(), TrimMode::Length);
        assert!("pages".parse::<TrimMode>().is_err());
    }

    #[test]
    fn color_parses_accent_and_hex() {
        assert_eq!(
            "accent".parse::<AffordanceColor>(),
            Ok(AffordanceColor::Accent)
        );
        assert_eq!(
            "#7FB4CA".parse::<AffordanceColor>(),
            Ok(AffordanceColor::Rgb(0x7f, 0xb4, 0xca))
        );
    }

    #[test]
    fn color_rejects_malformed() {
        assert!(matches!(
            "blue".parse::<AffordanceColor>(),
            Err(AffordanceColorError::Format(_))
        ));
        assert!(matches!(
            "#12345".parse::<AffordanceColor>(),
            Err(AffordanceColorError::Format(_))
        ));
        assert!(matches!(
            "#zz0000".parse::<AffordanceColor>(),
            Err(AffordanceColorError::Hex(_))
        ));
    }

    #[test]
    fn color_rejects_signed_channels() {
        assert!(matches!(
            "#+1+2+3".parse::<AffordanceColor>(),
            Err(AffordanceColorError::Hex(_))
        ));
    }

    #[test]
    fn color_display_round_trips_through_string() {
        let color = AffordanceColor::Rgb(1, 2, 255);
        assert_eq!(color.to_string(), "#0102ff");
        assert_eq!(String::from(color).parse::<AffordanceColor>(), Ok(color));
    }
}
