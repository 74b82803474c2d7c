//! Toggle state, line geometry, and the computed display result.

use serde::{Deserialize, Serialize};

use crate::text::{char_len, char_slice};

/// Whether the truncated or the full text is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToggleState {
    #[default]
    Collapsed,
    Expanded,
}

impl ToggleState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    #[must_use]
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// Line geometry reported by a layout pass over the full text.
///
/// `line_ends[i]` is the char offset one past the last char of line `i`,
/// trailing whitespace and newline included. Offsets are non-decreasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineLayout {
    line_ends: Vec<usize>,
}

impl LineLayout {
    #[must_use]
    pub fn new(line_ends: Vec<usize>) -> Self {
        debug_assert!(line_ends.windows(2).all(|w| w[0] <= w[1]));
        Self { line_ends }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_ends.len()
    }

    #[must_use]
    pub fn line_end(&self, index: usize) -> Option<usize> {
        self.line_ends.get(index).copied()
    }

    #[must_use]
    pub fn line_ends(&self) -> &[usize] {
        &self.line_ends
    }

    /// Zero-based line containing the char at `offset`.
    ///
    /// Offsets past the last line end map to the last line.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> Option<usize> {
        if self.line_ends.is_empty() {
            return None;
        }
        let idx = self.line_ends.partition_point(|&end| end <= offset);
        Some(idx.min(self.line_ends.len() - 1))
    }

    /// Char offset where line `index` starts.
    #[must_use]
    pub fn line_start(&self, index: usize) -> Option<usize> {
        match index {
            0 if !self.line_ends.is_empty() => Some(0),
            _ => self.line_end(index.checked_sub(1)?).filter(|_| index < self.line_count()),
        }
    }
}

/// Last known measurement of the full text.
///
/// Only meaningful for the exact text and width that produced it; the
/// controller drops it back to `Pending` whenever either changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementState {
    /// No layout pass has completed for the current text and width.
    #[default]
    Pending,
    /// The layout engine failed; treated exactly like an invalid line end.
    Unavailable,
    Measured {
        line_count: usize,
        /// End of the policy's target line, or `None` when that line does
        /// not exist.
        line_end: Option<usize>,
    },
}

impl MeasurementState {
    /// Resolve the target line of a completed layout pass.
    ///
    /// `target_line` is the zero-based line index derived from the policy.
    /// A layout with fewer lines yields an invalid line end.
    #[must_use]
    pub fn from_layout(layout: &LineLayout, target_line: usize) -> Self {
        Self::Measured {
            line_count: layout.line_count(),
            line_end: layout.line_end(target_line),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> Option<usize> {
        match self {
            Self::Measured { line_count, .. } => Some(*line_count),
            Self::Pending | Self::Unavailable => None,
        }
    }

    /// Line end usable as a cut bound: present and strictly positive.
    #[must_use]
    pub fn usable_line_end(&self) -> Option<usize> {
        match self {
            Self::Measured {
                line_end: Some(end),
                ..
            } if *end > 0 => Some(*end),
            _ => None,
        }
    }
}

/// What activating the affordance means at the time it was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffordanceAction {
    Expand,
    Collapse,
}

/// Clickable region of a [`DisplayableResult`], in char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffordanceSpan {
    pub start: usize,
    pub end: usize,
    pub action: AffordanceAction,
}

impl AffordanceSpan {
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        (self.start..self.end).contains(&offset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Text to display plus where its affordance sits, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayableResult {
    text: String,
    affordance: Option<AffordanceSpan>,
}

impl DisplayableResult {
    /// Text shown as-is, with nothing clickable.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            affordance: None,
        }
    }

    /// `body` followed by `affordance`, the latter marked clickable.
    #[must_use]
    pub fn with_trailing_affordance(
        mut body: String,
        affordance: &str,
        action: AffordanceAction,
    ) -> Self {
        let start = char_len(&body);
        body.push_str(affordance);
        let end = start + char_len(affordance);
        Self {
            text: body,
            affordance: Some(AffordanceSpan { start, end, action }),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn affordance(&self) -> Option<&AffordanceSpan> {
        self.affordance.as_ref()
    }

    #[must_use]
    pub fn affordance_text(&self) -> Option<&str> {
        self.affordance
            .as_ref()
            .map(|span| char_slice(&self.text, span.start, span.end))
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}
