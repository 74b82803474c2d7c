//! Color theme and glyphs for readmore views.
//!
//! Uses Kanagawa Wave palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use readmore_engine::{AffordanceColor, AppConfig};

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange

    pub const ACCENT: Color = CYAN;
    pub const PEACH: Color = ORANGE;
}

/// Display flags from the `[app]` config table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

impl From<&AppConfig> for UiOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            ascii_only: config.ascii_only,
            high_contrast: config.high_contrast,
        }
    }
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub peach: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            accent: colors::ACCENT,
            peach: colors::PEACH,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_muted: Color::Gray,
            primary: Color::White,
            accent: Color::Cyan,
            peach: Color::Yellow,
        }
    }

    /// Terminal color for an affordance color setting.
    ///
    /// High contrast ignores custom colors so the affordance stays legible.
    #[must_use]
    pub fn affordance(&self, color: AffordanceColor) -> Color {
        match color {
            AffordanceColor::Rgb(r, g, b) if *self != Self::high_contrast() => {
                Color::Rgb(r, g, b)
            }
            AffordanceColor::Rgb(..) | AffordanceColor::Accent => self.accent,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for focus and hint markers.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub selected: &'static str,
    pub unselected: &'static str,
    pub separator: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            selected: ">",
            unselected: " ",
            separator: "|",
        }
    } else {
        Glyphs {
            selected: "▸",
            unselected: " ",
            separator: "│",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Color, Modifier, Palette, Style};

    #[must_use]
    pub fn body(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary)
    }

    #[must_use]
    pub fn affordance(color: Color) -> Style {
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    #[must_use]
    pub fn border(palette: &Palette, focused: bool) -> Style {
        if focused {
            Style::default().fg(palette.primary)
        } else {
            Style::default().fg(palette.bg_border)
        }
    }

    #[must_use]
    pub fn title(palette: &Palette, focused: bool) -> Style {
        let style = Style::default().fg(palette.text_primary);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}
