//! Drawing a [`DisplayableResult`] and mapping clicks back onto it.
//!
//! Rows come from [`wrap_line_ends`] rather than ratatui's own wrapping, so
//! the rows drawn here are exactly the rows hit testing walks.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use readmore_engine::{AffordanceAction, DisplayableResult, LineLayout};
use readmore_types::text::{char_len, char_slice};

use crate::layout::{offset_at, trim_newline, wrap_line_ends};
use crate::theme::{Palette, styles};

fn layout_or_single(text: &str, width: u16) -> LineLayout {
    wrap_line_ends(text, width).unwrap_or_else(|_| LineLayout::new(vec![char_len(text)]))
}

/// Rows of `result` wrapped at `width`, the affordance styled apart.
#[must_use]
pub fn render_lines(
    result: &DisplayableResult,
    width: u16,
    body: Style,
    affordance: Style,
) -> Vec<Line<'static>> {
    let text = result.text();
    let layout = layout_or_single(text, width);
    let mut lines = Vec::with_capacity(layout.line_count());
    let mut start = 0;

    for &end in layout.line_ends() {
        let visible_end = start + char_len(trim_newline(char_slice(text, start, end)));
        let mut spans = Vec::new();
        let mut push = |from: usize, to: usize, style: Style| {
            if from < to {
                spans.push(Span::styled(char_slice(text, from, to).to_string(), style));
            }
        };

        match result.affordance() {
            Some(span) => {
                let a_start = span.start.clamp(start, visible_end);
                let a_end = span.end.clamp(a_start, visible_end);
                push(start, a_start, body);
                push(a_start, a_end, affordance);
                push(a_end, visible_end, body);
            }
            None => push(start, visible_end, body),
        }

        lines.push(Line::from(spans));
        start = end;
    }
    lines
}

/// Rows `result` needs at `width`.
#[must_use]
pub fn rendered_height(result: &DisplayableResult, width: u16) -> u16 {
    let rows = layout_or_single(result.text(), width).line_count();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Action under cell (`column`, `row`), relative to the text area.
#[must_use]
pub fn affordance_hit(
    result: &DisplayableResult,
    width: u16,
    column: u16,
    row: u16,
) -> Option<AffordanceAction> {
    let span = result.affordance()?;
    let layout = wrap_line_ends(result.text(), width).ok()?;
    let offset = offset_at(result.text(), &layout, column, row)?;
    span.contains(offset).then_some(span.action)
}

/// Paragraph widget for a read more result.
#[derive(Debug, Clone)]
pub struct ReadMoreParagraph<'a> {
    result: &'a DisplayableResult,
    body_style: Style,
    affordance_style: Style,
    block: Option<Block<'a>>,
}

impl<'a> ReadMoreParagraph<'a> {
    #[must_use]
    pub fn new(result: &'a DisplayableResult) -> Self {
        Self {
            result,
            body_style: Style::default(),
            affordance_style: Style::default(),
            block: None,
        }
    }

    /// Body and affordance styles from `palette`, the affordance in `color`.
    #[must_use]
    pub fn themed(result: &'a DisplayableResult, palette: &Palette, color: Color) -> Self {
        Self::new(result)
            .body_style(styles::body(palette))
            .affordance_style(styles::affordance(color))
    }

    #[must_use]
    pub fn body_style(mut self, style: Style) -> Self {
        self.body_style = style;
        self
    }

    #[must_use]
    pub fn affordance_style(mut self, style: Style) -> Self {
        self.affordance_style = style;
        self
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ReadMoreParagraph<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = render_lines(self.result, inner.width, self.body_style, self.affordance_style);
        Paragraph::new(lines).style(self.body_style).render(inner, buf);
    }
}
