//! Terminal line layout.
//!
//! Greedy word wrap over grapheme clusters, measured in terminal cells. The
//! same layout drives measurement, drawing, and hit testing so the three
//! always agree on where each line breaks.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use readmore_engine::{LineLayout, MeasureError};
use readmore_types::text::char_slice;

fn is_newline(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r")
}

/// Wrap `text` into lines at most `width` cells wide.
///
/// Whitespace hangs at the end of the line it follows instead of starting a
/// new one. Words wider than a line are broken at the cell limit. Each line
/// end is the char offset one past its last char, newline included.
pub fn wrap_line_ends(text: &str, width: u16) -> Result<LineLayout, MeasureError> {
    if width == 0 {
        return Err(MeasureError::ZeroWidth);
    }
    let width = usize::from(width);

    let mut ends = Vec::new();
    let mut offset = 0usize;
    let mut line_start = 0usize;
    let mut col = 0usize;
    // Char offset just after the last whitespace run, and the column there.
    let mut soft_break: Option<(usize, usize)> = None;

    for grapheme in text.graphemes(true) {
        let chars = grapheme.chars().count();

        if is_newline(grapheme) {
            offset += chars;
            ends.push(offset);
            line_start = offset;
            col = 0;
            soft_break = None;
            continue;
        }

        let cells = grapheme.width();
        if grapheme.chars().all(char::is_whitespace) {
            offset += chars;
            col += cells;
            soft_break = Some((offset, col));
            continue;
        }

        while col > 0 && col + cells > width {
            match soft_break.take() {
                Some((at, break_col)) if at > line_start => {
                    ends.push(at);
                    line_start = at;
                    col -= break_col;
                }
                _ => {
                    ends.push(offset);
                    line_start = offset;
                    col = 0;
                }
            }
        }

        offset += chars;
        col += cells;
    }

    if offset > line_start || ends.is_empty() {
        ends.push(offset);
    }
    Ok(LineLayout::new(ends))
}

/// Text of each laid-out line, without its trailing newline.
#[must_use]
pub fn line_texts<'a>(text: &'a str, layout: &LineLayout) -> Vec<&'a str> {
    let mut start = 0;
    layout
        .line_ends()
        .iter()
        .map(|&end| {
            let line = char_slice(text, start, end);
            start = end;
            trim_newline(line)
        })
        .collect()
}

pub(crate) fn trim_newline(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Char offset drawn at cell (`column`, `row`), if any.
///
/// Cells past the end of a line, including wide-glyph continuation cells
/// beyond the last char, resolve to nothing.
#[must_use]
pub fn offset_at(text: &str, layout: &LineLayout, column: u16, row: u16) -> Option<usize> {
    let row = usize::from(row);
    let start = layout.line_start(row)?;
    let end = layout.line_end(row)?;
    let line = trim_newline(char_slice(text, start, end));

    let target = usize::from(column);
    let mut col = 0usize;
    let mut offset = start;
    for grapheme in line.graphemes(true) {
        let cells = grapheme.width();
        if target < col + cells.max(1) {
            return Some(offset);
        }
        col += cells;
        offset += grapheme.chars().count();
    }
    None
}

/// Rows `text` occupies at `width`.
#[must_use]
pub fn row_count(text: &str, width: u16) -> usize {
    wrap_line_ends(text, width).map_or(1, |layout| layout.line_count())
}
