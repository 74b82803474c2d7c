//! Stacked layout of read more views plus a key hint row.
//!
//! Drawing and mouse routing both derive view rectangles from
//! [`view_areas`], so a click always lands on the view that was drawn there.

use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme::{Glyphs, Palette, UiOptions, glyphs, palette, styles};
use crate::view::ReadMoreView;

const BORDER: Margin = Margin {
    horizontal: 1,
    vertical: 1,
};

/// Area left for views once the hint row is taken.
#[must_use]
pub fn body_area(area: Rect) -> Rect {
    Rect {
        height: area.height.saturating_sub(1),
        ..area
    }
}

/// Text width of a view drawn across `area`.
#[must_use]
pub fn text_width(area: Rect) -> u16 {
    area.width.saturating_sub(2)
}

/// Outer rectangle of every view, top to bottom, clipped to the body.
#[must_use]
pub fn view_areas(area: Rect, views: &[ReadMoreView]) -> Vec<Rect> {
    let body = body_area(area);
    let mut y = body.y;
    views
        .iter()
        .map(|view| {
            let wanted = view.height().saturating_add(2);
            let height = wanted.min(body.bottom().saturating_sub(y));
            let rect = Rect::new(body.x, y, body.width, height);
            y = y.saturating_add(height);
            rect
        })
        .collect()
}

/// A click resolved to a view and a cell inside its text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewHit {
    pub index: usize,
    pub column: u16,
    pub row: u16,
}

#[must_use]
pub fn hit_view(area: Rect, views: &[ReadMoreView], column: u16, row: u16) -> Option<ViewHit> {
    view_areas(area, views)
        .into_iter()
        .enumerate()
        .find_map(|(index, rect)| {
            let text = rect.inner(BORDER);
            let inside = column >= text.x
                && column < text.right()
                && row >= text.y
                && row < text.bottom();
            inside.then(|| ViewHit {
                index,
                column: column - text.x,
                row: row - text.y,
            })
        })
}

/// Draw every view with the focused one highlighted.
pub fn draw(frame: &mut Frame, views: &[ReadMoreView], focus: usize, options: UiOptions) {
    let palette = palette(options);
    let glyphs = glyphs(options);
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, area);

    for (index, (view, rect)) in views.iter().zip(view_areas(area, views)).enumerate() {
        if rect.height == 0 {
            continue;
        }
        let focused = index == focus;
        let block = view_block(view, focused, &palette, &glyphs);
        frame.render_widget(view.widget(&palette, block), rect);
    }

    let hints = Rect {
        y: area.bottom().saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(Paragraph::new(hint_line(&palette, &glyphs)), hints);
}

fn view_block<'a>(
    view: &'a ReadMoreView,
    focused: bool,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Block<'a> {
    let marker = if focused {
        glyphs.selected
    } else {
        glyphs.unselected
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette, focused))
        .title(Line::from(vec![
            Span::styled(marker, styles::key_highlight(palette)),
            Span::styled(view.title(), styles::title(palette, focused)),
        ]))
}

fn hint_line(palette: &Palette, glyphs: &Glyphs) -> Line<'static> {
    let key = styles::key_highlight(palette);
    let hint = styles::key_hint(palette);
    let separator = format!(" {} ", glyphs.separator);
    Line::from(vec![
        Span::raw(" "),
        Span::styled("Tab", key),
        Span::styled(" focus", hint),
        Span::styled(separator.clone(), hint),
        Span::styled("Enter", key),
        Span::styled(" toggle", hint),
        Span::styled(separator.clone(), hint),
        Span::styled("click", key),
        Span::styled(" affordance", hint),
        Span::styled(separator, hint),
        Span::styled("q", key),
        Span::styled(" quit", hint),
    ])
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};

    use readmore_engine::TrimPolicy;

    use super::{ViewHit, draw, hit_view, text_width, view_areas};
    use crate::oracle::{LayoutPass, ViewId};
    use crate::theme::UiOptions;
    use crate::view::{ReadMoreView, deliver};

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 30,
        height: 12,
    };

    fn views(pass: &mut LayoutPass) -> Vec<ReadMoreView> {
        let mut views = vec![
            ReadMoreView::new(
                ViewId(0),
                "Long",
                "one two three four five six seven eight nine ten eleven twelve",
                TrimPolicy::lines(2),
                pass,
            ),
            ReadMoreView::new(ViewId(1), "Short", "tiny", TrimPolicy::lines(2), pass),
        ];
        for view in &mut views {
            view.set_width(text_width(AREA));
        }
        deliver(pass, &mut views);
        views
    }

    #[test]
    fn views_stack_with_borders() {
        let mut pass = LayoutPass::new();
        let views = views(&mut pass);
        let areas = view_areas(AREA, &views);
        assert_eq!(areas[0], Rect::new(0, 0, 30, 4));
        assert_eq!(areas[1], Rect::new(0, 4, 30, 3));
    }

    #[test]
    fn areas_clip_to_body() {
        let mut pass = LayoutPass::new();
        let views = views(&mut pass);
        let areas = view_areas(Rect::new(0, 0, 30, 6), &views);
        assert_eq!(areas[0].height, 4);
        assert_eq!(areas[1].height, 1);
    }

    #[test]
    fn clicks_map_into_text_areas() {
        let mut pass = LayoutPass::new();
        let views = views(&mut pass);
        assert_eq!(
            hit_view(AREA, &views, 3, 2),
            Some(ViewHit {
                index: 0,
                column: 2,
                row: 1,
            })
        );
        assert_eq!(
            hit_view(AREA, &views, 1, 5),
            Some(ViewHit {
                index: 1,
                column: 0,
                row: 0,
            })
        );
        // borders and empty space are not text
        assert_eq!(hit_view(AREA, &views, 0, 1), None);
        assert_eq!(hit_view(AREA, &views, 5, 4), None);
        assert_eq!(hit_view(AREA, &views, 5, 9), None);
    }

    #[test]
    fn draw_shows_titles_text_and_hints() {
        let mut pass = LayoutPass::new();
        let views = views(&mut pass);
        let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).unwrap();
        let options = UiOptions {
            ascii_only: true,
            high_contrast: false,
        };
        terminal.draw(|frame| draw(frame, &views, 1, options)).unwrap();

        let buf = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..AREA.width).map(|x| buf[(x, y)].symbol()).collect() };
        assert!(row(0).contains(" Long"));
        assert!(row(1).contains("one two three four five six"));
        assert!(row(2).contains("Read more"));
        assert!(row(4).contains(">Short"));
        assert!(row(5).contains("tiny"));
        assert!(row(11).starts_with(" Tab focus | Enter"));
    }
}
