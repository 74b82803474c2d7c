//! Demo screen state: a column of read more views and the focus among them.

use ratatui::layout::Rect;
use tracing::debug;

use readmore_engine::{ToggleState, TrimPolicy};
use readmore_tui::{LayoutPass, ReadMoreView, UiOptions, ViewId, deliver, hit_view, text_width};

use crate::samples::Sample;

#[derive(Debug)]
pub struct DemoApp {
    views: Vec<ReadMoreView>,
    pass: LayoutPass,
    focus: usize,
    area: Rect,
    options: UiOptions,
    should_quit: bool,
}

impl DemoApp {
    pub fn new(samples: &[Sample], policy: &TrimPolicy, options: UiOptions) -> Self {
        let pass = LayoutPass::new();
        let views = samples
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                ReadMoreView::new(
                    ViewId(index),
                    sample.title,
                    sample.text,
                    sample.policy(policy),
                    &pass,
                )
            })
            .collect();
        Self {
            views,
            pass,
            focus: 0,
            area: Rect::default(),
            options,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn views(&self) -> &[ReadMoreView] {
        &self.views
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Lay the views out for a new terminal size.
    pub fn resize(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        debug!(width = area.width, height = area.height, "screen resized");
        self.area = area;
        let width = text_width(area);
        for view in &mut self.views {
            view.set_width(width);
        }
    }

    pub fn focus_next(&mut self) {
        if !self.views.is_empty() {
            self.focus = (self.focus + 1) % self.views.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.views.is_empty() {
            self.focus = (self.focus + self.views.len() - 1) % self.views.len();
        }
    }

    /// Toggle the focused view if it currently shows an affordance.
    pub fn activate_focused(&mut self) -> Option<ToggleState> {
        let view = self.views.get_mut(self.focus)?;
        view.displayable().affordance()?;
        Some(view.activate())
    }

    /// Focus the clicked view and toggle it when the click hit its affordance.
    pub fn click(&mut self, column: u16, row: u16) -> Option<ToggleState> {
        let hit = hit_view(self.area, &self.views, column, row)?;
        self.focus = hit.index;
        self.views.get_mut(hit.index)?.click(hit.column, hit.row)
    }

    /// Resolve pending measurements. Returns `true` if anything changed.
    pub fn layout_pass(&mut self) -> bool {
        deliver(&mut self.pass, &mut self.views)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use readmore_engine::{ToggleState, TrimPolicy};
    use readmore_tui::{UiOptions, line_texts, wrap_line_ends};

    use super::DemoApp;
    use crate::samples::SAMPLES;

    fn app() -> DemoApp {
        let mut app = DemoApp::new(&SAMPLES, &TrimPolicy::default(), UiOptions::default());
        app.resize(Rect::new(0, 0, 60, 40));
        app.layout_pass();
        app
    }

    #[test]
    fn long_samples_start_collapsed() {
        let app = app();
        for view in &app.views()[..3] {
            assert!(view.displayable().text().ends_with("Read more"), "{}", view.title());
        }
        assert!(app.views()[3].displayable().affordance().is_none());
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut app = app();
        app.focus_prev();
        assert_eq!(app.focus(), 3);
        app.focus_next();
        assert_eq!(app.focus(), 0);
    }

    #[test]
    fn activating_focused_view_toggles_it() {
        let mut app = app();
        assert_eq!(app.activate_focused(), Some(ToggleState::Expanded));
        assert!(app.views()[0].displayable().text().ends_with("Read less"));
        assert_eq!(app.activate_focused(), Some(ToggleState::Collapsed));
    }

    #[test]
    fn one_line_sample_has_nothing_to_activate() {
        let mut app = app();
        app.focus_prev();
        assert_eq!(app.activate_focused(), None);
    }

    #[test]
    fn click_on_affordance_toggles_that_view() {
        let mut app = app();
        // the affordance ends the last text row; screen cells sit one right
        // of and one below text cells because of the border
        let text = app.views()[0].displayable().text().to_string();
        let last_row = app.views()[0].height() - 1;
        let rows = line_texts(&text, &wrap_line_ends(&text, 58).unwrap());
        let column = u16::try_from(rows[usize::from(last_row)].chars().count()).unwrap();

        assert_eq!(app.click(column, last_row + 1), Some(ToggleState::Expanded));
        assert_eq!(app.focus(), 0);
    }

    #[test]
    fn click_elsewhere_only_moves_focus() {
        let mut app = app();
        let second_top = app.views()[0].height() + 2;
        assert_eq!(app.click(1, second_top + 1), None);
        assert_eq!(app.focus(), 1);
        assert_eq!(app.views()[1].controller().toggle_state(), ToggleState::Collapsed);
    }

    #[test]
    fn resize_remeasures_every_view() {
        let mut app = app();
        app.resize(Rect::new(0, 0, 30, 40));
        for view in &app.views()[..2] {
            assert_eq!(view.displayable().text(), view.controller().full_text());
        }
        assert!(app.layout_pass());
        assert!(app.views()[0].displayable().text().ends_with("Read more"));
    }
}
