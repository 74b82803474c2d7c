//! One read more paragraph on screen.

use std::mem;

use ratatui::widgets::Block;

use readmore_engine::{
    AffordanceAction, DisplaySink, DisplayableResult, MeasureCompletion, ToggleController,
    ToggleState, TrimPolicy,
};

use crate::oracle::{DeferredOracle, LayoutPass, ViewId};
use crate::theme::Palette;
use crate::widget::{ReadMoreParagraph, affordance_hit, rendered_height};

/// Sink that only remembers whether a redraw is due.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeFlag {
    dirty: bool,
}

impl ChangeFlag {
    pub fn take(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }
}

impl DisplaySink for ChangeFlag {
    fn displayable_text_changed(&mut self, _result: &DisplayableResult) {
        self.dirty = true;
    }
}

#[derive(Debug)]
pub struct ReadMoreView {
    id: ViewId,
    title: String,
    controller: ToggleController<DeferredOracle, ChangeFlag>,
}

impl ReadMoreView {
    pub fn new(
        id: ViewId,
        title: impl Into<String>,
        text: impl Into<String>,
        policy: TrimPolicy,
        pass: &LayoutPass,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            controller: ToggleController::new(text, policy, pass.oracle(id), ChangeFlag::default()),
        }
    }

    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn controller(&self) -> &ToggleController<DeferredOracle, ChangeFlag> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ToggleController<DeferredOracle, ChangeFlag> {
        &mut self.controller
    }

    #[must_use]
    pub fn displayable(&self) -> &DisplayableResult {
        self.controller.displayable()
    }

    /// Width of the text area, borders excluded.
    pub fn set_width(&mut self, width: u16) {
        self.controller.set_available_width(width);
    }

    pub fn activate(&mut self) -> ToggleState {
        self.controller.activate()
    }

    pub fn apply(&mut self, completion: MeasureCompletion) -> bool {
        self.controller.complete_measurement(completion)
    }

    /// Whether the display changed since the last call.
    pub fn take_changed(&mut self) -> bool {
        self.controller.sink_mut().take()
    }

    /// Text rows at the current width.
    #[must_use]
    pub fn height(&self) -> u16 {
        let width = self.controller.available_width().unwrap_or(u16::MAX);
        rendered_height(self.displayable(), width)
    }

    /// Affordance under a cell of the text area.
    #[must_use]
    pub fn hit(&self, column: u16, row: u16) -> Option<AffordanceAction> {
        let width = self.controller.available_width()?;
        affordance_hit(self.displayable(), width, column, row)
    }

    /// Toggle if the cell holds the affordance.
    pub fn click(&mut self, column: u16, row: u16) -> Option<ToggleState> {
        self.hit(column, row).map(|_| self.activate())
    }

    #[must_use]
    pub fn widget<'a>(&'a self, palette: &Palette, block: Block<'a>) -> ReadMoreParagraph<'a> {
        let color = palette.affordance(self.controller.policy().affordance_color());
        ReadMoreParagraph::themed(self.displayable(), palette, color).block(block)
    }
}

/// Route a layout pass's completions to their views.
///
/// Returns `true` when any view changed.
pub fn deliver(pass: &mut LayoutPass, views: &mut [ReadMoreView]) -> bool {
    let mut changed = false;
    for (id, completion) in pass.run() {
        match views.iter_mut().find(|view| view.id() == id) {
            Some(view) => {
                view.apply(completion);
                changed |= view.take_changed();
            }
            None => tracing::debug!(view = id.0, "measurement for unknown view"),
        }
    }
    changed
}
