//! Expand/collapse state machine for one piece of text.
//!
//! The controller owns the only mutable core state (toggle and measurement)
//! and re-derives the displayable text from scratch on every change. It is
//! driven from a single event loop: setters, affordance activation, and
//! measurement completions are all processed one at a time.

use std::sync::Arc;

use tracing::{debug, warn};

use readmore_types::{
    AffordanceColor, DisplayableResult, MeasurementState, ToggleState, TrimMode, TrimPolicy,
};

use crate::oracle::{LineMeasurementOracle, MeasureCompletion, MeasureRequest, MeasureTicket};
use crate::truncation::displayable;

/// Receives the displayable text whenever it changes.
pub trait DisplaySink {
    fn displayable_text_changed(&mut self, result: &DisplayableResult);
}

/// Sink for hosts that poll [`ToggleController::displayable`] instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn displayable_text_changed(&mut self, _result: &DisplayableResult) {}
}

impl<F> DisplaySink for F
where
    F: FnMut(&DisplayableResult),
{
    fn displayable_text_changed(&mut self, result: &DisplayableResult) {
        self(result);
    }
}

/// Owns toggle + measurement state for one text and keeps the display current.
///
/// Lifecycle:
/// - Construction renders the full text and, in line mode with a known
///   width, issues the first measurement request.
/// - A completion whose ticket matches the pending request updates the
///   measurement and re-renders with the toggle state current at that time.
/// - `activate()` flips the toggle and re-renders with the last measurement.
/// - Text, width, mode, or `max_lines` changes drop the measurement and
///   issue a new request. Nothing resets the toggle state.
#[derive(Debug)]
pub struct ToggleController<O, S = NullSink> {
    oracle: O,
    sink: S,
    text: Arc<str>,
    policy: TrimPolicy,
    available_width: Option<u16>,
    toggle: ToggleState,
    measurement: MeasurementState,
    pending: Option<MeasureTicket>,
    next_ticket: MeasureTicket,
    current: DisplayableResult,
}

impl<O, S> ToggleController<O, S>
where
    O: LineMeasurementOracle,
    S: DisplaySink,
{
    pub fn new(text: impl Into<String>, policy: TrimPolicy, oracle: O, sink: S) -> Self {
        let text: String = text.into();
        let mut controller = Self {
            oracle,
            sink,
            text: Arc::from(text),
            policy,
            available_width: None,
            toggle: ToggleState::default(),
            measurement: MeasurementState::default(),
            pending: None,
            next_ticket: MeasureTicket::first(),
            current: DisplayableResult::default(),
        };
        controller.remeasure();
        controller.current = controller.compute();
        controller
            .sink
            .displayable_text_changed(&controller.current);
        controller
    }

    /// Replace the full text. Keeps the toggle state.
    pub fn set_full_text(&mut self, text: impl Into<String>) -> &DisplayableResult {
        let text: String = text.into();
        self.text = Arc::from(text);
        self.remeasure();
        self.render()
    }

    /// Width the host lays the text out in. Only line mode cares.
    pub fn set_available_width(&mut self, width: u16) -> &DisplayableResult {
        if self.available_width != Some(width) {
            self.available_width = Some(width);
            self.remeasure();
        }
        self.render()
    }

    /// Replace the whole policy. Re-measures only when line geometry is affected.
    pub fn set_policy(&mut self, policy: TrimPolicy) -> &DisplayableResult {
        if policy != self.policy {
            let geometry_changed = self.policy.geometry_changed(&policy);
            self.policy = policy;
            if geometry_changed {
                self.remeasure();
            }
        }
        self.render()
    }

    pub fn set_mode(&mut self, mode: TrimMode) -> &DisplayableResult {
        self.set_policy(self.policy.clone().with_mode(mode))
    }

    pub fn set_max_lines(&mut self, max_lines: usize) -> &DisplayableResult {
        self.set_policy(self.policy.clone().with_max_lines(max_lines))
    }

    pub fn set_max_length(&mut self, max_length: usize) -> &DisplayableResult {
        self.set_policy(self.policy.clone().with_max_length(max_length))
    }

    pub fn set_collapsed_text(&mut self, text: impl Into<String>) -> &DisplayableResult {
        self.set_policy(self.policy.clone().with_collapsed_text(text))
    }

    pub fn set_expanded_text(&mut self, text: impl Into<String>) -> &DisplayableResult {
        self.set_policy(self.policy.clone().with_expanded_text(text))
    }

    pub fn set_show_expanded_affordance(&mut self, show: bool) -> &DisplayableResult {
        self.set_policy(self.policy.clone().with_show_expanded_affordance(show))
    }

    pub fn set_affordance_color(&mut self, color: AffordanceColor) -> &DisplayableResult {
        self.set_policy(self.policy.clone().with_affordance_color(color))
    }

    /// The affordance was clicked: flip and re-render with the last geometry.
    pub fn activate(&mut self) -> ToggleState {
        self.toggle = self.toggle.toggled();
        debug!(state = ?self.toggle, "read-more toggled");
        self.render();
        self.toggle
    }

    /// Apply a finished measurement pass.
    ///
    /// Returns `false` when the completion belongs to a superseded request
    /// and was dropped.
    pub fn complete_measurement(&mut self, completion: MeasureCompletion) -> bool {
        if self.pending != Some(completion.ticket) {
            debug!(
                generation = completion.ticket.generation(),
                "discarding stale measurement"
            );
            return false;
        }
        self.pending = None;
        self.measurement = match completion.outcome {
            Ok(layout) => MeasurementState::from_layout(&layout, self.policy.target_line_index()),
            Err(err) => {
                warn!("line measurement failed, showing full text: {err}");
                MeasurementState::Unavailable
            }
        };
        self.render();
        true
    }

    /// Re-derive the display and notify the sink if it changed.
    pub fn render(&mut self) -> &DisplayableResult {
        let next = self.compute();
        if next != self.current {
            self.current = next;
            self.sink.displayable_text_changed(&self.current);
        }
        &self.current
    }

    #[must_use]
    pub fn displayable(&self) -> &DisplayableResult {
        &self.current
    }

    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn policy(&self) -> &TrimPolicy {
        &self.policy
    }

    #[must_use]
    pub fn toggle_state(&self) -> ToggleState {
        self.toggle
    }

    #[must_use]
    pub fn measurement(&self) -> MeasurementState {
        self.measurement
    }

    #[must_use]
    pub fn available_width(&self) -> Option<u16> {
        self.available_width
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<MeasureTicket> {
        self.pending
    }

    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn compute(&self) -> DisplayableResult {
        displayable(&self.text, &self.policy, self.toggle, &self.measurement)
    }

    /// Drop current geometry and, in line mode with a known width, request
    /// a fresh pass that supersedes any pending one.
    fn remeasure(&mut self) {
        self.measurement = MeasurementState::Pending;
        let superseded = self.pending.take();
        if !self.policy.mode().needs_measurement() {
            return;
        }
        let Some(width) = self.available_width else {
            debug!("deferring measurement until a width is known");
            return;
        };

        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        self.pending = Some(ticket);
        debug!(
            generation = ticket.generation(),
            superseded = ?superseded.map(MeasureTicket::generation),
            width,
            "requesting line measurement"
        );
        self.oracle.request_measurement(MeasureRequest {
            ticket,
            text: Arc::clone(&self.text),
            available_width: width,
        });
    }
}
