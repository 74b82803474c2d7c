//! Controller behavior against a deferred layout engine.
//!
//! The harness mimics a UI event loop: measurement requests are queued when
//! issued and only resolved when the test "runs a layout pass".

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use readmore_engine::{
    DisplaySink, DisplayableResult, LineLayout, LineMeasurementOracle, MeasureCompletion,
    MeasureError, MeasureRequest, NullSink, ToggleController, ToggleState, TrimMode, TrimPolicy,
};

type Queue = Rc<RefCell<VecDeque<MeasureRequest>>>;

#[derive(Debug, Clone, Default)]
struct QueuedOracle {
    queue: Queue,
}

impl LineMeasurementOracle for QueuedOracle {
    fn request_measurement(&mut self, request: MeasureRequest) {
        self.queue.borrow_mut().push_back(request);
    }
}

/// Fixed-pitch layout: every line holds exactly `width` chars.
fn fixed_pitch(text: &str, width: u16) -> Result<LineLayout, MeasureError> {
    let width = usize::from(width);
    if width == 0 {
        return Err(MeasureError::ZeroWidth);
    }
    let len = text.chars().count();
    let mut ends: Vec<usize> = (1..)
        .map(|line| line * width)
        .take_while(|&end| end < len)
        .collect();
    ends.push(len);
    Ok(LineLayout::new(ends))
}

fn layout_pass(queue: &Queue) -> Vec<MeasureCompletion> {
    queue
        .borrow_mut()
        .drain(..)
        .map(|request| request.resolve(fixed_pitch))
        .collect()
}

fn deliver<S>(controller: &mut ToggleController<QueuedOracle, S>, queue: &Queue) -> usize
where
    S: DisplaySink,
{
    let mut applied = 0;
    for completion in layout_pass(queue) {
        if controller.complete_measurement(completion) {
            applied += 1;
        }
    }
    applied
}

fn controller(text: &str, policy: TrimPolicy) -> (ToggleController<QueuedOracle>, Queue) {
    let oracle = QueuedOracle::default();
    let queue = Rc::clone(&oracle.queue);
    (ToggleController::new(text, policy, oracle, NullSink), queue)
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                     tempor incididunt ut labore et dolore magna aliqua.";

#[test]
fn two_lines_that_fit_are_left_alone() {
    // 30 chars at width 15 is exactly two lines
    let text = "abcdefghijklmnopqrstuvwxyz0123";
    let (mut view, queue) = controller(text, TrimPolicy::lines(2));
    view.set_available_width(15);
    assert_eq!(deliver(&mut view, &queue), 1);

    assert_eq!(view.measurement().line_count(), Some(2));
    assert_eq!(view.displayable(), &DisplayableResult::plain(text));
}

#[test]
fn collapses_to_budget_after_layout_pass() {
    let (mut view, queue) = controller(LOREM, TrimPolicy::lines(2));
    view.set_available_width(30);
    assert_eq!(view.displayable().text(), LOREM);

    deliver(&mut view, &queue);
    // line 2 ends at 60; 60 - 14 = 46
    let expected = format!("{}... Read more", &LOREM[..46]);
    assert_eq!(view.displayable().text(), expected);
    assert_eq!(view.displayable().affordance_text(), Some("Read more"));
}

#[test]
fn toggle_round_trip_restores_collapsed_text() {
    let (mut view, queue) = controller(LOREM, TrimPolicy::lines(2));
    view.set_available_width(30);
    deliver(&mut view, &queue);
    let collapsed = view.displayable().clone();

    view.activate();
    assert_eq!(view.displayable().text(), format!("{LOREM}Read less"));
    view.activate();
    assert_eq!(view.displayable(), &collapsed);
    assert!(queue.borrow().is_empty(), "toggling must not remeasure");
}

#[test]
fn resize_supersedes_in_flight_request() {
    let (mut view, queue) = controller(LOREM, TrimPolicy::lines(2));
    view.set_available_width(30);
    view.set_available_width(50);
    assert_eq!(queue.borrow().len(), 2);

    assert_eq!(deliver(&mut view, &queue), 1, "only the newest pass applies");
    // line 2 ends at 100; 100 - 14 = 86
    assert!(view.displayable().text().starts_with(&LOREM[..86]));
    assert_eq!(view.available_width(), Some(50));
}

#[test]
fn new_text_while_expanded_stays_expanded() {
    let (mut view, queue) = controller(LOREM, TrimPolicy::lines(1));
    view.set_available_width(30);
    deliver(&mut view, &queue);
    view.activate();

    view.set_full_text("Another paragraph that is long enough to need trimming at thirty.");
    // full text while the new pass is pending
    assert_eq!(
        view.displayable().text(),
        "Another paragraph that is long enough to need trimming at thirty."
    );
    deliver(&mut view, &queue);
    assert_eq!(view.toggle_state(), ToggleState::Expanded);
    assert!(view.displayable().text().ends_with("thirty.Read less"));
}

#[test]
fn zero_width_layout_failure_shows_full_text() {
    let (mut view, queue) = controller(LOREM, TrimPolicy::lines(2));
    view.set_available_width(0);
    assert_eq!(deliver(&mut view, &queue), 1);
    assert_eq!(view.displayable(), &DisplayableResult::plain(LOREM));

    view.set_available_width(30);
    deliver(&mut view, &queue);
    assert!(view.displayable().affordance().is_some());
}

#[test]
fn more_lines_requested_than_exist_is_invalid_measurement() {
    let (mut view, queue) = controller("tiny", TrimPolicy::lines(3));
    view.set_available_width(30);
    deliver(&mut view, &queue);
    assert_eq!(view.measurement().usable_line_end(), None);
    view.activate();
    // invalid measurement renders the untouched text regardless of toggle
    assert_eq!(view.displayable(), &DisplayableResult::plain("tiny"));
}

#[test]
fn mode_switch_round_trip() {
    let (mut view, queue) = controller(LOREM, TrimPolicy::lines(2).with_max_length(20));
    view.set_available_width(30);
    deliver(&mut view, &queue);

    view.set_mode(TrimMode::Length);
    assert!(queue.borrow().is_empty());
    assert_eq!(
        view.displayable().text(),
        format!("{}... Read more", &LOREM[..21])
    );

    view.set_mode(TrimMode::Lines);
    assert_eq!(queue.borrow().len(), 1);
    assert_eq!(view.displayable().text(), LOREM);
    deliver(&mut view, &queue);
    assert!(view.displayable().text().starts_with(&LOREM[..46]));
}

#[test]
fn sink_receives_every_visible_change() {
    let log: Rc<RefCell<Vec<DisplayableResult>>> = Rc::default();
    let oracle = QueuedOracle::default();
    let queue = Rc::clone(&oracle.queue);
    let sink = {
        let log = Rc::clone(&log);
        move |result: &DisplayableResult| log.borrow_mut().push(result.clone())
    };
    let mut view = ToggleController::new(LOREM, TrimPolicy::lines(2), oracle, sink);
    view.set_available_width(30);
    deliver(&mut view, &queue);
    view.activate();

    let texts: Vec<String> = log.borrow().iter().map(|r| r.text().to_string()).collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[0], LOREM);
    assert!(texts[1].ends_with("... Read more"));
    assert!(texts[2].ends_with("Read less"));
}
