//! Truncation decisions.
//!
//! Everything here is a pure function of `(text, policy, toggle, measurement)`:
//! calling it twice with the same inputs yields the same result, and the full
//! text is never modified.

use readmore_types::text::{char_len, char_prefix};
use readmore_types::{
    AffordanceAction, DisplayableResult, ELLIPSIS, MeasurementState, ToggleState, TrimMode,
    TrimPolicy,
};

/// Compute what should be displayed for `text` right now.
#[must_use]
pub fn displayable(
    text: &str,
    policy: &TrimPolicy,
    toggle: ToggleState,
    measurement: &MeasurementState,
) -> DisplayableResult {
    match policy.mode() {
        TrimMode::Length => by_length(text, policy, toggle),
        TrimMode::Lines => by_lines(text, policy, toggle, measurement),
    }
}

fn by_length(text: &str, policy: &TrimPolicy, toggle: ToggleState) -> DisplayableResult {
    let len = char_len(text);
    if len <= policy.max_length() {
        return DisplayableResult::plain(text);
    }
    match toggle {
        ToggleState::Collapsed => {
            let cut = policy.max_length().saturating_add(1).min(len);
            collapsed(text, policy, cut)
        }
        ToggleState::Expanded => expanded(text, policy),
    }
}

fn by_lines(
    text: &str,
    policy: &TrimPolicy,
    toggle: ToggleState,
    measurement: &MeasurementState,
) -> DisplayableResult {
    // Geometry unknown or target line missing: defer until a valid pass.
    let Some(line_end) = measurement.usable_line_end() else {
        return DisplayableResult::plain(text);
    };
    if toggle.is_expanded() {
        return expanded(text, policy);
    }
    let fits = measurement
        .line_count()
        .is_some_and(|count| count <= policy.max_lines());
    if fits {
        return DisplayableResult::plain(text);
    }
    collapsed(text, policy, line_cut_index(line_end, policy, char_len(text)))
}

/// Cut point for line mode, in chars.
///
/// Reserves room on the target line for the ellipsis and the collapsed
/// affordance. When the affordance is wider than the line itself, falls back
/// to the character budget, clamped to the text.
#[must_use]
pub fn line_cut_index(line_end: usize, policy: &TrimPolicy, text_len: usize) -> usize {
    let cut = line_end
        .checked_sub(policy.collapsed_reserve())
        .unwrap_or_else(|| {
            tracing::debug!(
                line_end,
                reserve = policy.collapsed_reserve(),
                "affordance wider than target line; using length budget"
            );
            policy.max_length().saturating_add(1)
        });
    cut.min(text_len)
}

fn collapsed(text: &str, policy: &TrimPolicy, cut: usize) -> DisplayableResult {
    let mut body = String::with_capacity(text.len() + ELLIPSIS.len());
    body.push_str(char_prefix(text, cut));
    body.push_str(ELLIPSIS);
    DisplayableResult::with_trailing_affordance(
        body,
        policy.collapsed_text(),
        AffordanceAction::Expand,
    )
}

fn expanded(text: &str, policy: &TrimPolicy) -> DisplayableResult {
    if !policy.show_expanded_affordance() {
        return DisplayableResult::plain(text);
    }
    DisplayableResult::with_trailing_affordance(
        text.to_string(),
        policy.expanded_text(),
        AffordanceAction::Collapse,
    )
}
