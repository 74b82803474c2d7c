//! Core domain types for readmore.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer: the engine computes with them, the
//! terminal adapter renders them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod display;
mod policy;
pub mod text;

pub use display::{
    AffordanceAction, AffordanceSpan, DisplayableResult, LineLayout, MeasurementState, ToggleState,
};
pub use policy::{
    AffordanceColor, AffordanceColorError, DEFAULT_COLLAPSED_TEXT, DEFAULT_EXPANDED_TEXT,
    DEFAULT_TRIM_LENGTH, DEFAULT_TRIM_LINES, ELLIPSIS, TrimMode, TrimModeError, TrimPolicy,
};
