//! Core engine for readmore - truncation decisions and the toggle state machine.
//!
//! This crate has no TUI dependencies. A host supplies a
//! [`LineMeasurementOracle`] bound to its layout engine and a [`DisplaySink`]
//! that applies each [`DisplayableResult`] to its rendering surface.

mod config;
mod controller;
mod oracle;
mod truncation;

pub use config::{
    AppConfig, ConfigError, ReadMoreConfig, TRIM_MODE_ENV, TrimConfig, config_path,
    expand_env_vars,
};
pub use controller::{DisplaySink, NullSink, ToggleController};
pub use oracle::{
    LineMeasurementOracle, MeasureCompletion, MeasureError, MeasureRequest, MeasureTicket,
};
pub use truncation::{displayable, line_cut_index};

// Re-export from types for public API
pub use readmore_types::{
    AffordanceAction, AffordanceColor, AffordanceSpan, DisplayableResult, ELLIPSIS, LineLayout,
    MeasurementState, ToggleState, TrimMode, TrimPolicy,
};
