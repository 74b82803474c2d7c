//! Line measurement contract between the controller and a layout engine.
//!
//! Measurement is request/response. The controller issues a
//! [`MeasureRequest`] tagged with a [`MeasureTicket`]; the layout engine runs
//! whenever it runs and hands back exactly one [`MeasureCompletion`] carrying
//! the same ticket. Each new request supersedes the previous one, so a
//! completion whose ticket is no longer current is discarded.

use std::sync::Arc;

use readmore_types::LineLayout;
use thiserror::Error;

/// Generation tag of a measurement request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeasureTicket(u64);

impl MeasureTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub(crate) const fn first() -> Self {
        Self(0)
    }
}

/// One measurement pass over the full text at a given width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureRequest {
    pub ticket: MeasureTicket,
    pub text: Arc<str>,
    pub available_width: u16,
}

impl MeasureRequest {
    /// Run `measure` against this request and package the outcome.
    pub fn resolve<F>(&self, measure: F) -> MeasureCompletion
    where
        F: FnOnce(&str, u16) -> Result<LineLayout, MeasureError>,
    {
        MeasureCompletion {
            ticket: self.ticket,
            outcome: measure(&self.text, self.available_width),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureCompletion {
    pub ticket: MeasureTicket,
    pub outcome: Result<LineLayout, MeasureError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error("no width available for layout")]
    ZeroWidth,
    #[error("layout engine failed: {0}")]
    Layout(String),
}

/// Adapter over a host layout engine.
///
/// Implementations must not measure synchronously from inside
/// `request_measurement` and feed the result straight back into the
/// controller: the controller is mutably borrowed while it issues the
/// request. Queue it and deliver the completion from the event loop.
pub trait LineMeasurementOracle {
    fn request_measurement(&mut self, request: MeasureRequest);
}

impl<O: LineMeasurementOracle + ?Sized> LineMeasurementOracle for Box<O> {
    fn request_measurement(&mut self, request: MeasureRequest) {
        (**self).request_measurement(request);
    }
}
