//! Deferred measurement for terminal views.
//!
//! Views never measure while they are being mutated. Their requests go onto a
//! channel, and the event loop resolves everything queued in one layout pass
//! per frame before routing completions back by [`ViewId`].

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

use readmore_engine::{LineMeasurementOracle, MeasureCompletion, MeasureRequest};

use crate::layout::wrap_line_ends;

/// Identifies which view a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

/// Oracle that forwards requests to a [`LayoutPass`].
#[derive(Debug, Clone)]
pub struct DeferredOracle {
    view: ViewId,
    tx: UnboundedSender<(ViewId, MeasureRequest)>,
}

impl LineMeasurementOracle for DeferredOracle {
    fn request_measurement(&mut self, request: MeasureRequest) {
        if self.tx.send((self.view, request)).is_err() {
            tracing::warn!(view = self.view.0, "layout pass closed; measurement dropped");
        }
    }
}

/// Queue of pending measurements shared by every view on screen.
#[derive(Debug)]
pub struct LayoutPass {
    tx: UnboundedSender<(ViewId, MeasureRequest)>,
    rx: UnboundedReceiver<(ViewId, MeasureRequest)>,
}

impl Default for LayoutPass {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutPass {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Oracle for one view feeding this pass.
    #[must_use]
    pub fn oracle(&self, view: ViewId) -> DeferredOracle {
        DeferredOracle {
            view,
            tx: self.tx.clone(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Resolve every queued request against the terminal layout.
    ///
    /// Requests queued while this runs wait for the next pass.
    pub fn run(&mut self) -> Vec<(ViewId, MeasureCompletion)> {
        let queued = self.rx.len();
        let mut completions = Vec::with_capacity(queued);
        for _ in 0..queued {
            match self.rx.try_recv() {
                Ok((view, request)) => {
                    completions.push((view, request.resolve(wrap_line_ends)));
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        if !completions.is_empty() {
            tracing::trace!(count = completions.len(), "layout pass resolved");
        }
        completions
    }
}
