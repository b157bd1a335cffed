//! Per-frame render debouncing.
//!
//! State changes request a render; the host checks the gate once per frame.
//! A request that arrives while a frame is being drawn is dropped rather
//! than queued, so drawing can never trigger itself.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    /// First request since the last frame.
    Scheduled,
    /// Already scheduled for the next frame.
    Coalesced,
    /// A frame is in flight.
    Dropped,
}

#[derive(Debug, Default)]
pub struct RenderGate {
    dirty: bool,
    in_flight: bool,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> RenderRequest {
        if self.in_flight {
            debug!("render request dropped: frame in flight");
            RenderRequest::Dropped
        } else if self.dirty {
            RenderRequest::Coalesced
        } else {
            self.dirty = true;
            RenderRequest::Scheduled
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Start a frame if one is pending. Returns false when there is nothing
    /// to draw.
    pub fn begin_frame(&mut self) -> bool {
        if !self.dirty || self.in_flight {
            return false;
        }
        self.dirty = false;
        self.in_flight = true;
        true
    }

    pub fn end_frame(&mut self) {
        self.in_flight = false;
    }
}
