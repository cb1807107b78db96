//! Edge endpoint drag tracking.
//!
//! When the user grabs the end of an existing edge, the canvas fires
//! `edge-update-start`, then `edge-update` if the endpoint is dropped on a
//! valid handle, then always `edge-update-end`. An edge whose drag ends without
//! a successful update is dropped from the diagram.
//!
//! ```text
//!   Idle ──start──▶ DraggingEndpoint{succeeded: false}
//!                        │ update
//!                        ▼
//!                   DraggingEndpoint{succeeded: true}
//!   Idle ◀──end── (either)
//! ```

use crate::diagram::EdgeId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReconnectState {
    #[default]
    Idle,
    DraggingEndpoint { edge: EdgeId, succeeded: bool },
}

/// What to do with an edge once its endpoint drag ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconnectOutcome {
    /// The edge was reconnected (or no drag was in progress); keep it.
    Kept,
    /// Released over empty space; remove the edge.
    Abandoned,
}

#[derive(Clone, Debug, Default)]
pub struct ReconnectTracker {
    state: ReconnectState,
}

impl ReconnectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ReconnectState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ReconnectState::DraggingEndpoint { .. })
    }

    /// Begin dragging an endpoint of `edge`.
    pub fn start(&mut self, edge: EdgeId) {
        self.state = ReconnectState::DraggingEndpoint { edge, succeeded: false };
    }

    /// Record that the endpoint landed on a valid handle.
    ///
    /// `new_id` is the id the edge carries after the update.
    pub fn mark_success(&mut self, new_id: EdgeId) {
        if let ReconnectState::DraggingEndpoint { edge, succeeded } = &mut self.state {
            *edge = new_id;
            *succeeded = true;
        }
    }

    /// Finish the drag and return to idle.
    pub fn finish(&mut self) -> ReconnectOutcome {
        match std::mem::take(&mut self.state) {
            ReconnectState::DraggingEndpoint { succeeded: false, .. } => ReconnectOutcome::Abandoned,
            _ => ReconnectOutcome::Kept,
        }
    }
}
