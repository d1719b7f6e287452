//! The drag state machine: IDLE, DRAGGING, COLLECTING, DROP_PENDING and
//! DROP_ANIMATING, driven by a fixed action vocabulary.

mod action;
mod drop;
mod publish;
mod reducer;
mod state;
#[cfg(test)]
mod tests;

pub use action::{Action, InitialPublish, ModifiedDroppable, Published};
pub use reducer::reduce;
pub use state::{
    CompletedDrag, DragPositions, DraggingState, DropAnimatingState, DropReason, DropResult,
    ItemPositions, MovementMode, State,
};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Owns the state and applies actions to it. A drop deferred by a mid-drag
/// collection is retried as soon as the publish lands.
#[derive(Debug, Default)]
pub struct DragEngine {
    config: EngineConfig,
    state: State,
}

impl DragEngine {
    pub fn new(config: EngineConfig) -> Self {
        DragEngine { config, state: State::default() }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies one action. On error the state is left untouched; the host
    /// recovers with [`Action::Flush`].
    pub fn dispatch(&mut self, action: Action) -> Result<(), EngineError> {
        let mut next = reducer::reduce(&self.state, action, &self.config)?;
        if let State::DropPending { dragging, reason, is_waiting: false } = &next {
            next = drop::resolve(dragging, *reason, &self.config)?;
        }
        self.state = next;
        Ok(())
    }
}
