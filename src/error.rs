use thiserror::Error;

use crate::dimension::{DraggableId, DroppableId};

/// Fatal misuse of the engine: impossible phase/argument combinations
/// rather than runtime conditions. The host recovers by dispatching
/// `Action::Flush`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot {action} while in phase {phase}")]
    WrongPhase { action: &'static str, phase: &'static str },
    #[error("draggable not found: {0:?}")]
    DraggableNotFound(DraggableId),
    #[error("droppable not found: {0:?}")]
    DroppableNotFound(DroppableId),
    #[error("droppable {0:?} has no scroll frame")]
    MissingFrame(DroppableId),
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}

/// Returns `EngineError::InvariantViolation` from the enclosing function
/// when the condition does not hold.
macro_rules! invariant {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::EngineError::InvariantViolation($msg));
        }
    };
}

pub(crate) use invariant;
