//! Immutable measurement snapshots captured at lift and patched only by
//! scroll updates, placeholder changes and mid-drag publishes.

use serde::{Deserialize, Serialize};

pub mod draggable;
pub mod droppable;
pub mod viewport;

pub use draggable::{DraggableDescriptor, DraggableDimension};
pub use droppable::{
    DroppableDescriptor, DroppableDimension, DroppableMode, DroppableSubject, PlaceholderInSubject,
    Scrollable,
};
pub use viewport::{ScrollDetails, ScrollDiff, Viewport};

use crate::common::collections::HashMap;
use crate::error::EngineError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DraggableId(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DroppableId(pub u64);

/// Content kind shared by a draggable and the droppables that accept it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKind(pub u32);

/// The draggable/droppable pair fixed at lift time. The stored index is the
/// index at lift and does not follow later reordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critical {
    pub draggable_id: DraggableId,
    pub droppable_id: DroppableId,
    pub index: usize,
}

/// Every dimension the engine knows about for the current drag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionMap {
    pub draggables: HashMap<DraggableId, DraggableDimension>,
    pub droppables: HashMap<DroppableId, DroppableDimension>,
}

impl DimensionMap {
    pub fn draggable(&self, id: DraggableId) -> Result<&DraggableDimension, EngineError> {
        self.draggables.get(&id).ok_or(EngineError::DraggableNotFound(id))
    }

    pub fn droppable(&self, id: DroppableId) -> Result<&DroppableDimension, EngineError> {
        self.droppables.get(&id).ok_or(EngineError::DroppableNotFound(id))
    }

    /// Draggables inside a droppable, ordered by index.
    pub fn inside_droppable(&self, id: DroppableId) -> Vec<&DraggableDimension> {
        let mut inside: Vec<&DraggableDimension> = self
            .draggables
            .values()
            .filter(|draggable| draggable.descriptor.droppable_id == id)
            .collect();
        inside.sort_by_key(|draggable| draggable.descriptor.index);
        inside
    }

    /// Droppables in a stable order (by id). Map iteration order is not
    /// deterministic and must never leak into impact decisions.
    pub fn droppables_ordered(&self) -> Vec<&DroppableDimension> {
        let mut all: Vec<&DroppableDimension> = self.droppables.values().collect();
        all.sort_by_key(|droppable| droppable.descriptor.id);
        all
    }
}
