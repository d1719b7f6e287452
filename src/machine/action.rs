use serde::{Deserialize, Serialize};

use super::state::{DropReason, MovementMode};
use crate::dimension::{
    Critical, DimensionMap, DraggableDimension, DraggableId, DroppableId, Viewport,
};
use crate::geometry::Point;

/// Everything a lift needs: the captured dimensions, where the window is,
/// and where the user grabbed the item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitialPublish {
    pub critical: Critical,
    pub dimensions: DimensionMap,
    pub viewport: Viewport,
    pub client_selection: Point,
    pub movement_mode: MovementMode,
    pub is_window_scroll_allowed: bool,
}

/// Dimension changes published by a virtual list mid-drag. Additions are
/// measured under the publisher's current container scroll.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Published {
    pub additions: Vec<DraggableDimension>,
    pub removals: Vec<DraggableId>,
    pub modified: Vec<ModifiedDroppable>,
}

impl Published {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty() && self.modified.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModifiedDroppable {
    pub droppable_id: DroppableId,
    pub scroll: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    InitialPublish(Box<InitialPublish>),
    CollectionStarting,
    PublishWhileDragging(Published),
    Move { client: Point },
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    UpdateDroppableScroll { id: DroppableId, new_scroll: Point },
    UpdateDroppableIsEnabled { id: DroppableId, is_enabled: bool },
    UpdateDroppableIsCombineEnabled { id: DroppableId, is_combine_enabled: bool },
    MoveByWindowScroll { new_scroll: Point },
    UpdateViewportMaxScroll { max_scroll: Point },
    Drop { reason: DropReason },
    DropComplete,
    Flush,
}
