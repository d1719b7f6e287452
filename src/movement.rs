//! Directional (keyboard) movement. Unlike pointer movement, the impact is
//! stepped from the previous impact rather than derived from geometry, and
//! the pointer selection is back-computed from the impact.

use serde::{Deserialize, Serialize};

pub mod cross_axis;
pub mod next_place;

use crate::dimension::{DimensionMap, DraggableDimension, Viewport};
use crate::error::EngineError;
use crate::geometry::{Axis, Point};
use crate::impact::{AfterCritical, DragImpact};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }
}

/// Outcome of a directional move: the impact to commit, the client
/// selection that puts the dragged item in its new slot, and an optional
/// scroll the auto-scroll engine must perform to make the slot visible.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalMove {
    pub client_selection: Point,
    pub impact: DragImpact,
    pub scroll_jump_request: Option<Point>,
}

pub struct MoveArgs<'a> {
    pub direction: Direction,
    pub draggable: &'a DraggableDimension,
    pub dimensions: &'a DimensionMap,
    pub previous_impact: &'a DragImpact,
    pub viewport: &'a Viewport,
    pub after_critical: &'a AfterCritical,
    /// Current page border-box center of the dragged item.
    pub previous_page_center: Point,
    pub previous_client_selection: Point,
}

/// Directional moves along the current droppable's main axis step the
/// impact; cross-axis moves jump to the nearest droppable in that
/// direction. Returns `None` when there is nowhere to go.
pub fn move_in_direction(args: MoveArgs<'_>) -> Result<Option<DirectionalMove>, EngineError> {
    let over_id = args
        .previous_impact
        .dragged_over()
        .unwrap_or(args.draggable.descriptor.droppable_id);
    let droppable = args.dimensions.droppable(over_id)?;
    let is_main_axis = args.direction.axis() == droppable.axis;
    let forward = args.direction.is_forward();
    if is_main_axis {
        next_place::move_to_next_place(forward, droppable, &args)
    } else {
        cross_axis::move_cross_axis(forward, droppable, &args)
    }
}
