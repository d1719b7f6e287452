//! Phase-tagged drag state. Every transition builds a whole new state value;
//! nothing is patched in place.

use serde::{Deserialize, Serialize};

use crate::dimension::{ContentKind, Critical, DimensionMap, DraggableId, Viewport};
use crate::geometry::Point;
use crate::impact::{AfterCritical, Combine, DragImpact, ReorderLocation};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MovementMode {
    /// Pointer driven: the impact follows the pointer every move.
    Fluid,
    /// Keyboard driven: the impact is stepped and the pointer follows it.
    Snap,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
    Drop,
    Cancel,
}

/// Selection point, border-box center and offset from lift of the dragged
/// item, all in one coordinate space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPositions {
    pub selection: Point,
    pub border_box_center: Point,
    pub offset: Point,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DragPositions {
    pub client: ItemPositions,
    pub page: ItemPositions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraggingState {
    pub critical: Critical,
    pub movement_mode: MovementMode,
    pub dimensions: DimensionMap,
    pub initial: DragPositions,
    pub current: DragPositions,
    pub impact: DragImpact,
    /// The impact as it was at lift, used to send everything home on cancel.
    pub on_lift_impact: DragImpact,
    pub after_critical: AfterCritical,
    pub viewport: Viewport,
    pub is_window_scroll_allowed: bool,
    /// Scroll the auto-scroll engine still has to perform for a keyboard
    /// move whose slot was off screen.
    pub scroll_jump_request: Option<Point>,
    pub force_should_animate: Option<bool>,
}

/// Outcome of a finished drag, reported to the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropResult {
    pub draggable_id: DraggableId,
    pub kind: ContentKind,
    pub source: ReorderLocation,
    pub destination: Option<ReorderLocation>,
    pub combine: Option<Combine>,
    pub mode: MovementMode,
    pub reason: DropReason,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedDrag {
    pub critical: Critical,
    pub result: DropResult,
    pub impact: DragImpact,
    pub after_critical: AfterCritical,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropAnimatingState {
    pub completed: CompletedDrag,
    /// Client-space offset the dragged item animates to from its lift
    /// position.
    pub new_home_client_offset: Point,
    /// Seconds.
    pub drop_duration: f64,
    pub dimensions: DimensionMap,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    /// No drag in flight. Holds the most recently completed drag until the
    /// next lift so the host can render the post-drop state.
    Idle { completed: Option<CompletedDrag> },
    Dragging(DraggingState),
    /// Dragging while a virtual list collects new dimensions.
    Collecting(DraggingState),
    /// A drop was requested mid-collection and waits for the publish.
    DropPending {
        dragging: DraggingState,
        reason: DropReason,
        is_waiting: bool,
    },
    DropAnimating(DropAnimatingState),
}

impl State {
    pub fn phase(&self) -> &'static str {
        match self {
            State::Idle { .. } => "IDLE",
            State::Dragging(_) => "DRAGGING",
            State::Collecting(_) => "COLLECTING",
            State::DropPending { .. } => "DROP_PENDING",
            State::DropAnimating(_) => "DROP_ANIMATING",
        }
    }

    pub fn is_movement_allowed(&self) -> bool {
        matches!(self, State::Dragging(_) | State::Collecting(_))
    }

    pub fn dragging(&self) -> Option<&DraggingState> {
        match self {
            State::Dragging(dragging) | State::Collecting(dragging) => Some(dragging),
            State::DropPending { dragging, .. } => Some(dragging),
            _ => None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::Idle { completed: None }
    }
}
