//! Lift-time effects: the impact representing "nothing has moved yet" and
//! the baseline displacement that later movement is interpreted against.

use serde::{Deserialize, Serialize};

use super::{AtLocation, DragImpact, ReorderLocation};
use crate::common::collections::HashSet;
use crate::dimension::{Critical, DimensionMap, DraggableId, DroppableMode, Viewport};
use crate::displacement::{self, DisplacedBy};
use crate::error::EngineError;

/// Effects fixed at lift time. Computed once per drag; only a mid-drag
/// publish recomputes it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AfterCritical {
    /// Siblings that were already displaced when the drag started (everything
    /// after the dragged item in its home list).
    pub effected: HashSet<DraggableId>,
    pub displaced_by: DisplacedBy,
    pub in_virtual_list: bool,
}

impl AfterCritical {
    pub fn started_displaced(&self, id: DraggableId) -> bool {
        self.effected.contains(&id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiftEffect {
    pub impact: DragImpact,
    pub after_critical: AfterCritical,
}

/// Computes the impact and after-critical baseline for a fresh capture of
/// dimensions. Displacement is not animated: visually nothing moves at lift.
pub fn get_lift_effect(
    critical: &Critical,
    dimensions: &DimensionMap,
    viewport: &Viewport,
) -> Result<LiftEffect, EngineError> {
    let draggable = dimensions.draggable(critical.draggable_id)?;
    let home = dimensions.droppable(critical.droppable_id)?;
    let displaced_by = DisplacedBy::new(home.axis, draggable.displace_by);

    let inside = dimensions.inside_droppable(home.descriptor.id);
    let position = inside
        .iter()
        .position(|child| child.descriptor.id == critical.draggable_id)
        .ok_or(EngineError::InvariantViolation(
            "dragged item is not inside its home droppable",
        ))?;
    let after_dragging = &inside[position + 1..];

    let after_critical = AfterCritical {
        effected: super::ids_of(after_dragging),
        displaced_by,
        in_virtual_list: home.descriptor.mode == DroppableMode::Virtual,
    };

    let displaced = displacement::build(
        after_dragging,
        home,
        displaced_by,
        viewport.frame,
        None,
        Some(false),
    );
    let impact = DragImpact {
        displaced,
        displaced_by,
        at: Some(AtLocation::Reorder {
            destination: ReorderLocation {
                droppable_id: home.descriptor.id,
                index: draggable.descriptor.index,
            },
        }),
    };
    Ok(LiftEffect { impact, after_critical })
}
