//! Turns a pointer position into a reorder/combine decision.

use serde::{Deserialize, Serialize};

pub mod center;
pub mod combine;
pub mod droppable_over;
pub mod lift;
pub mod reorder;

pub use lift::{AfterCritical, LiftEffect, get_lift_effect};

use crate::common::collections::HashSet;
use crate::dimension::{
    DimensionMap, DraggableDimension, DraggableId, DroppableDimension, DroppableId, Viewport,
};
use crate::displacement::{self, DisplacedBy, DisplacementGroups};
use crate::error::EngineError;
use crate::geometry::{ORIGIN, Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderLocation {
    pub droppable_id: DroppableId,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combine {
    pub draggable_id: DraggableId,
    pub droppable_id: DroppableId,
}

/// Where the dragged item currently lands. Exactly one variant is present
/// when the drag is over a droppable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AtLocation {
    Reorder { destination: ReorderLocation },
    Combine { combine: Combine },
}

/// The computed effect of the current drag position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DragImpact {
    pub displaced: DisplacementGroups,
    pub displaced_by: DisplacedBy,
    pub at: Option<AtLocation>,
}

impl DragImpact {
    /// Over nothing: no displacement, no destination.
    pub fn none() -> Self {
        DragImpact::default()
    }

    pub fn destination(&self) -> Option<ReorderLocation> {
        match self.at {
            Some(AtLocation::Reorder { destination }) => Some(destination),
            _ => None,
        }
    }

    pub fn combine(&self) -> Option<Combine> {
        match self.at {
            Some(AtLocation::Combine { combine }) => Some(combine),
            _ => None,
        }
    }

    /// The droppable the drag is currently over, regardless of whether the
    /// result is a reorder or a combine.
    pub fn dragged_over(&self) -> Option<DroppableId> {
        match self.at {
            Some(AtLocation::Reorder { destination }) => Some(destination.droppable_id),
            Some(AtLocation::Combine { combine }) => Some(combine.droppable_id),
            None => None,
        }
    }
}

pub struct ImpactArgs<'a> {
    /// Current page offset of the dragged item from its lift position.
    pub page_offset: Point,
    pub draggable: &'a DraggableDimension,
    pub dimensions: &'a DimensionMap,
    pub previous: &'a DragImpact,
    pub viewport: &'a Viewport,
    pub after_critical: &'a AfterCritical,
}

/// Full impact recomputation from the current position: find the droppable
/// under the dragged box, then try a combine, then fall back to a reorder.
pub fn get_drag_impact(args: ImpactArgs<'_>) -> Result<DragImpact, EngineError> {
    let page_border_box = args.draggable.page.border_box.offset(args.page_offset);
    let Some(destination_id) =
        droppable_over::find(&page_border_box, args.draggable, args.dimensions)
    else {
        return Ok(DragImpact::none());
    };
    let destination = args.dimensions.droppable(destination_id)?;
    let inside = args.dimensions.inside_droppable(destination_id);
    // candidate geometry is compared in lift-time coordinates
    let with_scroll = page_border_box.offset(destination.scroll_change());

    if let Some(impact) = combine::find(
        &with_scroll,
        args.draggable,
        destination,
        &inside,
        args.previous,
        args.after_critical,
    ) {
        return Ok(impact);
    }

    Ok(reorder::get(
        &with_scroll,
        args.draggable,
        destination,
        &inside,
        &args.previous.displaced,
        args.viewport,
        args.after_critical,
    ))
}

/// Rebuilds the displacement partition of an existing impact against fresh
/// geometry. The impact location is kept; only visibility and animation
/// flags are refreshed.
pub fn recompute_displacement(
    impact: &DragImpact,
    destination: &DroppableDimension,
    dimensions: &DimensionMap,
    viewport_frame: Rect,
    force_should_animate: Option<bool>,
) -> Result<DragImpact, EngineError> {
    let after_dragging: Vec<&DraggableDimension> = impact
        .displaced
        .all
        .iter()
        .map(|id| dimensions.draggable(*id))
        .collect::<Result<_, _>>()?;
    let displaced = displacement::build(
        &after_dragging,
        destination,
        impact.displaced_by,
        viewport_frame,
        Some(&impact.displaced),
        force_should_animate,
    );
    Ok(DragImpact { displaced, ..impact.clone() })
}

/// Visual offset of one (non-dragged) draggable under an impact. Items that
/// were already shifted at lift render at rest while displaced, and close
/// the gap when they are not.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualDisplacement {
    pub offset: Point,
    pub should_animate: bool,
}

pub fn displacement_of(
    id: DraggableId,
    impact: &DragImpact,
    after_critical: &AfterCritical,
) -> VisualDisplacement {
    let started_displaced = after_critical.started_displaced(id);
    if let Some(entry) = impact.displaced.visible.get(&id) {
        let offset = if started_displaced { ORIGIN } else { impact.displaced_by.point };
        return VisualDisplacement { offset, should_animate: entry.should_animate };
    }
    if impact.displaced.invisible.contains(&id) {
        let offset = if started_displaced { ORIGIN } else { impact.displaced_by.point };
        return VisualDisplacement { offset, should_animate: false };
    }
    if started_displaced {
        return VisualDisplacement {
            offset: -after_critical.displaced_by.point,
            should_animate: true,
        };
    }
    VisualDisplacement { offset: ORIGIN, should_animate: false }
}

pub(crate) fn ids_of(draggables: &[&DraggableDimension]) -> HashSet<DraggableId> {
    draggables.iter().map(|draggable| draggable.descriptor.id).collect()
}
