//! Reorder detection: which slot the dragged item currently claims.

use super::{AtLocation, DragImpact, ReorderLocation};
use crate::dimension::{DraggableDimension, DroppableDimension, Viewport};
use crate::displacement::{self, DisplacedBy, DisplacementGroups};
use crate::geometry::Rect;
use crate::impact::AfterCritical;

pub(crate) fn displaced_by_for(
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
) -> DisplacedBy {
    DisplacedBy::new(destination.axis, draggable.displace_by)
}

/// Walks siblings in index order and claims the slot of the first sibling
/// whose adjusted center the dragged box's leading edge has not passed.
/// No match appends at the end of the list.
pub fn get(
    with_scroll: &Rect,
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    inside: &[&DraggableDimension],
    last: &DisplacementGroups,
    viewport: &Viewport,
    after_critical: &AfterCritical,
) -> DragImpact {
    let axis = destination.axis;
    let in_home_list = destination.descriptor.id == draggable.descriptor.droppable_id;
    let displaced_by = displaced_by_for(draggable, destination);
    let displacement = displaced_by.value;
    let target_start = axis.start(with_scroll);
    let target_end = axis.end(with_scroll);

    let without_dragging: Vec<&DraggableDimension> = inside
        .iter()
        .filter(|child| child.descriptor.id != draggable.descriptor.id)
        .copied()
        .collect();

    let closest = without_dragging.iter().find(|child| {
        let id = child.descriptor.id;
        let center = axis.line(child.page.border_box.center());
        let started_displaced = after_critical.started_displaced(id);
        let is_displaced = last.contains(id);
        if started_displaced {
            // sits at rest while displaced, shifted backwards otherwise
            if is_displaced {
                target_end <= center
            } else {
                target_start < center - displacement
            }
        } else if is_displaced {
            target_end <= center + displacement
        } else {
            target_start < center
        }
    });

    let index = match closest {
        Some(child) => {
            let child_index = child.descriptor.index;
            // removing the dragged item shifts later home indexes down one
            if in_home_list && child_index > draggable.descriptor.index {
                child_index - 1
            } else {
                child_index
            }
        }
        None => without_dragging.len(),
    };

    calculate(CalculateArgs {
        destination,
        without_dragging: &without_dragging,
        viewport,
        displaced_by,
        last: Some(last),
        force_should_animate: None,
        index,
    })
}

pub struct CalculateArgs<'a> {
    pub destination: &'a DroppableDimension,
    /// Siblings with the dragged item removed, in index order.
    pub without_dragging: &'a [&'a DraggableDimension],
    pub viewport: &'a Viewport,
    pub displaced_by: DisplacedBy,
    pub last: Option<&'a DisplacementGroups>,
    pub force_should_animate: Option<bool>,
    pub index: usize,
}

/// Builds a reorder impact at `index`: everything from `index` onwards in
/// the removal-excluded sibling list is displaced.
pub fn calculate(args: CalculateArgs<'_>) -> DragImpact {
    let from = args.index.min(args.without_dragging.len());
    let displaced = displacement::build(
        &args.without_dragging[from..],
        args.destination,
        args.displaced_by,
        args.viewport.frame,
        args.last,
        args.force_should_animate,
    );
    DragImpact {
        displaced,
        displaced_by: args.displaced_by,
        at: Some(AtLocation::Reorder {
            destination: ReorderLocation {
                droppable_id: args.destination.descriptor.id,
                index: args.index,
            },
        }),
    }
}
