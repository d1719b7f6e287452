//! Which droppable is under the dragged item.

use std::cmp::Ordering;

use crate::dimension::{DimensionMap, DraggableDimension, DroppableDimension, DroppableId};
use crate::geometry::{Rect, is_within};

/// Finds the droppable targeted by the dragged item's current page border
/// box. Disabled droppables, droppables of another content kind and
/// droppables with no active rectangle never match.
pub fn find(
    page_border_box: &Rect,
    draggable: &DraggableDimension,
    dimensions: &DimensionMap,
) -> Option<DroppableId> {
    let candidates: Vec<(&DroppableDimension, Rect)> = dimensions
        .droppables_ordered()
        .into_iter()
        .filter(|droppable| droppable.is_enabled)
        .filter(|droppable| droppable.descriptor.kind == draggable.descriptor.kind)
        .filter_map(|droppable| {
            let active = droppable.subject.active?;
            active.overlaps(page_border_box).then_some((droppable, active))
        })
        .collect();

    match candidates.as_slice() {
        [] => None,
        [(single, _)] => Some(single.descriptor.id),
        _ => {
            // really large items can straddle multiple lists; prefer a list
            // whose active rectangle lines up with the dragged center on
            // its cross axis, otherwise take the nearest by center distance
            let center = page_border_box.center();
            if let Some((contains, _)) = candidates.iter().find(|(droppable, active)| {
                let axis = droppable.axis;
                is_within(axis.cross_start(active), axis.cross_end(active), axis.cross_line(center))
            }) {
                return Some(contains.descriptor.id);
            }
            candidates
                .iter()
                .min_by(|(_, a), (_, b)| {
                    let to_a = center.distance_to(a.center());
                    let to_b = center.distance_to(b.center());
                    to_a.partial_cmp(&to_b).unwrap_or(Ordering::Equal)
                })
                .map(|(droppable, _)| droppable.descriptor.id)
        }
    }
}
