//! Combine detection: the dragged item grouping with a sibling rather than
//! taking a slot between siblings.

use super::{AtLocation, Combine, DragImpact};
use crate::dimension::{DraggableDimension, DroppableDimension};
use crate::geometry::Rect;
use crate::impact::AfterCritical;

/// Looks for a sibling whose displacement-adjusted main-axis extent holds
/// the dragged box's leading edge inside its middle half (a `size / 4`
/// threshold from each edge). A hit reuses the previous displacement
/// groups unchanged so siblings hold position while combining.
pub fn find(
    with_scroll: &Rect,
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    inside: &[&DraggableDimension],
    previous: &DragImpact,
    after_critical: &AfterCritical,
) -> Option<DragImpact> {
    if !destination.is_combine_enabled {
        return None;
    }
    let axis = destination.axis;
    let displacement = super::reorder::displaced_by_for(draggable, destination).value;
    let target_start = axis.start(with_scroll);
    let target_end = axis.end(with_scroll);
    let target_center = axis.line(with_scroll.center());

    let target = inside
        .iter()
        .filter(|child| child.descriptor.id != draggable.descriptor.id)
        .find(|child| {
            let id = child.descriptor.id;
            let rect = child.page.border_box;
            let threshold = axis.size(&rect) / 4.0;
            let started_displaced = after_critical.started_displaced(id);
            let is_displaced = previous.displaced.contains(id);
            // where the child currently sits relative to its captured rect
            let shift = if started_displaced {
                if is_displaced { 0.0 } else { -displacement }
            } else if is_displaced {
                displacement
            } else {
                0.0
            };
            let start = axis.start(&rect) + shift;
            let end = axis.end(&rect) + shift;
            // edge of the dragged box facing the child
            let leading = if target_center < (start + end) / 2.0 {
                target_end
            } else {
                target_start
            };
            leading > start + threshold && leading < end - threshold
        })?;

    Some(DragImpact {
        displaced: previous.displaced.clone(),
        displaced_by: previous.displaced_by,
        at: Some(AtLocation::Combine {
            combine: Combine {
                draggable_id: target.descriptor.id,
                droppable_id: destination.descriptor.id,
            },
        }),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::dimension::{
        ContentKind, DraggableDescriptor, DraggableId, DroppableDescriptor, DroppableId,
        DroppableMode,
    };
    use crate::displacement::{DisplacedBy, Displacement, DisplacementGroups};
    use crate::geometry::{Axis, BoxModel, ORIGIN, Point, Rect, Size};

    const LIST: DroppableId = DroppableId(1);

    fn item(id: u64, index: usize) -> DraggableDimension {
        let rect = Rect::from_point_size(
            Point::new(0.0, index as f64 * 100.0),
            Size::new(100.0, 100.0),
        );
        DraggableDimension::new(
            DraggableDescriptor {
                id: DraggableId(id),
                droppable_id: LIST,
                kind: ContentKind::default(),
                index,
            },
            BoxModel::tight(rect),
            BoxModel::tight(rect),
        )
    }

    fn list(is_combine_enabled: bool) -> DroppableDimension {
        let page = BoxModel::tight(Rect::from_point_size(ORIGIN, Size::new(100.0, 300.0)));
        DroppableDimension::new(
            DroppableDescriptor {
                id: LIST,
                kind: ContentKind::default(),
                mode: DroppableMode::Standard,
            },
            Axis::Vertical,
            true,
            is_combine_enabled,
            page,
            page,
            None,
        )
    }

    /// Item 0 lifted from a three-item list: siblings 1 and 2 displaced.
    fn lifted() -> (DragImpact, AfterCritical) {
        let displaced_by = DisplacedBy::new(Axis::Vertical, Point::new(100.0, 100.0));
        let mut displaced = DisplacementGroups::empty();
        for id in [1u64, 2] {
            displaced.all.push(DraggableId(id));
            displaced
                .visible
                .insert(DraggableId(id), Displacement { should_animate: false });
        }
        let previous = DragImpact { displaced, displaced_by, at: None };
        let mut after_critical = AfterCritical::default();
        after_critical.displaced_by = displaced_by;
        after_critical.effected.insert(DraggableId(1));
        after_critical.effected.insert(DraggableId(2));
        (previous, after_critical)
    }

    /// Item 0 dragged `dy` down from its lift position.
    fn find_at(
        dy: f64,
        destination: &DroppableDimension,
        previous: &DragImpact,
        after_critical: &AfterCritical,
    ) -> Option<DragImpact> {
        let dragged = item(0, 0);
        let with_scroll = dragged.page.border_box.offset(Point::new(0.0, dy));
        let items = [item(0, 0), item(1, 1), item(2, 2)];
        let inside: Vec<&DraggableDimension> = items.iter().collect();
        find(&with_scroll, &dragged, destination, &inside, previous, after_critical)
    }

    // item 1 occupies 100..200, so its middle half is 125..175

    #[test]
    fn leading_edge_inside_the_middle_half_combines() {
        let (previous, after_critical) = lifted();
        let impact = find_at(30.0, &list(true), &previous, &after_critical).unwrap();
        let combine = impact.combine().unwrap();
        assert_eq!(combine.draggable_id, DraggableId(1));
        assert_eq!(combine.droppable_id, LIST);
        // siblings hold position while combining
        assert_eq!(impact.displaced, previous.displaced);
    }

    #[test]
    fn leading_edge_short_of_the_threshold_does_not_combine() {
        let (previous, after_critical) = lifted();
        assert_eq!(find_at(20.0, &list(true), &previous, &after_critical), None);
    }

    #[test]
    fn leading_edge_past_the_threshold_does_not_combine() {
        let (previous, after_critical) = lifted();
        // bottom edge at 180, past item 1's band and short of item 2's
        assert_eq!(find_at(80.0, &list(true), &previous, &after_critical), None);
    }

    #[test]
    fn the_band_tracks_a_sibling_that_closed_the_gap() {
        // item 1 has been passed and sits 100px up; detection measures
        // against item 2 in its captured position instead
        let (mut previous, after_critical) = lifted();
        previous.displaced.all = vec![DraggableId(2)];
        previous.displaced.visible.remove(&DraggableId(1));
        let impact = find_at(130.0, &list(true), &previous, &after_critical).unwrap();
        assert_eq!(impact.combine().unwrap().draggable_id, DraggableId(2));
    }

    #[test]
    fn a_list_without_combining_never_combines() {
        let (previous, after_critical) = lifted();
        assert_eq!(find_at(30.0, &list(false), &previous, &after_critical), None);
    }
}
