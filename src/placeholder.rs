//! Reserved space in a foreign droppable while the dragged item hovers over
//! it. Adding then removing a placeholder reproduces the original droppable
//! exactly, and at most one droppable holds a placeholder at any time.

use tracing::trace;

use crate::dimension::{
    DimensionMap, DraggableId, DroppableDimension, DroppableMode, DroppableSubject,
    PlaceholderInSubject, Scrollable,
};
use crate::error::{EngineError, invariant};
use crate::geometry::Point;
use crate::impact::DragImpact;

/// How much the subject must grow for the placeholder, if the list's
/// existing trailing slack is not enough. Virtual lists always grow: their
/// measured content never includes slack.
fn required_growth(
    droppable: &DroppableDimension,
    placeholder_size: Point,
    dimensions: &DimensionMap,
) -> Option<Point> {
    let axis = droppable.axis;
    if droppable.descriptor.mode == DroppableMode::Virtual {
        return Some(axis.unit(axis.line(placeholder_size)));
    }
    let available = axis.size(&droppable.subject.page.content_box);
    let used: f64 = dimensions
        .inside_droppable(droppable.descriptor.id)
        .iter()
        .map(|child| axis.size(&child.client.margin_box))
        .sum();
    let needed = used + axis.line(placeholder_size) - available;
    (needed > 0.0).then(|| axis.unit(needed))
}

pub fn add_placeholder(
    droppable: &DroppableDimension,
    placeholder_size: Point,
    dimensions: &DimensionMap,
) -> Result<DroppableDimension, EngineError> {
    invariant!(
        droppable.subject.with_placeholder.is_none(),
        "cannot add a placeholder to a droppable that already has one"
    );
    let increased_by = required_growth(droppable, placeholder_size, dimensions);

    let Some(frame) = &droppable.frame else {
        let with_placeholder = PlaceholderInSubject {
            placeholder_size,
            increased_by,
            old_frame_max_scroll: None,
        };
        let subject = DroppableSubject::compute(
            droppable.subject.page,
            Some(with_placeholder),
            droppable.axis,
            None,
        );
        return Ok(DroppableDimension { subject, ..droppable.clone() });
    };

    let old_max = frame.scroll.max;
    let new_max = increased_by.map_or(old_max, |growth| old_max + growth);
    let frame = Scrollable {
        scroll: crate::dimension::ScrollDetails { max: new_max, ..frame.scroll },
        ..frame.clone()
    };
    let with_placeholder = PlaceholderInSubject {
        placeholder_size,
        increased_by,
        old_frame_max_scroll: Some(old_max),
    };
    let subject = DroppableSubject::compute(
        droppable.subject.page,
        Some(with_placeholder),
        droppable.axis,
        Some(&frame),
    );
    Ok(DroppableDimension { frame: Some(frame), subject, ..droppable.clone() })
}

pub fn remove_placeholder(
    droppable: &DroppableDimension,
) -> Result<DroppableDimension, EngineError> {
    let placeholder = droppable
        .subject
        .with_placeholder
        .ok_or(EngineError::InvariantViolation(
            "cannot remove a placeholder from a droppable without one",
        ))?;

    let Some(frame) = &droppable.frame else {
        let subject =
            DroppableSubject::compute(droppable.subject.page, None, droppable.axis, None);
        return Ok(DroppableDimension { subject, ..droppable.clone() });
    };

    let old_max = placeholder
        .old_frame_max_scroll
        .ok_or(EngineError::InvariantViolation(
            "placeholder on a framed droppable lost its original max scroll",
        ))?;
    let frame = Scrollable {
        scroll: crate::dimension::ScrollDetails { max: old_max, ..frame.scroll },
        ..frame.clone()
    };
    let subject =
        DroppableSubject::compute(droppable.subject.page, None, droppable.axis, Some(&frame));
    Ok(DroppableDimension { frame: Some(frame), subject, ..droppable.clone() })
}

/// Brings the dimension set in line with the current impact: the foreign
/// droppable being dragged over holds the one placeholder, everything else
/// gives its space back.
pub fn reconcile(
    dimensions: &mut DimensionMap,
    impact: &DragImpact,
    dragged: DraggableId,
) -> Result<(), EngineError> {
    let draggable = dimensions.draggable(dragged)?;
    let home_id = draggable.descriptor.droppable_id;
    let placeholder_size = draggable.displace_by;
    let desired = impact.dragged_over().filter(|over| *over != home_id);

    let holding: Vec<_> = dimensions
        .droppables
        .values()
        .filter(|droppable| droppable.subject.with_placeholder.is_some())
        .filter(|droppable| Some(droppable.descriptor.id) != desired)
        .map(|droppable| droppable.descriptor.id)
        .collect();
    for id in holding {
        trace!(droppable = id.0, "releasing placeholder");
        let restored = remove_placeholder(dimensions.droppable(id)?)?;
        dimensions.droppables.insert(id, restored);
    }

    if let Some(id) = desired {
        let droppable = dimensions.droppable(id)?;
        if droppable.subject.with_placeholder.is_none() {
            trace!(droppable = id.0, "reserving placeholder space");
            let grown = add_placeholder(droppable, placeholder_size, dimensions)?;
            dimensions.droppables.insert(id, grown);
        }
    }
    Ok(())
}
