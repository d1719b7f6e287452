//! Cross-axis movement: jumping the drag into a neighbouring droppable.

use std::cmp::Ordering;

use tracing::debug;

use super::{DirectionalMove, MoveArgs};
use crate::dimension::{DraggableDimension, DroppableDimension};
use crate::displacement::{self, DisplacedBy};
use crate::error::EngineError;
use crate::geometry::{Point, Rect, is_within};
use crate::impact::{DragImpact, center, reorder};

pub fn move_cross_axis(
    forward: bool,
    source: &DroppableDimension,
    args: &MoveArgs<'_>,
) -> Result<Option<DirectionalMove>, EngineError> {
    let Some(destination) = get_best_cross_axis_droppable(forward, source, args) else {
        return Ok(None);
    };
    let inside = args.dimensions.inside_droppable(destination.descriptor.id);
    let without_dragging: Vec<&DraggableDimension> = inside
        .iter()
        .filter(|child| child.descriptor.id != args.draggable.descriptor.id)
        .copied()
        .collect();
    let closest = get_closest_draggable(destination, &without_dragging, args);
    let Some(impact) = move_to_new_droppable(destination, closest, &without_dragging, args)?
    else {
        return Ok(None);
    };
    debug!(destination = destination.descriptor.id.0, "moving to a new droppable");

    let page_center = center::page_border_box_center(
        &impact,
        args.draggable,
        args.dimensions,
        destination,
        args.after_critical,
    )?;
    let client_selection =
        center::client_selection_from_page_center(page_center, args.draggable, args.viewport);
    Ok(Some(DirectionalMove {
        client_selection,
        impact,
        scroll_jump_request: None,
    }))
}

fn corners(rect: &Rect) -> [Point; 4] {
    [
        Point::new(rect.left, rect.top),
        Point::new(rect.right, rect.top),
        Point::new(rect.right, rect.bottom),
        Point::new(rect.left, rect.bottom),
    ]
}

fn closest_corner(center: Point, rect: &Rect) -> f64 {
    corners(rect)
        .iter()
        .map(|corner| center.distance_to(*corner))
        .fold(f64::INFINITY, f64::min)
}

/// Finds the nearest droppable in the requested cross-axis direction whose
/// main-axis band overlaps the source's.
fn get_best_cross_axis_droppable<'a>(
    forward: bool,
    source: &DroppableDimension,
    args: &MoveArgs<'a>,
) -> Option<&'a DroppableDimension> {
    let axis = source.axis;
    let source_active = source.subject.active?;
    let center = args.previous_page_center;

    let mut candidates: Vec<(&DroppableDimension, Rect)> = args
        .dimensions
        .droppables_ordered()
        .into_iter()
        .filter(|droppable| droppable.descriptor.id != source.descriptor.id)
        .filter(|droppable| droppable.is_enabled)
        .filter(|droppable| droppable.descriptor.kind == args.draggable.descriptor.kind)
        .filter_map(|droppable| Some((droppable, droppable.subject.active?)))
        .filter(|(_, active)| {
            if forward {
                axis.cross_end(&source_active) < axis.cross_end(active)
            } else {
                axis.cross_start(active) < axis.cross_start(&source_active)
            }
        })
        .filter(|(_, active)| {
            // the main-axis bands must touch, from either side's point of view
            let in_source =
                |value: f64| is_within(axis.start(&source_active), axis.end(&source_active), value);
            let in_target = |value: f64| is_within(axis.start(active), axis.end(active), value);
            in_source(axis.start(active))
                || in_source(axis.end(active))
                || in_target(axis.start(&source_active))
                || in_target(axis.end(&source_active))
        })
        .collect();

    candidates.sort_by(|(_, a), (_, b)| {
        let first = axis.cross_start(a);
        let second = axis.cross_start(b);
        let ordering = first.partial_cmp(&second).unwrap_or(Ordering::Equal);
        if forward { ordering } else { ordering.reverse() }
    });
    let (_, front) = candidates.first()?;
    let front_start = axis.cross_start(front);
    let tied: Vec<(&DroppableDimension, Rect)> = candidates
        .into_iter()
        .filter(|(_, active)| axis.cross_start(active) == front_start)
        .collect();

    if let [(winner, _)] = tied.as_slice() {
        return Some(*winner);
    }

    // several share the same cross start: prefer the one the dragged center
    // already lines up with on the main axis, then the closest corner
    let containing: Vec<&(&DroppableDimension, Rect)> = tied
        .iter()
        .filter(|(_, active)| {
            is_within(axis.start(active), axis.end(active), axis.line(center))
        })
        .collect();
    match containing.as_slice() {
        [(winner, _)] => Some(*winner),
        [] => tied
            .iter()
            .min_by(|(_, a), (_, b)| {
                closest_corner(center, a)
                    .partial_cmp(&closest_corner(center, b))
                    .unwrap_or(Ordering::Equal)
            })
            .map(|(winner, _)| *winner),
        many => many
            .iter()
            .min_by(|(_, a), (_, b)| {
                axis.start(a).partial_cmp(&axis.start(b)).unwrap_or(Ordering::Equal)
            })
            .map(|(winner, _)| *winner),
    }
}

/// The item in the destination the drag should land next to: the closest
/// fully visible one, ties broken by list order.
fn get_closest_draggable<'a>(
    destination: &DroppableDimension,
    without_dragging: &[&'a DraggableDimension],
    args: &MoveArgs<'a>,
) -> Option<&'a DraggableDimension> {
    let center = args.previous_page_center;
    without_dragging
        .iter()
        .filter(|child| {
            displacement::is_totally_visible(
                &child.page.border_box,
                destination,
                &args.viewport.frame,
                true,
            )
        })
        .min_by(|a, b| {
            let to = |child: &DraggableDimension| {
                center.distance_to(
                    child.page.border_box.center() + destination.scroll_displacement(),
                )
            };
            to(a)
                .partial_cmp(&to(b))
                .unwrap_or(Ordering::Equal)
                .then(a.descriptor.index.cmp(&b.descriptor.index))
        })
        .copied()
}

fn move_to_new_droppable(
    destination: &DroppableDimension,
    closest: Option<&DraggableDimension>,
    without_dragging: &[&DraggableDimension],
    args: &MoveArgs<'_>,
) -> Result<Option<DragImpact>, EngineError> {
    let axis = destination.axis;
    let displaced_by = DisplacedBy::new(axis, args.draggable.displace_by);

    let Some(closest) = closest else {
        // a populated list with nothing visible cannot be entered
        if !without_dragging.is_empty() {
            return Ok(None);
        }
        let impact = reorder::calculate(reorder::CalculateArgs {
            destination,
            without_dragging: &[],
            viewport: args.viewport,
            displaced_by,
            last: None,
            force_should_animate: None,
            index: 0,
        });
        let page_center = center::page_border_box_center(
            &impact,
            args.draggable,
            args.dimensions,
            destination,
            args.after_critical,
        )?;
        let shift = page_center - args.draggable.page.border_box.center();
        let in_new_location = args.draggable.page.border_box.offset(shift);
        if !displacement::is_totally_visible(
            &in_new_location,
            destination,
            &args.viewport.frame,
            false,
        ) {
            return Ok(None);
        }
        return Ok(Some(impact));
    };

    let position = without_dragging
        .iter()
        .position(|child| child.descriptor.id == closest.descriptor.id)
        .ok_or(EngineError::InvariantViolation(
            "closest draggable is not in the destination list",
        ))?;
    let is_going_before =
        axis.line(args.previous_page_center) < axis.line(closest.page.border_box.center());
    let index = if is_going_before { position } else { position + 1 };

    Ok(Some(reorder::calculate(reorder::CalculateArgs {
        destination,
        without_dragging,
        viewport: args.viewport,
        displaced_by,
        last: None,
        force_should_animate: None,
        index,
    })))
}
