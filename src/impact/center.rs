//! Where the dragged item's border-box center belongs for a given impact.
//! Shared by keyboard movement (to place the item without a pointer) and by
//! drop resolution (to aim the drop animation).

use crate::dimension::{DimensionMap, DraggableDimension, DroppableDimension, Viewport};
use crate::error::EngineError;
use crate::geometry::{Axis, BoxModel, Point};
use crate::impact::{AfterCritical, AtLocation, Combine, DragImpact};

fn distance_from_start_to_center(axis: Axis, model: &BoxModel) -> f64 {
    axis.start_margin(&model.margin) + axis.size(&model.border_box) / 2.0
}

fn distance_from_end_to_center(axis: Axis, model: &BoxModel) -> f64 {
    axis.end_margin(&model.margin) + axis.size(&model.border_box) / 2.0
}

fn go_after(axis: Axis, relative_to: &BoxModel, moving: &BoxModel) -> Point {
    axis.pack(
        axis.end(&relative_to.margin_box) + distance_from_start_to_center(axis, moving),
        axis.cross_line(relative_to.border_box.center()),
    )
}

fn go_before(axis: Axis, relative_to: &BoxModel, moving: &BoxModel) -> Point {
    axis.pack(
        axis.start(&relative_to.margin_box) - distance_from_end_to_center(axis, moving),
        axis.cross_line(relative_to.border_box.center()),
    )
}

fn go_into_start(axis: Axis, into: &BoxModel, moving: &BoxModel) -> Point {
    axis.pack(
        axis.start(&into.content_box) + distance_from_start_to_center(axis, moving),
        axis.cross_line(into.content_box.center()),
    )
}

fn when_reordering(
    impact: &DragImpact,
    draggable: &DraggableDimension,
    dimensions: &DimensionMap,
    destination: &DroppableDimension,
    after_critical: &AfterCritical,
) -> Result<Point, EngineError> {
    let axis = destination.axis;
    let moving = &draggable.page;
    let inside = dimensions.inside_droppable(destination.descriptor.id);
    if inside.is_empty() {
        return Ok(go_into_start(axis, &destination.page, moving));
    }

    // slot in just before the closest displaced sibling
    if let Some(&closest_id) = impact.displaced.all.first() {
        let closest = dimensions.draggable(closest_id)?;
        if after_critical.started_displaced(closest_id) {
            return Ok(go_before(axis, &closest.page, moving));
        }
        let displaced_page = closest.page.offset(impact.displaced_by.point);
        return Ok(go_before(axis, &displaced_page, moving));
    }

    // nothing displaced: landing after the last item in the list
    let last = inside[inside.len() - 1];
    if last.descriptor.id == draggable.descriptor.id {
        return Ok(moving.border_box.center());
    }
    if after_critical.started_displaced(last.descriptor.id) {
        let page = last.page.offset(-after_critical.displaced_by.point);
        return Ok(go_after(axis, &page, moving));
    }
    Ok(go_after(axis, &last.page, moving))
}

fn when_combining(
    combine: Combine,
    dimensions: &DimensionMap,
    after_critical: &AfterCritical,
) -> Result<Point, EngineError> {
    let target = dimensions.draggable(combine.draggable_id)?;
    let center = target.page.border_box.center();
    if after_critical.started_displaced(combine.draggable_id) {
        return Ok(center - after_critical.displaced_by.point);
    }
    Ok(center)
}

/// Page-space border-box center the dragged item should occupy under
/// `impact`, including any destination container scroll since lift.
pub fn page_border_box_center(
    impact: &DragImpact,
    draggable: &DraggableDimension,
    dimensions: &DimensionMap,
    destination: &DroppableDimension,
    after_critical: &AfterCritical,
) -> Result<Point, EngineError> {
    let center = match impact.at {
        None => draggable.page.border_box.center(),
        Some(AtLocation::Reorder { .. }) => {
            when_reordering(impact, draggable, dimensions, destination, after_critical)?
        }
        Some(AtLocation::Combine { combine }) => {
            when_combining(combine, dimensions, after_critical)?
        }
    };
    Ok(center + destination.scroll_displacement())
}

/// Converts a page-space center back to a client selection, accounting for
/// window scroll since the dimensions were captured.
pub fn client_selection_from_page_center(
    page_center: Point,
    draggable: &DraggableDimension,
    viewport: &Viewport,
) -> Point {
    let without_scroll_change = page_center - viewport.scroll_change();
    let offset = without_scroll_change - draggable.page.border_box.center();
    draggable.client.border_box.center() + offset
}
