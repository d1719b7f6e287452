//! Main-axis stepping: combine with a neighbour or claim the next slot, and
//! request a scroll jump when the new slot is off screen.

use tracing::debug;

use super::{DirectionalMove, MoveArgs};
use crate::dimension::{DimensionMap, DraggableDimension, DroppableDimension, Viewport};
use crate::displacement::{self, DisplacedBy};
use crate::error::EngineError;
use crate::geometry::Point;
use crate::impact::{self, AtLocation, Combine, DragImpact, center, reorder};

pub fn move_to_next_place(
    forward: bool,
    destination: &DroppableDimension,
    args: &MoveArgs<'_>,
) -> Result<Option<DirectionalMove>, EngineError> {
    if !destination.is_enabled {
        return Ok(None);
    }
    let inside = args.dimensions.inside_droppable(destination.descriptor.id);
    let without_dragging: Vec<&DraggableDimension> = inside
        .iter()
        .filter(|child| child.descriptor.id != args.draggable.descriptor.id)
        .copied()
        .collect();

    let impact = match move_to_next_combine(forward, destination, &without_dragging, args)? {
        Some(impact) => impact,
        None => {
            match move_to_next_index(forward, destination, &inside, &without_dragging, args)? {
                Some(impact) => impact,
                None => return Ok(None),
            }
        }
    };

    let page_center = center::page_border_box_center(
        &impact,
        args.draggable,
        args.dimensions,
        destination,
        args.after_critical,
    )?;
    let shift = page_center - args.draggable.page.border_box.center();
    let in_new_location = args.draggable.page.border_box.offset(shift);
    if displacement::is_totally_visible_on_main_axis(
        &in_new_location,
        destination,
        &args.viewport.frame,
        false,
    ) {
        let client_selection =
            center::client_selection_from_page_center(page_center, args.draggable, args.viewport);
        return Ok(Some(DirectionalMove {
            client_selection,
            impact,
            scroll_jump_request: None,
        }));
    }

    // the slot is clipped: hold position, ask for a scroll, and pre-displace
    // what the scroll is about to reveal
    let distance = page_center - args.previous_page_center;
    debug!(?distance, "next slot is off screen, requesting scroll jump");
    let cautious =
        speculatively_increase(&impact, destination, args.dimensions, args.viewport, distance)?;
    Ok(Some(DirectionalMove {
        client_selection: args.previous_client_selection,
        impact: cautious,
        scroll_jump_request: Some(distance),
    }))
}

fn move_to_next_index(
    forward: bool,
    destination: &DroppableDimension,
    inside: &[&DraggableDimension],
    without_dragging: &[&DraggableDimension],
    args: &MoveArgs<'_>,
) -> Result<Option<DragImpact>, EngineError> {
    let in_home_list = destination.descriptor.id == args.draggable.descriptor.droppable_id;
    // home lists still contain the dragged item; foreign lists gain a slot
    let upper_bound = if in_home_list {
        inside.len().saturating_sub(1)
    } else {
        inside.len()
    };

    let proposed = match args.previous_impact.at {
        None => return Ok(None),
        Some(AtLocation::Reorder { destination: location }) => {
            if forward {
                location.index + 1
            } else {
                match location.index.checked_sub(1) {
                    Some(index) => index,
                    None => return Ok(None),
                }
            }
        }
        Some(AtLocation::Combine { combine }) => {
            // stepping off a combine lands beside the combine target
            let target = args.dimensions.draggable(combine.draggable_id)?;
            let mut slot = target.descriptor.index;
            if in_home_list && target.descriptor.index > args.draggable.descriptor.index {
                slot -= 1;
            }
            if forward { slot + 1 } else { slot }
        }
    };
    if proposed > upper_bound {
        return Ok(None);
    }

    let displaced_by = DisplacedBy::new(destination.axis, args.draggable.displace_by);
    Ok(Some(reorder::calculate(reorder::CalculateArgs {
        destination,
        without_dragging,
        viewport: args.viewport,
        displaced_by,
        last: Some(&args.previous_impact.displaced),
        force_should_animate: None,
        index: proposed,
    })))
}

/// From a reorder slot, moving forward combines with the closest displaced
/// sibling; moving backward combines with the sibling just before the slot.
fn move_to_next_combine(
    forward: bool,
    destination: &DroppableDimension,
    without_dragging: &[&DraggableDimension],
    args: &MoveArgs<'_>,
) -> Result<Option<DragImpact>, EngineError> {
    if !destination.is_combine_enabled {
        return Ok(None);
    }
    let Some(AtLocation::Reorder { .. }) = args.previous_impact.at else {
        return Ok(None);
    };

    let closest = args.previous_impact.displaced.all.first().copied();
    let target = if forward {
        match closest {
            Some(id) => id,
            None => return Ok(None),
        }
    } else {
        match closest {
            // at the end of the list: combine backwards onto the last item
            None => match without_dragging.last() {
                Some(last) => last.descriptor.id,
                None => return Ok(None),
            },
            Some(id) => {
                let position = without_dragging
                    .iter()
                    .position(|child| child.descriptor.id == id)
                    .ok_or(EngineError::InvariantViolation(
                        "closest displaced sibling is not in the destination list",
                    ))?;
                if position == 0 {
                    return Ok(None);
                }
                without_dragging[position - 1].descriptor.id
            }
        }
    };

    Ok(Some(DragImpact {
        displaced: args.previous_impact.displaced.clone(),
        displaced_by: args.previous_impact.displaced_by,
        at: Some(AtLocation::Combine {
            combine: Combine {
                draggable_id: target,
                droppable_id: destination.descriptor.id,
            },
        }),
    }))
}

/// Rebuilds displacement as if the requested scroll had already happened, so
/// rows about to be revealed are already out of the way and do not animate.
pub(crate) fn speculatively_increase(
    impact: &DragImpact,
    destination: &DroppableDimension,
    dimensions: &DimensionMap,
    viewport: &Viewport,
    max_scroll_change: Point,
) -> Result<DragImpact, EngineError> {
    let scrolled_viewport = viewport.scroll_to(viewport.scroll.current + max_scroll_change);
    let scrolled_destination = match &destination.frame {
        Some(frame) => destination.scroll_to(frame.scroll.current + max_scroll_change)?,
        None => destination.clone(),
    };
    impact::recompute_displacement(
        impact,
        &scrolled_destination,
        dimensions,
        scrolled_viewport.frame,
        None,
    )
}
