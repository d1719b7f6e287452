//! Folds a mid-drag dimension publish from a virtual list into the drag.
//! The lift baseline is recomputed as if the drag had started against the
//! published geometry.

use tracing::debug;

use super::action::Published;
use super::state::{DraggingState, DropReason, State};
use crate::common::collections::HashSet;
use crate::dimension::{Critical, DraggableId, DroppableId};
use crate::error::{EngineError, invariant};
use crate::impact::{self, ImpactArgs};
use crate::placeholder;

pub(super) fn publish(
    dragging: &DraggingState,
    published: Published,
    was_pending: Option<DropReason>,
) -> Result<State, EngineError> {
    // an empty batch changes nothing, it only settles animations
    if published.is_empty() {
        let settled = DraggingState {
            force_should_animate: Some(false),
            ..dragging.clone()
        };
        return Ok(wrap(settled, was_pending));
    }
    debug!(
        additions = published.additions.len(),
        removals = published.removals.len(),
        "folding published dimensions into the drag"
    );

    let mut dimensions = dragging.dimensions.clone();

    // containers first, so added geometry can be shifted into lift coordinates
    for modified in &published.modified {
        let scrolled = dimensions
            .droppable(modified.droppable_id)?
            .scroll_to(modified.scroll)?;
        dimensions.droppables.insert(modified.droppable_id, scrolled);
    }

    let mut affected: HashSet<DroppableId> = HashSet::default();
    for id in &published.removals {
        invariant!(
            *id != dragging.critical.draggable_id,
            "cannot remove the dragged item mid-drag"
        );
        let removed = dimensions
            .draggables
            .remove(id)
            .ok_or(EngineError::DraggableNotFound(*id))?;
        affected.insert(removed.descriptor.droppable_id);
    }

    let mut addition_ids: HashSet<DraggableId> = HashSet::default();
    for addition in published.additions {
        let droppable = dimensions.droppable(addition.descriptor.droppable_id)?;
        // the publisher measured under its current scroll; lift space differs
        // by everything the container has scrolled since lift
        let shifted = addition.offset(droppable.scroll_change());
        affected.insert(shifted.descriptor.droppable_id);
        addition_ids.insert(shifted.descriptor.id);
        dimensions.draggables.insert(shifted.descriptor.id, shifted);
    }

    // close the index gaps; additions win ties so an insert at index n lands
    // before the item previously at n
    for droppable_id in affected {
        let mut order: Vec<(DraggableId, usize)> = dimensions
            .inside_droppable(droppable_id)
            .iter()
            .map(|child| (child.descriptor.id, child.descriptor.index))
            .collect();
        order.sort_by_key(|(id, index)| (*index, !addition_ids.contains(id) as u8, *id));
        for (position, (id, _)) in order.into_iter().enumerate() {
            let draggable = dimensions.draggable(id)?;
            if draggable.descriptor.index != position {
                let reindexed = draggable.with_index(position);
                dimensions.draggables.insert(id, reindexed);
            }
        }
    }

    // the dragged item itself may have been re-indexed
    let dragged = dimensions.draggable(dragging.critical.draggable_id)?;
    let critical = Critical {
        draggable_id: dragged.descriptor.id,
        droppable_id: dragged.descriptor.droppable_id,
        index: dragged.descriptor.index,
    };
    let lift = impact::get_lift_effect(&critical, &dimensions, &dragging.viewport)?;
    let impact = impact::get_drag_impact(ImpactArgs {
        page_offset: dragging.current.page.offset,
        draggable: dragged,
        dimensions: &dimensions,
        previous: &lift.impact,
        viewport: &dragging.viewport,
        after_critical: &lift.after_critical,
    })?;
    placeholder::reconcile(&mut dimensions, &impact, critical.draggable_id)?;

    let next = DraggingState {
        critical,
        dimensions,
        impact,
        on_lift_impact: lift.impact,
        after_critical: lift.after_critical,
        // everything just jumped to freshly measured positions
        force_should_animate: Some(false),
        ..dragging.clone()
    };
    Ok(wrap(next, was_pending))
}

fn wrap(dragging: DraggingState, was_pending: Option<DropReason>) -> State {
    match was_pending {
        Some(reason) => State::DropPending {
            dragging,
            reason,
            is_waiting: false,
        },
        None => State::Dragging(dragging),
    }
}
