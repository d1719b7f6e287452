//! Drop resolution: the final impact, the drop result reported to the host,
//! and how far and how long the item animates to its resting place.

use tracing::debug;

use super::reducer::wrong_phase;
use super::state::{
    CompletedDrag, DraggingState, DropAnimatingState, DropReason, DropResult, State,
};
use crate::config::{DropAnimationConfig, EngineConfig};
use crate::error::EngineError;
use crate::impact::{self, ReorderLocation, center};

pub(super) fn on_drop(
    state: &State,
    reason: DropReason,
    config: &EngineConfig,
) -> Result<State, EngineError> {
    match state {
        State::Collecting(dragging) => {
            debug!("drop requested mid-collection, waiting for the publish");
            Ok(State::DropPending {
                dragging: dragging.clone(),
                reason,
                is_waiting: true,
            })
        }
        State::Dragging(dragging) => resolve(dragging, reason, config),
        _ => Err(wrong_phase("drop", state)),
    }
}

/// Finishes a drag whose dimensions are settled. Also the retry path for a
/// drop that was deferred by a collection.
pub(super) fn resolve(
    dragging: &DraggingState,
    reason: DropReason,
    config: &EngineConfig,
) -> Result<State, EngineError> {
    let dimensions = &dragging.dimensions;
    let dropped_inside = reason == DropReason::Drop && dragging.impact.at.is_some();

    let impact = if dropped_inside {
        dragging.impact.clone()
    } else {
        // going home: every displaced sibling animates back to rest
        let home = dimensions.droppable(dragging.critical.droppable_id)?;
        impact::recompute_displacement(
            &dragging.on_lift_impact,
            home,
            dimensions,
            dragging.viewport.frame,
            Some(true),
        )?
    };

    let draggable = dimensions.draggable(dragging.critical.draggable_id)?;
    let over = impact
        .dragged_over()
        .ok_or(EngineError::InvariantViolation("drop impact has no destination"))?;
    let destination = dimensions.droppable(over)?;
    let page_center = center::page_border_box_center(
        &impact,
        draggable,
        dimensions,
        destination,
        &dragging.after_critical,
    )?;
    let client_center =
        center::client_selection_from_page_center(page_center, draggable, &dragging.viewport);
    let new_home_client_offset = client_center - dragging.initial.client.border_box_center;

    let result = DropResult {
        draggable_id: dragging.critical.draggable_id,
        kind: draggable.descriptor.kind,
        source: ReorderLocation {
            droppable_id: dragging.critical.droppable_id,
            index: dragging.critical.index,
        },
        destination: if dropped_inside { impact.destination() } else { None },
        combine: if dropped_inside { impact.combine() } else { None },
        mode: dragging.movement_mode,
        reason,
    };
    let completed = CompletedDrag {
        critical: dragging.critical,
        result,
        impact,
        after_critical: dragging.after_critical.clone(),
    };

    // how far the item still has to travel from where it was released
    let distance = dragging
        .current
        .client
        .offset
        .distance_to(new_home_client_offset);
    if distance <= f64::EPSILON {
        debug!("drop needs no animation");
        return Ok(State::Idle { completed: Some(completed) });
    }
    let drop_duration = duration(distance, reason, &config.drop_animation);
    debug!(distance, drop_duration, "drop animating");
    Ok(State::DropAnimating(DropAnimatingState {
        completed,
        new_home_client_offset,
        drop_duration,
        dimensions: dragging.dimensions.clone(),
    }))
}

fn duration(distance: f64, reason: DropReason, config: &DropAnimationConfig) -> f64 {
    let percentage = (distance / config.max_distance).clamp(0.0, 1.0);
    let value = config.min_duration + (config.max_duration - config.min_duration) * percentage;
    match reason {
        DropReason::Cancel => value * config.cancel_factor,
        DropReason::Drop => value,
    }
}
