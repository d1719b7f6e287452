//! The single transition function. Phase checks happen before any work so a
//! rejected action leaves the state untouched.

use tracing::debug;

use super::action::{Action, InitialPublish};
use super::state::{
    DragPositions, DraggingState, DropReason, ItemPositions, MovementMode, State,
};
use super::{drop, publish};
use crate::config::EngineConfig;
use crate::dimension::{DimensionMap, DroppableDimension, Viewport};
use crate::error::{EngineError, invariant};
use crate::geometry::{ORIGIN, Point};
use crate::impact::{self, DragImpact, ImpactArgs, center};
use crate::movement::{self, Direction, MoveArgs};
use crate::placeholder;

pub(super) fn wrong_phase(action: &'static str, state: &State) -> EngineError {
    EngineError::WrongPhase { action, phase: state.phase() }
}

pub fn reduce(state: &State, action: Action, config: &EngineConfig) -> Result<State, EngineError> {
    match action {
        Action::Flush => Ok(State::Idle { completed: None }),
        Action::InitialPublish(args) => initial_publish(state, *args),
        Action::CollectionStarting => match state {
            State::Dragging(dragging) => Ok(State::Collecting(dragging.clone())),
            // a collection can flow into the next one
            State::Collecting(_) | State::DropPending { .. } => Ok(state.clone()),
            _ => Err(wrong_phase("start a collection", state)),
        },
        Action::PublishWhileDragging(published) => match state {
            State::Collecting(dragging) => publish::publish(dragging, published, None),
            State::DropPending { dragging, reason, .. } => {
                publish::publish(dragging, published, Some(*reason))
            }
            _ => Err(wrong_phase("publish while dragging", state)),
        },
        Action::Move { client } => {
            let dragging = require_movement_allowed(state, "move")?;
            // snap mode only ever changes impact through explicit moves; the
            // pointer still tracks so a mode switch picks up where it left off
            let impact = (dragging.movement_mode == MovementMode::Snap)
                .then(|| dragging.impact.clone());
            let moved = move_with_updates(
                dragging,
                MoveUpdates {
                    client_selection: Some(client),
                    impact,
                    ..MoveUpdates::default()
                },
            )?;
            Ok(rewrap(state, moved))
        }
        Action::MoveUp => move_in_direction(state, Direction::Up),
        Action::MoveDown => move_in_direction(state, Direction::Down),
        Action::MoveLeft => move_in_direction(state, Direction::Left),
        Action::MoveRight => move_in_direction(state, Direction::Right),
        Action::UpdateDroppableScroll { id, new_scroll } => match state {
            // mid-collection geometry is stale; drop the jump and wait
            State::Collecting(_) | State::DropPending { .. } => Ok(clear_scroll_jump(state)),
            State::Dragging(dragging) => {
                let scrolled = dragging.dimensions.droppable(id)?.scroll_to(new_scroll)?;
                Ok(State::Dragging(post_droppable_change(dragging, scrolled, false)?))
            }
            _ => Err(wrong_phase("scroll a droppable", state)),
        },
        Action::UpdateDroppableIsEnabled { id, is_enabled } => match state {
            State::DropPending { .. } => Ok(clear_scroll_jump(state)),
            State::Dragging(_) | State::Collecting(_) => {
                let dragging = require_movement_allowed(state, "toggle a droppable")?;
                let droppable = dragging.dimensions.droppable(id)?;
                invariant!(
                    droppable.is_enabled != is_enabled,
                    "toggling a droppable to its current enabled value"
                );
                let updated = DroppableDimension { is_enabled, ..droppable.clone() };
                Ok(rewrap(state, post_droppable_change(dragging, updated, true)?))
            }
            _ => Err(wrong_phase("toggle a droppable", state)),
        },
        Action::UpdateDroppableIsCombineEnabled { id, is_combine_enabled } => match state {
            State::DropPending { .. } => Ok(clear_scroll_jump(state)),
            State::Dragging(_) | State::Collecting(_) => {
                let dragging = require_movement_allowed(state, "toggle combining")?;
                let droppable = dragging.dimensions.droppable(id)?;
                invariant!(
                    droppable.is_combine_enabled != is_combine_enabled,
                    "toggling combining to its current value"
                );
                let updated = DroppableDimension { is_combine_enabled, ..droppable.clone() };
                Ok(rewrap(state, post_droppable_change(dragging, updated, true)?))
            }
            _ => Err(wrong_phase("toggle combining", state)),
        },
        Action::MoveByWindowScroll { new_scroll } => match state {
            State::DropPending { .. } => Ok(state.clone()),
            State::Dragging(_) | State::Collecting(_) => {
                let dragging = require_movement_allowed(state, "scroll the window")?;
                invariant!(
                    dragging.is_window_scroll_allowed,
                    "window scrolling is not allowed for this drag"
                );
                if new_scroll == dragging.viewport.scroll.current {
                    return Ok(clear_scroll_jump(state));
                }
                let viewport = dragging.viewport.scroll_to(new_scroll);
                let moved = if dragging.movement_mode == MovementMode::Snap {
                    refresh_snap(dragging, dragging.dimensions.clone(), Some(viewport))?
                } else {
                    move_with_updates(
                        dragging,
                        MoveUpdates {
                            viewport: Some(viewport),
                            ..MoveUpdates::default()
                        },
                    )?
                };
                Ok(rewrap(state, moved))
            }
            _ => Err(wrong_phase("scroll the window", state)),
        },
        Action::UpdateViewportMaxScroll { max_scroll } => {
            let dragging = require_movement_allowed(state, "update the max scroll")?;
            let updated = DraggingState {
                viewport: dragging.viewport.with_max_scroll(max_scroll),
                ..dragging.clone()
            };
            Ok(rewrap(state, updated))
        }
        Action::Drop { reason } => drop::on_drop(state, reason, config),
        Action::DropComplete => match state {
            State::DropAnimating(animating) => Ok(State::Idle {
                completed: Some(animating.completed.clone()),
            }),
            _ => Err(wrong_phase("complete a drop", state)),
        },
    }
}

fn initial_publish(state: &State, args: InitialPublish) -> Result<State, EngineError> {
    let State::Idle { .. } = state else {
        return Err(wrong_phase("lift", state));
    };
    let InitialPublish {
        critical,
        dimensions,
        viewport,
        client_selection,
        movement_mode,
        is_window_scroll_allowed,
    } = args;
    let lift = impact::get_lift_effect(&critical, &dimensions, &viewport)?;
    let client = ItemPositions {
        selection: client_selection,
        border_box_center: dimensions.draggable(critical.draggable_id)?.client.border_box.center(),
        offset: ORIGIN,
    };
    let page = ItemPositions {
        selection: client.selection + viewport.scroll.initial,
        border_box_center: client.border_box_center + viewport.scroll.initial,
        offset: ORIGIN,
    };
    let initial = DragPositions { client, page };
    debug!(draggable = critical.draggable_id.0, mode = %movement_mode, "lift");
    Ok(State::Dragging(DraggingState {
        critical,
        movement_mode,
        dimensions,
        initial,
        current: initial,
        impact: lift.impact.clone(),
        on_lift_impact: lift.impact,
        after_critical: lift.after_critical,
        viewport,
        is_window_scroll_allowed,
        scroll_jump_request: None,
        force_should_animate: None,
    }))
}

fn require_movement_allowed<'a>(
    state: &'a State,
    action: &'static str,
) -> Result<&'a DraggingState, EngineError> {
    match state {
        State::Dragging(dragging) | State::Collecting(dragging) => Ok(dragging),
        _ => Err(wrong_phase(action, state)),
    }
}

/// Puts an updated dragging state back into the phase it came from.
fn rewrap(state: &State, dragging: DraggingState) -> State {
    match state {
        State::Collecting(_) => State::Collecting(dragging),
        _ => State::Dragging(dragging),
    }
}

fn clear_scroll_jump(state: &State) -> State {
    let mut next = state.clone();
    match &mut next {
        State::Dragging(dragging)
        | State::Collecting(dragging)
        | State::DropPending { dragging, .. } => dragging.scroll_jump_request = None,
        _ => {}
    }
    next
}

#[derive(Default)]
pub(super) struct MoveUpdates {
    pub client_selection: Option<Point>,
    pub impact: Option<DragImpact>,
    pub scroll_jump_request: Option<Point>,
    pub viewport: Option<Viewport>,
    pub dimensions: Option<DimensionMap>,
}

/// Recomputes positions from a client selection and derives (or accepts) the
/// impact, then settles placeholders against it.
pub(super) fn move_with_updates(
    dragging: &DraggingState,
    updates: MoveUpdates,
) -> Result<DraggingState, EngineError> {
    let viewport = updates.viewport.unwrap_or(dragging.viewport);
    let mut dimensions = updates
        .dimensions
        .unwrap_or_else(|| dragging.dimensions.clone());
    let client_selection = updates
        .client_selection
        .unwrap_or(dragging.current.client.selection);

    let client_offset = client_selection - dragging.initial.client.selection;
    let client = ItemPositions {
        selection: client_selection,
        border_box_center: dragging.initial.client.border_box_center + client_offset,
        offset: client_offset,
    };
    let page_selection = client.selection + viewport.scroll.current;
    let page = ItemPositions {
        selection: page_selection,
        border_box_center: client.border_box_center + viewport.scroll.current,
        offset: page_selection - dragging.initial.page.selection,
    };
    let current = DragPositions { client, page };

    let impact = match updates.impact {
        Some(impact) => impact,
        None => impact::get_drag_impact(ImpactArgs {
            page_offset: current.page.offset,
            draggable: dimensions.draggable(dragging.critical.draggable_id)?,
            dimensions: &dimensions,
            previous: &dragging.impact,
            viewport: &viewport,
            after_critical: &dragging.after_critical,
        })?,
    };
    placeholder::reconcile(&mut dimensions, &impact, dragging.critical.draggable_id)?;

    Ok(DraggingState {
        current,
        impact,
        dimensions,
        viewport,
        scroll_jump_request: updates.scroll_jump_request,
        ..dragging.clone()
    })
}

fn post_droppable_change(
    dragging: &DraggingState,
    updated: DroppableDimension,
    is_enabled_changing: bool,
) -> Result<DraggingState, EngineError> {
    let mut dimensions = dragging.dimensions.clone();
    dimensions.droppables.insert(updated.descriptor.id, updated);
    if dragging.movement_mode == MovementMode::Snap && !is_enabled_changing {
        refresh_snap(dragging, dimensions, None)
    } else {
        move_with_updates(
            dragging,
            MoveUpdates {
                dimensions: Some(dimensions),
                ..MoveUpdates::default()
            },
        )
    }
}

/// In snap mode the item is glued to its impact, so geometry changes move
/// the item rather than the impact.
fn refresh_snap(
    dragging: &DraggingState,
    dimensions: DimensionMap,
    viewport: Option<Viewport>,
) -> Result<DraggingState, EngineError> {
    let viewport = viewport.unwrap_or(dragging.viewport);
    let over = dragging
        .impact
        .dragged_over()
        .ok_or(EngineError::InvariantViolation(
            "snap mode requires a destination to refresh against",
        ))?;
    let destination = dimensions.droppable(over)?;
    let draggable = dimensions.draggable(dragging.critical.draggable_id)?;
    let impact = impact::recompute_displacement(
        &dragging.impact,
        destination,
        &dimensions,
        viewport.frame,
        Some(false),
    )?;
    let page_center = center::page_border_box_center(
        &impact,
        draggable,
        &dimensions,
        destination,
        &dragging.after_critical,
    )?;
    let client_selection =
        center::client_selection_from_page_center(page_center, draggable, &viewport);
    move_with_updates(
        dragging,
        MoveUpdates {
            client_selection: Some(client_selection),
            impact: Some(impact),
            viewport: Some(viewport),
            dimensions: Some(dimensions),
            scroll_jump_request: None,
        },
    )
}

fn move_in_direction(state: &State, direction: Direction) -> Result<State, EngineError> {
    let State::Dragging(dragging) = state else {
        return Err(wrong_phase("move in a direction", state));
    };
    let draggable = dragging.dimensions.draggable(dragging.critical.draggable_id)?;
    let result = movement::move_in_direction(MoveArgs {
        direction,
        draggable,
        dimensions: &dragging.dimensions,
        previous_impact: &dragging.impact,
        viewport: &dragging.viewport,
        after_critical: &dragging.after_critical,
        previous_page_center: dragging.current.page.border_box_center,
        previous_client_selection: dragging.current.client.selection,
    })?;
    let Some(moved) = result else {
        return Ok(state.clone());
    };
    let next = move_with_updates(
        dragging,
        MoveUpdates {
            client_selection: Some(moved.client_selection),
            impact: Some(moved.impact),
            scroll_jump_request: moved.scroll_jump_request,
            ..MoveUpdates::default()
        },
    )?;
    Ok(State::Dragging(next))
}
