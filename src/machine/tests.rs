use super::*;
use crate::config::EngineConfig;
use crate::dimension::{
    ContentKind, Critical, DimensionMap, DraggableDescriptor, DraggableDimension, DraggableId,
    DroppableDescriptor, DroppableDimension, DroppableId, DroppableMode, Viewport,
};
use crate::error::EngineError;
use crate::geometry::{Axis, BoxModel, ORIGIN, Point, Rect, Size};

const LIST: DroppableId = DroppableId(1);
const OTHER: DroppableId = DroppableId(2);

fn list(id: DroppableId, left: f64) -> DroppableDimension {
    let page = BoxModel::tight(Rect::from_point_size(
        Point::new(left, 0.0),
        Size::new(100.0, 300.0),
    ));
    DroppableDimension::new(
        DroppableDescriptor {
            id,
            kind: ContentKind::default(),
            mode: DroppableMode::Standard,
        },
        Axis::Vertical,
        true,
        false,
        page,
        page,
        None,
    )
}

fn item(id: u64, droppable_id: DroppableId, left: f64, index: usize) -> DraggableDimension {
    let rect = Rect::from_point_size(
        Point::new(left, index as f64 * 100.0),
        Size::new(100.0, 100.0),
    );
    DraggableDimension::new(
        DraggableDescriptor {
            id: DraggableId(id),
            droppable_id,
            kind: ContentKind::default(),
            index,
        },
        BoxModel::tight(rect),
        BoxModel::tight(rect),
    )
}

/// One vertical list with three items stacked top to bottom.
fn single_list() -> DimensionMap {
    let mut dimensions = DimensionMap::default();
    for index in 0..3u64 {
        let draggable = item(index, LIST, 0.0, index as usize);
        dimensions.draggables.insert(draggable.descriptor.id, draggable);
    }
    let list = list(LIST, 0.0);
    dimensions.droppables.insert(list.descriptor.id, list);
    dimensions
}

/// The single list plus a second one to its right holding two items.
fn two_lists() -> DimensionMap {
    let mut dimensions = single_list();
    for (id, index) in [(10u64, 0usize), (11, 1)] {
        let draggable = item(id, OTHER, 110.0, index);
        dimensions.draggables.insert(draggable.descriptor.id, draggable);
    }
    let other = list(OTHER, 110.0);
    dimensions.droppables.insert(other.descriptor.id, other);
    dimensions
}

fn viewport() -> Viewport {
    Viewport::new(
        Rect::new(0.0, 800.0, 600.0, 0.0),
        ORIGIN,
        Point::new(0.0, 1000.0),
    )
}

fn lift_action(dimensions: DimensionMap, movement_mode: MovementMode) -> Action {
    let critical = Critical {
        draggable_id: DraggableId(0),
        droppable_id: LIST,
        index: 0,
    };
    let client_selection = dimensions
        .draggable(critical.draggable_id)
        .unwrap()
        .client
        .border_box
        .center();
    Action::InitialPublish(Box::new(InitialPublish {
        critical,
        dimensions,
        viewport: viewport(),
        client_selection,
        movement_mode,
        is_window_scroll_allowed: true,
    }))
}

fn lifted(dimensions: DimensionMap, movement_mode: MovementMode) -> State {
    reduce(
        &State::default(),
        lift_action(dimensions, movement_mode),
        &EngineConfig::default(),
    )
    .unwrap()
}

fn dragging(state: &State) -> &DraggingState {
    state.dragging().expect("expected a drag in flight")
}

fn step(state: &State, action: Action) -> State {
    reduce(state, action, &EngineConfig::default()).unwrap()
}

mod lifting {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn lift_enters_dragging_over_the_home_slot() {
        let state = lifted(single_list(), MovementMode::Fluid);
        assert_eq!(state.phase(), "DRAGGING");
        let dragging = dragging(&state);
        let destination = dragging.impact.destination().unwrap();
        assert_eq!(destination.droppable_id, LIST);
        assert_eq!(destination.index, 0);
        assert_eq!(dragging.current, dragging.initial);
        assert_eq!(dragging.current.client.offset, ORIGIN);
    }

    #[test]
    fn lift_displaces_everything_after_the_item_without_animating() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let dragging = dragging(&state);
        assert_eq!(
            dragging.impact.displaced.all,
            vec![DraggableId(1), DraggableId(2)],
        );
        for id in &dragging.impact.displaced.all {
            assert!(!dragging.impact.displaced.visible[id].should_animate);
        }
        assert!(dragging.after_critical.started_displaced(DraggableId(1)));
        assert!(dragging.after_critical.started_displaced(DraggableId(2)));
        assert!(!dragging.after_critical.started_displaced(DraggableId(0)));
    }

    #[test]
    fn lift_while_dragging_is_rejected() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let error = reduce(
            &state,
            lift_action(single_list(), MovementMode::Fluid),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            error,
            EngineError::WrongPhase { action: "lift", phase: "DRAGGING" },
        );
    }
}

mod pointer_movement {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn dragging_past_the_next_item_center_claims_its_slot() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(50.0, 130.0) });
        let dragging = dragging(&state);
        assert_eq!(dragging.current.client.offset, Point::new(0.0, 80.0));
        let destination = dragging.impact.destination().unwrap();
        assert_eq!(destination.index, 1);
        assert_eq!(dragging.impact.displaced.all, vec![DraggableId(2)]);
        // displaced since lift and never released, so still not animating
        assert!(!dragging.impact.displaced.visible[&DraggableId(2)].should_animate);
    }

    #[test]
    fn dragging_away_from_every_list_clears_the_impact() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(500.0, 50.0) });
        let dragging = dragging(&state);
        assert_eq!(dragging.impact.at, None);
        assert!(dragging.impact.displaced.all.is_empty());
    }

    #[test]
    fn entering_a_foreign_list_displaces_with_animation() {
        let state = lifted(two_lists(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(160.0, 50.0) });
        let dragging = dragging(&state);
        let destination = dragging.impact.destination().unwrap();
        assert_eq!(destination.droppable_id, OTHER);
        assert_eq!(destination.index, 0);
        assert_eq!(
            dragging.impact.displaced.all,
            vec![DraggableId(10), DraggableId(11)],
        );
        for id in &dragging.impact.displaced.all {
            assert!(dragging.impact.displaced.visible[id].should_animate);
        }
    }

    #[test]
    fn hovering_a_foreign_list_reserves_placeholder_space() {
        let state = lifted(two_lists(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(160.0, 50.0) });
        let over = dragging(&state).dimensions.droppable(OTHER).unwrap();
        assert!(over.subject.with_placeholder.is_some());
        let home = dragging(&state).dimensions.droppable(LIST).unwrap();
        assert!(home.subject.with_placeholder.is_none());
    }

    #[test]
    fn leaving_the_foreign_list_gives_the_space_back() {
        let original = two_lists().droppable(OTHER).unwrap().clone();
        let state = lifted(two_lists(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(160.0, 50.0) });
        let state = step(&state, Action::Move { client: Point::new(50.0, 50.0) });
        let restored = dragging(&state).dimensions.droppable(OTHER).unwrap();
        assert_eq!(*restored, original);
    }
}

mod keyboard_movement {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn snap_mode_ignores_pointer_movement() {
        let state = lifted(single_list(), MovementMode::Snap);
        let state = step(&state, Action::Move { client: Point::new(50.0, 130.0) });
        let dragging = dragging(&state);
        assert_eq!(dragging.impact.destination().unwrap().index, 0);
        // the position still tracks
        assert_eq!(dragging.current.client.offset, Point::new(0.0, 80.0));
    }

    #[test]
    fn move_down_steps_the_impact_and_snaps_the_selection() {
        let state = lifted(single_list(), MovementMode::Snap);
        let state = step(&state, Action::MoveDown);
        let dragging = dragging(&state);
        assert_eq!(dragging.impact.destination().unwrap().index, 1);
        assert_eq!(dragging.current.client.selection, Point::new(50.0, 150.0));
        assert_eq!(dragging.scroll_jump_request, None);
    }

    #[test]
    fn move_down_then_up_returns_to_the_home_slot() {
        let state = lifted(single_list(), MovementMode::Snap);
        let state = step(&state, Action::MoveDown);
        let state = step(&state, Action::MoveUp);
        let dragging = dragging(&state);
        assert_eq!(dragging.impact.destination().unwrap().index, 0);
        assert_eq!(dragging.current.client.selection, Point::new(50.0, 50.0));
    }

    #[test]
    fn move_right_jumps_into_the_neighbouring_list() {
        let state = lifted(two_lists(), MovementMode::Snap);
        let state = step(&state, Action::MoveRight);
        let dragging = dragging(&state);
        let destination = dragging.impact.destination().unwrap();
        assert_eq!(destination.droppable_id, OTHER);
        assert_eq!(destination.index, 1);
    }

    #[test]
    fn a_blocked_move_changes_nothing() {
        let state = lifted(single_list(), MovementMode::Snap);
        let after = step(&state, Action::MoveUp);
        assert_eq!(after, state);
    }

    #[test]
    fn directional_moves_need_an_active_drag() {
        let error = reduce(&State::default(), Action::MoveDown, &EngineConfig::default())
            .unwrap_err();
        assert_eq!(
            error,
            EngineError::WrongPhase { action: "move in a direction", phase: "IDLE" },
        );
    }
}

mod scrolling {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn window_scroll_moves_page_but_not_client() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::MoveByWindowScroll { new_scroll: Point::new(0.0, 60.0) });
        let dragging = dragging(&state);
        assert_eq!(dragging.current.client.offset, ORIGIN);
        assert_eq!(dragging.current.page.offset, Point::new(0.0, 60.0));
        assert_eq!(dragging.viewport.scroll_change(), Point::new(0.0, 60.0));
        // scrolling carried the item past the next sibling's center
        assert_eq!(dragging.impact.destination().unwrap().index, 1);
    }

    #[test]
    fn scrolling_a_frameless_droppable_is_an_error() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let error = reduce(
            &state,
            Action::UpdateDroppableScroll { id: LIST, new_scroll: Point::new(0.0, 10.0) },
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(error, EngineError::MissingFrame(LIST));
    }

    #[test]
    fn max_scroll_update_only_touches_the_viewport() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let before = dragging(&state).clone();
        let state = step(
            &state,
            Action::UpdateViewportMaxScroll { max_scroll: Point::new(0.0, 2400.0) },
        );
        let after = dragging(&state);
        assert_eq!(after.viewport.scroll.max, Point::new(0.0, 2400.0));
        assert_eq!(after.impact, before.impact);
        assert_eq!(after.current, before.current);
    }

    #[test]
    fn disabling_the_list_under_the_drag_clears_the_impact() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(
            &state,
            Action::UpdateDroppableIsEnabled { id: LIST, is_enabled: false },
        );
        assert_eq!(dragging(&state).impact.at, None);
    }

    #[test]
    fn disabling_the_list_clears_the_impact_of_a_snap_drag_too() {
        // snap mode holds its impact across pointer moves, but an enabled
        // flag change still forces a full recomputation
        let state = lifted(single_list(), MovementMode::Snap);
        let state = step(
            &state,
            Action::UpdateDroppableIsEnabled { id: LIST, is_enabled: false },
        );
        assert_eq!(dragging(&state).impact.at, None);
        assert!(dragging(&state).impact.displaced.all.is_empty());
    }

    #[test]
    fn toggling_enabled_to_its_current_value_is_an_error() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let error = reduce(
            &state,
            Action::UpdateDroppableIsEnabled { id: LIST, is_enabled: true },
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(error, EngineError::InvariantViolation(_)));
    }
}

mod collections {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn collection_starting_keeps_the_drag_alive() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::CollectionStarting);
        assert_eq!(state.phase(), "COLLECTING");
        // pointer movement is still allowed mid-collection
        let state = step(&state, Action::Move { client: Point::new(50.0, 130.0) });
        assert_eq!(state.phase(), "COLLECTING");
        assert_eq!(dragging(&state).impact.destination().unwrap().index, 1);
    }

    #[test]
    fn an_empty_publish_only_settles_animations() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let before = dragging(&state).clone();
        let state = step(&state, Action::CollectionStarting);
        let state = step(&state, Action::PublishWhileDragging(Published::default()));
        assert_eq!(state.phase(), "DRAGGING");
        let after = dragging(&state);
        assert_eq!(after.force_should_animate, Some(false));
        assert_eq!(after.impact, before.impact);
        assert_eq!(after.dimensions, before.dimensions);
        assert_eq!(after.current, before.current);
    }

    #[test]
    fn additions_are_folded_in_and_redisplaced() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::CollectionStarting);
        let published = Published {
            additions: vec![item(9, LIST, 0.0, 3)],
            removals: vec![],
            modified: vec![],
        };
        let state = step(&state, Action::PublishWhileDragging(published));
        assert_eq!(state.phase(), "DRAGGING");
        let dragging = dragging(&state);
        assert_eq!(dragging.dimensions.draggables.len(), 4);
        assert_eq!(
            dragging.impact.displaced.all,
            vec![DraggableId(1), DraggableId(2), DraggableId(9)],
        );
        assert!(dragging.after_critical.started_displaced(DraggableId(9)));
        assert_eq!(dragging.force_should_animate, Some(false));
    }

    #[test]
    fn removals_shrink_the_list_and_close_index_gaps() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::CollectionStarting);
        let published = Published {
            additions: vec![],
            removals: vec![DraggableId(1)],
            modified: vec![],
        };
        let state = step(&state, Action::PublishWhileDragging(published));
        let dragging = dragging(&state);
        assert_eq!(dragging.dimensions.draggables.len(), 2);
        assert_eq!(
            dragging.dimensions.draggable(DraggableId(2)).unwrap().descriptor.index,
            1,
        );
        assert_eq!(dragging.impact.displaced.all, vec![DraggableId(2)]);
    }

    #[test]
    fn removing_the_dragged_item_is_an_error() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::CollectionStarting);
        let published = Published {
            additions: vec![],
            removals: vec![DraggableId(0)],
            modified: vec![],
        };
        let error =
            reduce(&state, Action::PublishWhileDragging(published), &EngineConfig::default())
                .unwrap_err();
        assert!(matches!(error, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn a_drop_during_collection_waits_for_the_publish() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::CollectionStarting);
        let state = step(&state, Action::Drop { reason: DropReason::Drop });
        assert_eq!(state.phase(), "DROP_PENDING");
        let State::DropPending { is_waiting, reason, .. } = &state else {
            unreachable!();
        };
        assert!(*is_waiting);
        assert_eq!(*reason, DropReason::Drop);

        // the publish releases the pending drop without going back to DRAGGING
        let state = step(&state, Action::PublishWhileDragging(Published::default()));
        let State::DropPending { is_waiting, .. } = &state else {
            panic!("expected the reducer to stay in DROP_PENDING, got {}", state.phase());
        };
        assert!(!is_waiting);
    }
}

mod dropping {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn dropping_in_place_completes_without_animation() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::Drop { reason: DropReason::Drop });
        let State::Idle { completed: Some(completed) } = &state else {
            panic!("expected an immediate completion, got {}", state.phase());
        };
        let destination = completed.result.destination.unwrap();
        assert_eq!(destination.droppable_id, LIST);
        assert_eq!(destination.index, 0);
        assert_eq!(completed.result.reason, DropReason::Drop);
    }

    #[test]
    fn dropping_after_a_move_animates_home_to_the_new_slot() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(50.0, 130.0) });
        let state = step(&state, Action::Drop { reason: DropReason::Drop });
        let State::DropAnimating(animating) = &state else {
            panic!("expected a drop animation, got {}", state.phase());
        };
        assert_eq!(animating.new_home_client_offset, Point::new(0.0, 100.0));
        assert!(animating.drop_duration >= 0.33 && animating.drop_duration <= 0.55);
        assert_eq!(animating.completed.result.destination.unwrap().index, 1);

        let state = step(&state, Action::DropComplete);
        let State::Idle { completed: Some(completed) } = &state else {
            panic!("expected completion, got {}", state.phase());
        };
        assert_eq!(completed.result.destination.unwrap().index, 1);
    }

    #[test]
    fn cancelling_goes_home_faster_and_reports_no_destination() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(50.0, 130.0) });
        let state = step(&state, Action::Drop { reason: DropReason::Cancel });
        let State::DropAnimating(animating) = &state else {
            panic!("expected a drop animation, got {}", state.phase());
        };
        assert_eq!(animating.new_home_client_offset, ORIGIN);
        assert!(animating.drop_duration < 0.33);
        assert_eq!(animating.completed.result.destination, None);
        assert_eq!(animating.completed.result.combine, None);
        assert_eq!(animating.completed.result.reason, DropReason::Cancel);
        // the lift impact comes back, this time animated
        let impact = &animating.completed.impact;
        assert_eq!(impact.destination().unwrap().index, 0);
        assert!(impact.displaced.visible[&DraggableId(1)].should_animate);
    }

    #[test]
    fn dropping_outside_every_list_goes_home() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(500.0, 50.0) });
        let state = step(&state, Action::Drop { reason: DropReason::Drop });
        let State::DropAnimating(animating) = &state else {
            panic!("expected a drop animation, got {}", state.phase());
        };
        assert_eq!(animating.completed.result.destination, None);
        assert_eq!(animating.new_home_client_offset, ORIGIN);
    }

    #[test]
    fn dropping_while_idle_is_rejected() {
        let error = reduce(
            &State::default(),
            Action::Drop { reason: DropReason::Drop },
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(error, EngineError::WrongPhase { action: "drop", phase: "IDLE" });
    }
}

mod engine {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn flush_recovers_from_any_phase() {
        let state = lifted(single_list(), MovementMode::Fluid);
        let state = step(&state, Action::Move { client: Point::new(50.0, 130.0) });
        let state = step(&state, Action::Drop { reason: DropReason::Drop });
        assert_eq!(state.phase(), "DROP_ANIMATING");
        let state = step(&state, Action::Flush);
        assert_eq!(state, State::Idle { completed: None });
    }

    #[test]
    fn a_deferred_drop_is_retried_when_the_publish_lands() {
        let mut engine = DragEngine::new(EngineConfig::default());
        engine
            .dispatch(lift_action(single_list(), MovementMode::Fluid))
            .unwrap();
        engine.dispatch(Action::CollectionStarting).unwrap();
        engine.dispatch(Action::Drop { reason: DropReason::Drop }).unwrap();
        assert_eq!(engine.state().phase(), "DROP_PENDING");

        engine
            .dispatch(Action::PublishWhileDragging(Published::default()))
            .unwrap();
        // no movement happened, so the retried drop completes on the spot
        let State::Idle { completed: Some(completed) } = engine.state() else {
            panic!("expected completion, got {}", engine.state().phase());
        };
        assert_eq!(completed.result.destination.unwrap().index, 0);
    }

    #[test]
    fn a_rejected_action_leaves_the_engine_untouched() {
        let mut engine = DragEngine::new(EngineConfig::default());
        engine
            .dispatch(lift_action(single_list(), MovementMode::Fluid))
            .unwrap();
        let before = engine.state().clone();
        let error = engine.dispatch(Action::DropComplete).unwrap_err();
        assert_eq!(
            error,
            EngineError::WrongPhase { action: "complete a drop", phase: "DRAGGING" },
        );
        assert_eq!(*engine.state(), before);
    }
}
