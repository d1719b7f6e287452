//! Auto scrolling: fluid scrolling while a pointer drag sits near a
//! container edge, and jump scrolling to honour a keyboard move whose slot
//! was off screen.

use std::time::Instant;

pub mod can_scroll;
pub mod fluid;
pub mod jump;

pub use fluid::FluidScroller;

use crate::config::AutoScrollConfig;
use crate::dimension::DroppableId;
use crate::geometry::Point;
use crate::machine::{MovementMode, State};

/// A scroll the host must perform on the engine's behalf. Applying one is
/// expected to come back as the matching scroll action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollRequest {
    Window { change: Point },
    Droppable { id: DroppableId, change: Point },
    /// Jump remainder no scroll container could absorb: move the selection
    /// directly instead.
    MoveSelection { client: Point },
}

/// Mode-aware front door: fluid scrolling for pointer drags, jump scrolling
/// for keyboard drags.
#[derive(Debug)]
pub struct AutoScroller {
    fluid: FluidScroller,
}

impl AutoScroller {
    pub fn new(config: AutoScrollConfig) -> Self {
        AutoScroller { fluid: FluidScroller::new(config) }
    }

    /// Call once per lift. `now` anchors time dampening.
    pub fn start(&mut self, state: &State, now: Instant) {
        if let Some(dragging) = state.dragging() {
            self.fluid.start(dragging, now);
        }
    }

    pub fn stop(&mut self) {
        self.fluid.stop();
    }

    /// The scrolls required by the current state, if any.
    pub fn scroll(&self, state: &State, now: Instant) -> Vec<ScrollRequest> {
        if !state.is_movement_allowed() {
            return Vec::new();
        }
        let Some(dragging) = state.dragging() else {
            return Vec::new();
        };
        match dragging.movement_mode {
            MovementMode::Fluid => self.fluid.scroll(dragging, now).into_iter().collect(),
            MovementMode::Snap => jump::scroll(dragging),
        }
    }
}
