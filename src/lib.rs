//! A headless drag and drop interaction engine.
//!
//! The host owns rendering and input; this crate owns the semantics. Feed it
//! measured dimensions and a stream of [`machine::Action`]s, and it keeps a
//! pure [`machine::State`] describing where the dragged item is, who it has
//! displaced, and how the drag resolves into a drop.
//!
//! The pieces:
//! - [`machine`] turns actions into states through a single reducer, with a
//!   [`DragEngine`] façade that owns the current state.
//! - [`impact`] works out what a drag position means, reordering within a
//!   list or combining with a neighbour.
//! - [`displacement`] tracks which items were shoved aside and whether that
//!   shove should animate.
//! - [`autoscroll`] emits the scrolls a drag near a container edge requires.
//! - [`placeholder`] grows a foreign list to make room for the dragged item.
//! - [`schedule`] coalesces high-frequency input down to one update a frame.

pub mod autoscroll;
pub mod common;
pub mod config;
pub mod dimension;
pub mod displacement;
pub mod error;
pub mod geometry;
pub mod impact;
pub mod machine;
pub mod movement;
pub mod placeholder;
pub mod schedule;

pub use autoscroll::{AutoScroller, ScrollRequest};
pub use config::EngineConfig;
pub use error::EngineError;
pub use machine::{Action, DragEngine, State};
