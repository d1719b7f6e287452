//! Edge-proximity scrolling for pointer drags. Scroll speed eases in from
//! zero at the start threshold to the per-frame cap near the edge, and is
//! dampened over time for drags that lift inside a scrollable region.

use std::time::Instant;

use tracing::trace;

use super::ScrollRequest;
use super::can_scroll;
use crate::config::AutoScrollConfig;
use crate::dimension::DroppableDimension;
use crate::geometry::{Point, Rect};
use crate::machine::DraggingState;

#[derive(Debug)]
pub struct FluidScroller {
    config: AutoScrollConfig,
    drag_start: Option<Instant>,
    use_time_dampening: bool,
}

impl FluidScroller {
    pub fn new(config: AutoScrollConfig) -> Self {
        FluidScroller {
            config,
            drag_start: None,
            use_time_dampening: false,
        }
    }

    /// Anchors dampening to the lift. Dampening only applies when the lift
    /// position would start scrolling immediately.
    pub fn start(&mut self, dragging: &DraggingState, now: Instant) {
        self.drag_start = Some(now);
        self.use_time_dampening = false;
        self.use_time_dampening = self.scroll(dragging, now).is_some();
        if self.use_time_dampening {
            trace!("lifted inside a scroll region, dampening auto scroll");
        }
    }

    pub fn stop(&mut self) {
        self.drag_start = None;
        self.use_time_dampening = false;
    }

    /// The scroll required for the current pointer position, window first,
    /// then the scroll container under the pointer.
    pub fn scroll(&self, dragging: &DraggingState, now: Instant) -> Option<ScrollRequest> {
        if self.config.disabled {
            return None;
        }
        let start = self.drag_start?;
        let elapsed_ms = now.duration_since(start).as_millis();
        let center = dragging.current.page.border_box_center;
        let draggable = dragging
            .dimensions
            .draggable(dragging.critical.draggable_id)
            .ok()?;
        let subject = draggable.page.margin_box;

        if dragging.is_window_scroll_allowed {
            let frame = dragging.viewport.frame;
            if let Some(change) = self.get_scroll(&frame, &subject, center, elapsed_ms) {
                if can_scroll::can_scroll_window(&dragging.viewport, change) {
                    return Some(ScrollRequest::Window { change });
                }
            }
        }

        let droppable = best_scrollable(center, dragging)?;
        let frame = droppable.frame.as_ref()?;
        let change = self.get_scroll(&frame.page_margin_box, &subject, center, elapsed_ms)?;
        if can_scroll::can_scroll_droppable(droppable, change) {
            return Some(ScrollRequest::Droppable {
                id: droppable.descriptor.id,
                change,
            });
        }
        None
    }

    fn get_scroll(
        &self,
        container: &Rect,
        subject: &Rect,
        center: Point,
        elapsed_ms: u128,
    ) -> Option<Point> {
        let y = self.axis_scroll(
            center.y - container.top,
            container.bottom - center.y,
            container.height(),
            elapsed_ms,
        );
        let x = self.axis_scroll(
            center.x - container.left,
            container.right - center.x,
            container.width(),
            elapsed_ms,
        );
        let required = Point::new(x, y).clean();
        // an item bigger than its container on an axis never scrolls that axis
        let limited = Point::new(
            if subject.width() <= container.width() { required.x } else { 0.0 },
            if subject.height() <= container.height() { required.y } else { 0.0 },
        );
        (!limited.is_origin()).then_some(limited)
    }

    fn axis_scroll(
        &self,
        start_distance: f64,
        end_distance: f64,
        container_size: f64,
        elapsed_ms: u128,
    ) -> f64 {
        if end_distance < start_distance {
            self.value_from_distance(end_distance, container_size, elapsed_ms)
        } else {
            -self.value_from_distance(start_distance, container_size, elapsed_ms)
        }
    }

    fn value_from_distance(
        &self,
        distance_to_edge: f64,
        container_size: f64,
        elapsed_ms: u128,
    ) -> f64 {
        let start_scrolling_from = container_size * self.config.start_from_percentage;
        let max_scroll_at = container_size * self.config.max_scroll_at_percentage;
        if distance_to_edge > start_scrolling_from {
            return 0.0;
        }
        if distance_to_edge <= max_scroll_at {
            return self.dampen(self.config.max_pixel_scroll, elapsed_ms);
        }
        let percentage =
            (start_scrolling_from - distance_to_edge) / (start_scrolling_from - max_scroll_at);
        let proposed = self.config.max_pixel_scroll * self.config.ease(percentage);
        self.dampen(proposed, elapsed_ms)
    }

    fn dampen(&self, proposed: f64, elapsed_ms: u128) -> f64 {
        if !self.use_time_dampening {
            return proposed.ceil();
        }
        let accelerate_at = self.config.accelerate_at_ms as u128;
        let stop_at = self.config.stop_dampening_at_ms as u128;
        if elapsed_ms >= stop_at {
            return proposed.ceil();
        }
        if elapsed_ms < accelerate_at {
            return 1.0;
        }
        let percentage = (elapsed_ms - accelerate_at) as f64 / (stop_at - accelerate_at) as f64;
        (proposed * self.config.ease(percentage)).ceil().max(1.0)
    }
}

/// The scroll container to feed: the one being dragged over if it has a
/// frame, otherwise the first whose frame holds the dragged center.
fn best_scrollable<'a>(
    center: Point,
    dragging: &'a DraggingState,
) -> Option<&'a DroppableDimension> {
    if let Some(over) = dragging.impact.dragged_over() {
        let droppable = dragging.dimensions.droppable(over).ok()?;
        return droppable.frame.is_some().then_some(droppable);
    }
    dragging
        .dimensions
        .droppables_ordered()
        .into_iter()
        .find(|droppable| {
            droppable
                .frame
                .as_ref()
                .is_some_and(|frame| frame.page_margin_box.contains(center))
        })
}
