//! Whether a window or droppable frame can absorb a scroll change, and how
//! much of it would overshoot.

use crate::dimension::{DroppableDimension, Viewport};
use crate::geometry::Point;

/// A container can already sit past its reported max (elastic overscroll);
/// the effective max must not claw that back.
fn max_allowing_overscroll(current: Point, max: Point) -> Point {
    Point::new(max.x.max(current.x), max.y.max(current.y))
}

/// Per-axis overshoot of `current + change` past `[0, max]`. `None` when
/// the whole change fits.
fn overlap(current: Point, max: Point, change: Point) -> Option<Point> {
    let target = current + change;
    let remainder = |value: f64, max: f64| -> f64 {
        if value < 0.0 {
            value
        } else if value > max {
            value - max
        } else {
            0.0
        }
    };
    let overlap = Point::new(remainder(target.x, max.x), remainder(target.y, max.y)).clean();
    (!overlap.is_origin()).then_some(overlap)
}

/// True when at least one requested axis can move at least one pixel.
pub(crate) fn can_partially_scroll(current: Point, raw_max: Point, change: Point) -> bool {
    let max = max_allowing_overscroll(current, raw_max);
    let smallest = change.signum();
    let Some(overlap) = overlap(current, max, smallest) else {
        return true;
    };
    if smallest.x != 0.0 && overlap.x == 0.0 {
        return true;
    }
    if smallest.y != 0.0 && overlap.y == 0.0 {
        return true;
    }
    false
}

pub(crate) fn can_scroll_window(viewport: &Viewport, change: Point) -> bool {
    can_partially_scroll(viewport.scroll.current, viewport.scroll.max, change)
}

pub(crate) fn can_scroll_droppable(droppable: &DroppableDimension, change: Point) -> bool {
    droppable
        .frame
        .as_ref()
        .is_some_and(|frame| can_partially_scroll(frame.scroll.current, frame.scroll.max, change))
}

pub(crate) fn get_window_overlap(viewport: &Viewport, change: Point) -> Option<Point> {
    if !can_scroll_window(viewport, change) {
        return None;
    }
    let max = max_allowing_overscroll(viewport.scroll.current, viewport.scroll.max);
    overlap(viewport.scroll.current, max, change)
}

pub(crate) fn get_droppable_overlap(
    droppable: &DroppableDimension,
    change: Point,
) -> Option<Point> {
    let frame = droppable.frame.as_ref()?;
    if !can_scroll_droppable(droppable, change) {
        return None;
    }
    let max = max_allowing_overscroll(frame.scroll.current, frame.scroll.max);
    overlap(frame.scroll.current, max, change)
}
