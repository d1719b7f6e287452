use serde::{Deserialize, Serialize};

use crate::geometry::{ORIGIN, Point, Rect};

/// Scroll position change since capture. `displacement` is the vector by
/// which captured page geometry appears to move (the negated scroll delta).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollDiff {
    pub value: Point,
    pub displacement: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollDetails {
    pub initial: Point,
    pub current: Point,
    pub max: Point,
    pub diff: ScrollDiff,
}

impl ScrollDetails {
    pub fn capture(current: Point, max: Point) -> Self {
        ScrollDetails {
            initial: current,
            current,
            max,
            diff: ScrollDiff::default(),
        }
    }

    pub fn scrolled_to(&self, new_scroll: Point) -> ScrollDetails {
        let value = new_scroll - self.initial;
        ScrollDetails {
            initial: self.initial,
            current: new_scroll,
            max: self.max,
            diff: ScrollDiff { value, displacement: -value },
        }
    }
}

/// Window scroll state, shaped like a droppable frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The visible window rectangle in page coordinates.
    pub frame: Rect,
    pub scroll: ScrollDetails,
}

impl Viewport {
    pub fn new(frame: Rect, scroll: Point, max_scroll: Point) -> Self {
        Viewport {
            frame,
            scroll: ScrollDetails::capture(scroll, max_scroll),
        }
    }

    pub fn scroll_to(&self, new_scroll: Point) -> Viewport {
        let shift = new_scroll - self.scroll.current;
        Viewport {
            frame: self.frame.offset(shift),
            scroll: self.scroll.scrolled_to(new_scroll),
        }
    }

    pub fn with_max_scroll(&self, max: Point) -> Viewport {
        let mut updated = *self;
        updated.scroll.max = max;
        updated
    }

    pub fn scroll_change(&self) -> Point {
        self.scroll.diff.value
    }

    pub fn scroll_displacement(&self) -> Point {
        self.scroll.diff.displacement
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(Rect::default(), ORIGIN, ORIGIN)
    }
}
