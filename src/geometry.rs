//! float geometry shared by the whole engine

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        f64::hypot(self.x - other.x, self.y - other.y)
    }

    pub fn is_origin(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Collapses each component to its sign (-1, 0 or 1).
    pub fn signum(self) -> Point {
        fn unit(value: f64) -> f64 {
            if value == 0.0 { 0.0 } else { value.signum() }
        }
        Point::new(unit(self.x), unit(self.y))
    }

    /// Replaces -0.0 components with 0.0 so comparisons against the origin hold.
    pub fn clean(self) -> Point {
        fn scrub(value: f64) -> f64 {
            if value == 0.0 { 0.0 } else { value }
        }
        Point::new(scrub(self.x), scrub(self.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Per-edge distances, used for margins, borders and padding.
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Spacing {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Spacing { top, right, bottom, left }
    }

    pub fn add(self, other: Spacing) -> Spacing {
        Spacing::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }
}

/// Axis-aligned rectangle stored by its edges.
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rect {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Rect { top, right, bottom, left }
    }

    pub fn from_point_size(origin: Point, size: Size) -> Self {
        Rect {
            top: origin.y,
            left: origin.x,
            bottom: origin.y + size.height,
            right: origin.x + size.width,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn offset(&self, by: Point) -> Rect {
        Rect {
            top: self.top + by.y,
            bottom: self.bottom + by.y,
            left: self.left + by.x,
            right: self.right + by.x,
        }
    }

    pub fn expand(&self, by: Spacing) -> Rect {
        Rect {
            top: self.top - by.top,
            left: self.left - by.left,
            bottom: self.bottom + by.bottom,
            right: self.right + by.right,
        }
    }

    pub fn shrink(&self, by: Spacing) -> Rect {
        Rect {
            top: self.top + by.top,
            left: self.left + by.left,
            bottom: self.bottom - by.bottom,
            right: self.right - by.right,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }

    /// True when the rectangles share any area (edge contact included).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Intersection clipped to shared area, or `None` when the rectangles
    /// are disjoint on either axis.
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let clipped = Rect {
            top: f64::max(self.top, other.top),
            left: f64::max(self.left, other.left),
            bottom: f64::min(self.bottom, other.bottom),
            right: f64::min(self.right, other.right),
        };
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return None;
        }
        Some(clipped)
    }
}

/// The box model of a measured element. All rectangles are in the same
/// coordinate space; `offset` shifts every box together.
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxModel {
    pub margin_box: Rect,
    pub border_box: Rect,
    pub padding_box: Rect,
    pub content_box: Rect,
    pub margin: Spacing,
    pub border: Spacing,
    pub padding: Spacing,
}

impl BoxModel {
    pub fn from_border_box(border_box: Rect, margin: Spacing, border: Spacing, padding: Spacing) -> Self {
        BoxModel {
            margin_box: border_box.expand(margin),
            border_box,
            padding_box: border_box.shrink(border),
            content_box: border_box.shrink(border.add(padding)),
            margin,
            border,
            padding,
        }
    }

    /// A box with no margin, border or padding.
    pub fn tight(border_box: Rect) -> Self {
        BoxModel::from_border_box(border_box, Spacing::default(), Spacing::default(), Spacing::default())
    }

    pub fn offset(&self, by: Point) -> BoxModel {
        BoxModel {
            margin_box: self.margin_box.offset(by),
            border_box: self.border_box.offset(by),
            padding_box: self.padding_box.offset(by),
            content_box: self.content_box.offset(by),
            margin: self.margin,
            border: self.border,
            padding: self.padding,
        }
    }
}

/// Direction descriptor. Every piece of geometry code that cares about the
/// drag direction goes through these accessors instead of naming `x`/`y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn line(self, point: Point) -> f64 {
        match self {
            Axis::Vertical => point.y,
            Axis::Horizontal => point.x,
        }
    }

    pub fn cross_line(self, point: Point) -> f64 {
        match self {
            Axis::Vertical => point.x,
            Axis::Horizontal => point.y,
        }
    }

    pub fn start(self, rect: &Rect) -> f64 {
        match self {
            Axis::Vertical => rect.top,
            Axis::Horizontal => rect.left,
        }
    }

    pub fn end(self, rect: &Rect) -> f64 {
        match self {
            Axis::Vertical => rect.bottom,
            Axis::Horizontal => rect.right,
        }
    }

    pub fn size(self, rect: &Rect) -> f64 {
        match self {
            Axis::Vertical => rect.height(),
            Axis::Horizontal => rect.width(),
        }
    }

    pub fn cross_start(self, rect: &Rect) -> f64 {
        match self {
            Axis::Vertical => rect.left,
            Axis::Horizontal => rect.top,
        }
    }

    pub fn cross_end(self, rect: &Rect) -> f64 {
        match self {
            Axis::Vertical => rect.right,
            Axis::Horizontal => rect.bottom,
        }
    }

    pub fn cross_size(self, rect: &Rect) -> f64 {
        match self {
            Axis::Vertical => rect.width(),
            Axis::Horizontal => rect.height(),
        }
    }

    pub fn start_margin(self, spacing: &Spacing) -> f64 {
        match self {
            Axis::Vertical => spacing.top,
            Axis::Horizontal => spacing.left,
        }
    }

    pub fn end_margin(self, spacing: &Spacing) -> f64 {
        match self {
            Axis::Vertical => spacing.bottom,
            Axis::Horizontal => spacing.right,
        }
    }

    /// Builds a point from main- and cross-axis components.
    pub fn pack(self, main: f64, cross: f64) -> Point {
        match self {
            Axis::Vertical => Point::new(cross, main),
            Axis::Horizontal => Point::new(main, cross),
        }
    }

    /// A vector along the main axis only.
    pub fn unit(self, main: f64) -> Point {
        self.pack(main, 0.0)
    }
}

/// Inclusive range membership used by visibility and combine detection.
pub fn is_within(start: f64, end: f64, value: f64) -> bool {
    (start..=end).contains(&value)
}
