//! Decides which siblings shift out of the dragged item's way, and whether
//! each shift animates. Items displaced outside the destination's active
//! rectangle or the viewport are tracked but never animated.

use serde::{Deserialize, Serialize};

use crate::common::collections::{HashMap, HashSet};
use crate::dimension::{DraggableDimension, DraggableId, DroppableDimension};
use crate::geometry::{Axis, Point, Rect, is_within};

/// Visible displacement of a single sibling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Displacement {
    pub should_animate: bool,
}

/// Partition of the displaced sibling set. Every id in `all` appears in
/// exactly one of `visible`/`invisible`; `all` is ordered closest to the
/// dragged item first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplacementGroups {
    pub all: Vec<DraggableId>,
    pub visible: HashMap<DraggableId, Displacement>,
    pub invisible: HashSet<DraggableId>,
}

impl DisplacementGroups {
    pub fn empty() -> Self {
        DisplacementGroups::default()
    }

    pub fn contains(&self, id: DraggableId) -> bool {
        self.visible.contains_key(&id) || self.invisible.contains(&id)
    }
}

/// The vector by which siblings move: the dragged item's margin-box size
/// along the destination's main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplacedBy {
    pub value: f64,
    pub point: Point,
}

impl DisplacedBy {
    pub fn new(axis: Axis, displace_by: Point) -> Self {
        let value = axis.line(displace_by);
        DisplacedBy { value, point: axis.unit(value) }
    }
}

fn should_animate(
    id: DraggableId,
    last: Option<&DisplacementGroups>,
    force: Option<bool>,
) -> bool {
    if let Some(force) = force {
        return force;
    }
    let Some(last) = last else {
        return true;
    };
    // was moved while not shown: no animation when it comes back into view
    if last.invisible.contains(&id) {
        return false;
    }
    match last.visible.get(&id) {
        Some(previous) => previous.should_animate,
        None => true,
    }
}

/// Builds the displacement partition for the siblings sitting at and after
/// the insertion point, closest first.
pub fn build(
    after_dragging: &[&DraggableDimension],
    destination: &DroppableDimension,
    displaced_by: DisplacedBy,
    viewport_frame: Rect,
    last: Option<&DisplacementGroups>,
    force_should_animate: Option<bool>,
) -> DisplacementGroups {
    let mut groups = DisplacementGroups::empty();
    for draggable in after_dragging {
        let id = draggable.descriptor.id;
        groups.all.push(id);
        let target = draggable.page.margin_box.offset(displaced_by.point);
        if !is_partially_visible(&target, destination, &viewport_frame, true) {
            groups.invisible.insert(id);
            continue;
        }
        let animate = should_animate(id, last, force_should_animate);
        groups.visible.insert(id, Displacement { should_animate: animate });
    }
    groups
}

fn with_droppable_displacement(
    target: Rect,
    destination: &DroppableDimension,
    apply: bool,
) -> Rect {
    if apply {
        target.offset(destination.scroll_displacement())
    } else {
        target
    }
}

fn partially_through_frame(frame: &Rect, subject: &Rect) -> bool {
    let within_vertical = |value: f64| is_within(frame.top, frame.bottom, value);
    let within_horizontal = |value: f64| is_within(frame.left, frame.right, value);

    let contained = within_vertical(subject.top)
        && within_vertical(subject.bottom)
        && within_horizontal(subject.left)
        && within_horizontal(subject.right);
    if contained {
        return true;
    }

    let partially_vertical = within_vertical(subject.top) || within_vertical(subject.bottom);
    let partially_horizontal = within_horizontal(subject.left) || within_horizontal(subject.right);
    if partially_vertical && partially_horizontal {
        return true;
    }

    // the subject can be bigger than the frame on either axis
    let bigger_vertical = subject.top < frame.top && subject.bottom > frame.bottom;
    let bigger_horizontal = subject.left < frame.left && subject.right > frame.right;
    if bigger_vertical && bigger_horizontal {
        return true;
    }
    (bigger_vertical && partially_horizontal) || (bigger_horizontal && partially_vertical)
}

fn totally_through_frame(frame: &Rect, subject: &Rect) -> bool {
    is_within(frame.top, frame.bottom, subject.top)
        && is_within(frame.top, frame.bottom, subject.bottom)
        && is_within(frame.left, frame.right, subject.left)
        && is_within(frame.left, frame.right, subject.right)
}

fn totally_through_frame_on_axis(frame: &Rect, subject: &Rect, axis: Axis) -> bool {
    is_within(axis.start(frame), axis.end(frame), axis.start(subject))
        && is_within(axis.start(frame), axis.end(frame), axis.end(subject))
}

fn visible_in_destination(
    target: &Rect,
    destination: &DroppableDimension,
    through: impl Fn(&Rect, &Rect) -> bool,
) -> bool {
    match &destination.subject.active {
        Some(active) => through(active, target),
        None => false,
    }
}

pub(crate) fn is_partially_visible(
    target: &Rect,
    destination: &DroppableDimension,
    viewport_frame: &Rect,
    apply_droppable_displacement: bool,
) -> bool {
    let shifted = with_droppable_displacement(*target, destination, apply_droppable_displacement);
    visible_in_destination(&shifted, destination, partially_through_frame)
        && partially_through_frame(viewport_frame, &shifted)
}

pub(crate) fn is_totally_visible(
    target: &Rect,
    destination: &DroppableDimension,
    viewport_frame: &Rect,
    apply_droppable_displacement: bool,
) -> bool {
    let shifted = with_droppable_displacement(*target, destination, apply_droppable_displacement);
    visible_in_destination(&shifted, destination, totally_through_frame)
        && totally_through_frame(viewport_frame, &shifted)
}

/// Main-axis-only variant used by keyboard movement: a destination that is
/// only clipped on the cross axis does not need a scroll jump.
pub(crate) fn is_totally_visible_on_main_axis(
    target: &Rect,
    destination: &DroppableDimension,
    viewport_frame: &Rect,
    apply_droppable_displacement: bool,
) -> bool {
    let axis = destination.axis;
    let shifted = with_droppable_displacement(*target, destination, apply_droppable_displacement);
    visible_in_destination(&shifted, destination, |frame, subject| {
        totally_through_frame_on_axis(frame, subject, axis)
    }) && totally_through_frame_on_axis(viewport_frame, &shifted, axis)
}
