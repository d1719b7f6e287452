use serde::{Deserialize, Serialize};

use super::{ContentKind, DroppableId};
use super::viewport::ScrollDetails;
use crate::error::EngineError;
use crate::geometry::{Axis, BoxModel, ORIGIN, Point, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DroppableMode {
    /// All items measured up front at lift.
    Standard,
    /// Items are measured lazily and published mid-drag.
    Virtual,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppableDescriptor {
    pub id: DroppableId,
    pub kind: ContentKind,
    pub mode: DroppableMode,
}

/// Scroll container state for a droppable that scrolls independently of the
/// window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scrollable {
    /// Where the scroll container sits on the page.
    pub page_margin_box: Rect,
    /// Whether the subject is culled to the container bounds.
    pub should_clip_subject: bool,
    pub scroll: ScrollDetails,
}

/// Space reserved in a foreign droppable while the dragged item hovers over
/// it, so the list does not collapse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderInSubject {
    /// Margin-box size of the dragged item along the droppable's main axis.
    pub placeholder_size: Point,
    /// Growth actually applied, when existing trailing slack was not enough.
    pub increased_by: Option<Point>,
    /// Frame max scroll before the placeholder was added, for exact restore.
    pub old_frame_max_scroll: Option<Point>,
}

/// The rectangle a droppable presents for hit testing: its page margin box
/// shifted by container scroll, optionally grown by a placeholder, clipped
/// by the frame. `active` is `None` when the subject is scrolled fully out
/// of its frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DroppableSubject {
    pub page: BoxModel,
    pub with_placeholder: Option<PlaceholderInSubject>,
    pub active: Option<Rect>,
}

impl DroppableSubject {
    pub fn compute(
        page: BoxModel,
        with_placeholder: Option<PlaceholderInSubject>,
        axis: Axis,
        frame: Option<&Scrollable>,
    ) -> DroppableSubject {
        let displacement = frame.map_or(ORIGIN, |frame| frame.scroll.diff.displacement);
        let shifted = page.margin_box.offset(displacement);
        // only the growth that was actually applied; a list with enough
        // trailing slack reserves space without getting bigger
        let grown = match with_placeholder.and_then(|placeholder| placeholder.increased_by) {
            Some(growth) => grow_along_axis(shifted, axis, growth),
            None => shifted,
        };
        let active = match frame {
            Some(frame) if frame.should_clip_subject => frame.page_margin_box.clip(&grown),
            _ => Some(grown),
        };
        DroppableSubject { page, with_placeholder, active }
    }
}

fn grow_along_axis(rect: Rect, axis: Axis, increased_by: Point) -> Rect {
    let growth = axis.line(increased_by);
    match axis {
        Axis::Vertical => Rect { bottom: rect.bottom + growth, ..rect },
        Axis::Horizontal => Rect { right: rect.right + growth, ..rect },
    }
}

/// Snapshot of one list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DroppableDimension {
    pub descriptor: DroppableDescriptor,
    pub axis: Axis,
    pub is_enabled: bool,
    pub is_combine_enabled: bool,
    pub client: BoxModel,
    pub page: BoxModel,
    pub frame: Option<Scrollable>,
    pub subject: DroppableSubject,
}

impl DroppableDimension {
    pub fn new(
        descriptor: DroppableDescriptor,
        axis: Axis,
        is_enabled: bool,
        is_combine_enabled: bool,
        client: BoxModel,
        page: BoxModel,
        frame: Option<Scrollable>,
    ) -> Self {
        let subject = DroppableSubject::compute(page, None, axis, frame.as_ref());
        DroppableDimension {
            descriptor,
            axis,
            is_enabled,
            is_combine_enabled,
            client,
            page,
            frame,
            subject,
        }
    }

    /// Moves the scroll container to an absolute scroll position and
    /// recomputes the subject. Fails when the droppable has no frame.
    pub fn scroll_to(&self, new_scroll: Point) -> Result<DroppableDimension, EngineError> {
        let frame = self
            .frame
            .as_ref()
            .ok_or(EngineError::MissingFrame(self.descriptor.id))?;
        let frame = Scrollable {
            scroll: frame.scroll.scrolled_to(new_scroll),
            ..frame.clone()
        };
        let subject = DroppableSubject::compute(
            self.subject.page,
            self.subject.with_placeholder,
            self.axis,
            Some(&frame),
        );
        Ok(DroppableDimension { frame: Some(frame), subject, ..self.clone() })
    }

    pub fn scroll_by(&self, change: Point) -> Result<DroppableDimension, EngineError> {
        let frame = self
            .frame
            .as_ref()
            .ok_or(EngineError::MissingFrame(self.descriptor.id))?;
        self.scroll_to(frame.scroll.current + change)
    }

    /// Current page-space offset applied by container scrolling since lift.
    pub fn scroll_change(&self) -> Point {
        self.frame.as_ref().map_or(ORIGIN, |frame| frame.scroll.diff.value)
    }

    pub fn scroll_displacement(&self) -> Point {
        self.frame.as_ref().map_or(ORIGIN, |frame| frame.scroll.diff.displacement)
    }
}
