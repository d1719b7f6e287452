use serde::{Deserialize, Serialize};

use super::{ContentKind, DraggableId, DroppableId};
use crate::geometry::{BoxModel, Point};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggableDescriptor {
    pub id: DraggableId,
    pub droppable_id: DroppableId,
    pub kind: ContentKind,
    pub index: usize,
}

/// Snapshot of one draggable item. `client` is window-relative, `page` is
/// document-relative; both were captured under the lift-time window scroll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraggableDimension {
    pub descriptor: DraggableDescriptor,
    pub client: BoxModel,
    pub page: BoxModel,
    /// Margin-box size vector: how far neighbours shift to make room.
    pub displace_by: Point,
}

impl DraggableDimension {
    pub fn new(descriptor: DraggableDescriptor, client: BoxModel, page: BoxModel) -> Self {
        let margin_box = page.margin_box;
        DraggableDimension {
            descriptor,
            client,
            page,
            displace_by: Point::new(margin_box.width(), margin_box.height()),
        }
    }

    /// Shifts both coordinate spaces, used when a published addition was
    /// measured under a different container scroll than the lift capture.
    pub fn offset(&self, by: Point) -> DraggableDimension {
        DraggableDimension {
            descriptor: self.descriptor,
            client: self.client.offset(by),
            page: self.page.offset(by),
            displace_by: self.displace_by,
        }
    }

    pub fn with_index(&self, index: usize) -> DraggableDimension {
        let mut updated = self.clone();
        updated.descriptor.index = index;
        updated
    }
}
