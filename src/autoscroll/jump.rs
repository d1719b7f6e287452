//! Jump scrolling: drains a keyboard scroll request through the destination
//! droppable's frame, then the window, and moves the selection directly by
//! whatever is left over.

use tracing::trace;

use super::ScrollRequest;
use super::can_scroll;
use crate::machine::DraggingState;

pub fn scroll(dragging: &DraggingState) -> Vec<ScrollRequest> {
    let Some(request) = dragging.scroll_jump_request else {
        return Vec::new();
    };
    trace!(?request, "draining scroll jump request");
    let mut requests = Vec::new();
    let mut remainder = request;

    if let Some(over) = dragging.impact.dragged_over() {
        if let Ok(droppable) = dragging.dimensions.droppable(over) {
            if can_scroll::can_scroll_droppable(droppable, remainder) {
                match can_scroll::get_droppable_overlap(droppable, remainder) {
                    None => {
                        requests.push(ScrollRequest::Droppable { id: over, change: remainder });
                        return requests;
                    }
                    Some(overlap) => {
                        requests.push(ScrollRequest::Droppable {
                            id: over,
                            change: remainder - overlap,
                        });
                        remainder = overlap;
                    }
                }
            }
        }
    }

    if dragging.is_window_scroll_allowed
        && can_scroll::can_scroll_window(&dragging.viewport, remainder)
    {
        match can_scroll::get_window_overlap(&dragging.viewport, remainder) {
            None => {
                requests.push(ScrollRequest::Window { change: remainder });
                return requests;
            }
            Some(overlap) => {
                requests.push(ScrollRequest::Window { change: remainder - overlap });
                remainder = overlap;
            }
        }
    }

    requests.push(ScrollRequest::MoveSelection {
        client: dragging.current.client.selection + remainder,
    });
    requests
}
