//! Frame coalescing for high-frequency input.
//!
//! Pointer moves and scroll events can arrive much faster than a host wants
//! to reduce them. [`Coalesced`] keeps only the latest pending value; the
//! host drains it once per frame with [`Coalesced::take`] and dispatches a
//! single action for the whole burst.

use tracing::trace;

/// A latest-wins accumulator for one kind of per-frame update.
///
/// Holds at most one pending value. All operations are O(1).
#[derive(Debug, Clone, Default)]
pub struct Coalesced<T> {
    pending: Option<T>,
}

impl<T> Coalesced<T> {
    pub fn new() -> Self {
        Coalesced { pending: None }
    }

    /// Stores `value`, replacing any pending one. Returns `true` when this
    /// push started a new batch, which is the caller's cue to schedule a
    /// frame.
    pub fn push(&mut self, value: T) -> bool {
        let is_first = self.pending.is_none();
        self.pending = Some(value);
        is_first
    }

    /// Takes the pending value, leaving the accumulator empty.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Discards the pending value without processing it. Used when a drag
    /// ends with a frame still scheduled.
    pub fn clear(&mut self) {
        if self.pending.take().is_some() {
            trace!("discarded a pending coalesced value");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::geometry::Point;

    #[test]
    fn the_latest_push_wins() {
        let mut moves = Coalesced::new();
        assert!(moves.push(Point::new(10.0, 10.0)));
        assert!(!moves.push(Point::new(20.0, 25.0)));
        assert!(!moves.push(Point::new(30.0, 40.0)));

        assert_eq!(moves.take(), Some(Point::new(30.0, 40.0)));
        assert_eq!(moves.take(), None);
    }

    #[test]
    fn push_signals_the_start_of_a_batch() {
        let mut moves = Coalesced::new();
        assert!(moves.push(1));
        assert!(!moves.push(2));
        moves.take();
        // drained: the next push opens a fresh batch
        assert!(moves.push(3));
    }

    #[test]
    fn pending_tracks_the_stored_value() {
        let mut moves: Coalesced<Point> = Coalesced::new();
        assert!(!moves.is_pending());
        moves.push(Point::new(1.0, 1.0));
        assert!(moves.is_pending());
        moves.take();
        assert!(!moves.is_pending());
    }

    #[test]
    fn clear_discards_without_yielding() {
        let mut moves = Coalesced::new();
        moves.push(Point::new(5.0, 5.0));
        moves.clear();
        assert!(!moves.is_pending());
        assert_eq!(moves.take(), None);
    }
}
