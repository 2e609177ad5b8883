//! Client-side reconciliation of an order's displayed status.
//!
//! Seed the tracker with a point read, then feed it every inbound status.
//! Stale or duplicate deliveries are discarded so the displayed state
//! never moves backward, and a user-facing notice fires exactly once per
//! genuine entry into `preparing` or `ready`.

use crate::services::order_service::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerNotice {
    Preparing,
    Ready,
}

#[derive(Debug, Clone)]
pub struct OrderTracker {
    current: OrderStatus,
}

impl OrderTracker {
    pub fn new(initial: OrderStatus) -> Self {
        OrderTracker { current: initial }
    }

    pub fn status(&self) -> OrderStatus {
        self.current
    }

    /// Applies an inbound status change. Returns a notice only when the
    /// order genuinely enters `preparing` or `ready`; re-deliveries and
    /// out-of-order events return `None` and leave the state untouched.
    pub fn observe(&mut self, incoming: OrderStatus) -> Option<TrackerNotice> {
        if incoming.rank() <= self.current.rank() {
            return None;
        }

        self.current = incoming;

        match incoming {
            OrderStatus::Preparing => Some(TrackerNotice::Preparing),
            OrderStatus::Ready => Some(TrackerNotice::Ready),
            OrderStatus::Ordered | OrderStatus::Completed => None,
        }
    }

    /// Re-seeds from a fresh point read after a dropped channel. Events
    /// missed while disconnected are not replayed, so no notices fire; the
    /// forward-only guard still applies in case the read raced an older
    /// snapshot.
    pub fn resync(&mut self, status: OrderStatus) {
        if status.rank() > self.current.rank() {
            self.current = status;
        }
    }
}
