//! Push channel for order changes.
//!
//! The order service publishes an event after every confirmed write, never
//! before. Customer views subscribe to a single order; the manager
//! dashboard subscribes to the whole collection and treats any event as a
//! list-refresh trigger. Dropping a subscription releases its receiver, so
//! a view that unwinds on any path cannot leak a standing channel.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::services::order_service::OrderStatus;
use axum::response::sse::Event as SseEvent;
use tokio::sync::broadcast::{self, error::RecvError};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    Created {
        order_id: i32,
    },
    StatusChanged {
        order_id: i32,
        status: OrderStatus,
        updated_at: Option<NaiveDateTime>,
    },
}

impl OrderEvent {
    pub fn order_id(&self) -> i32 {
        match self {
            OrderEvent::Created { order_id } => *order_id,
            OrderEvent::StatusChanged { order_id, .. } => *order_id,
        }
    }

    fn event_name(&self) -> &'static str {
        match self {
            OrderEvent::Created { .. } => "created",
            OrderEvent::StatusChanged { .. } => "status",
        }
    }
}

/// Broadcast hub for order change events.
#[derive(Clone)]
pub struct OrderFeed {
    tx: broadcast::Sender<OrderEvent>,
}

impl OrderFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        OrderFeed { tx }
    }

    /// Broadcasts to all current subscribers. An empty audience is not an
    /// error; the event is simply dropped.
    pub fn publish(&self, event: OrderEvent) {
        let _ = self.tx.send(event);
    }

    /// Collection-scoped subscription (manager dashboard invalidation).
    pub fn subscribe_all(&self) -> OrderFeedSubscription {
        OrderFeedSubscription {
            state: RecvState::Idle(self.tx.subscribe()),
            scope: None,
        }
    }

    /// Row-scoped subscription: only events for `order_id` come through.
    pub fn subscribe_order(&self, order_id: i32) -> OrderFeedSubscription {
        OrderFeedSubscription {
            state: RecvState::Idle(self.tx.subscribe()),
            scope: Some(order_id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new(128)
    }
}

fn to_sse(event: &OrderEvent) -> SseEvent {
    let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    SseEvent::default().event(event.event_name()).data(data)
}

type RecvFuture = Pin<
    Box<
        dyn Future<Output = (Result<OrderEvent, RecvError>, broadcast::Receiver<OrderEvent>)>
            + Send,
    >,
>;

/// Where the subscription's receiver currently lives. While a recv is in
/// flight the receiver sits inside the stored future; it comes back out
/// with the result.
enum RecvState {
    Idle(broadcast::Receiver<OrderEvent>),
    Waiting(RecvFuture),
    Closed,
}

async fn recv_owned(
    mut rx: broadcast::Receiver<OrderEvent>,
) -> (Result<OrderEvent, RecvError>, broadcast::Receiver<OrderEvent>) {
    let result = rx.recv().await;
    (result, rx)
}

fn in_scope(scope: Option<i32>, event: &OrderEvent) -> bool {
    match scope {
        Some(order_id) => event.order_id() == order_id,
        None => true,
    }
}

/// A live subscription handle. Dropping it unsubscribes.
///
/// Implements `Stream<Item = Result<SseEvent, Infallible>>` so it can be
/// handed straight to `axum::response::Sse`.
pub struct OrderFeedSubscription {
    state: RecvState,
    scope: Option<i32>,
}

impl OrderFeedSubscription {
    /// Awaits the next in-scope event. `None` once the feed shuts down.
    /// Lagged receivers skip ahead; a caller that observes a gap should
    /// re-fetch point-in-time state rather than rely on replay.
    pub async fn next_event(&mut self) -> Option<OrderEvent> {
        std::future::poll_fn(|cx| self.poll_event(cx)).await
    }

    /// The in-flight recv future is kept in `state` across calls: a
    /// `Pending` return leaves the broadcast waiter (and its waker)
    /// registered, so a later `publish` wakes the parked task.
    fn poll_event(&mut self, cx: &mut Context<'_>) -> Poll<Option<OrderEvent>> {
        loop {
            let mut fut = match std::mem::replace(&mut self.state, RecvState::Closed) {
                RecvState::Idle(rx) => Box::pin(recv_owned(rx)) as RecvFuture,
                RecvState::Waiting(fut) => fut,
                RecvState::Closed => return Poll::Ready(None),
            };

            match fut.as_mut().poll(cx) {
                Poll::Ready((Ok(event), rx)) => {
                    self.state = RecvState::Idle(rx);
                    if in_scope(self.scope, &event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Poll::Ready((Err(RecvError::Lagged(_)), rx)) => {
                    self.state = RecvState::Idle(rx);
                }
                Poll::Ready((Err(RecvError::Closed), _)) => return Poll::Ready(None),
                Poll::Pending => {
                    self.state = RecvState::Waiting(fut);
                    return Poll::Pending;
                }
            }
        }
    }
}

impl futures_core::Stream for OrderFeedSubscription {
    type Item = Result<SseEvent, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut().poll_event(cx) {
            Poll::Ready(Some(event)) => Poll::Ready(Some(Ok(to_sse(&event)))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
