use foodcourt_server_lib::data::repos::implementors::memory::MemoryStore;
use foodcourt_server_lib::realtime::feed::{OrderEvent, OrderFeed};
use foodcourt_server_lib::realtime::tracker::{OrderTracker, TrackerNotice};
use foodcourt_server_lib::services::cart::CartLineItem;
use foodcourt_server_lib::services::order_service::{OrderService, OrderStatus};
use futures_core::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

fn line(id: i32, name: &str, price_cents: i64, quantity: i32, prep: i32) -> CartLineItem {
    CartLineItem {
        food_item_id: id,
        name: name.to_string(),
        price_cents,
        image: None,
        quantity,
        preparation_minutes: prep,
    }
}

#[tokio::test]
async fn test_row_scoped_subscription_filters_other_orders() {
    let feed = OrderFeed::new(16);
    let mut sub = feed.subscribe_order(2);

    feed.publish(OrderEvent::Created { order_id: 1 });
    feed.publish(OrderEvent::StatusChanged {
        order_id: 2,
        status: OrderStatus::Preparing,
        updated_at: None,
    });

    let event = sub.next_event().await.expect("Feed closed unexpectedly");
    assert_eq!(event.order_id(), 2);
}

#[tokio::test]
async fn test_collection_subscription_sees_every_order() {
    let feed = OrderFeed::new(16);
    let mut sub = feed.subscribe_all();

    feed.publish(OrderEvent::Created { order_id: 1 });
    feed.publish(OrderEvent::Created { order_id: 7 });

    let first = sub.next_event().await.expect("Feed closed unexpectedly");
    let second = sub.next_event().await.expect("Feed closed unexpectedly");
    assert_eq!(first.order_id(), 1);
    assert_eq!(second.order_id(), 7);
}

#[tokio::test]
async fn test_parked_stream_wakes_on_publish() {
    let feed = OrderFeed::new(16);
    let mut sub = feed.subscribe_all();

    // Park a task on the empty stream before anything is published.
    let handle = tokio::spawn(async move {
        std::future::poll_fn(|cx| Pin::new(&mut sub).poll_next(cx)).await
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    feed.publish(OrderEvent::Created { order_id: 3 });

    let item = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("Parked subscriber was never woken by the publish")
        .expect("Subscriber task panicked")
        .expect("Feed closed unexpectedly");
    assert!(item.is_ok());
}

#[tokio::test]
async fn test_dropping_subscription_releases_receiver() {
    let feed = OrderFeed::new(16);
    assert_eq!(feed.subscriber_count(), 0);

    let sub = feed.subscribe_order(1);
    let other = feed.subscribe_all();
    assert_eq!(feed.subscriber_count(), 2);

    drop(sub);
    assert_eq!(feed.subscriber_count(), 1);
    drop(other);
    assert_eq!(feed.subscriber_count(), 0);
}

#[tokio::test]
async fn test_order_service_publishes_after_confirmed_writes() {
    let store = Arc::new(MemoryStore::new());
    let feed = OrderFeed::new(16);
    let service = OrderService::new(store, feed.clone());
    let mut sub = feed.subscribe_all();

    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (order, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");

    let created = sub.next_event().await.expect("Feed closed unexpectedly");
    assert_eq!(
        created,
        OrderEvent::Created {
            order_id: order.order_id
        }
    );

    let updated = service
        .advance_status(order.order_id, OrderStatus::Preparing)
        .await
        .expect("Forward transition failed");

    let changed = sub.next_event().await.expect("Feed closed unexpectedly");
    assert_eq!(
        changed,
        OrderEvent::StatusChanged {
            order_id: order.order_id,
            status: OrderStatus::Preparing,
            updated_at: updated.updated_at,
        }
    );
}

#[tokio::test]
async fn test_idempotent_update_publishes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let feed = OrderFeed::new(16);
    let service = OrderService::new(store, feed.clone());

    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (order, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");
    service
        .advance_status(order.order_id, OrderStatus::Preparing)
        .await
        .expect("Forward transition failed");

    let mut sub = feed.subscribe_all();
    service
        .advance_status(order.order_id, OrderStatus::Preparing)
        .await
        .expect("Duplicate update should not fail");
    service
        .advance_status(order.order_id, OrderStatus::Ready)
        .await
        .expect("Forward transition failed");

    // Only the genuine change comes through; the no-op published nothing.
    let event = sub.next_event().await.expect("Feed closed unexpectedly");
    match event {
        OrderEvent::StatusChanged {
            order_id, status, ..
        } => {
            assert_eq!(order_id, order.order_id);
            assert_eq!(status, OrderStatus::Ready);
        }
        other => panic!("Unexpected event: {:?}", other),
    }
}

#[test]
fn test_tracker_discards_stale_and_duplicate_events() {
    let mut tracker = OrderTracker::new(OrderStatus::Ready);

    assert_eq!(tracker.observe(OrderStatus::Preparing), None);
    assert_eq!(tracker.observe(OrderStatus::Ready), None);
    assert_eq!(tracker.status(), OrderStatus::Ready);
}

#[test]
fn test_tracker_notifies_once_per_stage() {
    let mut tracker = OrderTracker::new(OrderStatus::Ordered);

    assert_eq!(
        tracker.observe(OrderStatus::Preparing),
        Some(TrackerNotice::Preparing)
    );
    assert_eq!(tracker.observe(OrderStatus::Preparing), None);
    assert_eq!(
        tracker.observe(OrderStatus::Ready),
        Some(TrackerNotice::Ready)
    );
    assert_eq!(tracker.observe(OrderStatus::Completed), None);
}

#[test]
fn test_tracker_skip_to_ready_notifies_ready_only() {
    let mut tracker = OrderTracker::new(OrderStatus::Ordered);

    assert_eq!(
        tracker.observe(OrderStatus::Ready),
        Some(TrackerNotice::Ready)
    );
    assert_eq!(tracker.status(), OrderStatus::Ready);
}

#[test]
fn test_tracker_resync_is_forward_only_and_silent() {
    let mut tracker = OrderTracker::new(OrderStatus::Preparing);

    tracker.resync(OrderStatus::Completed);
    assert_eq!(tracker.status(), OrderStatus::Completed);

    // A read that raced an older snapshot must not move the state back.
    tracker.resync(OrderStatus::Ordered);
    assert_eq!(tracker.status(), OrderStatus::Completed);
}
