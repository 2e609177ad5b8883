use async_trait::async_trait;
use foodcourt_server_lib::data::models::order::{NewOrder, NewOrderItem, Order, OrderItem};
use foodcourt_server_lib::data::repos::implementors::memory::MemoryStore;
use foodcourt_server_lib::data::repos::traits::stores::{OrderStore, StoreError};
use foodcourt_server_lib::realtime::feed::OrderFeed;
use foodcourt_server_lib::services::cart::CartLineItem;
use foodcourt_server_lib::services::errors::OrderServiceError;
use foodcourt_server_lib::services::order_service::{
    OrderService, OrderStatus, generate_order_number,
};
use serial_test::serial;
use std::sync::Arc;

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

fn service() -> (OrderService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = OrderService::new(store.clone(), OrderFeed::new(16));
    (service, store)
}

#[tokio::test]
async fn test_create_order_totals_and_initial_state() {
    let (service, _) = service();
    let cart = vec![line(1, "Burger", 100, 2, 10), line(2, "Fries", 50, 1, 5)];

    let (order, items) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");

    assert_eq!(order.total_cents, 250);
    assert_eq!(order.status, "ordered");
    assert_eq!(order.payment_status, "completed");
    assert_eq!(order.estimated_minutes, 15);
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_create_order_rejects_empty_cart() {
    let (service, _) = service();

    let result = service.create_order(Some(1), "Alice", &[], "card").await;

    assert_eq!(result.unwrap_err(), OrderServiceError::EmptyCart);
}

#[tokio::test]
async fn test_create_order_requires_identity() {
    let (service, _) = service();
    let cart = vec![line(1, "Burger", 100, 1, 10)];

    let result = service.create_order(None, "", &cart, "card").await;

    assert_eq!(result.unwrap_err(), OrderServiceError::Unauthenticated);
}

#[test]
#[serial]
fn test_order_number_format() {
    let number = generate_order_number();

    assert!(number.starts_with("FC"));
    assert_eq!(number.len(), 10);
    assert!(number[2..].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_status_advances_through_lifecycle() {
    let (service, _) = service();
    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (order, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");

    for status in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        let updated = service
            .advance_status(order.order_id, status)
            .await
            .expect("Forward transition failed");
        assert_eq!(updated.status, status.as_str());
    }
}

#[tokio::test]
async fn test_status_may_skip_forward() {
    let (service, _) = service();
    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (order, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");

    let updated = service
        .advance_status(order.order_id, OrderStatus::Ready)
        .await
        .expect("Skipping forward should be allowed");

    assert_eq!(updated.status, "ready");
}

#[tokio::test]
async fn test_backward_transition_rejected_and_row_untouched() {
    let (service, store) = service();
    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (order, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");

    service
        .advance_status(order.order_id, OrderStatus::Ready)
        .await
        .expect("Forward transition failed");

    let result = service
        .advance_status(order.order_id, OrderStatus::Preparing)
        .await;
    assert_eq!(result.unwrap_err(), OrderServiceError::InvalidTransition);

    let stored = store
        .get_by_id(order.order_id)
        .await
        .expect("Store read failed")
        .expect("Order missing");
    assert_eq!(stored.status, "ready");
}

#[tokio::test]
async fn test_same_status_is_idempotent_noop() {
    let (service, _) = service();
    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (order, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");

    service
        .advance_status(order.order_id, OrderStatus::Preparing)
        .await
        .expect("Forward transition failed");

    let repeated = service
        .advance_status(order.order_id, OrderStatus::Preparing)
        .await
        .expect("Duplicate update should not fail");

    assert_eq!(repeated.status, "preparing");
}

#[tokio::test]
async fn test_advance_unknown_order_not_found() {
    let (service, _) = service();

    let result = service.advance_status(999, OrderStatus::Preparing).await;

    assert_eq!(result.unwrap_err(), OrderServiceError::OrderNotFound);
}

#[tokio::test]
async fn test_lookup_by_number() {
    let (service, _) = service();
    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (order, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");

    let (found, items) = service
        .lookup_by_number(&order.order_number)
        .await
        .expect("Lookup by number failed");

    assert_eq!(found.order_id, order.order_id);
    assert_eq!(items.len(), 1);

    let missing = service.lookup_by_number("FC00000000").await;
    assert_eq!(missing.unwrap_err(), OrderServiceError::OrderNotFound);
}

#[tokio::test]
async fn test_list_by_status_filters() {
    let (service, _) = service();
    let cart = vec![line(1, "Burger", 100, 1, 10)];
    let (first, _) = service
        .create_order(Some(1), "Alice", &cart, "card")
        .await
        .expect("Failed to place order");
    service
        .create_order(Some(2), "Bob", &cart, "cash")
        .await
        .expect("Failed to place order");

    service
        .advance_status(first.order_id, OrderStatus::Preparing)
        .await
        .expect("Forward transition failed");

    let preparing = service
        .list_by_status(OrderStatus::Preparing)
        .await
        .expect("List by status failed");
    assert_eq!(preparing.len(), 1);
    assert_eq!(preparing[0].0.order_id, first.order_id);

    let all = service.list_orders().await.expect("List failed");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_status_write_only_lands_on_expected_current() {
    let store = MemoryStore::new();
    let order = store
        .insert_order(NewOrder {
            order_number: "FC12345678".to_string(),
            user_id: 1,
            user_name: "Alice".to_string(),
            total_cents: 100,
            status: "ordered".to_string(),
            payment_method: "card".to_string(),
            payment_status: "completed".to_string(),
            estimated_minutes: 15,
        })
        .await
        .expect("Insert failed");

    let applied = store
        .update_status(order.order_id, "ordered", "preparing")
        .await
        .expect("Update failed");
    assert!(applied);

    // A writer that read "ordered" before the update must miss, so a
    // stale decision can never land on the moved row.
    let stale = store
        .update_status(order.order_id, "ordered", "completed")
        .await
        .expect("Update failed");
    assert!(!stale);

    let row = store
        .get_by_id(order.order_id)
        .await
        .expect("Store read failed")
        .expect("Order missing");
    assert_eq!(row.status, "preparing");
}

/// Delegates everything to a MemoryStore except line-item inserts, which
/// always fail. Simulates the second write of a checkout going down.
struct FailingItemsStore {
    inner: MemoryStore,
}

#[async_trait]
impl OrderStore for FailingItemsStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        self.inner.insert_order(order).await
    }

    async fn insert_line_items(&self, _items: Vec<NewOrderItem>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    async fn get_by_id(&self, order_id: i32) -> Result<Option<Order>, StoreError> {
        self.inner.get_by_id(order_id).await
    }

    async fn get_by_number(&self, order_number: &str) -> Result<Option<Order>, StoreError> {
        self.inner.get_by_number(order_number).await
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        self.inner.list_all().await
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Order>, StoreError> {
        self.inner.list_by_status(status).await
    }

    async fn line_items(&self, order_id: i32) -> Result<Vec<OrderItem>, StoreError> {
        self.inner.line_items(order_id).await
    }

    async fn update_status(
        &self,
        order_id: i32,
        from_status: &str,
        to_status: &str,
    ) -> Result<bool, StoreError> {
        self.inner.update_status(order_id, from_status, to_status).await
    }
}

#[tokio::test]
async fn test_failed_line_items_surface_as_partial_write() {
    let store = Arc::new(FailingItemsStore {
        inner: MemoryStore::new(),
    });
    let service = OrderService::new(store.clone(), OrderFeed::new(16));
    let cart = vec![line(1, "Burger", 100, 1, 10)];

    let result = service.create_order(Some(1), "Alice", &cart, "card").await;

    let Err(OrderServiceError::PartialWrite(number)) = result else {
        panic!("Expected a partial write failure");
    };

    // The header committed; the failure must not be reported as success.
    let header = store
        .get_by_number(&number)
        .await
        .expect("Store read failed")
        .expect("Header should have been persisted");
    assert_eq!(header.status, "ordered");
}
