use crate::data::models::order::{NewOrder, NewOrderItem, Order, OrderItem};
use crate::data::repos::traits::stores::OrderStore;
use crate::realtime::feed::{OrderEvent, OrderFeed};
use crate::services::cart::CartLineItem;
use crate::services::errors::OrderServiceError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Minutes added on top of the slowest line item's preparation time.
const PREP_BUFFER_MINUTES: i32 = 5;

/// Order lifecycle. Strictly linear; a status may only ever move toward
/// `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Ordered,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "ordered",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }

    /// Position in the lifecycle; transitions must strictly increase it.
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Ordered => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Completed => 3,
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ordered" => Ok(OrderStatus::Ordered),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(()),
        }
    }
}

/// Human-readable order number: `FC` + last six digits of the unix-millis
/// clock + two random digits. Collisions within the same clock window are
/// possible; the store's unique column catches them.
pub fn generate_order_number() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::thread_rng().gen_range(0..100u32);
    format!("FC{:06}{:02}", millis % 1_000_000, suffix)
}

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    feed: OrderFeed,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, feed: OrderFeed) -> Self {
        OrderService { store, feed }
    }

    /// Places an order from a cart snapshot. The header is persisted first,
    /// then the line items; a failure between the two surfaces as
    /// `PartialWrite` and must not be presented as success.
    pub async fn create_order(
        &self,
        user_id: Option<i32>,
        user_name: &str,
        items: &[CartLineItem],
        payment_method: &str,
    ) -> Result<(Order, Vec<OrderItem>), OrderServiceError> {
        let user_id = user_id.ok_or(OrderServiceError::Unauthenticated)?;

        if items.is_empty() {
            return Err(OrderServiceError::EmptyCart);
        }

        let total_cents: i64 = items
            .iter()
            .map(|l| l.price_cents * i64::from(l.quantity))
            .sum();
        let estimated_minutes = items
            .iter()
            .map(|l| l.preparation_minutes)
            .max()
            .unwrap_or(0)
            + PREP_BUFFER_MINUTES;

        let header = NewOrder {
            order_number: generate_order_number(),
            user_id,
            user_name: user_name.to_string(),
            total_cents,
            status: OrderStatus::Ordered.as_str().to_string(),
            payment_method: payment_method.to_string(),
            // Payment is simulated; it is recorded as settled at creation.
            payment_status: "completed".to_string(),
            estimated_minutes,
        };

        let order = self.store.insert_order(header).await?;

        let line_items: Vec<NewOrderItem> = items
            .iter()
            .map(|l| NewOrderItem {
                order_id: order.order_id,
                food_item_id: Some(l.food_item_id),
                name: l.name.clone(),
                price_cents: l.price_cents,
                quantity: l.quantity,
                image: l.image.clone(),
            })
            .collect();

        if let Err(e) = self.store.insert_line_items(line_items).await {
            tracing::error!(
                order_number = %order.order_number,
                error = %e,
                "order header committed but line items failed"
            );
            return Err(OrderServiceError::PartialWrite(order.order_number));
        }

        let stored_items = self.store.line_items(order.order_id).await?;

        self.feed.publish(OrderEvent::Created {
            order_id: order.order_id,
        });

        Ok((order, stored_items))
    }

    /// Moves an order forward in its lifecycle. Any strictly forward status
    /// is accepted (skipping is allowed); the same status is an idempotent
    /// no-op so racing duplicate updates cannot fail; a backward status is
    /// rejected without touching the row. The write only lands when the
    /// status is still the one the check saw, so a concurrent update cannot
    /// sneak a regression past the check.
    pub async fn advance_status(
        &self,
        order_id: i32,
        new_status: OrderStatus,
    ) -> Result<Order, OrderServiceError> {
        loop {
            let order = self
                .store
                .get_by_id(order_id)
                .await?
                .ok_or(OrderServiceError::OrderNotFound)?;

            let current: OrderStatus = order
                .status
                .parse()
                .unwrap_or(OrderStatus::Ordered);

            if new_status == current {
                return Ok(order);
            }
            if new_status.rank() < current.rank() {
                return Err(OrderServiceError::InvalidTransition);
            }

            let applied = self
                .store
                .update_status(order_id, current.as_str(), new_status.as_str())
                .await?;
            if !applied {
                // The row moved under us; re-read and decide again.
                continue;
            }

            let updated = self
                .store
                .get_by_id(order_id)
                .await?
                .ok_or(OrderServiceError::OrderNotFound)?;

            self.feed.publish(OrderEvent::StatusChanged {
                order_id,
                status: new_status,
                updated_at: updated.updated_at,
            });

            return Ok(updated);
        }
    }

    pub async fn get_order(
        &self,
        order_id: i32,
    ) -> Result<(Order, Vec<OrderItem>), OrderServiceError> {
        let order = self
            .store
            .get_by_id(order_id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)?;
        let items = self.store.line_items(order_id).await?;
        Ok((order, items))
    }

    pub async fn lookup_by_number(
        &self,
        order_number: &str,
    ) -> Result<(Order, Vec<OrderItem>), OrderServiceError> {
        let order = self
            .store
            .get_by_number(order_number)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)?;
        let items = self.store.line_items(order.order_id).await?;
        Ok((order, items))
    }

    /// All orders with their line items, newest first (manager dashboard).
    pub async fn list_orders(&self) -> Result<Vec<(Order, Vec<OrderItem>)>, OrderServiceError> {
        let orders = self.store.list_all().await?;
        self.attach_items(orders).await
    }

    pub async fn list_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<(Order, Vec<OrderItem>)>, OrderServiceError> {
        let orders = self.store.list_by_status(status.as_str()).await?;
        self.attach_items(orders).await
    }

    async fn attach_items(
        &self,
        orders: Vec<Order>,
    ) -> Result<Vec<(Order, Vec<OrderItem>)>, OrderServiceError> {
        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.store.line_items(order.order_id).await?;
            result.push((order, items));
        }
        Ok(result)
    }
}
