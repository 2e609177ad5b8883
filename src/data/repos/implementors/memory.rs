use crate::data::models::food_item::{FoodItem, NewFoodItem, UpdateFoodItem};
use crate::data::models::manager_request::{ManagerRequest, NewManagerRequest, RequestStatus};
use crate::data::models::order::{NewOrder, NewOrderItem, Order, OrderItem};
use crate::data::models::user::{NewUser, Role, RoleAssignment, User};
use crate::data::repos::traits::stores::{
    MenuStore, OrderStore, RequestStore, StoreError, UserStore,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

/// In-memory implementation of every store trait. Backs the test suite and
/// DB-less local runs; mirrors the uniqueness rules the MySQL schema
/// enforces (order number, user email).
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    food_items: HashMap<i32, FoodItem>,
    orders: HashMap<i32, Order>,
    order_items: HashMap<i32, Vec<OrderItem>>,
    users: HashMap<i32, User>,
    roles: HashMap<i32, RoleAssignment>,
    requests: HashMap<i32, ManagerRequest>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut state = self.inner.lock().unwrap();

        if state
            .orders
            .values()
            .any(|o| o.order_number == order.order_number)
        {
            return Err(StoreError::Query(format!(
                "duplicate order number {}",
                order.order_number
            )));
        }

        let id = state.next_id();
        let row = Order {
            order_id: id,
            order_number: order.order_number,
            user_id: order.user_id,
            user_name: order.user_name,
            total_cents: order.total_cents,
            status: order.status,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            estimated_minutes: order.estimated_minutes,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.orders.insert(id, row.clone());
        state.order_items.insert(id, Vec::new());
        Ok(row)
    }

    async fn insert_line_items(&self, items: Vec<NewOrderItem>) -> Result<(), StoreError> {
        let mut state = self.inner.lock().unwrap();

        for item in items {
            if !state.orders.contains_key(&item.order_id) {
                return Err(StoreError::Query(format!(
                    "order {} does not exist",
                    item.order_id
                )));
            }
            let id = state.next_id();
            let row = OrderItem {
                order_item_id: id,
                order_id: item.order_id,
                food_item_id: item.food_item_id,
                name: item.name,
                price_cents: item.price_cents,
                quantity: item.quantity,
                image: item.image,
                created_at: Some(now()),
            };
            state.order_items.entry(item.order_id).or_default().push(row);
        }
        Ok(())
    }

    async fn get_by_id(&self, order_id: i32) -> Result<Option<Order>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state.orders.get(&order_id).cloned())
    }

    async fn get_by_number(&self, order_number: &str) -> Result<Option<Order>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .orders
            .values()
            .find(|o| o.order_number == order_number)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let state = self.inner.lock().unwrap();
        let mut rows: Vec<Order> = state.orders.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.order_id.cmp(&a.order_id)));
        Ok(rows)
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Order>, StoreError> {
        let mut rows = self.list_all().await?;
        rows.retain(|o| o.status == status);
        Ok(rows)
    }

    async fn line_items(&self, order_id: i32) -> Result<Vec<OrderItem>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state.order_items.get(&order_id).cloned().unwrap_or_default())
    }

    async fn update_status(
        &self,
        order_id: i32,
        from_status: &str,
        to_status: &str,
    ) -> Result<bool, StoreError> {
        let mut state = self.inner.lock().unwrap();
        match state.orders.get_mut(&order_id) {
            Some(order) if order.status == from_status => {
                order.status = to_status.to_string();
                order.updated_at = Some(now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn insert_item(&self, item: NewFoodItem) -> Result<FoodItem, StoreError> {
        let mut state = self.inner.lock().unwrap();
        let id = state.next_id();
        let row = FoodItem {
            food_item_id: id,
            name: item.name,
            description: item.description,
            price_cents: item.price_cents,
            image: item.image,
            category: item.category,
            is_available: item.is_available,
            preparation_minutes: item.preparation_minutes,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.food_items.insert(id, row.clone());
        Ok(row)
    }

    async fn get_item(&self, food_item_id: i32) -> Result<Option<FoodItem>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state.food_items.get(&food_item_id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<FoodItem>, StoreError> {
        let state = self.inner.lock().unwrap();
        let mut rows: Vec<FoodItem> = state.food_items.values().cloned().collect();
        rows.sort_by(|a, b| a.category.cmp(&b.category).then(a.food_item_id.cmp(&b.food_item_id)));
        Ok(rows)
    }

    async fn update_item(
        &self,
        food_item_id: i32,
        changes: UpdateFoodItem,
    ) -> Result<Option<FoodItem>, StoreError> {
        let mut state = self.inner.lock().unwrap();
        let Some(item) = state.food_items.get_mut(&food_item_id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(description) = changes.description {
            item.description = Some(description);
        }
        if let Some(price_cents) = changes.price_cents {
            item.price_cents = price_cents;
        }
        if let Some(image) = changes.image {
            item.image = Some(image);
        }
        if let Some(category) = changes.category {
            item.category = category;
        }
        if let Some(is_available) = changes.is_available {
            item.is_available = is_available;
        }
        if let Some(preparation_minutes) = changes.preparation_minutes {
            item.preparation_minutes = preparation_minutes;
        }
        item.updated_at = Some(now());

        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, food_item_id: i32) -> Result<bool, StoreError> {
        let mut state = self.inner.lock().unwrap();
        Ok(state.food_items.remove(&food_item_id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.inner.lock().unwrap();

        if state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Query(format!("duplicate email {}", user.email)));
        }

        let id = state.next_id();
        let row = User {
            user_id: id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.users.insert(id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, user_id: i32) -> Result<Option<User>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.get(&user_id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn role_of(&self, user_id: i32) -> Result<Option<Role>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .roles
            .get(&user_id)
            .and_then(|r| Role::from_str(&r.role).ok()))
    }

    async fn set_role(&self, user_id: i32, role: Role) -> Result<(), StoreError> {
        let mut state = self.inner.lock().unwrap();
        let row = RoleAssignment {
            user_id,
            role: role.as_str().to_string(),
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.roles.insert(user_id, row);
        Ok(())
    }

    async fn list_assignments(&self) -> Result<Vec<RoleAssignment>, StoreError> {
        let state = self.inner.lock().unwrap();
        let mut rows: Vec<RoleAssignment> = state.roles.values().cloned().collect();
        rows.sort_by(|a, b| a.role.cmp(&b.role).then(a.user_id.cmp(&b.user_id)));
        Ok(rows)
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn insert_request(
        &self,
        request: NewManagerRequest,
    ) -> Result<ManagerRequest, StoreError> {
        let mut state = self.inner.lock().unwrap();
        let id = state.next_id();
        let row = ManagerRequest {
            request_id: id,
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            status: request.status,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.requests.insert(id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, request_id: i32) -> Result<Option<ManagerRequest>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state.requests.get(&request_id).cloned())
    }

    async fn find_latest_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<ManagerRequest>, StoreError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .requests
            .values()
            .filter(|r| r.user_id == user_id)
            .max_by_key(|r| (r.created_at, r.request_id))
            .cloned())
    }

    async fn list_pending(&self) -> Result<Vec<ManagerRequest>, StoreError> {
        let state = self.inner.lock().unwrap();
        let mut rows: Vec<ManagerRequest> = state
            .requests
            .values()
            .filter(|r| r.status == RequestStatus::Pending.as_str())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.request_id.cmp(&a.request_id)));
        Ok(rows)
    }

    async fn set_review(
        &self,
        request_id: i32,
        status: &str,
        reviewed_by: i32,
        reviewed_at: NaiveDateTime,
    ) -> Result<Option<ManagerRequest>, StoreError> {
        let mut state = self.inner.lock().unwrap();
        match state.requests.get_mut(&request_id) {
            Some(request) => {
                request.status = status.to_string();
                request.reviewed_by = Some(reviewed_by);
                request.reviewed_at = Some(reviewed_at);
                request.updated_at = Some(reviewed_at);
                Ok(Some(request.clone()))
            }
            None => Ok(None),
        }
    }
}
