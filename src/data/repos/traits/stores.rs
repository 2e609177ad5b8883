use crate::data::models::food_item::{FoodItem, NewFoodItem, UpdateFoodItem};
use crate::data::models::manager_request::{ManagerRequest, NewManagerRequest};
use crate::data::models::order::{NewOrder, NewOrderItem, Order, OrderItem};
use crate::data::models::user::{NewUser, Role, RoleAssignment, User};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Failure at the persistence boundary. `Unavailable` covers pool and
/// connection trouble, `Query` a statement that the store rejected
/// (including uniqueness violations on `order_number` and `email`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Unavailable(String),
    Query(String),
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(e) => write!(f, "store unavailable: {}", e),
            StoreError::Query(e) => write!(f, "query failed: {}", e),
        }
    }
}

/// Orders and their snapshotted line items.
///
/// `insert_order` and `insert_line_items` are deliberately separate calls:
/// the order service persists the header first and must be able to surface
/// a header-without-items outcome instead of claiming success.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn insert_line_items(&self, items: Vec<NewOrderItem>) -> Result<(), StoreError>;

    async fn get_by_id(&self, order_id: i32) -> Result<Option<Order>, StoreError>;

    async fn get_by_number(&self, order_number: &str) -> Result<Option<Order>, StoreError>;

    /// All orders, newest first.
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

    async fn list_by_status(&self, status: &str) -> Result<Vec<Order>, StoreError>;

    async fn line_items(&self, order_id: i32) -> Result<Vec<OrderItem>, StoreError>;

    /// Updates the status column and bumps `updated_at`, but only when the
    /// stored status still equals `from_status`. Returns whether a row
    /// matched. Never touches the total or the line items.
    async fn update_status(
        &self,
        order_id: i32,
        from_status: &str,
        to_status: &str,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn insert_item(&self, item: NewFoodItem) -> Result<FoodItem, StoreError>;

    async fn get_item(&self, food_item_id: i32) -> Result<Option<FoodItem>, StoreError>;

    /// All items, sorted by category.
    async fn list_items(&self) -> Result<Vec<FoodItem>, StoreError>;

    async fn update_item(
        &self,
        food_item_id: i32,
        changes: UpdateFoodItem,
    ) -> Result<Option<FoodItem>, StoreError>;

    async fn delete_item(&self, food_item_id: i32) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn get_by_id(&self, user_id: i32) -> Result<Option<User>, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// The stored role assignment, if any. Callers treat a missing row as
    /// the student default.
    async fn role_of(&self, user_id: i32) -> Result<Option<Role>, StoreError>;

    async fn set_role(&self, user_id: i32, role: Role) -> Result<(), StoreError>;

    async fn list_assignments(&self) -> Result<Vec<RoleAssignment>, StoreError>;
}

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn insert_request(
        &self,
        request: NewManagerRequest,
    ) -> Result<ManagerRequest, StoreError>;

    async fn get_by_id(&self, request_id: i32) -> Result<Option<ManagerRequest>, StoreError>;

    /// The most recently submitted request for an identity, regardless of
    /// review status.
    async fn find_latest_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<ManagerRequest>, StoreError>;

    async fn list_pending(&self) -> Result<Vec<ManagerRequest>, StoreError>;

    async fn set_review(
        &self,
        request_id: i32,
        status: &str,
        reviewed_by: i32,
        reviewed_at: NaiveDateTime,
    ) -> Result<Option<ManagerRequest>, StoreError>;
}
