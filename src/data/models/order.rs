use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
#[diesel(treat_none_as_null = true)]
pub struct Order {
    pub order_id: i32,
    pub order_number: String,
    pub user_id: i32,
    pub user_name: String,
    pub total_cents: i64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub estimated_minutes: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub order_number: String,
    pub user_id: i32,
    pub user_name: String,
    pub total_cents: i64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub estimated_minutes: i32,
}

/// A line item snapshotted from the cart at checkout. Rows are immutable
/// once attached to an order; only the header's status ever changes.
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
#[diesel(primary_key(order_item_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
#[diesel(treat_none_as_null = true)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub food_item_id: Option<i32>,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub image: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub food_item_id: Option<i32>,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub image: Option<String>,
}
