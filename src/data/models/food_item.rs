use crate::data::models::schema::*;
use diesel::prelude::*;

/// A menu entry. Prices are integer currency units (cents).
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = food_items)]
#[diesel(primary_key(food_item_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
#[diesel(treat_none_as_null = true)]
pub struct FoodItem {
    pub food_item_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub image: Option<String>,
    pub category: String,
    pub is_available: bool,
    pub preparation_minutes: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = food_items)]
pub struct NewFoodItem {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub image: Option<String>,
    pub category: String,
    pub is_available: bool,
    pub preparation_minutes: i32,
}

#[derive(AsChangeset, PartialEq, Debug, Clone, Default)]
#[diesel(table_name = food_items)]
pub struct UpdateFoodItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
}
