use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CartItemRequest {
    pub food_item_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<CartItemRequest>,
    pub payment_method: String,
}

/// Struct for updating order status
#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateFoodItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub image: Option<String>,
    pub category: String,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateFoodItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
}

#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

#[derive(Deserialize)]
pub struct CreateManagerRequest {
    pub name: String,
    pub email: String,
}
