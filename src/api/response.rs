use crate::data::models::food_item::FoodItem;
use crate::data::models::manager_request::ManagerRequest;
use crate::data::models::order::{Order, OrderItem};
use crate::data::models::user::RoleAssignment;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub image: Option<String>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: i32,
    pub order_number: String,
    pub user_name: String,
    pub items: Vec<OrderItemResponse>,
    pub total_cents: i64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub estimated_minutes: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<(Order, Vec<OrderItem>)> for OrderResponse {
    fn from((order, items): (Order, Vec<OrderItem>)) -> Self {
        Self {
            order_id: order.order_id,
            order_number: order.order_number,
            user_name: order.user_name,
            items: items
                .into_iter()
                .map(|i| OrderItemResponse {
                    name: i.name,
                    price_cents: i.price_cents,
                    quantity: i.quantity,
                    image: i.image,
                })
                .collect(),
            total_cents: order.total_cents,
            status: order.status,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            estimated_minutes: order.estimated_minutes,
            created_at: order.created_at.map(|d| d.to_string()),
            updated_at: order.updated_at.map(|d| d.to_string()),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct FoodItemResponse {
    pub food_item_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub image: Option<String>,
    pub category: String,
    pub is_available: bool,
    pub preparation_minutes: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<FoodItem> for FoodItemResponse {
    fn from(item: FoodItem) -> Self {
        Self {
            food_item_id: item.food_item_id,
            name: item.name,
            description: item.description,
            price_cents: item.price_cents,
            image: item.image,
            category: item.category,
            is_available: item.is_available,
            preparation_minutes: item.preparation_minutes,
            created_at: item.created_at.map(|d| d.to_string()),
            updated_at: item.updated_at.map(|d| d.to_string()),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ManagerRequestResponse {
    pub request_id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub status: String,
    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<String>,
    pub created_at: Option<String>,
}

impl From<ManagerRequest> for ManagerRequestResponse {
    fn from(request: ManagerRequest) -> Self {
        Self {
            request_id: request.request_id,
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            status: request.status,
            reviewed_by: request.reviewed_by,
            reviewed_at: request.reviewed_at.map(|d| d.to_string()),
            created_at: request.created_at.map(|d| d.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct RoleAssignmentResponse {
    pub user_id: i32,
    pub role: String,
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(assignment: RoleAssignment) -> Self {
        Self {
            user_id: assignment.user_id,
            role: assignment.role,
        }
    }
}

/// What the manager/admin surfaces should show for the current identity.
#[derive(Serialize, Deserialize)]
pub struct GateResponse {
    pub decision: String,
}
