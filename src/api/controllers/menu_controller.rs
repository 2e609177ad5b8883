use crate::api::request::{CreateFoodItemRequest, UpdateFoodItemRequest};
use crate::api::response::FoodItemResponse;
use crate::api::server::AppState;
use crate::data::models::food_item::{NewFoodItem, UpdateFoodItem};
use crate::security::jwt::AccessClaims;
use crate::services::errors::MenuServiceError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

fn menu_error_response(e: MenuServiceError) -> Response {
    match e {
        MenuServiceError::ItemNotFound => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        MenuServiceError::Store(ref store_err) => {
            tracing::error!("Menu store error: {}", store_err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Get the full menu. Open to everyone, including guests.
pub async fn get_menu(State(state): State<AppState>) -> impl IntoResponse {
    match state.menu.list_items().await {
        Ok(items) => {
            let response: Vec<FoodItemResponse> =
                items.into_iter().map(FoodItemResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => menu_error_response(e),
    }
}

/// Get a single menu item
pub async fn get_item(
    State(state): State<AppState>,
    Path(food_item_id): Path<i32>,
) -> impl IntoResponse {
    match state.menu.get_item(food_item_id).await {
        Ok(item) => (StatusCode::OK, Json(FoodItemResponse::from(item))).into_response(),
        Err(e) => menu_error_response(e),
    }
}

/// Create a menu item (manager and up)
pub async fn create_item(
    claims: AccessClaims,
    State(state): State<AppState>,
    Json(payload): Json<CreateFoodItemRequest>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    let item = NewFoodItem {
        name: payload.name,
        description: payload.description,
        price_cents: payload.price_cents,
        image: payload.image,
        category: payload.category,
        is_available: payload.is_available.unwrap_or(true),
        preparation_minutes: payload.preparation_minutes.unwrap_or(10),
    };

    match state.menu.create_item(item).await {
        Ok(created) => (StatusCode::CREATED, Json(FoodItemResponse::from(created))).into_response(),
        Err(e) => menu_error_response(e),
    }
}

/// Update a menu item (manager and up)
pub async fn update_item(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(food_item_id): Path<i32>,
    Json(payload): Json<UpdateFoodItemRequest>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    let changes = UpdateFoodItem {
        name: payload.name,
        description: payload.description,
        price_cents: payload.price_cents,
        image: payload.image,
        category: payload.category,
        is_available: payload.is_available,
        preparation_minutes: payload.preparation_minutes,
    };

    match state.menu.update_item(food_item_id, changes).await {
        Ok(updated) => (StatusCode::OK, Json(FoodItemResponse::from(updated))).into_response(),
        Err(e) => menu_error_response(e),
    }
}

/// Flip an item's availability (manager and up)
pub async fn toggle_availability(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(food_item_id): Path<i32>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    match state.menu.toggle_availability(food_item_id).await {
        Ok(updated) => (StatusCode::OK, Json(FoodItemResponse::from(updated))).into_response(),
        Err(e) => menu_error_response(e),
    }
}

/// Delete a menu item (manager and up)
pub async fn delete_item(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(food_item_id): Path<i32>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    match state.menu.delete_item(food_item_id).await {
        Ok(()) => (StatusCode::OK, "Menu item deleted").into_response(),
        Err(e) => menu_error_response(e),
    }
}
