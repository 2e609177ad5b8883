use crate::api::request::{CreateOrderRequest, UpdateOrderStatusRequest};
use crate::api::response::OrderResponse;
use crate::api::server::AppState;
use crate::data::repos::traits::stores::StoreError;
use crate::security::jwt::AccessClaims;
use crate::services::cart::Cart;
use crate::services::errors::{MenuServiceError, OrderServiceError};
use crate::services::order_service::OrderStatus;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};

fn order_error_response(e: OrderServiceError) -> Response {
    match e {
        OrderServiceError::Unauthenticated => {
            (StatusCode::UNAUTHORIZED, e.to_string()).into_response()
        }
        OrderServiceError::EmptyCart => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        OrderServiceError::InvalidTransition => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        OrderServiceError::OrderNotFound => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
        OrderServiceError::PartialWrite(ref number) => {
            tracing::error!(order_number = %number, "order persisted without line items");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        OrderServiceError::Store(StoreError::Unavailable(ref err)) => {
            tracing::error!("Order store unavailable: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable").into_response()
        }
        OrderServiceError::Store(StoreError::Query(ref err)) => {
            tracing::error!("Order store error: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Place an order. The cart is rebuilt server-side from the live menu so
/// prices and preparation times cannot be tampered with client-side.
pub async fn create_order(
    claims: Option<AccessClaims>,
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    let mut cart = Cart::new();

    for line in &payload.items {
        let item = match state.menu.get_item(line.food_item_id).await {
            Ok(item) => item,
            Err(MenuServiceError::ItemNotFound) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("Menu item {} not found", line.food_item_id),
                )
                    .into_response();
            }
            Err(MenuServiceError::Store(e)) => {
                tracing::error!("Menu store error: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
            }
        };

        if !item.is_available {
            return (
                StatusCode::BAD_REQUEST,
                format!("{} is currently unavailable", item.name),
            )
                .into_response();
        }

        cart.add(&item, line.quantity);
    }

    let user_id = claims.as_ref().map(|c| c.user_id());
    let user_name = claims.as_ref().map(|c| c.name.as_str()).unwrap_or("");

    match state
        .orders
        .create_order(user_id, user_name, cart.items(), &payload.payment_method)
        .await
    {
        Ok(placed) => (StatusCode::CREATED, Json(OrderResponse::from(placed))).into_response(),
        Err(e) => order_error_response(e),
    }
}

/// Get all orders, newest first (manager dashboard)
pub async fn get_all_orders(claims: AccessClaims, State(state): State<AppState>) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    match state.orders.list_orders().await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

/// Get orders in one lifecycle stage (kitchen queue views)
pub async fn get_orders_by_status(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    let status: OrderStatus = match status.parse() {
        Ok(s) => s,
        Err(_) => return (StatusCode::BAD_REQUEST, "Unknown order status").into_response(),
    };

    match state.orders.list_by_status(status).await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

/// Get order by ID
pub async fn get_order_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> impl IntoResponse {
    match state.orders.get_order(order_id).await {
        Ok(order) => (StatusCode::OK, Json(OrderResponse::from(order))).into_response(),
        Err(e) => order_error_response(e),
    }
}

/// Get order by its human-readable number (customer tracking view)
pub async fn get_order_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> impl IntoResponse {
    match state.orders.lookup_by_number(&order_number).await {
        Ok(order) => (StatusCode::OK, Json(OrderResponse::from(order))).into_response(),
        Err(e) => order_error_response(e),
    }
}

/// Move an order forward in its lifecycle (manager and up)
pub async fn update_order_status(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    let status: OrderStatus = match payload.status.parse() {
        Ok(s) => s,
        Err(_) => return (StatusCode::BAD_REQUEST, "Unknown order status").into_response(),
    };

    match state.orders.advance_status(order_id, status).await {
        Ok(order) => {
            let items = match state.orders.get_order(order.order_id).await {
                Ok((_, items)) => items,
                Err(e) => return order_error_response(e),
            };
            (StatusCode::OK, Json(OrderResponse::from((order, items)))).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

/// Live events for a single order (customer tracking view). The
/// subscription is released as soon as the client disconnects.
pub async fn order_events(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> impl IntoResponse {
    Sse::new(state.feed.subscribe_order(order_id)).keep_alive(KeepAlive::default())
}

/// Live events for the whole collection (manager dashboard refresh,
/// manager and up)
pub async fn all_order_events(
    claims: AccessClaims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    if !claims.can_manage() {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    Sse::new(state.feed.subscribe_all())
        .keep_alive(KeepAlive::default())
        .into_response()
}
