use crate::api::controllers::order_controller;
use crate::api::server::AppState;
use axum::Router;
use axum::routing::{get, patch, post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(order_controller::get_all_orders))
        .route("/", post(order_controller::create_order))
        .route("/events", get(order_controller::all_order_events))
        .route("/{id}", get(order_controller::get_order_by_id))
        .route("/{id}/status", patch(order_controller::update_order_status))
        .route("/{id}/events", get(order_controller::order_events))
        .route("/number/{order_number}", get(order_controller::get_order_by_number))
        .route("/status/{status}", get(order_controller::get_orders_by_status))
}
