use crate::api::controllers::role_controller;
use crate::api::server::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(role_controller::submit_manager_request))
        .route("/gate", get(role_controller::manager_gate))
        .route("/pending", get(role_controller::get_pending_requests))
        .route("/{id}/approve", post(role_controller::approve_request))
        .route("/{id}/reject", post(role_controller::reject_request))
}
