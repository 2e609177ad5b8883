use crate::api::controllers::role_controller;
use crate::api::server::AppState;
use axum::Router;
use axum::routing::{get, put};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(role_controller::get_role_assignments))
        .route("/assignments/{user_id}", put(role_controller::set_user_role))
}
