use crate::api::controllers::menu_controller;
use crate::api::server::AppState;
use axum::Router;
use axum::routing::{delete, get, patch, post, put};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu_controller::get_menu))
        .route("/", post(menu_controller::create_item))
        .route("/{id}", get(menu_controller::get_item))
        .route("/{id}", put(menu_controller::update_item))
        .route("/{id}", delete(menu_controller::delete_item))
        .route("/{id}/availability", patch(menu_controller::toggle_availability))
}
