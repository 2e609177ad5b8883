use crate::api::config::Config;
use crate::api::routes::{
    auth_routes, manager_request_routes, menu_routes, order_routes, prediction_routes, role_routes,
};
use crate::data::repos::traits::stores::UserStore;
use crate::realtime::feed::OrderFeed;
use crate::services::menu_service::MenuService;
use crate::services::order_service::OrderService;
use crate::services::prediction_service::PredictionService;
use crate::services::role_service::RoleService;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Everything the handlers need, injected once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub orders: OrderService,
    pub menu: MenuService,
    pub roles: RoleService,
    pub predictions: PredictionService,
    pub feed: OrderFeed,
}

pub fn router(state: AppState) -> Router {
    let cors_layer = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route("/api", get(|| async { "Food Court API is running!" }))
        .nest("/api/v1/auth", auth_routes::routes())
        .nest("/api/v1/menu", menu_routes::routes())
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/roles", role_routes::routes())
        .nest("/api/v1/manager-requests", manager_request_routes::routes())
        .nest("/api/v1/predictions", prediction_routes::routes())
        .layer(cors_layer)
        .with_state(state)
}

pub async fn start(state: AppState) {
    let config = Config::default();
    let router = router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start the server");
}
