use foodcourt_server_lib::api::config::Config;
use foodcourt_server_lib::api::server::{self, AppState};
use foodcourt_server_lib::data::repos::implementors::menu_repo::MenuRepo;
use foodcourt_server_lib::data::repos::implementors::order_repo::OrderRepo;
use foodcourt_server_lib::data::repos::implementors::request_repo::RequestRepo;
use foodcourt_server_lib::data::repos::implementors::user_repo::UserRepo;
use foodcourt_server_lib::data::repos::traits::stores::{
    MenuStore, OrderStore, RequestStore, UserStore,
};
use foodcourt_server_lib::realtime::feed::OrderFeed;
use foodcourt_server_lib::services::menu_service::MenuService;
use foodcourt_server_lib::services::order_service::OrderService;
use foodcourt_server_lib::services::prediction_service::PredictionService;
use foodcourt_server_lib::services::role_service::RoleService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::default();

    let orders: Arc<dyn OrderStore> = Arc::new(OrderRepo::new());
    let menu: Arc<dyn MenuStore> = Arc::new(MenuRepo::new());
    let users: Arc<dyn UserStore> = Arc::new(UserRepo::new());
    let requests: Arc<dyn RequestStore> = Arc::new(RequestRepo::new());

    let feed = OrderFeed::default();

    let state = AppState {
        users: users.clone(),
        orders: OrderService::new(orders.clone(), feed.clone()),
        menu: MenuService::new(menu),
        roles: RoleService::new(users, requests),
        predictions: PredictionService::new(
            orders,
            config.ai_endpoint_url.clone(),
            config.ai_api_key.clone(),
        ),
        feed,
    };

    server::start(state).await;
}
