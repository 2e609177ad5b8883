pub mod auth_routes;
pub mod manager_request_routes;
pub mod menu_routes;
pub mod order_routes;
pub mod prediction_routes;
pub mod role_routes;
