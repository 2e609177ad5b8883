pub mod auth_controller;
pub mod menu_controller;
pub mod order_controller;
pub mod prediction_controller;
pub mod role_controller;
