pub mod cart;
pub mod errors;
pub mod menu_service;
pub mod order_service;
pub mod prediction_service;
pub mod role_service;
