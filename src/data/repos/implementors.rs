pub mod memory;
pub mod menu_repo;
pub mod order_repo;
pub mod request_repo;
pub mod user_repo;
