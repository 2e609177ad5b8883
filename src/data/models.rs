pub mod food_item;
pub mod manager_request;
pub mod order;
pub mod schema;
pub mod user;
