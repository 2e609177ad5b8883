pub mod api;
pub mod data;
pub mod realtime;
pub mod security;
pub mod services;
