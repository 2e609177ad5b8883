pub mod feed;
pub mod tracker;
