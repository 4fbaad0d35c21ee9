pub mod handlers;
pub mod models;

pub use handlers::{create_link_token, exchange_public_token};
