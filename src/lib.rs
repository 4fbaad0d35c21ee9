pub mod account;
pub mod analytics;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod link;
pub mod openapi;
pub mod plaid;
pub mod transaction;
