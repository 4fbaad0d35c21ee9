pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::list_transactions;
pub use service::TransactionService;
