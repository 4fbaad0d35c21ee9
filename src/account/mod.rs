pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{get_total_balance, list_accounts, list_balances};
pub use service::AccountService;
