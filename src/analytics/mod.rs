pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{get_dashboard, get_monthly_summary};
pub use service::{compute_summary, percentage_delta, placeholder_prior_balance, AnalyticsService};
