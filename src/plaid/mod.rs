//! Client surface for the Plaid account-aggregation API.
//!
//! [`Aggregator`] is the seam the rest of the crate depends on. [`PlaidClient`]
//! talks to Plaid over HTTPS and `mock::MockAggregator` serves scripted data
//! in tests (enabled with the `test-util` feature).

mod client;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod models;

use async_trait::async_trait;

use crate::errors::UpstreamError;

pub use client::PlaidClient;
pub use models::{
    Account, AccountBalances, LinkToken, TokenExchange, TransactionRecord, TransactionsPage,
    TransactionsPageRequest,
};

/// Typed call surface over the financial data provider.
///
/// Implementations perform no retries. Every failure is an [`UpstreamError`].
#[async_trait]
pub trait Aggregator: Send + Sync {
    /// Create a Link token for the given application user
    async fn create_link_token(&self, user_id: &str) -> Result<LinkToken, UpstreamError>;

    /// Exchange a public token from Plaid Link for a permanent access token
    async fn exchange_public_token(&self, public_token: &str)
        -> Result<TokenExchange, UpstreamError>;

    /// List accounts for an item (balances may be cached by the provider)
    async fn get_accounts(&self, access_token: &str) -> Result<Vec<Account>, UpstreamError>;

    /// List accounts with real-time balances
    async fn get_balances(&self, access_token: &str) -> Result<Vec<Account>, UpstreamError>;

    /// Fetch a single page of transactions
    async fn get_transactions(
        &self,
        request: &TransactionsPageRequest,
    ) -> Result<TransactionsPage, UpstreamError>;
}

/// Prefix Plaid puts on every access token
const ACCESS_TOKEN_PREFIX: &str = "access-";

/// Redacted form of an access token, safe to log.
///
/// Only the fixed `access-` prefix and the last four characters survive.
pub fn redact_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    if token.starts_with(ACCESS_TOKEN_PREFIX) && chars.len() > ACCESS_TOKEN_PREFIX.len() + 4 {
        format!("{ACCESS_TOKEN_PREFIX}****{tail}")
    } else {
        format!("****{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_token_keeps_prefix_and_tail() {
        let redacted = redact_token("access-sandbox-de3ce8ef-33f8-452c-a685-8671031fc0f6");
        assert_eq!(redacted, "access-****c0f6");
        assert!(!redacted.contains("de3ce8ef"));
    }

    #[test]
    fn test_redact_token_without_dash() {
        let token = "supersecrettokenvalue123";
        let redacted = redact_token(token);
        assert_eq!(redacted, "****e123");
        assert!(!redacted.contains("supersecret"));
    }

    #[test]
    fn test_redact_token_drops_unknown_prefix() {
        let token = "secretleadingsegment-access-0123456789";
        let redacted = redact_token(token);
        assert_eq!(redacted, "****6789");
        assert!(!redacted.contains("secretleadingsegment"));
    }

    #[test]
    fn test_redact_token_with_bare_prefix() {
        // Nothing but the prefix and a tail: keeping both would reveal everything
        assert_eq!(redact_token("access-abcd"), "****abcd");
    }

    #[test]
    fn test_redact_short_token() {
        assert_eq!(redact_token("abc"), "****");
    }
}
