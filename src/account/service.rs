use rust_decimal::Decimal;
use tracing::info;

use crate::errors::UpstreamError;
use crate::plaid::{Account, Aggregator};

/// Service layer for linked accounts.
pub struct AccountService;

impl AccountService {
    /// List accounts for an item.
    pub async fn list_accounts(
        aggregator: &dyn Aggregator,
        access_token: &str,
    ) -> Result<Vec<Account>, UpstreamError> {
        aggregator.get_accounts(access_token).await
    }

    /// List accounts with real-time balances.
    pub async fn list_balances(
        aggregator: &dyn Aggregator,
        access_token: &str,
    ) -> Result<Vec<Account>, UpstreamError> {
        aggregator.get_balances(access_token).await
    }

    /// Sum current balances over every account of every given item.
    ///
    /// Items are queried in order; the first failure aborts the sum.
    pub async fn total_balance(
        aggregator: &dyn Aggregator,
        access_tokens: &[String],
    ) -> Result<Decimal, UpstreamError> {
        let mut total = Decimal::ZERO;
        let mut accounts_count = 0;

        for token in access_tokens {
            let accounts = aggregator.get_balances(token).await?;
            accounts_count += accounts.len();
            total = total.saturating_add(sum_current_balances(&accounts));
        }

        info!(
            items = access_tokens.len(),
            accounts = accounts_count,
            "Computed total balance"
        );

        Ok(total)
    }
}

/// Sum of `balances.current`, counting missing values as zero
pub fn sum_current_balances(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .filter_map(|a| a.balances.current)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
