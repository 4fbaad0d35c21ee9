use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::plaid::{Account, AccountBalances};

/// Balance figures returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalancesResponse {
    /// Funds available to spend
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 100.00)]
    pub available: Option<Decimal>,
    /// Current ledger balance
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 110.00)]
    pub current: Option<Decimal>,
    /// Credit limit, for credit accounts
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub limit: Option<Decimal>,
    /// ISO currency code
    #[schema(example = "USD")]
    pub iso_currency_code: Option<String>,
}

impl From<AccountBalances> for BalancesResponse {
    fn from(b: AccountBalances) -> Self {
        Self {
            available: b.available,
            current: b.current,
            limit: b.limit,
            iso_currency_code: b.iso_currency_code,
        }
    }
}

/// Account information returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Provider account identifier
    pub account_id: String,
    /// Account name
    #[schema(example = "Plaid Checking")]
    pub name: String,
    /// Official name from the institution
    pub official_name: Option<String>,
    /// Last digits of the account number
    #[schema(example = "0000")]
    pub mask: Option<String>,
    /// Account type (depository, credit, loan, investment, other)
    #[serde(rename = "type")]
    #[schema(example = "depository")]
    pub account_type: String,
    /// Account subtype
    #[schema(example = "checking")]
    pub subtype: Option<String>,
    /// Balances
    pub balances: BalancesResponse,
}

impl AccountResponse {
    pub fn from_account(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            name: account.name,
            official_name: account.official_name,
            mask: account.mask,
            account_type: account.account_type,
            subtype: account.subtype,
            balances: BalancesResponse::from(account.balances),
        }
    }
}

/// Response for listing accounts
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountsListResponse {
    /// List of accounts
    pub accounts: Vec<AccountResponse>,
    /// Total count
    #[schema(example = 3)]
    pub count: usize,
}

impl AccountsListResponse {
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        Self {
            count: accounts.len(),
            accounts: accounts
                .into_iter()
                .map(AccountResponse::from_account)
                .collect(),
        }
    }
}

/// Sum of current balances across all linked accounts
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalBalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 12500.00)]
    pub total_balance: Decimal,
}
