use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Link token issued for a user to start the Plaid Link flow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkToken {
    pub link_token: String,
    pub expiration: String,
}

/// Result of exchanging a public token from Plaid Link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenExchange {
    pub access_token: String,
    pub item_id: String,
}

/// Balance figures reported for an account
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccountBalances {
    #[serde(default)]
    pub available: Option<Decimal>,
    #[serde(default)]
    pub current: Option<Decimal>,
    #[serde(default)]
    pub limit: Option<Decimal>,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
}

/// Financial account at a linked institution
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub official_name: Option<String>,
    #[serde(default)]
    pub mask: Option<String>,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub balances: AccountBalances,
}

/// One transaction as returned by the provider.
///
/// Amounts follow the provider convention: positive values are money leaving
/// the account, negative values are money coming in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "transaction_id")]
    pub id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub category: Vec<String>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
}

/// One page request against `/transactions/get`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionsPageRequest {
    pub access_token: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub offset: usize,
    pub count: usize,
}

/// One page of transactions plus the provider's total for the date range
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionsPage {
    pub transactions: Vec<TransactionRecord>,
    pub total_transactions: usize,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Wire format
// =============================================================================

/// Request envelope carrying the client credentials
#[derive(Debug, Serialize)]
pub(crate) struct PlaidRequest<'a, T: Serialize> {
    pub client_id: &'a str,
    pub secret: &'a str,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct LinkTokenUser<'a> {
    pub client_user_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LinkTokenCreateBody<'a> {
    pub client_name: &'a str,
    pub user: LinkTokenUser<'a>,
    pub products: &'a [String],
    pub country_codes: &'a [String],
    pub language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PublicTokenExchangeBody<'a> {
    pub public_token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccessTokenBody<'a> {
    pub access_token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransactionsOptions {
    pub count: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransactionsGetBody<'a> {
    pub access_token: &'a str,
    pub start_date: String,
    pub end_date: String,
    pub options: TransactionsOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountsResponse {
    pub accounts: Vec<Account>,
}

/// Error body returned by the provider on non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct PlaidErrorBody {
    pub error_type: String,
    pub error_code: String,
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_record_from_provider_json() {
        let value = json!({
            "transaction_id": "tx-1",
            "account_id": "acc-1",
            "amount": -1200.5,
            "iso_currency_code": "USD",
            "date": "2026-09-30",
            "name": "Payroll",
            "merchant_name": null,
            "category": null,
            "pending": false,
            "payment_channel": "other"
        });

        let record: TransactionRecord = serde_json::from_value(value).expect("Should parse");
        assert_eq!(record.id, "tx-1");
        assert_eq!(record.amount, Decimal::new(-12005, 1));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 9, 30).unwrap());
        assert!(record.category.is_empty());
        assert!(record.merchant_name.is_none());
    }

    #[test]
    fn test_account_with_partial_balances() {
        let value = json!({
            "account_id": "acc-1",
            "name": "Plaid Checking",
            "mask": "0000",
            "type": "depository",
            "subtype": "checking",
            "balances": { "available": null, "current": 110.25, "limit": null }
        });

        let account: Account = serde_json::from_value(value).expect("Should parse");
        assert_eq!(account.account_type, "depository");
        assert_eq!(account.balances.current, Some(Decimal::new(11025, 2)));
        assert_eq!(account.balances.available, None);
    }

    #[test]
    fn test_request_envelope_flattens_body() {
        let request = PlaidRequest {
            client_id: "id",
            secret: "secret",
            body: TransactionsGetBody {
                access_token: "access-sandbox-1",
                start_date: "2026-09-14".to_string(),
                end_date: "2026-10-14".to_string(),
                options: TransactionsOptions {
                    count: 500,
                    offset: 1000,
                },
            },
        };

        let value = serde_json::to_value(&request).expect("Should serialize");
        assert_eq!(value["client_id"], "id");
        assert_eq!(value["access_token"], "access-sandbox-1");
        assert_eq!(value["options"]["offset"], 1000);
        assert_eq!(value["options"]["count"], 500);
    }
}
