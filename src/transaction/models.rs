use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;
use crate::plaid::TransactionRecord;

/// Trailing window used when no start date is given
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Inclusive date range for a transactions query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Fill in missing bounds relative to `today`.
    ///
    /// `end` defaults to `today` and `start` to `today - 30 days`.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, AppError> {
        let end = end.unwrap_or(today);
        let start = start.unwrap_or(today - Duration::days(DEFAULT_WINDOW_DAYS));

        if start > end {
            return Err(AppError::ValidationError(format!(
                "startDate {start} is after endDate {end}"
            )));
        }

        Ok(Self { start, end })
    }
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    /// Start of the range (YYYY-MM-DD), defaults to 30 days ago
    #[param(value_type = Option<String>, example = "2026-09-14")]
    pub start_date: Option<NaiveDate>,
    /// End of the range (YYYY-MM-DD), defaults to today
    #[param(value_type = Option<String>, example = "2026-10-14")]
    pub end_date: Option<NaiveDate>,
}

/// Transaction information returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Provider transaction identifier
    pub id: String,
    /// Account the transaction posted to
    pub account_id: String,
    /// Signed amount; positive is money out, negative is money in
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 12.5)]
    pub amount: Decimal,
    /// Posting date
    #[schema(value_type = String, example = "2026-10-01")]
    pub date: NaiveDate,
    /// Description from the institution
    #[schema(example = "Starbucks")]
    pub name: String,
    /// Merchant name, when known
    pub merchant_name: Option<String>,
    /// Category hierarchy
    pub category: Vec<String>,
    /// Whether the transaction is still pending
    pub pending: bool,
    /// ISO currency code
    #[schema(example = "USD")]
    pub iso_currency_code: Option<String>,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(t: TransactionRecord) -> Self {
        Self {
            id: t.id,
            account_id: t.account_id,
            amount: t.amount,
            date: t.date,
            name: t.name,
            merchant_name: t.merchant_name,
            category: t.category,
            pending: t.pending,
            iso_currency_code: t.iso_currency_code,
        }
    }
}

/// Response for listing transactions
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsListResponse {
    /// All transactions in the range, in provider order
    pub transactions: Vec<TransactionResponse>,
    /// Number of transactions returned
    #[schema(example = 120)]
    pub total: usize,
    /// Resolved start date
    #[schema(value_type = String, example = "2026-09-14")]
    pub start_date: NaiveDate,
    /// Resolved end date
    #[schema(value_type = String, example = "2026-10-14")]
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_defaults_to_trailing_window() {
        let range = DateRange::resolve(None, None, date(2026, 10, 14)).expect("Should resolve");

        assert_eq!(range.end, date(2026, 10, 14));
        assert_eq!(range.start, date(2026, 9, 14));
    }

    #[test]
    fn test_resolve_keeps_explicit_bounds() {
        let range = DateRange::resolve(
            Some(date(2026, 1, 1)),
            Some(date(2026, 1, 31)),
            date(2026, 10, 14),
        )
        .expect("Should resolve");

        assert_eq!(range.start, date(2026, 1, 1));
        assert_eq!(range.end, date(2026, 1, 31));
    }

    #[test]
    fn test_resolve_default_start_with_explicit_end() {
        let range = DateRange::resolve(None, Some(date(2026, 10, 1)), date(2026, 10, 14))
            .expect("Should resolve");

        assert_eq!(range.start, date(2026, 9, 14));
        assert_eq!(range.end, date(2026, 10, 1));
    }

    #[test]
    fn test_resolve_rejects_inverted_range() {
        let result = DateRange::resolve(
            Some(date(2026, 10, 10)),
            Some(date(2026, 10, 1)),
            date(2026, 10, 14),
        );

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_transaction_response_serializes_amount_as_number() {
        let record = crate::plaid::mock::sample_transaction(
            "tx-1",
            Decimal::new(-2550, 2),
            date(2026, 10, 1),
        );

        let value = serde_json::to_value(TransactionResponse::from(record)).expect("Should serialize");
        assert_eq!(value["amount"], serde_json::json!(-25.5));
        assert_eq!(value["date"], "2026-10-01");
        assert_eq!(value["accountId"], "acc-checking");
    }
}
