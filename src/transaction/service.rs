use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use super::models::DateRange;
use crate::errors::{AppError, UpstreamError};
use crate::plaid::{redact_token, Aggregator, TransactionRecord, TransactionsPageRequest};

/// Maximum page size accepted by `/transactions/get`
pub const PAGE_SIZE: usize = 500;

const OPERATION: &str = "transactions/get";

/// Service layer for transaction retrieval.
pub struct TransactionService;

impl TransactionService {
    /// Fetch every transaction in the range, defaulting to the trailing 30 days.
    pub async fn get_transactions(
        aggregator: &dyn Aggregator,
        access_token: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<(DateRange, Vec<TransactionRecord>), AppError> {
        Self::get_transactions_as_of(
            aggregator,
            access_token,
            start_date,
            end_date,
            Utc::now().date_naive(),
        )
        .await
    }

    /// Same as [`Self::get_transactions`] with an explicit "today".
    pub async fn get_transactions_as_of(
        aggregator: &dyn Aggregator,
        access_token: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(DateRange, Vec<TransactionRecord>), AppError> {
        let range = DateRange::resolve(start_date, end_date, today)?;
        let transactions = Self::fetch_range(aggregator, access_token, range).await?;
        Ok((range, transactions))
    }

    /// Page through `/transactions/get` until the reported total is reached.
    ///
    /// Pages are requested one after another. Any failed page discards what
    /// was accumulated. The result length always equals the last total the
    /// provider reported.
    pub async fn fetch_range(
        aggregator: &dyn Aggregator,
        access_token: &str,
        range: DateRange,
    ) -> Result<Vec<TransactionRecord>, UpstreamError> {
        let mut request = TransactionsPageRequest {
            access_token: access_token.to_string(),
            start_date: range.start,
            end_date: range.end,
            offset: 0,
            count: PAGE_SIZE,
        };

        let first = aggregator.get_transactions(&request).await?;
        let mut total = first.total_transactions;
        let mut transactions = first.transactions;

        while transactions.len() < total {
            request.offset = transactions.len();
            debug!(
                access_token = %redact_token(access_token),
                offset = request.offset,
                total,
                "Fetching next transactions page"
            );

            let page = aggregator.get_transactions(&request).await?;
            if page.transactions.is_empty() && request.offset < page.total_transactions {
                return Err(UpstreamError::new(
                    OPERATION,
                    format!(
                        "empty page at offset {} while {} transactions were reported",
                        request.offset, page.total_transactions
                    ),
                ));
            }

            total = page.total_transactions;
            transactions.extend(page.transactions);
        }

        if transactions.len() != total {
            return Err(UpstreamError::new(
                OPERATION,
                format!(
                    "received {} transactions but provider reported {}",
                    transactions.len(),
                    total
                ),
            ));
        }

        info!(
            access_token = %redact_token(access_token),
            start_date = %range.start,
            end_date = %range.end,
            count = transactions.len(),
            "Retrieved transactions"
        );

        Ok(transactions)
    }
}
