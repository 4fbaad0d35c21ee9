use actix_web::{get, web, HttpResponse};

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AccessToken;
use crate::plaid::Aggregator;

use super::models::{TransactionResponse, TransactionsListResponse, TransactionsQuery};
use super::service::TransactionService;

/// GET /api/transactions - All transactions in a date range
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    params(TransactionsQuery),
    responses(
        (status = 200, description = "Transactions in the range", body = TransactionsListResponse),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 502, description = "Provider request failed", body = ErrorResponse)
    ),
    security(("access_token" = []))
)]
#[get("/api/transactions")]
pub async fn list_transactions(
    aggregator: web::Data<dyn Aggregator>,
    token: AccessToken,
    query: web::Query<TransactionsQuery>,
) -> Result<HttpResponse, AppError> {
    let (range, transactions) = TransactionService::get_transactions(
        aggregator.get_ref(),
        &token.0,
        query.start_date,
        query.end_date,
    )
    .await?;

    let response = TransactionsListResponse {
        total: transactions.len(),
        transactions: transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
        start_date: range.start,
        end_date: range.end,
    };

    Ok(HttpResponse::Ok().json(response))
}
