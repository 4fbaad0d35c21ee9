use actix_web::{get, web, HttpResponse};

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::{AccessToken, AccessTokens};
use crate::plaid::Aggregator;

use super::models::{AccountsListResponse, TotalBalanceResponse};
use super::service::AccountService;

/// GET /api/accounts - List accounts for a linked item
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "Accounts",
    responses(
        (status = 200, description = "List of accounts", body = AccountsListResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 502, description = "Provider request failed", body = ErrorResponse)
    ),
    security(("access_token" = []))
)]
#[get("/api/accounts")]
pub async fn list_accounts(
    aggregator: web::Data<dyn Aggregator>,
    token: AccessToken,
) -> Result<HttpResponse, AppError> {
    let accounts = AccountService::list_accounts(aggregator.get_ref(), &token.0).await?;

    Ok(HttpResponse::Ok().json(AccountsListResponse::from_accounts(accounts)))
}

/// GET /api/balances - List accounts with real-time balances
#[utoipa::path(
    get,
    path = "/api/balances",
    tag = "Accounts",
    responses(
        (status = 200, description = "Accounts with balances", body = AccountsListResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 502, description = "Provider request failed", body = ErrorResponse)
    ),
    security(("access_token" = []))
)]
#[get("/api/balances")]
pub async fn list_balances(
    aggregator: web::Data<dyn Aggregator>,
    token: AccessToken,
) -> Result<HttpResponse, AppError> {
    let accounts = AccountService::list_balances(aggregator.get_ref(), &token.0).await?;

    Ok(HttpResponse::Ok().json(AccountsListResponse::from_accounts(accounts)))
}

/// GET /api/accounts-total-balance - Total current balance across linked items
#[utoipa::path(
    get,
    path = "/api/accounts-total-balance",
    tag = "Accounts",
    responses(
        (status = 200, description = "Total balance", body = TotalBalanceResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 502, description = "Provider request failed", body = ErrorResponse)
    ),
    security(("access_token" = []))
)]
#[get("/api/accounts-total-balance")]
pub async fn get_total_balance(
    aggregator: web::Data<dyn Aggregator>,
    tokens: AccessTokens,
) -> Result<HttpResponse, AppError> {
    let total_balance = AccountService::total_balance(aggregator.get_ref(), &tokens.0).await?;

    Ok(HttpResponse::Ok().json(TotalBalanceResponse { total_balance }))
}
