use actix_web::{post, web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::plaid::{redact_token, Aggregator};

use super::models::{
    CreateLinkTokenDto, ExchangePublicTokenDto, LinkTokenResponse, TokenExchangeResponse,
};

/// POST /api/link/token/create - Create a Link token for a user
#[utoipa::path(
    post,
    path = "/api/link/token/create",
    tag = "Link",
    request_body = CreateLinkTokenDto,
    responses(
        (status = 200, description = "Link token created", body = LinkTokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Provider request failed", body = ErrorResponse)
    )
)]
#[post("/api/link/token/create")]
pub async fn create_link_token(
    aggregator: web::Data<dyn Aggregator>,
    body: web::Json<CreateLinkTokenDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token = aggregator.create_link_token(&body.user_id).await?;

    Ok(HttpResponse::Ok().json(LinkTokenResponse::from(token)))
}

/// POST /api/link/token/exchange - Exchange a public token for an access token
#[utoipa::path(
    post,
    path = "/api/link/token/exchange",
    tag = "Link",
    request_body = ExchangePublicTokenDto,
    responses(
        (status = 200, description = "Token exchanged", body = TokenExchangeResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Provider request failed", body = ErrorResponse)
    )
)]
#[post("/api/link/token/exchange")]
pub async fn exchange_public_token(
    aggregator: web::Data<dyn Aggregator>,
    body: web::Json<ExchangePublicTokenDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let exchange = aggregator.exchange_public_token(&body.public_token).await?;
    info!(
        item_id = %exchange.item_id,
        access_token = %redact_token(&exchange.access_token),
        "Linked new item"
    );

    Ok(HttpResponse::Ok().json(TokenExchangeResponse::from(exchange)))
}
