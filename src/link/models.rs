use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::plaid::{LinkToken, TokenExchange};

/// Request body for creating a Link token
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkTokenDto {
    /// Stable identifier of the application user (1-128 characters)
    #[validate(length(min = 1, max = 128, message = "userId must be 1-128 characters"))]
    #[schema(example = "user-42")]
    pub user_id: String,
}

/// Link token returned to the browser
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkTokenResponse {
    /// Token used to initialise Plaid Link
    #[schema(example = "link-sandbox-af1a0311-da53-4636-b754-dd15cc058176")]
    pub link_token: String,
    /// Expiration timestamp (ISO 8601)
    #[schema(example = "2026-10-14T04:00:00Z")]
    pub expiration: String,
}

impl From<LinkToken> for LinkTokenResponse {
    fn from(token: LinkToken) -> Self {
        Self {
            link_token: token.link_token,
            expiration: token.expiration,
        }
    }
}

/// Request body for exchanging a public token
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePublicTokenDto {
    /// Public token from the Link `onSuccess` callback
    #[validate(length(min = 1, message = "publicToken cannot be empty"))]
    #[schema(example = "public-sandbox-b0e2c4ee-a763-4df5-bfe9-46a46bce993d")]
    pub public_token: String,
}

/// Access token and item id for a newly linked institution
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenExchangeResponse {
    /// Access token for subsequent data requests
    #[schema(example = "access-sandbox-de3ce8ef-33f8-452c-a685-8671031fc0f6")]
    pub access_token: String,
    /// Provider item identifier
    #[schema(example = "M5eVJqLnv3tbzdngLDp9FL5OlDNxlNhlE55op")]
    pub item_id: String,
}

impl From<TokenExchange> for TokenExchangeResponse {
    fn from(exchange: TokenExchange) -> Self {
        Self {
            access_token: exchange.access_token,
            item_id: exchange.item_id,
        }
    }
}
