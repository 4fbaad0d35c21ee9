use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::models::{
    Account, AccessTokenBody, AccountsResponse, LinkToken, LinkTokenCreateBody, LinkTokenUser,
    PlaidErrorBody, PlaidRequest, PublicTokenExchangeBody, TokenExchange, TransactionsGetBody,
    TransactionsOptions, TransactionsPage, TransactionsPageRequest,
};
use super::{redact_token, Aggregator};
use crate::config::PlaidConfig;
use crate::errors::UpstreamError;

const LINK_LANGUAGE: &str = "en";

/// HTTP client for the Plaid API
#[derive(Debug, Clone)]
pub struct PlaidClient {
    http: Client,
    config: Arc<PlaidConfig>,
    base_url: String,
}

impl PlaidClient {
    /// Create a client for the environment selected in `config`.
    pub fn new(config: Arc<PlaidConfig>) -> Self {
        let base_url = config.environment.base_url().to_string();
        Self::with_base_url(config, &base_url)
    }

    /// Create a client against a custom host, e.g. a local mock server.
    pub fn with_base_url(config: Arc<PlaidConfig>, base_url: &str) -> Self {
        Self {
            http: Client::new(),
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a credentialed request and decode the JSON response
    async fn post<B, R>(&self, operation: &'static str, body: B) -> Result<R, UpstreamError>
    where
        B: Serialize + Send,
        R: DeserializeOwned + Send,
    {
        let (client_id, secret) = match (&self.config.client_id, &self.config.secret) {
            (Some(id), Some(secret)) => (id.as_str(), secret.expose_secret().as_str()),
            _ => {
                return Err(UpstreamError::new(
                    operation,
                    "Plaid credentials are not configured",
                ))
            }
        };

        let url = format!("{}/{}", self.base_url, operation);
        let request = PlaidRequest {
            client_id,
            secret,
            body,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                UpstreamError::with_source(operation, format!("request failed: {e}"), e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let cause = match serde_json::from_str::<PlaidErrorBody>(&text) {
                Ok(body) => format!(
                    "{} {} ({}): {}",
                    status.as_u16(),
                    body.error_code,
                    body.error_type,
                    body.error_message
                ),
                Err(_) => format!("{} returned by provider", status.as_u16()),
            };
            return Err(UpstreamError::new(operation, cause));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| {
                UpstreamError::with_source(operation, format!("invalid response body: {e}"), e)
            })
    }
}

#[async_trait]
impl Aggregator for PlaidClient {
    async fn create_link_token(&self, user_id: &str) -> Result<LinkToken, UpstreamError> {
        let body = LinkTokenCreateBody {
            client_name: &self.config.client_name,
            user: LinkTokenUser {
                client_user_id: user_id,
            },
            products: &self.config.products,
            country_codes: &self.config.country_codes,
            language: LINK_LANGUAGE,
            redirect_uri: self.config.redirect_uri.as_deref(),
        };

        self.post("link/token/create", body).await
    }

    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<TokenExchange, UpstreamError> {
        self.post(
            "item/public_token/exchange",
            PublicTokenExchangeBody { public_token },
        )
        .await
    }

    async fn get_accounts(&self, access_token: &str) -> Result<Vec<Account>, UpstreamError> {
        debug!(access_token = %redact_token(access_token), "Fetching accounts");
        let response: AccountsResponse = self
            .post("accounts/get", AccessTokenBody { access_token })
            .await?;
        Ok(response.accounts)
    }

    async fn get_balances(&self, access_token: &str) -> Result<Vec<Account>, UpstreamError> {
        debug!(access_token = %redact_token(access_token), "Fetching balances");
        let response: AccountsResponse = self
            .post("accounts/balance/get", AccessTokenBody { access_token })
            .await?;
        Ok(response.accounts)
    }

    async fn get_transactions(
        &self,
        request: &TransactionsPageRequest,
    ) -> Result<TransactionsPage, UpstreamError> {
        let body = TransactionsGetBody {
            access_token: &request.access_token,
            start_date: request.start_date.format("%Y-%m-%d").to_string(),
            end_date: request.end_date.format("%Y-%m-%d").to_string(),
            options: TransactionsOptions {
                count: request.count,
                offset: request.offset,
            },
        };

        self.post("transactions/get", body).await
    }
}
