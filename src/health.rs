use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::PlaidConfig;

/// Service status
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: &'static str,
    /// Plaid environment requests are sent to
    #[schema(example = "sandbox")]
    pub plaid_environment: &'static str,
    /// Whether both Plaid credentials are configured
    pub credentials_configured: bool,
}

/// Health check endpoint reporting provider configuration
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health_check(config: web::Data<PlaidConfig>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        plaid_environment: config.environment.as_str(),
        credentials_configured: config.has_credentials(),
    })
}
