use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AccessTokens;
use crate::plaid::Aggregator;

use super::models::{DashboardResponse, MonthQuery, MonthRange, MonthlySummaryResponse};
use super::service::AnalyticsService;

/// GET /api/analytics/monthly-summary - Income, expenses and savings for a month
#[utoipa::path(
    get,
    path = "/api/analytics/monthly-summary",
    tag = "Analytics",
    params(MonthQuery),
    responses(
        (status = 200, description = "Monthly summary", body = MonthlySummaryResponse),
        (status = 400, description = "Invalid year or month", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 502, description = "Provider request failed", body = ErrorResponse)
    ),
    security(("access_token" = []))
)]
#[get("/api/analytics/monthly-summary")]
pub async fn get_monthly_summary(
    aggregator: web::Data<dyn Aggregator>,
    tokens: AccessTokens,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let month = MonthRange::new(query.year, query.month)?;
    let summary = AnalyticsService::monthly_summary(aggregator.get_ref(), &tokens.0, month).await?;

    Ok(HttpResponse::Ok().json(MonthlySummaryResponse::from(summary)))
}

/// GET /api/analytics/dashboard - Month figures with changes against the prior month
#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    tag = "Analytics",
    params(MonthQuery),
    responses(
        (status = 200, description = "Dashboard metrics; unavailable inputs are listed and zeroed", body = DashboardResponse),
        (status = 400, description = "Invalid year or month", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse)
    ),
    security(("access_token" = []))
)]
#[get("/api/analytics/dashboard")]
pub async fn get_dashboard(
    aggregator: web::Data<dyn Aggregator>,
    tokens: AccessTokens,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let month = MonthRange::new(query.year, query.month)?;
    let prior_month = month.previous()?;

    let (metrics, unavailable) =
        AnalyticsService::dashboard(aggregator.get_ref(), &tokens.0, month, prior_month).await;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        year: month.year,
        month: month.month,
        metrics,
        unavailable,
    }))
}
