use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::models::{
    AccountResponse, AccountsListResponse, BalancesResponse, TotalBalanceResponse,
};
use crate::analytics::models::{
    DashboardResponse, DataSection, DerivedMetrics, MonthlySummaryResponse,
};
use crate::errors::ErrorResponse;
use crate::extractors::ACCESS_TOKEN_HEADER;
use crate::health::HealthResponse;
use crate::link::models::{
    CreateLinkTokenDto, ExchangePublicTokenDto, LinkTokenResponse, TokenExchangeResponse,
};
use crate::transaction::models::{TransactionResponse, TransactionsListResponse};

/// Security scheme modifier for the access token header
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "access_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    ACCESS_TOKEN_HEADER,
                    "Plaid access token of a linked item; repeat or comma-separate for several",
                ))),
            );
        }
    }
}

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Finboard API",
        version = "1.0.0",
        description = "Dashboard backend proxying account data from Plaid",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Link", description = "Plaid Link token creation and exchange"),
        (name = "Accounts", description = "Linked accounts and balances"),
        (name = "Transactions", description = "Transaction retrieval across all pages"),
        (name = "Analytics", description = "Monthly summaries and dashboard metrics")
    ),
    paths(
        crate::health::health_check,
        // Link endpoints
        crate::link::handlers::create_link_token,
        crate::link::handlers::exchange_public_token,
        // Account endpoints
        crate::account::handlers::list_accounts,
        crate::account::handlers::list_balances,
        crate::account::handlers::get_total_balance,
        // Transaction endpoints
        crate::transaction::handlers::list_transactions,
        // Analytics endpoints
        crate::analytics::handlers::get_monthly_summary,
        crate::analytics::handlers::get_dashboard,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CreateLinkTokenDto,
            LinkTokenResponse,
            ExchangePublicTokenDto,
            TokenExchangeResponse,
            AccountResponse,
            AccountsListResponse,
            BalancesResponse,
            TotalBalanceResponse,
            TransactionResponse,
            TransactionsListResponse,
            MonthlySummaryResponse,
            DerivedMetrics,
            DataSection,
            DashboardResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
