use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{http::header, web, App, HttpServer};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use finboard_be::config::AppConfig;
use finboard_be::extractors::ACCESS_TOKEN_HEADER;
use finboard_be::plaid::{Aggregator, PlaidClient};
use finboard_be::{account, analytics, health, link, openapi, transaction};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Missing credentials degrade to failing requests instead of blocking startup
    for warning in &config.warnings {
        warn!("Configuration warning: {warning}");
    }

    let plaid_config = Arc::new(config.plaid);
    let aggregator: Arc<dyn Aggregator> = Arc::new(PlaidClient::new(plaid_config.clone()));
    let allowed_origins = config.allowed_origins;

    info!(
        plaid_environment = plaid_config.environment.as_str(),
        "Starting server at http://{}:{}", config.host, config.port
    );

    // Rate limiting for the Link endpoints: burst of 5, one token per second
    let link_governor_config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .finish()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Failed to create rate limiter config",
            )
        })?;

    HttpServer::new(move || {
        // Clone allowed_origins for this closure invocation
        let allowed_origins = allowed_origins.clone();

        // Configure CORS
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                allowed_origins.iter().any(|allowed| allowed == origin_str)
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE.as_str(), ACCESS_TOKEN_HEADER])
            .max_age(3600);

        App::new()
            // Middleware (order matters: outer to inner)
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Shared state
            .app_data(web::Data::from(aggregator.clone()))
            .app_data(web::Data::from(plaid_config.clone()))
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
            .service(health::health_check)
            // Account endpoints
            .service(account::list_accounts)
            .service(account::list_balances)
            .service(account::get_total_balance)
            .service(transaction::list_transactions)
            // Analytics endpoints
            .service(analytics::get_monthly_summary)
            .service(analytics::get_dashboard)
            // Link endpoints with rate limiting (must be last to avoid catching all routes)
            .service(
                web::scope("")
                    .wrap(Governor::new(&link_governor_config))
                    .service(link::create_link_token)
                    .service(link::exchange_public_token),
            )
    })
    .bind((config.host, config.port))?
    .run()
    .await
}

