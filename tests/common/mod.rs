use actix_web::{test, web, App};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;

use finboard_be::config::{PlaidConfig, PlaidEnvironment};
use finboard_be::extractors::ACCESS_TOKEN_HEADER;
use finboard_be::plaid::mock::MockAggregator;
use finboard_be::plaid::Aggregator;
use finboard_be::{account, analytics, health, link, transaction};

pub struct TestApp {
    pub aggregator: Arc<MockAggregator>,
    pub config: Arc<PlaidConfig>,
}

pub struct TestResponse {
    status: u16,
    body: bytes::Bytes,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub async fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }
}

impl TestApp {
    pub fn new(aggregator: MockAggregator) -> Self {
        TestApp {
            aggregator: Arc::new(aggregator),
            config: Arc::new(PlaidConfig {
                client_id: Some("test-client".to_string()),
                secret: Some(Secret::new("test-secret".to_string())),
                environment: PlaidEnvironment::Sandbox,
                client_name: "Finboard".to_string(),
                products: vec!["transactions".to_string()],
                country_codes: vec!["US".to_string()],
                redirect_uri: None,
            }),
        }
    }

    async fn call(&self, req: test::TestRequest) -> TestResponse {
        let aggregator: Arc<dyn Aggregator> = self.aggregator.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(aggregator))
                .app_data(web::Data::from(self.config.clone()))
                .service(health::health_check)
                .service(account::list_accounts)
                .service(account::list_balances)
                .service(account::get_total_balance)
                .service(transaction::list_transactions)
                .service(analytics::get_monthly_summary)
                .service(analytics::get_dashboard)
                .service(link::create_link_token)
                .service(link::exchange_public_token),
        )
        .await;

        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.call(test::TestRequest::get().uri(path)).await
    }

    /// GET with one access token header per entry of `tokens`
    pub async fn get_with_tokens(&self, path: &str, tokens: &[&str]) -> TestResponse {
        let mut req = test::TestRequest::get().uri(path);
        for token in tokens {
            req = req.append_header((ACCESS_TOKEN_HEADER, *token));
        }
        self.call(req).await
    }

    pub async fn post(&self, path: &str, payload: &Value) -> TestResponse {
        self.call(test::TestRequest::post().uri(path).set_json(payload))
            .await
    }
}
