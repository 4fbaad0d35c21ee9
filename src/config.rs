use secrecy::Secret;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

const DEFAULT_CLIENT_NAME: &str = "Finboard";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_PORT: u16 = 8080;

/// Plaid deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaidEnvironment {
    #[default]
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaidEnvironment::Sandbox => "sandbox",
            PlaidEnvironment::Development => "development",
            PlaidEnvironment::Production => "production",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Some(PlaidEnvironment::Sandbox),
            "development" => Some(PlaidEnvironment::Development),
            "production" => Some(PlaidEnvironment::Production),
            _ => None,
        }
    }

    /// API host for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            PlaidEnvironment::Sandbox => "https://sandbox.plaid.com",
            PlaidEnvironment::Development => "https://development.plaid.com",
            PlaidEnvironment::Production => "https://production.plaid.com",
        }
    }
}

/// Non-fatal problems found while loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingVariable(&'static str),
    UnknownEnvironment(String),
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingVariable(name) => {
                write!(f, "{name} is not set; Plaid requests will fail until it is configured")
            }
            ConfigWarning::UnknownEnvironment(value) => {
                write!(f, "PLAID_ENV '{value}' is not recognised; falling back to sandbox")
            }
        }
    }
}

/// Credentials and Link settings for the Plaid client
#[derive(Debug)]
pub struct PlaidConfig {
    pub client_id: Option<String>,
    pub secret: Option<Secret<String>>,
    pub environment: PlaidEnvironment,
    pub client_name: String,
    pub products: Vec<String>,
    pub country_codes: Vec<String>,
    pub redirect_uri: Option<String>,
}

impl PlaidConfig {
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.secret.is_some()
    }
}

/// Process configuration, built once at startup
#[derive(Debug)]
pub struct AppConfig {
    pub plaid: PlaidConfig,
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Missing Plaid credentials are recorded in `warnings` instead of failing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut warnings = Vec::new();

        let client_id = get("PLAID_CLIENT_ID");
        if client_id.is_none() {
            warnings.push(ConfigWarning::MissingVariable("PLAID_CLIENT_ID"));
        }

        let secret = get("PLAID_SECRET").map(Secret::new);
        if secret.is_none() {
            warnings.push(ConfigWarning::MissingVariable("PLAID_SECRET"));
        }

        let environment = match get("PLAID_ENV") {
            Some(value) => PlaidEnvironment::parse(&value).unwrap_or_else(|| {
                warnings.push(ConfigWarning::UnknownEnvironment(value));
                PlaidEnvironment::Sandbox
            }),
            None => PlaidEnvironment::Sandbox,
        };

        let products = get("PLAID_PRODUCTS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|| vec!["transactions".to_string()]);

        let country_codes = get("PLAID_COUNTRY_CODES")
            .map(|v| split_list(&v).into_iter().map(|c| c.to_uppercase()).collect())
            .unwrap_or_else(|| vec!["US".to_string()]);

        let host = match get("SERVER_HOST") {
            Some(value) => value
                .parse()
                .map_err(|e| format!("SERVER_HOST '{value}' is not a valid IP address: {e}"))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get("SERVER_PORT") {
            Some(value) => value
                .parse()
                .map_err(|e| format!("SERVER_PORT '{value}' is not a valid port: {e}"))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = split_list(
            &get("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Ok(Self {
            plaid: PlaidConfig {
                client_id,
                secret,
                environment,
                client_name: get("PLAID_CLIENT_NAME")
                    .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
                products,
                country_codes,
                redirect_uri: get("PLAID_REDIRECT_URI"),
            },
            host,
            port,
            allowed_origins,
            warnings,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}
