use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};

use crate::errors::AppError;

/// Header carrying the caller's Plaid access token(s)
pub const ACCESS_TOKEN_HEADER: &str = "X-Plaid-Access-Token";

/// Extractor for a single Plaid access token.
pub struct AccessToken(pub String);

/// Extractor for one or more Plaid access tokens.
///
/// Accepts repeated headers and comma-separated values.
pub struct AccessTokens(pub Vec<String>);

fn header_tokens(req: &HttpRequest) -> Vec<String> {
    req.headers()
        .get_all(ACCESS_TOKEN_HEADER)
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(','))
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn missing_header() -> AppError {
    AppError::Unauthorized(format!("Missing {ACCESS_TOKEN_HEADER} header"))
}

impl FromRequest for AccessToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let mut tokens = header_tokens(req);
        match tokens.len() {
            0 => err(missing_header()),
            1 => ok(AccessToken(tokens.remove(0))),
            _ => err(AppError::ValidationError(format!(
                "Expected a single {ACCESS_TOKEN_HEADER} value"
            ))),
        }
    }
}

impl FromRequest for AccessTokens {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let tokens = header_tokens(req);
        if tokens.is_empty() {
            return err(missing_header());
        }
        ok(AccessTokens(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_rt::test]
    async fn test_single_token_extracted() {
        let req = TestRequest::default()
            .insert_header((ACCESS_TOKEN_HEADER, "access-sandbox-1"))
            .to_http_request();

        let token = AccessToken::extract(&req).await.ok().expect("Should extract");
        assert_eq!(token.0, "access-sandbox-1");
    }

    #[actix_rt::test]
    async fn test_missing_token_is_unauthorized() {
        let req = TestRequest::default().to_http_request();

        let result = AccessToken::extract(&req).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[actix_rt::test]
    async fn test_several_tokens_rejected_for_single_extractor() {
        let req = TestRequest::default()
            .insert_header((ACCESS_TOKEN_HEADER, "access-a, access-b"))
            .to_http_request();

        let result = AccessToken::extract(&req).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_repeated_and_comma_separated_tokens() {
        let req = TestRequest::default()
            .append_header((ACCESS_TOKEN_HEADER, "access-a,access-b"))
            .append_header((ACCESS_TOKEN_HEADER, "access-c"))
            .to_http_request();

        let tokens = AccessTokens::extract(&req).await.ok().expect("Should extract");
        assert_eq!(tokens.0, vec!["access-a", "access-b", "access-c"]);
    }
}
