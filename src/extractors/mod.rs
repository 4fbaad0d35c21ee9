mod access_token;

pub use access_token::{AccessToken, AccessTokens, ACCESS_TOKEN_HEADER};
