//! API token authentication middleware.
//!
//! Provides the `ApiCaller` Axum extractor that validates the Authorization
//! header against the token store on every protected route. Validation is
//! stateless: each request performs a fresh database lookup, so a deleted
//! token is rejected on the very next request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use coinpulse_auth::TokenService;
use coinpulse_common::error::AppError;
use coinpulse_common::types::ApiToken;

use crate::state::AppState;

/// Authenticated caller extracted from the Authorization header.
///
/// Use as an Axum extractor on protected routes:
/// ```ignore
/// async fn handler(caller: ApiCaller) -> impl IntoResponse {
///     // caller.token.name identifies the credential holder
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiCaller {
    pub token: ApiToken,
}

/// Pull the opaque token out of an Authorization header value.
///
/// Exactly two forms are accepted: `Bearer <token>` (case-sensitive literal,
/// single space) and the raw token with no prefix. Any other prefixed form
/// is taken literally, including its prefix.
pub fn extract_token(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header)
}

/// Axum `FromRequestParts` implementation for `ApiCaller`.
///
/// Fails closed: a storage fault during the lookup propagates as a request
/// failure rather than letting the handler run unauthenticated.
impl FromRequestParts<AppState> for ApiCaller {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let pool = state.pool.clone();

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        async move {
            let Some(header) = auth_header else {
                return Err(AppError::MissingAuth);
            };

            let token = extract_token(&header);

            match TokenService::lookup_by_token(&pool, token).await? {
                Some(record) => {
                    tracing::info!(client = %record.name, "Authenticated request");
                    Ok(ApiCaller { token: record })
                }
                None => {
                    let prefix: String = token.chars().take(10).collect();
                    tracing::warn!(token_prefix = %prefix, "Invalid API token attempted");
                    Err(AppError::InvalidToken)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(extract_token("Bearer admin-token-123456"), "admin-token-123456");
    }

    #[test]
    fn raw_token_passes_through() {
        assert_eq!(extract_token("admin-token-123456"), "admin-token-123456");
    }

    #[test]
    fn only_the_exact_bearer_prefix_is_special() {
        // lowercase and other schemes are literal values
        assert_eq!(extract_token("bearer abc"), "bearer abc");
        assert_eq!(extract_token("Token abc"), "Token abc");
        assert_eq!(extract_token("Bearer"), "Bearer");
        // a second space is part of the extracted value
        assert_eq!(extract_token("Bearer  abc"), " abc");
    }
}
