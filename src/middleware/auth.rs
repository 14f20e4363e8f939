use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::AuthError;
use crate::error::ApiError;

/// Header used by the original web client
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated caller extracted from the JWT
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

/// JWT authentication middleware that validates tokens and injects `AuthUser`
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers).map_err(|e| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    let claims = state.auth.validate_jwt(token).map_err(|e| {
        tracing::warn!("Rejected request to {}: {:?}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser { id: claims.user.id });

    Ok(next.run(request).await)
}

/// Token from `x-auth-token`, or from `Authorization: Bearer <token>`
fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    if let Some(value) = headers.get(AUTH_TOKEN_HEADER) {
        let token = value.to_str().map_err(|_| AuthError::MissingToken)?.trim();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let auth_str = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_custom_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(extract_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn reads_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn missing_or_malformed_headers_are_rejected() {
        assert!(matches!(extract_token(&HeaderMap::new()), Err(AuthError::MissingToken)));

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(matches!(extract_token(&headers), Err(AuthError::MissingToken)));

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer   "));
        assert!(matches!(extract_token(&headers), Err(AuthError::MissingToken)));
    }
}
