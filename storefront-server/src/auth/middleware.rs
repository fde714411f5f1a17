//! Authentication middleware
//!
//! Axum middleware for JWT authentication.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Whether a route is reachable without a bearer token.
///
/// Catalog reads and health checks are public; every other `/api/`
/// route requires authentication.
fn is_public_route(method: &http::Method, path: &str) -> bool {
    if method == http::Method::GET
        && (path == "/api/products" || path.starts_with("/api/products/"))
    {
        return true;
    }
    path == "/health"
}

/// Authentication middleware - requires a logged-in user
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success the [`CurrentUser`] is injected into request extensions.
///
/// # Skipped paths
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (they 404 normally)
/// - public catalog reads and `/health`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip auth (they will 404 normally)
    if !path.starts_with("/api/") && path != "/health" {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Request without credentials");
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(
                target: "security",
                error = %e,
                uri = %req.uri(),
                "Token validation failed"
            );
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_reads_are_public() {
        assert!(is_public_route(&http::Method::GET, "/api/products"));
        assert!(is_public_route(&http::Method::GET, "/api/products/search"));
        assert!(is_public_route(&http::Method::GET, "/api/products/product:abc"));
        assert!(is_public_route(&http::Method::GET, "/health"));
    }

    #[test]
    fn catalog_writes_and_user_scopes_are_protected() {
        assert!(!is_public_route(&http::Method::POST, "/api/products"));
        assert!(!is_public_route(&http::Method::DELETE, "/api/products/product:abc"));
        assert!(!is_public_route(&http::Method::GET, "/api/cart"));
        assert!(!is_public_route(&http::Method::POST, "/api/payments/order"));
    }
}
