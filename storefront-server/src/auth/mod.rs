//! Authentication Module
//!
//! Bearer-token validation and the [`CurrentUser`] request identity.
//! Token issuance lives in the external identity service.

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

/// The authenticated identity attached to a request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User id (JWT subject)
    pub id: String,
    pub email: Option<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}
