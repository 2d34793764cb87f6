use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_core::Identity;

use crate::error::AppError;
use crate::state::AppState;

const ACCEPTED_ROLES: [&str; 2] = ["CUSTOMER", "ADMIN"];

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CustomerClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

/// Sign a token for `identity`. Accounts are managed by the identity
/// provider; this is used by local tooling and tests.
pub fn issue_token(identity: &Identity, role: &str, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let claims = CustomerClaims {
        sub: identity.id.to_string(),
        email: identity.email.clone(),
        role: role.to_owned(),
        exp: (Utc::now() + ttl).timestamp().max(0) as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

// ============================================================================
// Identity Middleware
// ============================================================================

/// Attaches an `Identity` to the request when a bearer token is present.
/// A token that is present but unusable is rejected, never downgraded to anonymous.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.headers().contains_key(axum::http::header::AUTHORIZATION) {
        let Authorization(bearer) = req
            .headers()
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| AppError::AuthenticationError("Expected a bearer token".to_string()))?;

        let token_data = decode::<CustomerClaims>(
            bearer.token(),
            &DecodingKey::from_secret(state.auth.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::AuthenticationError(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;
        if !ACCEPTED_ROLES.contains(&claims.role.as_str()) {
            return Err(AppError::AuthorizationError(format!("Role {} may not use this API", claims.role)));
        }

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthenticationError("Token subject is not a user id".to_string()))?;

        req.extensions_mut().insert(Identity::new(id, claims.email));
    }

    Ok(next.run(req).await)
}

// ============================================================================
// Extractors
// ============================================================================

/// The authenticated caller. Rejects with 401 when the request is anonymous.
pub struct CurrentUser(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::AuthenticationError("Authentication required".to_string()))
    }
}

/// The caller's identity, if any. Guest checkout and inquiries accept both.
pub struct MaybeUser(pub Option<Identity>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<Identity>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_round_trips_claims() {
        let identity = Identity::new(Uuid::new_v4(), "traveller@example.com");
        let token = issue_token(&identity, "CUSTOMER", "test-secret", Duration::minutes(5)).unwrap();

        let data = decode::<CustomerClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.sub, identity.id.to_string());
        assert_eq!(data.claims.role, "CUSTOMER");
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let identity = Identity::new(Uuid::new_v4(), "traveller@example.com");
        let token = issue_token(&identity, "CUSTOMER", "right", Duration::minutes(5)).unwrap();

        let result = decode::<CustomerClaims>(&token, &DecodingKey::from_secret(b"wrong"), &Validation::default());
        assert!(result.is_err());
    }
}
