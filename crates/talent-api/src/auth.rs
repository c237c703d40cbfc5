//! Access token authentication.
//!
//! Tokens are issued by the hosted auth service and signed with the
//! project's HS256 secret; this module only verifies them.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use talent_models::{UserProfile, UserRole};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Decoded access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Auth account ID
    pub sub: String,
    /// Email (if available)
    #[serde(default)]
    pub email: Option<String>,
    /// Auth-service role, usually `authenticated`
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration
    pub exp: i64,
    /// Metadata supplied at sign-up
    #[serde(default)]
    pub user_metadata: Option<Value>,
}

impl TokenClaims {
    /// Platform role recorded in the sign-up metadata.
    pub fn platform_role(&self) -> Option<UserRole> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.get("role"))
            .and_then(Value::as_str)
            .and_then(|r| r.parse().ok())
    }
}

/// Authenticated caller extracted from the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub auth_id: String,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl From<TokenClaims> for AuthUser {
    fn from(claims: TokenClaims) -> Self {
        let role = claims.platform_role();
        Self {
            auth_id: claims.sub,
            email: claims.email,
            role,
        }
    }
}

impl AuthUser {
    /// Profile row linked to this account, by auth id and then by email.
    pub async fn profile(&self, state: &AppState) -> ApiResult<UserProfile> {
        if let Some(profile) = state.users.get_by_auth_id(&self.auth_id).await? {
            return Ok(profile);
        }
        if let Some(email) = &self.email {
            if let Some(profile) = state.users.get_by_email(email).await? {
                return Ok(profile);
            }
        }
        Err(ApiError::forbidden("No profile for this account"))
    }
}

/// HS256 verifier for access tokens.
#[derive(Clone)]
pub struct JwtVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl JwtVerifier {
    /// An empty secret produces a verifier that rejects every token.
    pub fn new(secret: &str, audience: &str) -> Self {
        let key = (!secret.is_empty()).then(|| DecodingKey::from_secret(secret.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);

        Self { key, validation }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Verify an access token.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, ApiError> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("Token verification is not configured"))?;

        let token_data = decode::<TokenClaims>(token, key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected access token");
            ApiError::unauthorized(format!("Token validation failed: {}", e))
        })?;

        Ok(token_data.claims)
    }
}

/// Axum extractor for authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.jwt.verify(token.trim())?;

        Ok(AuthUser::from(claims))
    }
}
