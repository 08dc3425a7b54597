use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::validators::is_valid_email;

// ============================================================================
// Access Token Claims
// ============================================================================

/// Claims of an access token minted by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Caller identity resolved from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

pub fn issue_access_token(
    user_id: Uuid,
    email: Option<&str>,
    audience: &str,
    secret: &SecretString,
    ttl: Duration,
) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = AccessClaims {
        sub: user_id.to_string(),
        email: email.map(str::to_owned),
        aud: audience.to_string(),
        iat: now,
        exp: now + ttl.whole_seconds(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn verify_access_token(
    token: &str,
    secret: &SecretString,
    audience: &str,
) -> AppResult<AccessClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthenticated(format!("Invalid access token: {e}")))
}

/// Verify a token and require a usable identity (UUID subject, valid email).
pub fn authenticate(
    token: &str,
    secret: &SecretString,
    audience: &str,
) -> AppResult<AuthenticatedUser> {
    let claims = verify_access_token(token, secret, audience)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthenticated("Token subject is not a user id".into()))?;

    let email = claims
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| is_valid_email(e))
        .ok_or_else(|| {
            AppError::Unauthenticated("User not authenticated or email not available".into())
        })?;

    Ok(AuthenticatedUser { user_id, email })
}
