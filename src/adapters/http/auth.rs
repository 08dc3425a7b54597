use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::jwt::{self, AuthenticatedUser},
};

/// Caller identity resolved from the `Authorization: Bearer <token>` header.
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = jwt::authenticate(token, &state.config.jwt_secret, &state.config.jwt_audience)?;
        Ok(AuthUser(user))
    }
}

fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("No authorization header provided".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated("Malformed authorization header".into()))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthenticated("Expected a bearer token".into()))?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::Unauthenticated("Expected a bearer token".into()));
    }

    Ok(token)
}
