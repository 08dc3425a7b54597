//! Billing routes: hosted checkout and subscription status.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::ORIGIN},
    response::IntoResponse,
    routing::{get, post},
};
use shieldguard_types::{CheckoutRequest, CheckoutResponse};
use url::Url;

use crate::{
    adapters::http::{app_state::AppState, auth::AuthUser},
    app_error::{AppError, AppResult},
    application::use_cases::checkout::checkout_return_urls,
    domain::entities::checkout_plan::CheckoutPlan,
};

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/create-checkout
/// Opens a hosted subscription checkout and returns its URL.
async fn create_checkout(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let request = parse_checkout_request(&body)?;
    let plan = CheckoutPlan::from_request(&request)?;
    let origin = request_origin(&headers).unwrap_or_else(|| app_state.config.app_origin.clone());

    let url = app_state
        .checkout_use_cases
        .create_checkout(&user, plan, checkout_return_urls(&origin))
        .await?;

    Ok(Json(CheckoutResponse { url }))
}

/// POST /api/check-subscription
/// Reconciles the caller's subscription with the billing provider.
async fn check_subscription(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<impl IntoResponse> {
    let status = app_state.subscription_use_cases.reconcile(&user).await?;
    Ok(Json(status))
}

/// GET /api/subscription
/// Returns the cached subscription, reconciling when it is stale.
async fn get_subscription(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<impl IntoResponse> {
    let status = app_state.subscription_use_cases.current(&user).await?;
    Ok(Json(status))
}

// ============================================================================
// Helpers
// ============================================================================

/// The body is optional; an empty body selects the default plan.
fn parse_checkout_request(body: &[u8]) -> AppResult<CheckoutRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckoutRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid checkout request: {e}")))
}

/// Origin of the calling page, if it is a usable http(s) URL.
fn request_origin(headers: &HeaderMap) -> Option<Url> {
    let raw = headers.get(ORIGIN)?.to_str().ok()?;
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-checkout", post(create_checkout))
        .route("/check-subscription", post(check_subscription))
        .route("/subscription", get(get_subscription))
}
