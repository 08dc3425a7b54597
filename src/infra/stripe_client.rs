use reqwest::Client;
use serde::Deserialize;

use crate::{
    app_error::{AppError, AppResult},
    infra::http_client::try_build_client,
};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// API version pinned on every request. Response shapes below follow it.
pub const STRIPE_API_VERSION: &str = "2023-10-16";

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> AppResult<Self> {
        let client = try_build_client()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, secret_key })
    }

    fn auth_header(&self) -> String {
        use base64::Engine;
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{}:", self.secret_key));
        format!("Basic {}", encoded)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", STRIPE_API_BASE, path))
            .header("Authorization", self.auth_header())
            .header("Stripe-Version", STRIPE_API_VERSION)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", STRIPE_API_BASE, path))
            .header("Authorization", self.auth_header())
            .header("Stripe-Version", STRIPE_API_VERSION)
    }

    // ========================================================================
    // Customers
    // ========================================================================

    /// First customer registered with `email`, if any.
    pub async fn find_customer_by_email(&self, email: &str) -> AppResult<Option<StripeCustomer>> {
        let response = self
            .get("/customers")
            .query(&[("email", email), ("limit", "1")])
            .send()
            .await
            .map_err(request_failed)?;

        let list: StripeList<StripeCustomer> = handle_response(response).await?;
        Ok(list.data.into_iter().next())
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Most recently created subscription of the customer in `active` status.
    pub async fn latest_active_subscription(
        &self,
        customer_id: &str,
    ) -> AppResult<Option<StripeSubscription>> {
        let response = self
            .get("/subscriptions")
            .query(&[("customer", customer_id), ("status", "active"), ("limit", "1")])
            .send()
            .await
            .map_err(request_failed)?;

        let list: StripeList<StripeSubscription> = handle_response(response).await?;
        Ok(list.data.into_iter().next())
    }

    // ========================================================================
    // Prices
    // ========================================================================

    pub async fn get_price(&self, price_id: &str) -> AppResult<StripePrice> {
        let response = self
            .get(&format!("/prices/{}", price_id))
            .send()
            .await
            .map_err(request_failed)?;

        handle_response(response).await
    }

    // ========================================================================
    // Checkout Sessions
    // ========================================================================

    /// Create a checkout session from already-encoded form parameters.
    pub async fn create_checkout_session(
        &self,
        params: &[(String, String)],
    ) -> AppResult<StripeCheckoutSession> {
        let response = self
            .post("/checkout/sessions")
            .form(params)
            .send()
            .await
            .map_err(request_failed)?;

        handle_response(response).await
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn request_failed(e: reqwest::Error) -> AppError {
    AppError::Upstream(format!("Stripe request failed: {}", e))
}

async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to read Stripe response: {}", e)))?;

    parse_response(status, &body)
}

fn parse_response<T: for<'de> Deserialize<'de>>(
    status: reqwest::StatusCode,
    body: &str,
) -> AppResult<T> {
    if !status.is_success() {
        tracing::debug!(status = %status, body = %body, "Stripe API error");

        if let Ok(error) = serde_json::from_str::<StripeErrorResponse>(body) {
            return Err(AppError::Upstream(format!(
                "Stripe error: {}",
                error.error.message.unwrap_or(error.error.error_type)
            )));
        }

        return Err(AppError::Upstream(format!(
            "Stripe API error: {} - {}",
            status, body
        )));
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(body = %body, error = %e, "Failed to parse Stripe response");
        AppError::Upstream(format!("Failed to parse Stripe response: {}", e))
    })
}

// ============================================================================
// Stripe Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StripeList<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct StripePrice {
    pub id: String,
    pub unit_amount: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub customer: Option<String>,
    pub client_reference_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    pub customer: String,
    pub status: String,
    /// Present on the pinned API version; newer versions move it to the items.
    #[serde(default)]
    pub current_period_end: Option<i64>,
    pub items: StripeList<StripeSubscriptionItem>,
}

impl StripeSubscription {
    fn first_item(&self) -> Option<&StripeSubscriptionItem> {
        self.items.data.first()
    }

    pub fn price(&self) -> Option<&StripePrice> {
        self.first_item().map(|item| &item.price)
    }

    /// Period end in unix seconds, falling back to the first item's.
    pub fn period_end(&self) -> Option<i64> {
        self.current_period_end
            .or_else(|| self.first_item().and_then(|item| item.current_period_end))
    }
}

#[derive(Debug, Deserialize)]
pub struct StripeSubscriptionItem {
    pub id: String,
    pub price: StripePrice,
    #[serde(default)]
    pub current_period_end: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeError,
}

#[derive(Debug, Deserialize)]
pub struct StripeError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: Option<String>,
    pub code: Option<String>,
}
