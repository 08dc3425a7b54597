use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shieldguard_types::BillingInterval;

use crate::app_error::AppResult;

// ============================================================================
// Port Types - Provider-agnostic domain types
// ============================================================================

/// Unique identifier for a customer in the billing provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who the checkout session is billed to.
///
/// A session references either an existing customer or, for first-time
/// payers, an email hint from which the provider creates the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    Existing(CustomerId),
    Email(String),
}

/// The single recurring line item of a checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineItem {
    pub product_name: String,
    pub currency: String,
    /// Price in minor currency units
    pub unit_amount: i64,
    pub interval: BillingInterval,
}

/// URLs for checkout redirects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    pub customer: CustomerRef,
    pub line_item: CheckoutLineItem,
    pub urls: CheckoutUrls,
    /// Our user id, echoed back by the provider on the session
    pub client_reference_id: Option<String>,
}

/// Result of creating a hosted checkout session
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    pub session_id: String,
    /// URL to redirect the user to; providers may omit it for non-hosted modes
    pub url: Option<String>,
}

/// The most recent active subscription of a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSubscription {
    pub subscription_id: String,
    pub customer_id: CustomerId,
    pub current_period_end: DateTime<Utc>,
    /// Price of the first subscription item
    pub price_id: Option<String>,
    /// Unit amount of that price when the provider embeds it
    pub unit_amount: Option<i64>,
}

// ============================================================================
// Billing Provider Port
// ============================================================================

/// Billing provider port - the four provider calls the billing flows need.
///
/// Implementations map transport and provider failures to `AppError::Upstream`.
#[async_trait]
pub trait BillingProviderPort: Send + Sync {
    /// Look up a customer by email. Only the first match is trusted.
    async fn find_customer_by_email(&self, email: &str) -> AppResult<Option<CustomerId>>;

    /// Most recent subscription of the customer in `active` status.
    async fn latest_active_subscription(
        &self,
        customer: &CustomerId,
    ) -> AppResult<Option<ActiveSubscription>>;

    /// Unit amount of a price, `None` for prices without a fixed amount.
    async fn price_unit_amount(&self, price_id: &str) -> AppResult<Option<i64>>;

    /// Create a hosted subscription checkout session.
    async fn create_checkout(&self, request: &CheckoutSessionRequest)
    -> AppResult<CheckoutSession>;
}
