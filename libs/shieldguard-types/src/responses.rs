use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SubscriptionTier;

/// Successful answer of `POST /api/create-checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Hosted checkout page the user is redirected to.
    pub url: String,
}

/// Subscription state as last reconciled with the billing provider.
///
/// This mirrors a cached row and can lag the provider by the reconciliation
/// delay; it is never the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatusResponse {
    pub subscribed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<SubscriptionTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_end: Option<DateTime<Utc>>,
}

impl SubscriptionStatusResponse {
    pub fn unsubscribed() -> Self {
        Self {
            subscribed: false,
            subscription_tier: None,
            subscription_end: None,
        }
    }
}
