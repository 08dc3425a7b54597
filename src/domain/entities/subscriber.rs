use chrono::{DateTime, Duration, Utc};
use shieldguard_types::{SubscriptionStatusResponse, SubscriptionTier};
use uuid::Uuid;

/// Locally cached view of a user's billing state, keyed by email.
///
/// Every field past `user_id` is re-derived from the billing provider on each
/// reconciliation. The row can lag the provider and must not be treated as
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub user_id: Uuid,
    pub stripe_customer_id: Option<String>,
    pub subscribed: bool,
    pub subscription_tier: Option<SubscriptionTier>,
    pub subscription_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscriber {
    /// Whether the row was reconciled within `window` of `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now.signed_duration_since(self.updated_at) < window
    }

    pub fn status(&self) -> SubscriptionStatusResponse {
        SubscriptionStatusResponse {
            subscribed: self.subscribed,
            subscription_tier: self.subscription_tier,
            subscription_end: self.subscription_end,
        }
    }
}
