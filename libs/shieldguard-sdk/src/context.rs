use std::time::Duration;

use chrono::{DateTime, Utc};
use shieldguard_types::{SubscriptionStatusResponse, SubscriptionTier};

#[cfg(feature = "client")]
use crate::{client::ShieldguardClient, error::SdkError};

/// Wait between opening the hosted checkout and reconciling.
pub const RECONCILE_DELAY: Duration = Duration::from_secs(2);

/// Client-side view of the caller's subscription, passed explicitly to the
/// screens that need it.
///
/// Holds the last reconciliation answer only. It can lag the billing provider,
/// so refresh it after a checkout return and invalidate it on sign-out.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionContext {
    status: Option<SubscriptionStatusResponse>,
}

impl SubscriptionContext {
    pub fn apply(&mut self, status: SubscriptionStatusResponse) {
        self.status = Some(status);
    }

    /// Forget the cached state, e.g. on sign-out.
    pub fn invalidate(&mut self) {
        self.status = None;
    }

    /// Whether a reconciliation answer has been applied since the last
    /// invalidation.
    pub fn is_loaded(&self) -> bool {
        self.status.is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.subscribed)
    }

    pub fn tier(&self) -> Option<SubscriptionTier> {
        self.status.as_ref().and_then(|s| s.subscription_tier)
    }

    pub fn subscription_end(&self) -> Option<DateTime<Utc>> {
        self.status.as_ref().and_then(|s| s.subscription_end)
    }

    /// Reconcile with the billing provider and apply the answer. On error the
    /// previous state is kept.
    #[cfg(feature = "client")]
    pub async fn refresh(
        &mut self,
        client: &ShieldguardClient,
        token: &str,
    ) -> Result<&SubscriptionStatusResponse, SdkError> {
        let status = client.check_subscription(token).await?;
        Ok(&*self.status.insert(status))
    }

    /// Wait `RECONCILE_DELAY`, then `refresh`.
    #[cfg(feature = "client")]
    pub async fn refresh_after_checkout(
        &mut self,
        client: &ShieldguardClient,
        token: &str,
    ) -> Result<&SubscriptionStatusResponse, SdkError> {
        tokio::time::sleep(RECONCILE_DELAY).await;
        self.refresh(client, token).await
    }
}
