use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shieldguard_types::{SubscriptionStatusResponse, SubscriptionTier};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{jwt::AuthenticatedUser, ports::payment_provider::BillingProviderPort},
    domain::entities::subscriber::Subscriber,
};

use super::payment_provider_factory::PaymentProviderFactory;

/// Full overwrite of a subscriber row, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberUpsert {
    pub email: String,
    pub user_id: Uuid,
    pub stripe_customer_id: Option<String>,
    pub subscribed: bool,
    pub subscription_tier: Option<SubscriptionTier>,
    pub subscription_end: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriberUpsert {
    pub fn status(&self) -> SubscriptionStatusResponse {
        SubscriptionStatusResponse {
            subscribed: self.subscribed,
            subscription_tier: self.subscription_tier,
            subscription_end: self.subscription_end,
        }
    }
}

#[async_trait]
pub trait SubscriberRepo: Send + Sync {
    /// Insert or fully overwrite the row for `input.email`.
    async fn upsert(&self, input: &SubscriberUpsert) -> AppResult<Subscriber>;
    async fn get_by_email(&self, email: &str) -> AppResult<Option<Subscriber>>;
}

#[derive(Clone)]
pub struct SubscriptionUseCases {
    providers: Arc<PaymentProviderFactory>,
    repo: Arc<dyn SubscriberRepo>,
    staleness_window: Duration,
}

impl SubscriptionUseCases {
    pub fn new(
        providers: Arc<PaymentProviderFactory>,
        repo: Arc<dyn SubscriberRepo>,
        staleness_window: Duration,
    ) -> Self {
        Self {
            providers,
            repo,
            staleness_window,
        }
    }

    /// Re-derive the caller's subscription from the billing provider and
    /// overwrite the cached row.
    ///
    /// All provider calls finish before the single upsert, so a failure leaves
    /// the stored row as it was.
    #[instrument(skip(self), fields(user_id = %user.user_id))]
    pub async fn reconcile(&self, user: &AuthenticatedUser) -> AppResult<SubscriptionStatusResponse> {
        let provider = self.providers.get()?;
        let upsert = derive_subscriber(provider.as_ref(), user).await?;

        self.repo.upsert(&upsert).await?;
        info!(
            stage = "upsert",
            subscribed = upsert.subscribed,
            tier = ?upsert.subscription_tier,
            "Updated subscriber record"
        );

        Ok(upsert.status())
    }

    /// Read-through view of the caller's subscription.
    ///
    /// Serves the cached row while it is younger than the staleness window,
    /// otherwise reconciles.
    #[instrument(skip(self), fields(user_id = %user.user_id))]
    pub async fn current(&self, user: &AuthenticatedUser) -> AppResult<SubscriptionStatusResponse> {
        let cached = self.repo.get_by_email(&user.email).await?;
        if let Some(cached) = cached.filter(|row| row.is_fresh(Utc::now(), self.staleness_window)) {
            info!(stage = "cache", updated_at = %cached.updated_at, "Serving cached subscription");
            return Ok(cached.status());
        }

        self.reconcile(user).await
    }
}

async fn derive_subscriber(
    provider: &dyn BillingProviderPort,
    user: &AuthenticatedUser,
) -> AppResult<SubscriberUpsert> {
    let Some(customer_id) = provider.find_customer_by_email(&user.email).await? else {
        info!(stage = "customer_lookup", "No customer found, recording unsubscribed state");
        return Ok(SubscriberUpsert {
            email: user.email.clone(),
            user_id: user.user_id,
            stripe_customer_id: None,
            subscribed: false,
            subscription_tier: None,
            subscription_end: None,
            updated_at: Utc::now(),
        });
    };
    info!(stage = "customer_lookup", customer_id = %customer_id, "Found customer");

    let active = provider.latest_active_subscription(&customer_id).await?;

    let (tier, end) = match active {
        Some(subscription) => {
            info!(
                stage = "subscription_lookup",
                subscription_id = %subscription.subscription_id,
                period_end = %subscription.current_period_end,
                "Active subscription found"
            );

            let amount = match subscription.unit_amount {
                Some(amount) => amount,
                None => {
                    let price_id = subscription.price_id.as_deref().ok_or_else(|| {
                        AppError::Upstream(format!(
                            "Subscription {} has no price",
                            subscription.subscription_id
                        ))
                    })?;
                    provider.price_unit_amount(price_id).await?.unwrap_or(0)
                }
            };

            let tier = SubscriptionTier::from_unit_amount(amount);
            info!(stage = "price_lookup", amount, tier = %tier, "Determined subscription tier");
            (Some(tier), Some(subscription.current_period_end))
        }
        None => {
            info!(stage = "subscription_lookup", "No active subscription found");
            (None, None)
        }
    };

    Ok(SubscriberUpsert {
        email: user.email.clone(),
        user_id: user.user_id,
        stripe_customer_id: Some(customer_id.0),
        subscribed: tier.is_some(),
        subscription_tier: tier,
        subscription_end: end,
        updated_at: Utc::now(),
    })
}
