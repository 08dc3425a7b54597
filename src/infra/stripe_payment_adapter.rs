use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::{
        ActiveSubscription, BillingProviderPort, CheckoutSession, CheckoutSessionRequest,
        CustomerId, CustomerRef,
    },
    infra::stripe_client::{StripeClient, StripeSubscription},
};

/// Adapter that wraps StripeClient to implement BillingProviderPort.
#[derive(Clone)]
pub struct StripePaymentAdapter {
    client: StripeClient,
}

impl StripePaymentAdapter {
    pub fn new(secret_key: String) -> AppResult<Self> {
        Ok(Self {
            client: StripeClient::new(secret_key)?,
        })
    }

    fn timestamp_to_datetime(ts: i64) -> AppResult<DateTime<Utc>> {
        Utc.timestamp_opt(ts, 0)
            .single()
            .ok_or_else(|| AppError::Upstream(format!("Invalid Stripe timestamp: {}", ts)))
    }

    fn to_active_subscription(sub: StripeSubscription) -> AppResult<ActiveSubscription> {
        let period_end = sub.period_end().ok_or_else(|| {
            AppError::Upstream(format!("Subscription {} has no period end", sub.id))
        })?;

        Ok(ActiveSubscription {
            current_period_end: Self::timestamp_to_datetime(period_end)?,
            price_id: sub.price().map(|p| p.id.clone()),
            unit_amount: sub.price().and_then(|p| p.unit_amount),
            customer_id: CustomerId::new(sub.customer),
            subscription_id: sub.id,
        })
    }
}

#[async_trait]
impl BillingProviderPort for StripePaymentAdapter {
    async fn find_customer_by_email(&self, email: &str) -> AppResult<Option<CustomerId>> {
        let customer = self.client.find_customer_by_email(email).await?;
        Ok(customer.map(|c| CustomerId::new(c.id)))
    }

    async fn latest_active_subscription(
        &self,
        customer: &CustomerId,
    ) -> AppResult<Option<ActiveSubscription>> {
        self.client
            .latest_active_subscription(customer.as_str())
            .await?
            .map(Self::to_active_subscription)
            .transpose()
    }

    async fn price_unit_amount(&self, price_id: &str) -> AppResult<Option<i64>> {
        let price = self.client.get_price(price_id).await?;
        Ok(price.unit_amount)
    }

    async fn create_checkout(
        &self,
        request: &CheckoutSessionRequest,
    ) -> AppResult<CheckoutSession> {
        let session = self
            .client
            .create_checkout_session(&checkout_session_params(request))
            .await?;

        Ok(CheckoutSession {
            session_id: session.id,
            url: session.url,
        })
    }
}

/// Form parameters for a subscription checkout with an inline recurring price.
///
/// Exactly one of `customer` and `customer_email` is sent.
fn checkout_session_params(request: &CheckoutSessionRequest) -> Vec<(String, String)> {
    let item = &request.line_item;
    let mut params: Vec<(String, String)> = vec![
        ("mode".to_string(), "subscription".to_string()),
        (
            "line_items[0][price_data][currency]".to_string(),
            item.currency.to_lowercase(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            item.product_name.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            item.unit_amount.to_string(),
        ),
        (
            "line_items[0][price_data][recurring][interval]".to_string(),
            item.interval.to_string(),
        ),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("success_url".to_string(), request.urls.success_url.clone()),
        ("cancel_url".to_string(), request.urls.cancel_url.clone()),
    ];

    match &request.customer {
        CustomerRef::Existing(id) => params.push(("customer".to_string(), id.to_string())),
        CustomerRef::Email(email) => params.push(("customer_email".to_string(), email.clone())),
    }

    if let Some(ref_id) = &request.client_reference_id {
        params.push(("client_reference_id".to_string(), ref_id.clone()));
    }

    params
}
