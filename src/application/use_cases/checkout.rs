use std::sync::Arc;

use shieldguard_types::CheckoutRequest;
use tracing::{info, instrument};
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt::AuthenticatedUser,
        ports::payment_provider::{
            CheckoutLineItem, CheckoutSessionRequest, CheckoutUrls, CustomerRef,
        },
        validators::{MAX_PRICE_AMOUNT, is_valid_price_amount},
    },
    domain::entities::checkout_plan::CheckoutPlan,
};

use super::payment_provider_factory::PaymentProviderFactory;

/// Product shown on the hosted checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutProduct {
    pub name: String,
    pub currency: String,
}

#[derive(Clone)]
pub struct CheckoutUseCases {
    providers: Arc<PaymentProviderFactory>,
    product: CheckoutProduct,
}

impl CheckoutUseCases {
    pub fn new(providers: Arc<PaymentProviderFactory>, product: CheckoutProduct) -> Self {
        Self { providers, product }
    }

    /// Open a hosted subscription checkout for the caller and return its URL.
    ///
    /// Nothing is stored locally; the subscription only shows up here once the
    /// reconciler runs.
    #[instrument(skip(self, urls), fields(user_id = %user.user_id))]
    pub async fn create_checkout(
        &self,
        user: &AuthenticatedUser,
        plan: CheckoutPlan,
        urls: CheckoutUrls,
    ) -> AppResult<String> {
        let provider = self.providers.get()?;

        let customer = match provider.find_customer_by_email(&user.email).await? {
            Some(customer_id) => {
                info!(stage = "customer_lookup", customer_id = %customer_id, "Found existing customer");
                CustomerRef::Existing(customer_id)
            }
            None => {
                info!(stage = "customer_lookup", "No existing customer, checkout will carry email");
                CustomerRef::Email(user.email.clone())
            }
        };

        let request = CheckoutSessionRequest {
            customer,
            line_item: CheckoutLineItem {
                product_name: self.product.name.clone(),
                currency: self.product.currency.clone(),
                unit_amount: plan.price_amount,
                interval: plan.interval,
            },
            urls,
            client_reference_id: Some(user.user_id.to_string()),
        };

        let session = provider.create_checkout(&request).await?;
        info!(stage = "checkout_session", session_id = %session.session_id, "Checkout session created");

        session
            .url
            .ok_or_else(|| AppError::Upstream("Checkout session was created without a URL".into()))
    }
}

impl CheckoutPlan {
    /// Fill in defaults and validate the client's plan selection.
    pub fn from_request(request: &CheckoutRequest) -> AppResult<Self> {
        let defaults = CheckoutPlan::default();
        let price_amount = request.price_amount.unwrap_or(defaults.price_amount);

        if !is_valid_price_amount(price_amount) {
            return Err(AppError::InvalidInput(format!(
                "priceAmount must be between 1 and {MAX_PRICE_AMOUNT}"
            )));
        }

        Ok(Self {
            price_amount,
            interval: request.interval.unwrap_or(defaults.interval),
        })
    }
}

/// Return URLs for the hosted checkout, carrying the one-shot `payment` marker.
pub fn checkout_return_urls(origin: &Url) -> CheckoutUrls {
    let with_marker = |marker: &str| {
        let mut url = origin.clone();
        url.set_path("/");
        url.set_fragment(None);
        url.query_pairs_mut().clear().append_pair("payment", marker);
        url.to_string()
    };

    CheckoutUrls {
        success_url: with_marker("success"),
        cancel_url: with_marker("cancelled"),
    }
}
