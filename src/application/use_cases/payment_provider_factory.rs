use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::BillingProviderPort,
    infra::stripe_payment_adapter::StripePaymentAdapter,
};

/// Factory for the billing provider used by the checkout and subscription flows.
///
/// The billing secret is optional at startup; each request that needs the
/// provider fails with a configuration error until it is set.
pub struct PaymentProviderFactory {
    stripe_secret_key: Option<SecretString>,
    #[cfg(test)]
    test_provider_override: Option<Arc<dyn BillingProviderPort>>,
}

impl PaymentProviderFactory {
    pub fn new(stripe_secret_key: Option<SecretString>) -> Self {
        Self {
            stripe_secret_key,
            #[cfg(test)]
            test_provider_override: None,
        }
    }

    #[cfg(test)]
    pub fn with_provider_override(mut self, provider: Arc<dyn BillingProviderPort>) -> Self {
        self.test_provider_override = Some(provider);
        self
    }

    /// Get a billing provider instance.
    ///
    /// # Errors
    /// - `Configuration` if `STRIPE_SECRET_KEY` is not set
    /// - `Internal` if the HTTP client cannot be built
    pub fn get(&self) -> AppResult<Arc<dyn BillingProviderPort>> {
        let secret = self.stripe_secret_key.as_ref().ok_or_else(|| {
            AppError::Configuration("STRIPE_SECRET_KEY environment variable is not set".into())
        })?;

        #[cfg(test)]
        if let Some(ref override_provider) = self.test_provider_override {
            return Ok(override_provider.clone());
        }

        Ok(Arc::new(StripePaymentAdapter::new(
            secret.expose_secret().to_string(),
        )?))
    }
}
