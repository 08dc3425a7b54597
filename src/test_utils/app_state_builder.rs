//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates a minimal `AppState`
//! with in-memory mocks for testing HTTP endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::SecretString;
use url::Url;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::issue_access_token,
        use_cases::{
            checkout::{CheckoutProduct, CheckoutUseCases},
            payment_provider_factory::PaymentProviderFactory,
            subscription::SubscriptionUseCases,
        },
    },
    infra::config::AppConfig,
    test_utils::{FakeBillingProvider, InMemorySubscriberRepo},
};

const TEST_JWT_SECRET: &str = "test_jwt_secret_0123456789abcdef";
const TEST_AUDIENCE: &str = "authenticated";

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let provider = Arc::new(FakeBillingProvider::new().with_customer("a@x.com", "cus_1"));
/// let builder = TestAppStateBuilder::new().with_provider(provider.clone());
/// let token = builder.bearer_token("a@x.com");
/// let app_state = builder.build();
/// ```
pub struct TestAppStateBuilder {
    provider: Arc<FakeBillingProvider>,
    repo: Arc<InMemorySubscriberRepo>,
    stripe_configured: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            provider: Arc::new(FakeBillingProvider::new()),
            repo: Arc::new(InMemorySubscriberRepo::new()),
            stripe_configured: true,
        }
    }

    pub fn with_provider(mut self, provider: Arc<FakeBillingProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_repo(mut self, repo: Arc<InMemorySubscriberRepo>) -> Self {
        self.repo = repo;
        self
    }

    /// Build without a billing secret, as if `STRIPE_SECRET_KEY` were unset.
    pub fn without_stripe_secret(mut self) -> Self {
        self.stripe_configured = false;
        self
    }

    /// Mint a valid access token for `email` with a fresh user id.
    pub fn bearer_token(&self, email: &str) -> String {
        issue_access_token(
            Uuid::new_v4(),
            Some(email),
            TEST_AUDIENCE,
            &jwt_secret(),
            time::Duration::hours(1),
        )
        .expect("test token should be issued")
    }

    /// Build the AppState with all configured mocks.
    pub fn build(self) -> AppState {
        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
            database_url: String::new(),
            jwt_secret: jwt_secret(),
            jwt_audience: TEST_AUDIENCE.to_string(),
            stripe_secret_key: self
                .stripe_configured
                .then(|| SecretString::new("sk_test_123".into())),
            app_origin: Url::parse("http://localhost:8080").unwrap(),
            checkout_product_name: "ShieldGuard Premium Protection".to_string(),
            checkout_currency: "eur".to_string(),
            subscription_staleness_secs: 60,
            log_file: String::new(),
        });

        let providers = Arc::new(
            PaymentProviderFactory::new(config.stripe_secret_key.clone())
                .with_provider_override(self.provider),
        );

        let checkout_use_cases = Arc::new(CheckoutUseCases::new(
            providers.clone(),
            CheckoutProduct {
                name: config.checkout_product_name.clone(),
                currency: config.checkout_currency.clone(),
            },
        ));

        let subscription_use_cases = Arc::new(SubscriptionUseCases::new(
            providers,
            self.repo,
            chrono::Duration::seconds(config.subscription_staleness_secs),
        ));

        AppState {
            config,
            checkout_use_cases,
            subscription_use_cases,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn jwt_secret() -> SecretString {
    SecretString::new(TEST_JWT_SECRET.into())
}
