//! In-memory mock implementations for the billing provider port and the
//! subscriber repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::payment_provider::{
            ActiveSubscription, BillingProviderPort, CheckoutSession, CheckoutSessionRequest,
            CustomerId,
        },
        use_cases::subscription::{SubscriberRepo, SubscriberUpsert},
    },
    domain::entities::subscriber::Subscriber,
};

// ============================================================================
// InMemorySubscriberRepo
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriberRepo {
    pub subscribers: Mutex<HashMap<String, Subscriber>>,
    upserts: Mutex<usize>,
}

impl InMemorySubscriberRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscribers(subscribers: Vec<Subscriber>) -> Self {
        let map: HashMap<String, Subscriber> = subscribers
            .into_iter()
            .map(|s| (s.email.clone(), s))
            .collect();
        Self {
            subscribers: Mutex::new(map),
            upserts: Mutex::new(0),
        }
    }

    pub fn get(&self, email: &str) -> Option<Subscriber> {
        self.subscribers.lock().unwrap().get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// Number of upserts performed (for asserting no writes happened).
    pub fn upsert_count(&self) -> usize {
        *self.upserts.lock().unwrap()
    }
}

#[async_trait]
impl SubscriberRepo for InMemorySubscriberRepo {
    async fn upsert(&self, input: &SubscriberUpsert) -> AppResult<Subscriber> {
        let mut subscribers = self.subscribers.lock().unwrap();
        let existing = subscribers.get(&input.email);

        let subscriber = Subscriber {
            id: existing.map(|s| s.id).unwrap_or_else(Uuid::new_v4),
            email: input.email.clone(),
            user_id: input.user_id,
            stripe_customer_id: input.stripe_customer_id.clone(),
            subscribed: input.subscribed,
            subscription_tier: input.subscription_tier,
            subscription_end: input.subscription_end,
            created_at: existing.map(|s| s.created_at).unwrap_or(input.updated_at),
            updated_at: input.updated_at,
        };

        subscribers.insert(input.email.clone(), subscriber.clone());
        *self.upserts.lock().unwrap() += 1;
        Ok(subscriber)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        Ok(self.get(email))
    }
}

// ============================================================================
// FakeBillingProvider
// ============================================================================

/// Scripted billing provider. Records checkout requests and price lookups.
#[derive(Default)]
pub struct FakeBillingProvider {
    customers: Mutex<HashMap<String, CustomerId>>,
    subscriptions: Mutex<Vec<ActiveSubscription>>,
    prices: HashMap<String, Option<i64>>,
    failure: Option<String>,
    omit_checkout_url: bool,
    checkout_requests: Mutex<Vec<CheckoutSessionRequest>>,
    price_lookups: Mutex<usize>,
}

impl FakeBillingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(self, email: &str, customer_id: &str) -> Self {
        self.add_customer(email, customer_id);
        self
    }

    /// Register an active subscription. Later registrations for the same
    /// customer win, mirroring "most recent first" ordering.
    pub fn with_subscription(self, subscription: ActiveSubscription) -> Self {
        self.add_subscription(subscription);
        self
    }

    /// Simulate the provider creating a customer, e.g. after a hosted payment.
    pub fn add_customer(&self, email: &str, customer_id: &str) {
        self.customers
            .lock()
            .unwrap()
            .insert(email.to_string(), CustomerId::new(customer_id));
    }

    pub fn add_subscription(&self, subscription: ActiveSubscription) {
        self.subscriptions.lock().unwrap().push(subscription);
    }

    pub fn with_price(mut self, price_id: &str, unit_amount: Option<i64>) -> Self {
        self.prices.insert(price_id.to_string(), unit_amount);
        self
    }

    /// Make every call fail with an upstream error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn without_checkout_url(mut self) -> Self {
        self.omit_checkout_url = true;
        self
    }

    pub fn checkout_requests(&self) -> Vec<CheckoutSessionRequest> {
        self.checkout_requests.lock().unwrap().clone()
    }

    pub fn price_lookups(&self) -> usize {
        *self.price_lookups.lock().unwrap()
    }

    fn check_failure(&self) -> AppResult<()> {
        match &self.failure {
            Some(message) => Err(AppError::Upstream(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BillingProviderPort for FakeBillingProvider {
    async fn find_customer_by_email(&self, email: &str) -> AppResult<Option<CustomerId>> {
        self.check_failure()?;
        Ok(self.customers.lock().unwrap().get(email).cloned())
    }

    async fn latest_active_subscription(
        &self,
        customer_id: &CustomerId,
    ) -> AppResult<Option<ActiveSubscription>> {
        self.check_failure()?;
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| &s.customer_id == customer_id)
            .cloned())
    }

    async fn price_unit_amount(&self, price_id: &str) -> AppResult<Option<i64>> {
        self.check_failure()?;
        *self.price_lookups.lock().unwrap() += 1;
        self.prices
            .get(price_id)
            .copied()
            .ok_or_else(|| AppError::Upstream(format!("No such price: '{price_id}'")))
    }

    async fn create_checkout(&self, request: &CheckoutSessionRequest) -> AppResult<CheckoutSession> {
        self.check_failure()?;
        let mut requests = self.checkout_requests.lock().unwrap();
        requests.push(request.clone());

        let session_id = format!("cs_test_{}", requests.len());
        let url = (!self.omit_checkout_url)
            .then(|| format!("https://checkout.stripe.test/c/pay/{session_id}"));
        Ok(CheckoutSession { session_id, url })
    }
}
