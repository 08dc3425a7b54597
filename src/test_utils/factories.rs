//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    application::{
        jwt::AuthenticatedUser,
        ports::payment_provider::{ActiveSubscription, CustomerId},
    },
    domain::entities::subscriber::Subscriber,
};

/// Authenticated caller with a fresh user id.
pub fn test_user(email: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        email: email.to_string(),
    }
}

/// Create a test subscriber row, unsubscribed and last reconciled at a fixed
/// point in the past.
pub fn create_test_subscriber(email: &str, overrides: impl FnOnce(&mut Subscriber)) -> Subscriber {
    let mut subscriber = Subscriber {
        id: Uuid::new_v4(),
        email: email.to_string(),
        user_id: Uuid::new_v4(),
        stripe_customer_id: None,
        subscribed: false,
        subscription_tier: None,
        subscription_end: None,
        created_at: test_datetime(),
        updated_at: test_datetime(),
    };
    overrides(&mut subscriber);
    subscriber
}

/// Create an active subscription billed at 499 per period, renewing in 30 days.
pub fn create_test_active_subscription(
    customer_id: &str,
    overrides: impl FnOnce(&mut ActiveSubscription),
) -> ActiveSubscription {
    let mut subscription = ActiveSubscription {
        subscription_id: format!("sub_{}", Uuid::new_v4().simple()),
        customer_id: CustomerId::new(customer_id),
        current_period_end: test_datetime() + Duration::days(30),
        price_id: Some("price_test123".to_string()),
        unit_amount: Some(499),
    };
    overrides(&mut subscription);
    subscription
}

pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}
