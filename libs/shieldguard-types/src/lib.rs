//! Wire types shared by the ShieldGuard billing API and its clients.
//!
//! This crate provides:
//! - Subscription tier classification (`SubscriptionTier`)
//! - Checkout plan selection (`CheckoutRequest`, `BillingInterval`)
//! - API response and error bodies

mod errors;
mod plan;
mod responses;
mod subscription;

pub use errors::{ErrorCode, ErrorResponse};
pub use plan::{BillingInterval, CheckoutRequest};
pub use responses::{CheckoutResponse, SubscriptionStatusResponse};
pub use subscription::{BASIC_MAX_UNIT_AMOUNT, PREMIUM_MAX_UNIT_AMOUNT, SubscriptionTier};
