//! Client side of the ShieldGuard subscription flow.
//!
//! This SDK provides:
//!
//! - **Billing API client** - create checkouts and reconcile subscriptions (feature `client`)
//! - **Subscription context** - the last reconciled subscription, passed explicitly to screens
//! - **Protection flow** - the landing / loading / protected screen gate
//! - **Activation script** - the timed, cosmetic activation progress
//! - **Checkout return handling** - the `payment=success|cancelled` URL marker
//!
//! # Example
//!
//! ```rust,ignore
//! use shieldguard_sdk::{ProtectionFlow, ShieldguardClient, SubscriptionContext, plans};
//!
//! let client = ShieldguardClient::new("https://api.shieldguard.example")?;
//! let checkout = client
//!     .create_checkout(&token, &plans::MONTHLY.checkout_request())
//!     .await?;
//! // open checkout.url, then:
//! let mut ctx = SubscriptionContext::default();
//! ctx.refresh_after_checkout(&client, &token).await?;
//!
//! let mut flow = ProtectionFlow::default();
//! flow.begin_activation(&ctx)?;
//! ```

mod activation;
#[cfg(feature = "client")]
mod client;
mod context;
mod error;
mod gate;
mod payment_return;
pub mod plans;

pub use activation::{ActivationProgress, ActivationScript, ActivationStage, ACTIVATION_STAGES};
#[cfg(feature = "client")]
pub use client::ShieldguardClient;
pub use context::{RECONCILE_DELAY, SubscriptionContext};
pub use error::SdkError;
pub use gate::{GateError, ProtectionFlow, Screen};
pub use payment_return::PaymentReturn;

// Re-export shared types for convenience
pub use shieldguard_types::{
    BillingInterval, CheckoutRequest, CheckoutResponse, ErrorCode, ErrorResponse,
    SubscriptionStatusResponse, SubscriptionTier,
};
