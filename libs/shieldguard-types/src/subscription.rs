use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Highest unit amount (minor currency units) still classified as Basic.
pub const BASIC_MAX_UNIT_AMOUNT: i64 = 999;

/// Highest unit amount (minor currency units) still classified as Premium.
pub const PREMIUM_MAX_UNIT_AMOUNT: i64 = 1999;

/// Plan tier derived from the price of the active subscription.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SubscriptionTier {
    Basic,
    Premium,
    Enterprise,
}

impl SubscriptionTier {
    /// Classify a price amount. Amounts at or below zero fall into Basic.
    pub fn from_unit_amount(amount: i64) -> Self {
        if amount <= BASIC_MAX_UNIT_AMOUNT {
            SubscriptionTier::Basic
        } else if amount <= PREMIUM_MAX_UNIT_AMOUNT {
            SubscriptionTier::Premium
        } else {
            SubscriptionTier::Enterprise
        }
    }
}
