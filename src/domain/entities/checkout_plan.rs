use shieldguard_types::BillingInterval;

/// Price used when the client does not select a plan (4.99 per month).
pub const DEFAULT_PRICE_AMOUNT: i64 = 499;

/// A resolved plan selection: amount in minor units and billing interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPlan {
    pub price_amount: i64,
    pub interval: BillingInterval,
}

impl Default for CheckoutPlan {
    fn default() -> Self {
        Self {
            price_amount: DEFAULT_PRICE_AMOUNT,
            interval: BillingInterval::Month,
        }
    }
}
