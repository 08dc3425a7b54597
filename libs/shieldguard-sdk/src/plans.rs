//! Plans offered on the paywall.

use shieldguard_types::{BillingInterval, CheckoutRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    /// Price in minor currency units
    pub price_amount: i64,
    pub interval: BillingInterval,
}

impl Plan {
    pub fn checkout_request(&self) -> CheckoutRequest {
        CheckoutRequest {
            price_amount: Some(self.price_amount),
            interval: Some(self.interval),
        }
    }
}

pub const MONTHLY: Plan = Plan {
    id: "monthly",
    price_amount: 499,
    interval: BillingInterval::Month,
};

pub const YEARLY: Plan = Plan {
    id: "yearly",
    price_amount: 9999,
    interval: BillingInterval::Year,
};

pub const ALL: [Plan; 2] = [MONTHLY, YEARLY];

pub fn find(id: &str) -> Option<Plan> {
    ALL.iter().copied().find(|plan| plan.id == id)
}
