use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Recurring billing interval accepted by the checkout endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BillingInterval {
    Day,
    #[default]
    Month,
    Year,
}

/// Plan selection sent to `POST /api/create-checkout`.
///
/// Both fields are optional; the server fills in its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Price in minor currency units (cents).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<BillingInterval>,
}
