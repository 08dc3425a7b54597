use validator::ValidateEmail;

/// Largest unit amount the billing provider accepts for a single price.
pub const MAX_PRICE_AMOUNT: i64 = 99_999_999;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Validates a checkout price in minor currency units.
/// Must be positive and within the provider's per-price limit.
pub fn is_valid_price_amount(amount: i64) -> bool {
    (1..=MAX_PRICE_AMOUNT).contains(&amount)
}
