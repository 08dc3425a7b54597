pub mod checkout_plan;
pub mod subscriber;
