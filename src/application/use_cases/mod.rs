pub mod checkout;
pub mod payment_provider_factory;
pub mod subscription;
