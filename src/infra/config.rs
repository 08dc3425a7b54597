use std::net::SocketAddr;

use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// HS256 secret of the identity provider's access tokens.
    pub jwt_secret: SecretString,
    pub jwt_audience: String,
    /// Billing secret. Optional so the service boots without it; billing
    /// requests then fail with a configuration error.
    pub stripe_secret_key: Option<SecretString>,
    /// Fallback origin for checkout return URLs.
    pub app_origin: Url,
    pub checkout_product_name: String,
    pub checkout_currency: String,
    pub subscription_staleness_secs: i64,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let database_url: String = get_env("DATABASE_URL");
        let jwt_secret = SecretString::new(get_env::<String>("JWT_SECRET").into());
        let jwt_audience: String = get_env_default("JWT_AUDIENCE", "authenticated".to_string());
        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into()));
        let app_origin: Url = get_env_default(
            "APP_ORIGIN",
            Url::parse("http://localhost:8080").expect("default APP_ORIGIN is a valid URL"),
        );
        let checkout_product_name: String = get_env_default(
            "CHECKOUT_PRODUCT_NAME",
            "ShieldGuard Premium Protection".to_string(),
        );
        let checkout_currency: String = get_env_default("CHECKOUT_CURRENCY", "eur".to_string());
        let subscription_staleness_secs: i64 = get_env_default("SUBSCRIPTION_STALENESS_SECS", 60);
        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());

        Self {
            bind_addr,
            database_url,
            jwt_secret,
            jwt_audience,
            stripe_secret_key,
            app_origin,
            checkout_product_name,
            checkout_currency: checkout_currency.to_lowercase(),
            subscription_staleness_secs,
            log_file,
        }
    }
}
