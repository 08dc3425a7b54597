use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        checkout::{CheckoutProduct, CheckoutUseCases},
        payment_provider_factory::PaymentProviderFactory,
        subscription::{SubscriberRepo, SubscriptionUseCases},
    },
    infra::{config::AppConfig, postgres_persistence},
};
use std::fs::File;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let staleness_window = staleness_window(config.subscription_staleness_secs)?;
    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);
    let subscriber_repo_arc = postgres_arc as Arc<dyn SubscriberRepo>;

    if config.stripe_secret_key.is_none() {
        warn!("STRIPE_SECRET_KEY is not set; billing endpoints will fail until it is configured");
    }

    let providers = Arc::new(PaymentProviderFactory::new(
        config.stripe_secret_key.clone(),
    ));

    let checkout_use_cases = CheckoutUseCases::new(
        providers.clone(),
        CheckoutProduct {
            name: config.checkout_product_name.clone(),
            currency: config.checkout_currency.clone(),
        },
    );

    let subscription_use_cases = SubscriptionUseCases::new(
        providers,
        subscriber_repo_arc,
        staleness_window,
    );

    Ok(AppState {
        config: Arc::new(config),
        checkout_use_cases: Arc::new(checkout_use_cases),
        subscription_use_cases: Arc::new(subscription_use_cases),
    })
}

/// Read-through cache window; must be a non-negative, representable duration.
fn staleness_window(secs: i64) -> anyhow::Result<chrono::Duration> {
    chrono::Duration::try_seconds(secs)
        .filter(|window| *window >= chrono::Duration::zero())
        .ok_or_else(|| {
            anyhow::anyhow!("SUBSCRIPTION_STALENESS_SECS must be between 0 and {}", i64::MAX / 1000)
        })
}

pub fn init_tracing(log_file: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shieldguard_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the file cannot be created
    let (json_layer, file_error) = match File::create(log_file) {
        Ok(file) => (
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Arc::new(file))
                    .with_current_span(true)
                    .with_span_list(true),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let Some(e) = file_error {
        warn!(log_file, error = %e, "Cannot create log file, JSON logs disabled");
    }
}
