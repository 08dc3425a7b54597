//! Typed client for the ShieldGuard billing API.

use serde::de::DeserializeOwned;
use shieldguard_types::{
    CheckoutRequest, CheckoutResponse, ErrorResponse, SubscriptionStatusResponse,
};
use url::Url;

use crate::error::SdkError;

/// Client for the checkout and subscription endpoints.
///
/// Every call carries the caller's identity provider access token as a bearer
/// token.
#[derive(Debug, Clone)]
pub struct ShieldguardClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl ShieldguardClient {
    /// Create a client for the API served at `base_url`
    /// (e.g. `https://api.shieldguard.example`).
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| SdkError::Config(format!("Invalid base URL '{base_url}': {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SdkError::Config("base URL must be http or https".into()));
        }

        // Joining relative paths keeps a mount prefix only with a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http_client: reqwest::Client::new(),
        })
    }

    /// Open a hosted checkout for `plan` and return its redirect URL.
    pub async fn create_checkout(
        &self,
        token: &str,
        plan: &CheckoutRequest,
    ) -> Result<CheckoutResponse, SdkError> {
        let response = self
            .http_client
            .post(self.endpoint("api/create-checkout")?)
            .bearer_auth(token)
            .json(plan)
            .send()
            .await?;

        decode(response).await
    }

    /// Force a reconciliation with the billing provider.
    pub async fn check_subscription(
        &self,
        token: &str,
    ) -> Result<SubscriptionStatusResponse, SdkError> {
        let response = self
            .http_client
            .post(self.endpoint("api/check-subscription")?)
            .bearer_auth(token)
            .send()
            .await?;

        decode(response).await
    }

    /// Read the cached subscription; the server reconciles when it is stale.
    pub async fn current_subscription(
        &self,
        token: &str,
    ) -> Result<SubscriptionStatusResponse, SdkError> {
        let response = self
            .http_client
            .get(self.endpoint("api/subscription")?)
            .bearer_auth(token)
            .send()
            .await?;

        decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, SdkError> {
        self.base_url
            .join(path)
            .map_err(|e| SdkError::Config(format!("Invalid endpoint '{path}': {e}")))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SdkError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), body));
    }

    serde_json::from_str(&body).map_err(|_| SdkError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    })
}

fn api_error(status: u16, body: String) -> SdkError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => SdkError::Api {
            code: error.code,
            message: error.details.unwrap_or(error.error),
        },
        Err(_) => SdkError::UnexpectedStatus { status, body },
    }
}
