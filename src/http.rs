//! Shared HTTP client construction.
//!
//! Every remote call in the dashboard goes through one reqwest client wrapped
//! in retry middleware. Transient failures (connect errors, 5xx) are retried
//! up to the configured cap and then surface as an error state on the widget
//! that requested the data.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::ApiConfig;

/// Build the shared HTTP client from API configuration.
pub fn build_client(config: &ApiConfig) -> Result<ClientWithMiddleware> {
    let inner = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(concat!("helmwatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .with_context(|| "Failed to create HTTP client")?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(inner)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_with_defaults() {
        let config = ApiConfig::default();
        assert!(build_client(&config).is_ok());
    }
}
