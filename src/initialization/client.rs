//! HTTP client initialization.
//!
//! This module provides the function to initialize the HTTP client used for
//! page and image fetches.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client with default settings.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from config
/// - Timeout from config
/// - Redirect following enabled (reqwest default, up to 10 hops)
///
/// The client is shared by every scan task; reqwest clients are cheap to
/// clone and pool connections internally.
///
/// # Arguments
///
/// * `config` - Application configuration carrying user-agent and timeout
///
/// # Returns
///
/// A configured HTTP client ready for making requests.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_defaults() {
        let config = Config::default();
        assert!(init_client(&config).is_ok());
    }

    #[test]
    fn test_init_client_with_custom_timeout() {
        let config = Config {
            timeout_seconds: 1,
            ..Config::default()
        };
        assert!(init_client(&config).is_ok());
    }
}
