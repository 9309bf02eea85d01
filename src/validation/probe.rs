use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{defaults, error_messages, headers, timeouts};
use crate::core::error::Result;
use crate::core::types::{Entry, Outcome};

/// Checks whether one book source is reachable.
///
/// Implementations must never fail: every error is folded into an
/// unreachable [`Outcome`]. Retrying is the caller's job.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, entry: Entry) -> Outcome;
}

/// Probes book sources with a single HTTP GET each.
///
/// Certificate verification is disabled on this client only, since
/// catalogs routinely point at self-signed hosts.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Build a probe with its own HTTP client.
    ///
    /// `max_idle_per_host` sizes the connection pool shared by all probes
    /// issued through this instance; `timeout` bounds each request.
    pub fn new(timeout: Duration, user_agent: &str, max_idle_per_host: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(defaults::MAX_REDIRECTS))
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            // Connection pooling configuration
            .pool_max_idle_per_host(max_idle_per_host.min(20))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.timeout_duration(),
            config.user_agent(),
            config.workers(),
        )
    }

    /// Probe with the default timeout, mobile user agent and pool size.
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS),
            headers::MOBILE_USER_AGENT,
            defaults::WORKERS,
        )
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, entry: Entry) -> Outcome {
        let Some(url) = entry.url().map(str::to_string) else {
            return Outcome::unreachable(entry, error_messages::MISSING_URL);
        };

        match self.client.get(&url).send().await {
            Ok(response) => Outcome::from_status(entry, response.status().as_u16()),
            Err(err) => Outcome::unreachable(entry, describe_error(&err)),
        }
    }
}

fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "operation timed out".to_string();
    }
    std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string())
}
