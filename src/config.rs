//! Environment configuration
//!
//! Values come from the process environment, after `.env` has been loaded
//! by `main`.

use std::time::Duration;

use crate::error::{ConsoleError, Result};
use crate::paging::LoadPolicy;

const DEFAULT_API_URL: &str = "http://localhost:8082";
const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL without trailing slash
    pub api_url: String,
    pub page_size: u32,
    /// Transport timeout; `None` leaves requests unbounded
    pub http_timeout: Option<Duration>,
    pub load_policy: LoadPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout: None,
            load_policy: LoadPolicy::LastResolved,
        }
    }
}

impl Config {
    /// Read configuration from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("BACKOFFICE_API_URL").filter(|v| !v.trim().is_empty()) {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConsoleError::Config(format!(
                    "BACKOFFICE_API_URL must start with http:// or https:// (got '{}')",
                    url
                )));
            }
            config.api_url = url;
        }

        if let Some(size) = lookup("BACKOFFICE_PAGE_SIZE") {
            let size: u32 = size.trim().parse().map_err(|_| {
                ConsoleError::Config(format!("BACKOFFICE_PAGE_SIZE is not a number: '{}'", size))
            })?;
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(ConsoleError::Config(format!(
                    "BACKOFFICE_PAGE_SIZE must be between 1 and {}",
                    MAX_PAGE_SIZE
                )));
            }
            config.page_size = size;
        }

        if let Some(secs) = lookup("BACKOFFICE_HTTP_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ConsoleError::Config(format!(
                    "BACKOFFICE_HTTP_TIMEOUT_SECS is not a number: '{}'",
                    secs
                ))
            })?;
            config.http_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(policy) = lookup("BACKOFFICE_LOAD_POLICY") {
            config.load_policy = match policy.trim().to_lowercase().as_str() {
                "" | "last-resolved" => LoadPolicy::LastResolved,
                "latest-issued" => LoadPolicy::LatestIssued,
                other => {
                    return Err(ConsoleError::Config(format!(
                        "BACKOFFICE_LOAD_POLICY must be 'last-resolved' or 'latest-issued' (got '{}')",
                        other
                    )))
                }
            };
        }

        Ok(config)
    }
}
