//! Central module for client configuration.
//!
//! Handles loading the backend base URL, request deadline, search debounce
//! window and listing page size from the process environment.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    pub page_size: u32,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
    pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Configuration with default timings for the given backend.
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Config {
            api_base_url: parse_base_url(api_base_url)?,
            request_timeout: Duration::from_millis(Self::DEFAULT_TIMEOUT_MS),
            search_debounce: Duration::from_millis(Self::DEFAULT_DEBOUNCE_MS),
            page_size: Self::DEFAULT_PAGE_SIZE,
            admin_email: None,
            admin_password: None,
        })
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL").context("API_BASE_URL not set")?;

        let timeout_ms = env::var("API_TIMEOUT_MS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .context("API_TIMEOUT_MS must be a valid number")?;

        let debounce_ms = env::var("SEARCH_DEBOUNCE_MS")
            .unwrap_or_else(|_| Self::DEFAULT_DEBOUNCE_MS.to_string())
            .parse::<u64>()
            .context("SEARCH_DEBOUNCE_MS must be a valid number")?;

        let page_size = env::var("JOBS_PAGE_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_PAGE_SIZE.to_string())
            .parse::<u32>()
            .context("JOBS_PAGE_SIZE must be a valid number")?;
        if page_size == 0 {
            anyhow::bail!("JOBS_PAGE_SIZE must be at least 1");
        }

        Ok(Config {
            api_base_url: parse_base_url(&api_base_url)?,
            request_timeout: Duration::from_millis(timeout_ms),
            search_debounce: Duration::from_millis(debounce_ms),
            page_size,
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }
}

// Joining relative paths onto a base without a trailing slash drops the last
// segment, so one is always appended.
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&normalized)
        .with_context(|| format!("API_BASE_URL is not a valid URL: {}", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("API_BASE_URL must use http or https: {}", raw);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = Config::new("http://localhost:3000/api").unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:3000/api/");
        assert_eq!(
            config.api_base_url.join("jobs").unwrap().as_str(),
            "http://localhost:3000/api/jobs"
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::new("https://api.example.com").unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(Config::new("not a url").is_err());
        assert!(Config::new("ftp://example.com").is_err());
    }
}
