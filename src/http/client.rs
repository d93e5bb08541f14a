use crate::errors::ResultExt;
use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

/// HTTP client with built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        Self::with_headers(user_agent, timeout_secs, rate_limit_ms, HeaderMap::new())
    }

    /// Client that sends `Authorization: Apikey <key>` on every request
    pub fn with_api_key(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64, api_key: &str) -> Result<Self> {
        let headers = Self::build_auth_headers(api_key)?;
        Self::with_headers(user_agent, timeout_secs, rate_limit_ms, headers)
    }

    fn with_headers(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64, headers: HeaderMap) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs, headers)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&mut self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.send_get_request(url).await
    }

    /// GET a URL and return its body, failing on any non-success status
    pub async fn get_text(&mut self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        let body = response.text().await.fetch_context(url)?;

        if !status.is_success() {
            anyhow::bail!("HTTP error {}: {}", status, truncate(&body, 200));
        }

        Ok(body)
    }

    fn build_client(user_agent: &str, timeout_secs: u64, headers: HeaderMap) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_auth_headers(api_key: &str) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("Apikey {}", api_key))
            .context("API key contains characters not allowed in a header")?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client.get(url).send().await.fetch_context(url)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_is_sensitive() {
        let headers = RateLimitedClient::build_auth_headers("abc123").unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();

        assert_eq!(value.to_str().unwrap(), "Apikey abc123");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_invalid_api_key_is_rejected() {
        assert!(RateLimitedClient::build_auth_headers("bad\nkey").is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("Złota Bila", 3), "Zło");
    }
}
