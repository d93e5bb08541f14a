use crate::api::parsers;
use crate::cache::Cache;
use crate::config::ApiSettings;
use crate::domain::MatchPayload;
use crate::errors::ResultExt;
use crate::http::RateLimitedClient;
use anyhow::Result;
use log::{info, warn};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// LiquipediaDB match API client
pub struct LiquipediaClient {
    client: RateLimitedClient,
    base_url: String,
    wiki: String,
    limit: u32,
}

impl LiquipediaClient {
    /// Create a new client; fails when no API key is configured
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let Some(api_key) = settings.api_key.as_deref() else {
            anyhow::bail!(
                "No LiquipediaDB API key configured (set {})",
                crate::config::settings::API_KEY_ENV
            );
        };

        let client = RateLimitedClient::with_api_key(
            &settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            api_key,
        )?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            wiki: settings.wiki.clone(),
            limit: settings.limit,
        })
    }

    /// Fetch the raw response body for all matches in the given brackets
    pub async fn fetch_matches_raw(&mut self, bracket_ids: &[String]) -> Result<String> {
        let url = self.build_match_url(bracket_ids);
        info!("Fetching matches for {} brackets from {}", bracket_ids.len(), self.base_url);

        self.client.get_text(&url).await
    }

    /// Fetch and decode matches for the given brackets
    pub async fn fetch_matches(&mut self, bracket_ids: &[String]) -> Result<MatchPayload> {
        let text = self.fetch_matches_raw(bracket_ids).await?;
        parsers::parse_match_payload(&text)
    }

    /// Fetch matches with cache integration
    /// Saves the FULL raw JSON to cache, then parses it.
    pub async fn fetch_and_cache_matches(
        &mut self,
        bracket_ids: &[String],
        cache: &Cache,
        refresh: bool,
    ) -> Result<MatchPayload> {
        let key = self.cache_key(bracket_ids);

        // 1. Try load from cache
        let cached_value = if refresh { None } else { cache.load_matches(&key)? };

        let json_value = match cached_value {
            Some(value) => {
                info!("Using cached match data for {}", key);
                value
            }
            None => {
                // 2. Fetch raw text and make sure it is valid JSON before caching it
                let text = self.fetch_matches_raw(bracket_ids).await?;
                let value: Value = serde_json::from_str(&text).parse_context("match API response")?;

                if let Err(e) = cache.save_matches(&key, &value) {
                    warn!("Failed to save match data {} to cache: {:?}", key, e);
                }

                value
            }
        };

        // 3. Map into the typed payload
        let payload = parsers::match_payload_from_value(json_value);
        info!("Received {} match records", payload.len());
        Ok(payload)
    }

    // --- Helper Methods ---

    fn build_match_url(&self, bracket_ids: &[String]) -> String {
        let conditions = parsers::build_conditions(bracket_ids);
        format!(
            "{}/match?wiki={}&limit={}&conditions={}&rawstreams=false&streamurls=false",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.wiki),
            self.limit,
            urlencoding::encode(&conditions),
        )
    }

    /// Stable key for a bracket set, independent of id order
    /// Order-independent key for a set of bracket ids.
    ///
    /// The id list is digested so large stages still fit in one file name.
    fn cache_key(&self, bracket_ids: &[String]) -> String {
        let mut ids: Vec<&str> = bracket_ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut hasher = Sha256::new();
        hasher.update(ids.join("\n").as_bytes());
        let digest = format!("{:x}", hasher.finalize());

        format!("{}__{}__{}ids__{}", self.wiki, self.limit, ids.len(), &digest[..16])
    }
}
