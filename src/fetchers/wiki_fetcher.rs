use anyhow::Result;
use log::{info, warn};

use crate::cache::Cache;
use crate::config::WikiSettings;
use crate::http::RateLimitedClient;

/// Downloads raw wikitext of tournament pages (`?action=raw`)
pub struct WikiFetcher {
    client: RateLimitedClient,
    base_url: String,
}

impl WikiFetcher {
    pub fn new(settings: &WikiSettings) -> Result<Self> {
        let client = RateLimitedClient::new(&settings.user_agent, settings.timeout_secs, settings.rate_limit_ms)?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    /// Fetch the raw wikitext of `page` on `wiki`
    pub async fn fetch_wikitext(&mut self, wiki: &str, page: &str) -> Result<String> {
        let url = Self::build_page_url(&self.base_url, wiki, page);
        info!("Fetching wikitext from: {}", url);

        self.client.get_text(&url).await
    }

    /// Fetch wikitext, consulting the cache first unless `refresh` is set
    pub async fn fetch_and_cache_wikitext(
        &mut self,
        wiki: &str,
        page: &str,
        cache: &Cache,
        refresh: bool,
    ) -> Result<String> {
        let key = format!("{}/{}", wiki, page);

        if !refresh {
            if let Some(text) = cache.load_wikitext(&key)? {
                info!("Using cached wikitext for {}", key);
                return Ok(text);
            }
        }

        let text = self.fetch_wikitext(wiki, page).await?;

        if let Err(e) = cache.save_wikitext(&key, &text) {
            warn!("Failed to save wikitext {} to cache: {:?}", key, e);
        }

        Ok(text)
    }

    // --- URL Building ---

    fn build_page_url(base_url: &str, wiki: &str, page: &str) -> String {
        format!(
            "{}/{}/{}?action=raw",
            base_url.trim_end_matches('/'),
            urlencoding::encode(wiki),
            Self::encode_page_title(page)
        )
    }

    /// Encode each path segment, keeping `/` separators; spaces become `_` as on the wiki
    fn encode_page_title(page: &str) -> String {
        page.trim()
            .trim_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(&segment.trim().replace(' ', "_")).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}
