use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::cache::Cache;
use crate::config::AppConfig;
use crate::fetchers::WikiFetcher;
use crate::wikitext::{BracketIdExtractor, TournamentFormat};

/// Bracket ids found on a tournament page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub page: String,
    pub format: TournamentFormat,
    pub bracket_ids: Vec<String>,
}

/// Fetches a page's wikitext and pulls its bracket ids
pub struct DiscoveryService {
    cache: Cache,
    fetcher: WikiFetcher,
    extractor: BracketIdExtractor,
    wiki: String,
}

impl DiscoveryService {
    pub fn new(config: &AppConfig, cache: Cache) -> Result<Self> {
        Ok(Self {
            cache,
            fetcher: WikiFetcher::new(&config.wiki)?,
            extractor: BracketIdExtractor::new()?,
            wiki: config.api.wiki.clone(),
        })
    }

    pub async fn discover(&mut self, page: &str, refresh: bool) -> Result<Discovery> {
        info!("Discovering bracket ids on {}/{}", self.wiki, page);

        let wikitext = self
            .fetcher
            .fetch_and_cache_wikitext(&self.wiki, page, &self.cache, refresh)
            .await?;

        Ok(self.discover_in(page, &wikitext))
    }

    /// Extraction step on already fetched wikitext
    pub fn discover_in(&self, page: &str, wikitext: &str) -> Discovery {
        let format = self.extractor.detect_format(wikitext);
        let bracket_ids = self.extractor.extract_for_format(wikitext, format);
        info!("  → Format: {}, {} bracket ids", format, bracket_ids.len());

        Discovery {
            page: page.to_string(),
            format,
            bracket_ids,
        }
    }
}
