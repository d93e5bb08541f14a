use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ResultExt;

/// File-based cache for raw upstream payloads (wikitext and match API responses)
///
/// Only inputs are cached; computed standings are never written here.
#[derive(Debug, Clone)]
pub struct Cache {
    cache_dir: PathBuf,
    wikitext_dir: PathBuf,
    matches_dir: PathBuf,
}

impl Cache {
    /// Create a new cache instance
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let wikitext_dir = cache_dir.join("wikitext");
        let matches_dir = cache_dir.join("matches");

        fs::create_dir_all(&wikitext_dir).cache_context("create", &wikitext_dir.display().to_string())?;
        fs::create_dir_all(&matches_dir).cache_context("create", &matches_dir.display().to_string())?;

        Ok(Self {
            cache_dir,
            wikitext_dir,
            matches_dir,
        })
    }

    /// Save raw page wikitext
    pub fn save_wikitext(&self, key: &str, text: &str) -> Result<()> {
        let file_path = self.build_wikitext_path(key);
        fs::write(&file_path, text).cache_context("write", key)?;
        info!("Saved wikitext to cache: {}", file_path.display());
        Ok(())
    }

    /// Load raw page wikitext
    pub fn load_wikitext(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.build_wikitext_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&file_path).cache_context("read", key)?;
        debug!("Loaded wikitext from cache: {}", file_path.display());
        Ok(Some(text))
    }

    /// Save raw match API response
    pub fn save_matches(&self, key: &str, data: &Value) -> Result<()> {
        let file_path = self.build_matches_path(key);
        self.write_json(&file_path, key, data)?;
        info!("Saved match data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load raw match API response
    pub fn load_matches(&self, key: &str) -> Result<Option<Value>> {
        let file_path = self.build_matches_path(key);
        self.read_json_opt(&file_path, key)
    }

    /// Clear all cached data
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.cache_dir).cache_context("clear", &self.cache_dir.display().to_string())?;
        fs::create_dir_all(&self.wikitext_dir).cache_context("create", "wikitext")?;
        fs::create_dir_all(&self.matches_dir).cache_context("create", "matches")?;

        info!("Cleared cache directory");
        Ok(())
    }

    // --- Helper Methods ---

    fn build_wikitext_path(&self, key: &str) -> PathBuf {
        self.wikitext_dir.join(format!("{}.txt", sanitize_key(key)))
    }

    fn build_matches_path(&self, key: &str) -> PathBuf {
        self.matches_dir.join(format!("{}.json", sanitize_key(key)))
    }

    fn write_json(&self, path: &Path, key: &str, data: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize match data")?;
        fs::write(path, json).cache_context("write", key)?;
        Ok(())
    }

    fn read_json_opt(&self, path: &Path, key: &str) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path).cache_context("read", key)?;
        let data: Value = serde_json::from_str(&json).parse_context(&format!("cached JSON in {:?}", path))?;
        debug!("Loaded match data from cache: {}", path.display());
        Ok(Some(data))
    }
}

/// Turn a page title or id list into a safe file stem
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
