use std::path::PathBuf;

pub const API_KEY_ENV: &str = "LIQUIPEDIADB_API_KEY";
pub const CACHE_DIR_ENV: &str = "BRACKET_STANDINGS_CACHE_DIR";

const USER_AGENT: &str = "BracketStandings/1.0";

pub struct ApiSettings {
    pub base_url: String,
    pub wiki: String,
    pub limit: u32,
    pub api_key: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.liquipedia.net/api/v3".to_string(),
            wiki: "counterstrike".to_string(),
            limit: 100,
            api_key: None,
            user_agent: USER_AGENT.to_string(),
            timeout_secs: 30,
            rate_limit_ms: 1000,
        }
    }
}

pub struct WikiSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://liquipedia.net".to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout_secs: 30,
            rate_limit_ms: 2000, // raw page fetches: 1 req / 2 sec
        }
    }
}

pub struct CacheSettings {
    pub dir: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("cache"),
        }
    }
}

pub struct AppConfig {
    pub api: ApiSettings,
    pub wiki: WikiSettings,
    pub cache: CacheSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api: ApiSettings::default(),
            wiki: WikiSettings::default(),
            cache: CacheSettings::default(),
        }
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        config.api.api_key = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty());

        if let Some(dir) = lookup(CACHE_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.cache.dir = PathBuf::from(dir);
        }

        config
    }
}
