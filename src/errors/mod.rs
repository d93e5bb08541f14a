use anyhow::Context as _;

/// Uniform context messages for the fetch, parse and cache boundaries
pub trait ResultExt<T> {
    fn fetch_context(self, url: &str) -> anyhow::Result<T>;
    fn parse_context(self, what: &str) -> anyhow::Result<T>;
    fn cache_context(self, operation: &str, key: &str) -> anyhow::Result<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn fetch_context(self, url: &str) -> anyhow::Result<T> {
        self.with_context(|| format!("Failed to fetch from: {}", redact_query(url)))
    }

    fn parse_context(self, what: &str) -> anyhow::Result<T> {
        self.with_context(|| format!("Failed to parse {}", what))
    }

    fn cache_context(self, operation: &str, key: &str) -> anyhow::Result<T> {
        self.with_context(|| format!("Failed to {} cache entry: {}", operation, key))
    }
}

/// Drop the query string; match API queries are long and not useful in errors
fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
