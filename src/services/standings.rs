use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

use crate::aggregation::{self, Aggregation, EliminationProgress, ProgressTracker};
use crate::api::{LiquipediaClient, parsers};
use crate::cache::Cache;
use crate::config::AppConfig;
use crate::domain::MatchRecord;
use crate::services::discovery::DiscoveryService;
use crate::wikitext::TournamentFormat;

/// What to compute standings for
#[derive(Debug, Clone, Default)]
pub struct StandingsRequest {
    /// Tournament page to read bracket ids from
    pub page: Option<String>,
    /// Explicit bracket ids; when non-empty the page is not fetched
    pub bracket_ids: Vec<String>,
    /// Bypass cached wikitext and match data
    pub refresh: bool,
    /// Track bracket progress even when the page format is not single elimination
    pub elimination: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandingsReport {
    pub page: Option<String>,
    pub format: Option<TournamentFormat>,
    pub bracket_ids: Vec<String>,
    pub matches: usize,
    #[serde(flatten)]
    pub aggregation: Aggregation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<EliminationProgress>,
}

pub struct StandingsService {
    cache: Cache,
    discovery: DiscoveryService,
    api_client: LiquipediaClient,
    tracker: ProgressTracker,
}

impl StandingsService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let cache = Cache::new(&config.cache.dir)?;

        Ok(Self {
            discovery: DiscoveryService::new(config, cache.clone())?,
            api_client: LiquipediaClient::new(&config.api)?,
            tracker: ProgressTracker::new()?,
            cache,
        })
    }

    pub async fn run(&mut self, request: &StandingsRequest) -> Result<StandingsReport> {
        info!("=== Computing Standings ===\n");

        // Step 1: Resolve bracket ids
        let (format, bracket_ids) = self.resolve_bracket_ids(request).await?;
        info!("  → Using {} bracket ids\n", bracket_ids.len());

        // Step 2: Fetch match records
        let matches = self.fetch_matches(&bracket_ids, request.refresh).await?;
        info!("  → Fetched {} match records\n", matches.len());

        // Step 3: Tally and rank
        info!("Step 3: Aggregating results...");
        let aggregation = aggregate_matches(&matches);

        let progress = (request.elimination || format == Some(TournamentFormat::SingleElimination))
            .then(|| track_progress(&self.tracker, &matches));

        info!("=== Standings Complete ===");
        Ok(StandingsReport {
            page: request.page.clone(),
            format,
            bracket_ids,
            matches: matches.len(),
            aggregation,
            progress,
        })
    }

    async fn resolve_bracket_ids(&mut self, request: &StandingsRequest) -> Result<(Option<TournamentFormat>, Vec<String>)> {
        info!("Step 1: Resolving bracket ids...");

        if !request.bracket_ids.is_empty() {
            return Ok((None, dedup_preserving_order(&request.bracket_ids)));
        }

        let page = request
            .page
            .as_deref()
            .context("Either a tournament page or at least one bracket id is required")?;

        let discovery = self.discovery.discover(page, request.refresh).await?;
        if discovery.bracket_ids.is_empty() {
            anyhow::bail!("No bracket ids found on page {} (format: {})", page, discovery.format);
        }

        Ok((Some(discovery.format), discovery.bracket_ids))
    }

    async fn fetch_matches(&mut self, bracket_ids: &[String], refresh: bool) -> Result<Vec<MatchRecord>> {
        info!("Step 2: Fetching match records...");

        let payload = self
            .api_client
            .fetch_and_cache_matches(bracket_ids, &self.cache, refresh)
            .await?;
        Ok(payload.into_matches())
    }
}

/// Aggregate and log the outcome, including every diagnostic
pub fn aggregate_matches(matches: &[MatchRecord]) -> Aggregation {
    let aggregation = aggregation::aggregate(matches);

    for diagnostic in &aggregation.diagnostics {
        warn!("{}", diagnostic);
    }

    info!(
        "  → {} matches counted, {} skipped, {} rejected, {} teams",
        aggregation.counted,
        aggregation.skipped,
        aggregation.diagnostics.len(),
        aggregation.standings.len()
    );

    aggregation
}

/// Resolve bracket progress and log the matches that could not be placed
pub fn track_progress(tracker: &ProgressTracker, matches: &[MatchRecord]) -> EliminationProgress {
    let progress = tracker.track(matches);

    for id in &progress.unplaced {
        warn!("Match {} has no round in its id, left out of bracket progress", id);
    }
    info!("  → Bracket progress for {} teams", progress.teams.len());

    progress
}

/// Read the match records of a saved match API response
pub fn load_payload_file(path: &Path) -> Result<Vec<MatchRecord>> {
    info!("Reading saved payload {}", path.display());

    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parsers::parse_match_payload(&text)?.into_matches())
}

/// Report on a saved match API response without touching the network
pub fn report_payload_file(path: &Path, elimination: bool) -> Result<StandingsReport> {
    let matches = load_payload_file(path)?;
    let aggregation = aggregate_matches(&matches);

    let progress = if elimination {
        Some(track_progress(&ProgressTracker::new()?, &matches))
    } else {
        None
    };

    Ok(StandingsReport {
        page: None,
        format: None,
        bracket_ids: Vec::new(),
        matches: matches.len(),
        aggregation,
        progress,
    })
}

fn dedup_preserving_order(ids: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_preserving_order() {
        let ids = vec![
            "b".to_string(),
            " a ".to_string(),
            "b".to_string(),
            "".to_string(),
        ];
        assert_eq!(dedup_preserving_order(&ids), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_report_payload_file() {
        let path = std::env::temp_dir().join("bracket_standings_test_payload.json");
        std::fs::write(
            &path,
            r#"{"result":[
                {"match2id":"M1","match2opponents":[{"name":"A"},{"name":"B"}],"winner":"1","finished":1},
                {"match2id":"M2","match2opponents":[{"name":"A"},{"name":"B"}],"winner":"7","finished":1}
            ]}"#,
        )
        .unwrap();

        let report = report_payload_file(&path, false).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.matches, 2);
        assert_eq!(report.aggregation.standings.triples(), vec![("A", 1, 0), ("B", 0, 1)]);
        assert_eq!(report.aggregation.diagnostics.len(), 1);
        assert!(report.progress.is_none());
    }

    #[test]
    fn test_progress_from_saved_bracket() {
        let path = std::env::temp_dir().join("bracket_standings_test_bracket.json");
        std::fs::write(
            &path,
            r#"{"result":[
                {"match2id":"RCMzEJ3a1P_R01-M001","match2opponents":[{"name":"Vitality"},{"name":"MOUZ"}],"winner":"1","finished":1},
                {"match2id":"RCMzEJ3a1P_R01-M002","match2opponents":[{"name":"Spirit"},{"name":"FaZe"}],"winner":"2","finished":1},
                {"match2id":"RCMzEJ3a1P_R02-M001","match2opponents":[{"name":"Vitality"},{"name":"FaZe"}],"winner":"","finished":0},
                {"match2id":"RCMzEJ3a1P_3rd","match2opponents":[{"name":"MOUZ"},{"name":"Spirit"}],"winner":"","finished":0}
            ]}"#,
        )
        .unwrap();

        let matches = load_payload_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let progress = track_progress(&ProgressTracker::new().unwrap(), &matches);

        assert_eq!(progress.unplaced, vec!["RCMzEJ3a1P_3rd".to_string()]);
        assert_eq!(progress.get("Vitality").map(|t| t.round.as_str()), Some("Grand Final"));
        assert_eq!(progress.get("MOUZ").map(|t| t.round.as_str()), Some("Semi Final"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = report_payload_file(Path::new("/nonexistent/payload.json"), false).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/payload.json"));
    }

    #[tokio::test]
    async fn test_request_needs_page_or_ids() {
        let config = AppConfig {
            api: crate::config::ApiSettings {
                api_key: Some("key".to_string()),
                ..Default::default()
            },
            cache: crate::config::CacheSettings {
                dir: std::env::temp_dir().join("bracket_standings_test_service"),
            },
            ..AppConfig::new()
        };
        let mut service = StandingsService::new(&config).unwrap();

        let err = service.run(&StandingsRequest::default()).await.unwrap_err();
        assert!(err.to_string().contains("bracket id is required"));
    }
}
