pub mod discovery;
pub mod standings;

pub use discovery::{Discovery, DiscoveryService};
pub use standings::{
    StandingsReport, StandingsRequest, StandingsService, aggregate_matches, load_payload_file, report_payload_file,
    track_progress,
};
