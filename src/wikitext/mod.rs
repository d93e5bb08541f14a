mod extractor;
mod format;
pub mod templates;

pub use extractor::BracketIdExtractor;
pub use format::TournamentFormat;
pub use templates::{Param, Template, scan_templates};
