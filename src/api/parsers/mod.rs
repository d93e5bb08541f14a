mod conditions;
mod payload;

pub use conditions::build_conditions;
pub use payload::{match_payload_from_value, parse_match_payload};
