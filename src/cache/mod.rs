mod structs;

pub use structs::{Cache, sanitize_key};
