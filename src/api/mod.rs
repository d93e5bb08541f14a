mod liquipedia_client;
pub mod parsers;

pub use liquipedia_client::LiquipediaClient;
