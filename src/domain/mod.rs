mod fields;
pub mod models;

pub use fields::WinnerIndicator;
pub use models::*;
