pub mod models;
pub mod tags;

pub use models::*;
pub use tags::parse_tags;
