//! Literal parsers for the two value grammars config files use: byte sizes
//! ("16K", "512Kb") and durations ("1.5h", "30s", "7d").

mod duration;
mod size;

pub use duration::parse_duration;
pub use size::{format_size, parse_size};
