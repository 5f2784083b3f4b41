mod builder;
mod checksum;
mod epoch;
mod error;
mod fields;
#[cfg(test)]
pub(crate) mod fixtures;
mod history;
mod types;

pub use builder::build_tle;
pub use checksum::verify;
pub use error::TleError;
pub use history::{generate_history, TleHistory, TleHistoryEntry, DEFAULT_OFFSETS_MINUTES};
pub use types::{OrbitalElementRecord, TleLinePair, CLASSIFICATION_UNCLASSIFIED};
