use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Invalid station coordinates: {0}")]
    InvalidStation(String),
    #[error("No pass above {min_elevation_deg} deg within {horizon_hours} h after {after}")]
    NoPassFound {
        after: DateTime<Utc>,
        horizon_hours: i64,
        min_elevation_deg: f64,
    },
    #[error("Propagator failure: {0}")]
    PropagatorFailure(String),
    /// The elements no longer give a usable orbit at `at` (decay, stale epoch).
    #[error("Elements cannot be propagated to {at}: {message}")]
    OutOfRange { at: DateTime<Utc>, message: String },
}
