mod doppler;
mod error;
mod ground_station;
mod pass_finder;
mod propagation;
mod types;

pub use doppler::DEFAULT_TRANSMIT_FREQUENCY_HZ;
pub use error::PredictError;
pub use ground_station::GroundStation;
pub use pass_finder::{predict_passes_for_tle, PassQuery};
pub use types::PassEvent;
