use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Where the satellite is relative to a station at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopocentricState {
    pub timestamp: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    /// Positive while receding.
    pub range_rate_km_s: f64,
}

/// Horizon-to-horizon contact as found by a propagator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassWindow {
    pub rise_time: DateTime<Utc>,
    pub rise_azimuth_deg: f64,
    pub peak_time: DateTime<Utc>,
    pub peak_altitude_deg: f64,
    pub set_time: DateTime<Utc>,
    pub set_azimuth_deg: f64,
}

/// A predicted pass with the Doppler shift evaluated just after it ends
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PassEvent {
    pub rise_time: DateTime<Utc>,
    pub rise_azimuth_deg: f64,
    pub peak_time: DateTime<Utc>,
    pub peak_altitude_deg: f64,
    pub set_time: DateTime<Utc>,
    pub set_azimuth_deg: f64,
    pub duration_seconds: i64,
    pub range_rate_m_s: f64,
    pub doppler_evaluated_at: DateTime<Utc>,
    pub doppler_shift_hz: f64,
}

impl PassEvent {
    pub fn new(
        window: PassWindow,
        doppler_evaluated_at: DateTime<Utc>,
        range_rate_m_s: f64,
        doppler_shift_hz: f64,
    ) -> Self {
        Self {
            rise_time: window.rise_time,
            rise_azimuth_deg: round_azimuth(window.rise_azimuth_deg),
            peak_time: window.peak_time,
            peak_altitude_deg: round2(window.peak_altitude_deg),
            set_time: window.set_time,
            set_azimuth_deg: round_azimuth(window.set_azimuth_deg),
            duration_seconds: (window.set_time - window.rise_time).num_seconds(),
            range_rate_m_s,
            doppler_evaluated_at,
            doppler_shift_hz,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round_azimuth(v: f64) -> f64 {
    round2(v).rem_euclid(360.0)
}
