use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::pass_finder::find_next_pass;
use crate::predict::types::{PassWindow, TopocentricState};
use crate::tle::{verify, TleLinePair};

pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;

/// Orbit propagation as the pass predictor sees it.
///
/// Implementations may hold per-object state, so one instance serves one
/// prediction request at a time.
pub trait Propagator {
    fn state_at(
        &self,
        station: &GroundStation,
        at: DateTime<Utc>,
    ) -> Result<TopocentricState, PredictError>;

    /// First pass rising at or after `after` and setting before `until`, whose
    /// peak reaches `min_elevation_deg`. A pass already in progress at `after`
    /// is skipped.
    fn next_pass(
        &self,
        station: &GroundStation,
        after: DateTime<Utc>,
        until: DateTime<Utc>,
        min_elevation_deg: f64,
    ) -> Result<Option<PassWindow>, PredictError> {
        find_next_pass(self, station, after, until, min_elevation_deg)
    }
}

/// SGP4/SDP4 through the `sgp4` crate.
pub struct Sgp4Propagator {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Propagator {
    pub fn from_tle(name: Option<String>, tle: &TleLinePair) -> Result<Self, PredictError> {
        if !verify(&tle.line1) || !verify(&tle.line2) {
            return Err(PredictError::PropagatorFailure("TLE checksum mismatch".to_string()));
        }
        let elements = Elements::from_tle(name, tle.line1.as_bytes(), tle.line2.as_bytes())
            .map_err(|e| PredictError::PropagatorFailure(e.to_string()))?;
        let constants = Constants::from_elements(&elements)
            .map_err(|e| PredictError::PropagatorFailure(e.to_string()))?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }
}

impl Propagator for Sgp4Propagator {
    fn state_at(
        &self,
        station: &GroundStation,
        at: DateTime<Utc>,
    ) -> Result<TopocentricState, PredictError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PredictError::OutOfRange {
                at,
                message: e.to_string(),
            })?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PredictError::OutOfRange {
                at,
                message: e.to_string(),
            })?;

        let years = sgp4::julian_years_since_j2000(&at.naive_utc());
        let gmst = sgp4::iau_epoch_to_sidereal_time(years);

        let sat_ecef = teme_to_ecef_position(prediction.position, gmst);
        let sat_vel_ecef = teme_to_ecef_velocity(prediction.position, prediction.velocity, gmst);
        let sta_ecef = station.position_ecef_km();

        let dr = [
            sat_ecef[0] - sta_ecef[0],
            sat_ecef[1] - sta_ecef[1],
            sat_ecef[2] - sta_ecef[2],
        ];
        let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();
        if range_km <= 0.0 || !range_km.is_finite() {
            return Err(PredictError::PropagatorFailure(format!(
                "degenerate range {} km at {}",
                range_km, at
            )));
        }

        let [east, north, up] = station.to_enu(dr);
        let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
        let elevation_deg = (up / range_km).asin().to_degrees();

        // the station is at rest in ECEF
        let v = sat_vel_ecef;
        let range_rate_km_s = (v[0] * dr[0] + v[1] * dr[1] + v[2] * dr[2]) / range_km;

        Ok(TopocentricState {
            timestamp: at,
            azimuth_deg,
            elevation_deg,
            range_km,
            range_rate_km_s,
        })
    }
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let (sin_gmst, cos_gmst) = gmst.sin_cos();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Velocity seen from the rotating frame: rotated TEME velocity minus ω × r.
pub fn teme_to_ecef_velocity(pos_teme: [f64; 3], vel_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let pos = teme_to_ecef_position(pos_teme, gmst);
    let rotated = teme_to_ecef_position(vel_teme, gmst);
    [
        rotated[0] + EARTH_ROTATION_RAD_S * pos[1],
        rotated[1] - EARTH_ROTATION_RAD_S * pos[0],
        rotated[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tle::build_tle;
    use crate::tle::fixtures::iss_record;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rotation_by_quarter_turn() {
        let pos = teme_to_ecef_position([1.0, 0.0, 5.0], FRAC_PI_2);
        assert_relative_eq!(pos[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(pos[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(pos[2], 5.0);
    }

    #[test]
    fn co_rotating_point_is_at_rest() {
        let r = [7000.0, 0.0, 0.0];
        let v = [0.0, EARTH_ROTATION_RAD_S * 7000.0, 0.0];
        let vel = teme_to_ecef_velocity(r, v, 0.3);
        for c in vel {
            assert_relative_eq!(c, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn sgp4_state_is_physical() {
        let record = iss_record();
        let tle = build_tle(&record, 0).unwrap();
        let propagator = Sgp4Propagator::from_tle(record.object_name.clone(), &tle).unwrap();
        assert_eq!(propagator.norad_id(), 25544);

        let station = GroundStation::new(1.3568, 103.692, 23.0).unwrap();
        let state = propagator.state_at(&station, record.epoch).unwrap();
        assert!((0.0..360.0).contains(&state.azimuth_deg));
        assert!((-90.0..=90.0).contains(&state.elevation_deg));
        // LEO: never closer than its altitude, never beyond the far side of the Earth
        assert!(state.range_km > 300.0 && state.range_km < 14_000.0);
        assert!(state.range_rate_km_s.abs() < 8.0);
    }

    #[test]
    fn rejects_corrupted_tle() {
        let mut tle = build_tle(&iss_record(), 0).unwrap();
        tle.line2.truncate(40);
        assert!(matches!(
            Sgp4Propagator::from_tle(None, &tle),
            Err(PredictError::PropagatorFailure(_))
        ));
    }

    #[test]
    fn rejects_checksum_mismatch() {
        let mut tle = build_tle(&iss_record(), 0).unwrap();
        let last = if tle.line1.ends_with('0') { "1" } else { "0" };
        tle.line1.replace_range(68..69, last);
        match Sgp4Propagator::from_tle(None, &tle) {
            Err(PredictError::PropagatorFailure(msg)) => assert!(msg.contains("checksum")),
            _ => panic!("expected checksum failure"),
        }
    }

    #[test]
    fn decayed_orbit_is_out_of_range() {
        let mut record = iss_record();
        record.bstar = 0.05;
        record.mean_motion = 16.2;
        let tle = build_tle(&record, 0).unwrap();
        let propagator = Sgp4Propagator::from_tle(None, &tle).unwrap();
        let station = GroundStation::new(1.3568, 103.692, 23.0).unwrap();
        let at = record.epoch + chrono::Duration::days(200);
        assert!(matches!(
            propagator.state_at(&station, at),
            Err(PredictError::OutOfRange { at: t, .. }) if t == at
        ));
    }
}
