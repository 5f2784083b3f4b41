use chrono::{DateTime, Duration, Utc};

use crate::predict::doppler::{
    doppler_shift_hz, DEFAULT_TRANSMIT_FREQUENCY_HZ, SPEED_OF_LIGHT_M_S,
};
use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::propagation::{Propagator, Sgp4Propagator};
use crate::predict::types::{PassEvent, PassWindow, TopocentricState};
use crate::tle::TleLinePair;

const COARSE_STEP_SECONDS: i64 = 60; // 1 minute for initial scan
const FINE_STEP_SECONDS: i64 = 1; // 1 second for refinement
const HORIZON_ELEVATION: f64 = 0.0;
/// Gap between one pass's set time and the search for the next.
const PASS_GAP_SECONDS: i64 = 60;

/// What to predict, and how far to look before giving up.
#[derive(Debug, Clone)]
pub struct PassQuery {
    pub start: DateTime<Utc>,
    pub count: usize,
    pub horizon: Duration,
    pub min_elevation_deg: f64,
    pub transmit_frequency_hz: f64,
}

impl PassQuery {
    pub fn new(start: DateTime<Utc>, count: usize) -> Self {
        Self {
            start,
            count,
            horizon: Duration::days(30),
            min_elevation_deg: HORIZON_ELEVATION,
            transmit_frequency_hz: DEFAULT_TRANSMIT_FREQUENCY_HZ,
        }
    }
}

/// Predicts the next `query.count` passes of a TLE over `station`.
pub fn predict_passes_for_tle(
    station: &GroundStation,
    name: Option<String>,
    tle: &TleLinePair,
    query: &PassQuery,
) -> Result<Vec<PassEvent>, PredictError> {
    let propagator = Sgp4Propagator::from_tle(name, tle)?;
    log::debug!(
        "Predicting {} passes of {} from {}",
        query.count,
        propagator.norad_id(),
        query.start
    );
    predict_passes(&propagator, station, query)
}

/// Walks forward pass by pass. After each pass the cursor moves one minute past
/// set time, and the state there supplies the range-rate for the Doppler shift.
pub fn predict_passes<P: Propagator + ?Sized>(
    propagator: &P,
    station: &GroundStation,
    query: &PassQuery,
) -> Result<Vec<PassEvent>, PredictError> {
    let mut passes = Vec::with_capacity(query.count);
    let mut cursor = query.start;

    for _ in 0..query.count {
        let no_pass = |after: DateTime<Utc>| PredictError::NoPassFound {
            after,
            horizon_hours: query.horizon.num_hours(),
            min_elevation_deg: query.min_elevation_deg,
        };

        let window = propagator
            .next_pass(
                station,
                cursor,
                cursor + query.horizon,
                query.min_elevation_deg,
            )
            .map_err(|e| match e {
                PredictError::OutOfRange { .. } => no_pass(cursor),
                e => e,
            })?
            .ok_or_else(|| no_pass(cursor))?;

        let after = cursor;
        cursor = window.set_time + Duration::seconds(PASS_GAP_SECONDS);
        let state = propagator
            .state_at(station, cursor)
            .map_err(|e| match e {
                PredictError::OutOfRange { .. } => no_pass(after),
                e => e,
            })?;
        let range_rate_m_s = state.range_rate_km_s * 1000.0;
        let frequency_hz = query.transmit_frequency_hz;
        let shift = doppler_shift_hz(frequency_hz, SPEED_OF_LIGHT_M_S, range_rate_m_s);

        log::debug!(
            "pass rise {} peak {:.1} deg set {}, doppler {:.1} Hz",
            window.rise_time,
            window.peak_altitude_deg,
            window.set_time,
            shift
        );
        passes.push(PassEvent::new(window, cursor, range_rate_m_s, shift));
    }

    Ok(passes)
}

/// Coarse scan for the first rise/set pair after `after`, refined to a second.
pub fn find_next_pass<P: Propagator + ?Sized>(
    propagator: &P,
    station: &GroundStation,
    after: DateTime<Utc>,
    until: DateTime<Utc>,
    min_elevation_deg: f64,
) -> Result<Option<PassWindow>, PredictError> {
    let coarse_step = Duration::seconds(COARSE_STEP_SECONDS);

    let mut cursor = after;
    // A pass already under way at `after` is not reported.
    let Some(first) = scan_sample(propagator, station, cursor)? else {
        return Ok(None);
    };
    let mut prev_visible = is_visible(&first);
    let mut rise: Option<(DateTime<Utc>, f64)> = None;
    let mut max_el = f64::MIN;
    let mut max_el_time = cursor;

    while cursor < until {
        let previous = cursor;
        cursor = (cursor + coarse_step).min(until);
        let Some(sample) = scan_sample(propagator, station, cursor)? else {
            return Ok(None);
        };
        let visible = is_visible(&sample);

        if visible && !prev_visible {
            let crossing = refine_crossing(propagator, station, previous, cursor, true)?;
            rise = Some(crossing);
            max_el = sample.elevation_deg;
            max_el_time = cursor;
        } else if visible && rise.is_some() {
            if sample.elevation_deg > max_el {
                max_el = sample.elevation_deg;
                max_el_time = cursor;
            }
        } else if !visible && prev_visible {
            if let Some((rise_time, rise_az)) = rise.take() {
                let (set_time, set_az) =
                    refine_crossing(propagator, station, previous, cursor, false)?;
                let peak = refine_peak(propagator, station, max_el_time, rise_time, set_time)?;

                if peak.elevation_deg >= min_elevation_deg {
                    return Ok(Some(PassWindow {
                        rise_time,
                        rise_azimuth_deg: rise_az,
                        peak_time: peak.timestamp,
                        peak_altitude_deg: peak.elevation_deg,
                        set_time,
                        set_azimuth_deg: set_az,
                    }));
                }
                log::trace!(
                    "skipping pass at {} peaking at {:.1} deg",
                    rise_time,
                    peak.elevation_deg
                );
            }
        }

        prev_visible = visible;
    }

    Ok(None)
}

/// State at `at`, or `None` once the elements can no longer be propagated.
fn scan_sample<P: Propagator + ?Sized>(
    propagator: &P,
    station: &GroundStation,
    at: DateTime<Utc>,
) -> Result<Option<TopocentricState>, PredictError> {
    match propagator.state_at(station, at) {
        Ok(state) => Ok(Some(state)),
        Err(PredictError::OutOfRange { at, message }) => {
            log::debug!("search ends at {}: {}", at, message);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn is_visible(state: &TopocentricState) -> bool {
    state.elevation_deg >= HORIZON_ELEVATION
}

/// Binary search to find exact horizon crossing time
fn refine_crossing<P: Propagator + ?Sized>(
    propagator: &P,
    station: &GroundStation,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    rising: bool,
) -> Result<(DateTime<Utc>, f64), PredictError> {
    let mut low = before;
    let mut high = after;

    while (high - low).num_seconds() > FINE_STEP_SECONDS {
        let mid = low + (high - low) / 2;
        let above = is_visible(&propagator.state_at(station, mid)?);
        if above == rising {
            high = mid;
        } else {
            low = mid;
        }
    }

    let final_sample = propagator.state_at(station, high)?;
    Ok((high, final_sample.azimuth_deg))
}

/// Ternary search for maximum elevation around the coarse maximum, kept
/// inside the pass.
fn refine_peak<P: Propagator + ?Sized>(
    propagator: &P,
    station: &GroundStation,
    coarse: DateTime<Utc>,
    rise: DateTime<Utc>,
    set: DateTime<Utc>,
) -> Result<TopocentricState, PredictError> {
    let span = Duration::seconds(COARSE_STEP_SECONDS);
    let mut low = (coarse - span).max(rise);
    let mut high = (coarse + span).min(set);

    while (high - low).num_seconds() > FINE_STEP_SECONDS {
        let third = (high - low) / 3;
        let m1 = low + third;
        let m2 = high - third;
        let e1 = propagator.state_at(station, m1)?.elevation_deg;
        let e2 = propagator.state_at(station, m2)?.elevation_deg;
        if e1 < e2 {
            low = m1;
        } else {
            high = m2;
        }
    }

    propagator.state_at(station, low + (high - low) / 2)
}
