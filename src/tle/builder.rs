use crate::tle::checksum::checksum;
use crate::tle::epoch::encode_epoch;
use crate::tle::error::TleError;
use crate::tle::fields::{
    encode_angle, encode_bstar, encode_eccentricity, encode_element_set_number,
    encode_mean_motion, encode_mean_motion_ddot, encode_mean_motion_dot,
    encode_revolution_number,
};
use crate::tle::types::{OrbitalElementRecord, TleLinePair};

pub const TLE_LINE_LENGTH: usize = 69;
const CATALOG_NUMBER_MAX: u32 = 99_999;

/// Builds the TLE for `record` with its epoch moved back by `minutes_before`.
pub fn build_tle(
    record: &OrbitalElementRecord,
    minutes_before: u32,
) -> Result<TleLinePair, TleError> {
    validate(record)?;

    let line1 = format!(
        "1 {:05}{} {} {} {} {} {} {} {}",
        record.catalog_number,
        record.classification,
        record.international_designator.tle_field(),
        encode_epoch(record.epoch, minutes_before),
        encode_mean_motion_dot(record.mean_motion_dot)?,
        encode_mean_motion_ddot(record.mean_motion_ddot)?,
        encode_bstar(record.bstar)?,
        record.ephemeris_type,
        encode_element_set_number(record.element_set_number)?,
    );

    let line2 = format!(
        "2 {:05} {} {} {} {} {} {}{}",
        record.catalog_number,
        encode_angle("inclination", record.inclination_deg)?,
        encode_angle("right_ascension", record.right_ascension_deg)?,
        encode_eccentricity(record.eccentricity)?,
        encode_angle("argument_of_perigee", record.argument_of_perigee_deg)?,
        encode_angle("mean_anomaly", record.mean_anomaly_deg)?,
        encode_mean_motion(record.mean_motion)?,
        encode_revolution_number(record.revolution_number)?,
    );

    let pair = TleLinePair {
        line1: with_checksum(line1)?,
        line2: with_checksum(line2)?,
    };
    let id = record.catalog_number;
    log::debug!("built TLE for {} at T-{}min:\n{}", id, minutes_before, pair);
    Ok(pair)
}

fn with_checksum(mut line: String) -> Result<String, TleError> {
    if line.len() != TLE_LINE_LENGTH - 1 {
        return Err(TleError::overflow("line", line));
    }
    let digit = checksum(&line);
    line.push(char::from(b'0' + digit));
    Ok(line)
}

fn validate(record: &OrbitalElementRecord) -> Result<(), TleError> {
    let number = record.catalog_number;
    if !(1..=CATALOG_NUMBER_MAX).contains(&number) {
        return Err(TleError::malformed(
            "catalog_number",
            format!("{} is outside 1-{}", number, CATALOG_NUMBER_MAX),
        ));
    }
    if !record.classification.is_ascii_alphabetic() {
        return Err(TleError::malformed(
            "classification",
            format!("'{}' is not a letter", record.classification),
        ));
    }
    if record.ephemeris_type > 9 {
        return Err(TleError::malformed(
            "ephemeris_type",
            format!("{} is not a single digit", record.ephemeris_type),
        ));
    }

    check_range("inclination", record.inclination_deg, 0.0, 180.0, true)?;
    check_range(
        "right_ascension",
        record.right_ascension_deg,
        0.0,
        360.0,
        false,
    )?;
    check_range(
        "argument_of_perigee",
        record.argument_of_perigee_deg,
        0.0,
        360.0,
        false,
    )?;
    check_range("mean_anomaly", record.mean_anomaly_deg, 0.0, 360.0, false)?;
    check_range("eccentricity", record.eccentricity, 0.0, 1.0, false)?;

    if !record.mean_motion.is_finite() || record.mean_motion <= 0.0 {
        return Err(TleError::malformed(
            "mean_motion",
            format!("{} is not a positive rate", record.mean_motion),
        ));
    }
    Ok(())
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    inclusive: bool,
) -> Result<(), TleError> {
    let in_range =
        value.is_finite() && value >= min && (value < max || (inclusive && value == max));
    if in_range {
        Ok(())
    } else {
        let close = if inclusive { ']' } else { ')' };
        Err(TleError::malformed(
            field,
            format!("{} is outside [{}, {}{}", value, min, max, close),
        ))
    }
}
