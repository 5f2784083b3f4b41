//! Fixed-width numeric field encoders for the two TLE lines.
//!
//! Every encoder returns a string of exactly its column width or fails with
//! [`TleError::EncodingOverflow`]; nothing is truncated to make it fit.

use crate::tle::error::TleError;

/// Width of the packed scientific-notation fields (`MEAN_MOTION_DDOT`, `BSTAR`).
pub const PACKED_FIELD_WIDTH: usize = 8;
/// Canonical packed zero, before right-alignment.
pub const PACKED_ZERO: &str = "00000-0";

const MANTISSA_MIN: f64 = 10_000.0;
const MANTISSA_LIMIT: f64 = 100_000.0;
const INTEGER_SNAP: f64 = 1e-6;

/// Second derivative of mean motion as `±MMMMM±E`, read as `0.MMMMM × 10^E`.
pub fn encode_mean_motion_ddot(value: f64) -> Result<String, TleError> {
    const FIELD: &str = "mean_motion_ddot";
    if !value.is_finite() {
        return Err(TleError::malformed(FIELD, "is not finite"));
    }
    if value == 0.0 {
        return Ok(packed_zero());
    }

    let mut adjusted = value.abs().log10().floor() as i32 - 4;
    let mut mantissa = scaled(value, adjusted);
    // log10 can land one decade off near powers of ten
    if mantissa.abs() >= MANTISSA_LIMIT {
        adjusted += 1;
        mantissa = scaled(value, adjusted);
    } else if mantissa.abs() < MANTISSA_MIN {
        adjusted -= 1;
        mantissa = scaled(value, adjusted);
    }

    let exponent = exponent_digit(FIELD, value, adjusted + 5)?;
    Ok(format!(
        "{:>width$}",
        format!("{}{:+}", mantissa as i64, exponent),
        width = PACKED_FIELD_WIDTH
    ))
}

/// BSTAR drag term. The magnitude is scaled up a decade at a time until it has
/// five integer digits, then truncated.
pub fn encode_bstar(value: f64) -> Result<String, TleError> {
    const FIELD: &str = "bstar";
    if !value.is_finite() {
        return Err(TleError::malformed(FIELD, "is not finite"));
    }
    if value == 0.0 {
        return Ok(packed_zero());
    }

    let sign = if value < 0.0 { '-' } else { '+' };
    let mut magnitude = value.abs();
    if magnitude >= MANTISSA_LIMIT {
        return Err(TleError::overflow(FIELD, value));
    }

    let mut exponent = 0;
    while magnitude < MANTISSA_MIN {
        magnitude *= 10.0;
        exponent -= 1;
    }

    // Truncate, unless the scaling only left float noise below an integer.
    let mut mantissa = if (magnitude.round() - magnitude).abs() < INTEGER_SNAP {
        magnitude.round()
    } else {
        magnitude.trunc()
    };
    if mantissa >= MANTISSA_LIMIT {
        mantissa = MANTISSA_MIN;
        exponent += 1;
    }

    let exponent = exponent_digit(FIELD, value, exponent + 5)?;
    Ok(format!("{}{:05}{:+}", sign, mantissa as u32, exponent))
}

/// First derivative of mean motion: sign column then `.dddddddd`.
pub fn encode_mean_motion_dot(value: f64) -> Result<String, TleError> {
    const FIELD: &str = "mean_motion_dot";
    if !value.is_finite() {
        return Err(TleError::malformed(FIELD, "is not finite"));
    }

    let digits = format!("{:.8}", value.abs());
    let fraction = digits
        .strip_prefix('0')
        .filter(|rest| rest.starts_with('.'))
        .ok_or_else(|| TleError::overflow(FIELD, value))?;

    let sign = if value < 0.0 && fraction.bytes().any(|b| b != b'.' && b != b'0') {
        '-'
    } else {
        ' '
    };
    Ok(format!("{}{}", sign, fraction))
}

/// Seven digits with the leading `0.` implied.
pub fn encode_eccentricity(value: f64) -> Result<String, TleError> {
    let digits = (value * 1e7).round();
    if !(0.0..=9_999_999.0).contains(&digits) {
        return Err(TleError::overflow("eccentricity", value));
    }
    Ok(format!("{:07}", digits as u32))
}

/// Angle in degrees, `%8.4f`.
pub fn encode_angle(field: &'static str, degrees: f64) -> Result<String, TleError> {
    fit(field, format!("{:.4}", degrees), 8)
}

/// Revolutions per day, `%11.8f`.
pub fn encode_mean_motion(value: f64) -> Result<String, TleError> {
    fit("mean_motion", format!("{:.8}", value), 11)
}

pub fn encode_revolution_number(value: u32) -> Result<String, TleError> {
    fit("revolution_number", value.to_string(), 5)
}

pub fn encode_element_set_number(value: u32) -> Result<String, TleError> {
    fit("element_set_number", value.to_string(), 4)
}

fn fit(field: &'static str, text: String, width: usize) -> Result<String, TleError> {
    if text.len() > width {
        return Err(TleError::overflow(field, text));
    }
    Ok(format!("{:>width$}", text))
}

fn packed_zero() -> String {
    format!("{:>width$}", PACKED_ZERO, width = PACKED_FIELD_WIDTH)
}

fn scaled(value: f64, exponent: i32) -> f64 {
    (value / 10f64.powi(exponent)).round()
}

fn exponent_digit(field: &'static str, value: f64, exponent: i32) -> Result<i32, TleError> {
    if (-9..=9).contains(&exponent) {
        Ok(exponent)
    } else {
        Err(TleError::overflow(field, value))
    }
}
