use std::fmt;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

const MICROS_PER_FRACTION_UNIT: u64 = 864; // 86_400_000_000 µs / 1e8
const FRACTION_MAX: u32 = 99_999_999;

/// Epoch columns of line 1: `YYDDD.dddddddd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TleEpoch {
    pub year: u8,
    pub day_of_year: u16,
    /// Fraction of the day in units of 1e-8.
    pub fraction: u32,
}

impl TleEpoch {
    /// The eight fraction digits, decimal point implied.
    pub fn fraction_field(&self) -> String {
        format!("{:08}", self.fraction)
    }
}

impl fmt::Display for TleEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fraction = self.fraction_field();
        write!(f, "{:02}{:03}.{}", self.year, self.day_of_year, fraction)
    }
}

/// Encodes `epoch - minutes_before`.
///
/// Year and day of year are taken from `epoch` itself, while the fraction is
/// the time of day of the shifted instant. A shift across midnight therefore
/// keeps the original day number.
pub fn encode_epoch(epoch: DateTime<Utc>, minutes_before: u32) -> TleEpoch {
    let shifted = epoch - Duration::minutes(i64::from(minutes_before));

    let micros = u64::from(shifted.num_seconds_from_midnight()) * 1_000_000
        + u64::from((shifted.nanosecond() / 1_000).min(999_999));
    let fraction = (micros + MICROS_PER_FRACTION_UNIT / 2) / MICROS_PER_FRACTION_UNIT;

    TleEpoch {
        year: (epoch.year().rem_euclid(100)) as u8,
        day_of_year: epoch.ordinal() as u16,
        fraction: (fraction as u32).min(FRACTION_MAX),
    }
}
