use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::tle::error::TleError;

pub const CLASSIFICATION_UNCLASSIFIED: char = 'U';

/// Current mean elements of one catalog object, as handed over by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElementRecord {
    pub catalog_number: u32,
    pub object_name: Option<String>,
    pub international_designator: InternationalDesignator,
    pub classification: char,
    pub epoch: DateTime<Utc>,
    /// First derivative of mean motion, rev/day².
    pub mean_motion_dot: f64,
    /// Second derivative of mean motion, rev/day³.
    pub mean_motion_ddot: f64,
    pub bstar: f64,
    pub inclination_deg: f64,
    pub right_ascension_deg: f64,
    pub eccentricity: f64,
    pub argument_of_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    /// Revolutions per day.
    pub mean_motion: f64,
    pub revolution_number: u32,
    pub element_set_number: u32,
    pub ephemeris_type: u8,
}

impl OrbitalElementRecord {
    pub fn display_name(&self) -> String {
        self.object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", self.catalog_number))
    }
}

/// COSPAR designator, e.g. `2023-091A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternationalDesignator {
    pub launch_year: u16,
    pub launch_number: u16,
    pub piece: String,
}

impl InternationalDesignator {
    /// Columns 10-17 of line 1: `YYNNNPPP`, piece left-aligned.
    pub fn tle_field(&self) -> String {
        let year = self.launch_year % 100;
        format!("{:02}{:03}{:<3}", year, self.launch_number, self.piece)
    }
}

impl FromStr for InternationalDesignator {
    type Err = TleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| TleError::malformed("international_designator", reason);
        let s = s.trim();
        let (year, rest) = s
            .split_once('-')
            .ok_or_else(|| err(&format!("'{}' is not YYYY-NNNP", s)))?;

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err(&format!("bad launch year in '{}'", s)));
        }
        if rest.len() < 4 || !rest.is_char_boundary(3) {
            return Err(err(&format!("'{}' is not YYYY-NNNP", s)));
        }
        let (number, piece) = rest.split_at(3);
        if !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err(&format!("bad launch number in '{}'", s)));
        }
        if piece.len() > 3 || !piece.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(err(&format!("bad piece code in '{}'", s)));
        }

        Ok(Self {
            launch_year: year.parse().map_err(|_| err("launch year"))?,
            launch_number: number.parse().map_err(|_| err("launch number"))?,
            piece: piece.to_ascii_uppercase(),
        })
    }
}

impl fmt::Display for InternationalDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:03}{}",
            self.launch_year, self.launch_number, self.piece
        )
    }
}

/// Both lines of a TLE, each 69 columns with its checksum digit last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TleLinePair {
    pub line1: String,
    pub line2: String,
}

impl fmt::Display for TleLinePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.line1)?;
        write!(f, "{}", self.line2)
    }
}
