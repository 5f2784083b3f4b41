use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::tle::{OrbitalElementRecord, TleError, CLASSIFICATION_UNCLASSIFIED};

/// One object of a Celestrak GP (OMM JSON) document. Every field is optional
/// here so that a missing one can be reported by name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CatalogEntry {
    pub object_name: Option<String>,
    pub object_id: Option<String>,
    pub epoch: Option<String>,
    pub mean_motion: Option<f64>,
    pub eccentricity: Option<f64>,
    pub inclination: Option<f64>,
    pub ra_of_asc_node: Option<f64>,
    pub arg_of_pericenter: Option<f64>,
    pub mean_anomaly: Option<f64>,
    pub ephemeris_type: Option<u8>,
    pub classification_type: Option<String>,
    pub norad_cat_id: Option<u32>,
    pub element_set_no: Option<u32>,
    pub rev_at_epoch: Option<u32>,
    pub bstar: Option<f64>,
    pub mean_motion_dot: Option<f64>,
    pub mean_motion_ddot: Option<f64>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, TleError> {
    value.ok_or_else(|| TleError::malformed(field, "is missing"))
}

/// Accepts the naive ISO form GP data uses, or RFC 3339 with an offset.
fn parse_epoch(s: &str) -> Result<DateTime<Utc>, TleError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|e| TleError::malformed("epoch", format!("'{}': {}", s, e)))
}

fn parse_classification(value: Option<String>) -> Result<char, TleError> {
    let Some(value) = value else {
        return Ok(CLASSIFICATION_UNCLASSIFIED);
    };
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TleError::malformed(
            "classification",
            format!("'{}' is not a single letter", value),
        )),
    }
}

impl TryFrom<CatalogEntry> for OrbitalElementRecord {
    type Error = TleError;

    fn try_from(entry: CatalogEntry) -> Result<Self, Self::Error> {
        Ok(OrbitalElementRecord {
            catalog_number: required(entry.norad_cat_id, "catalog_number")?,
            object_name: entry.object_name.filter(|n| !n.trim().is_empty()),
            international_designator: required(entry.object_id, "international_designator")?
                .parse()?,
            classification: parse_classification(entry.classification_type)?,
            epoch: parse_epoch(&required(entry.epoch, "epoch")?)?,
            mean_motion_dot: required(entry.mean_motion_dot, "mean_motion_dot")?,
            mean_motion_ddot: required(entry.mean_motion_ddot, "mean_motion_ddot")?,
            bstar: required(entry.bstar, "bstar")?,
            inclination_deg: required(entry.inclination, "inclination")?,
            right_ascension_deg: required(entry.ra_of_asc_node, "right_ascension")?,
            eccentricity: required(entry.eccentricity, "eccentricity")?,
            argument_of_perigee_deg: required(entry.arg_of_pericenter, "argument_of_perigee")?,
            mean_anomaly_deg: required(entry.mean_anomaly, "mean_anomaly")?,
            mean_motion: required(entry.mean_motion, "mean_motion")?,
            revolution_number: required(entry.rev_at_epoch, "revolution_number")?,
            element_set_number: required(entry.element_set_no, "element_set_number")?,
            ephemeris_type: entry.ephemeris_type.unwrap_or(0),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    pub(crate) const VELOX_JSON: &str = r#"{
        "OBJECT_NAME": "VELOX-AM",
        "OBJECT_ID": "2023-091A",
        "EPOCH": "2024-05-02T06:30:15.123456",
        "MEAN_MOTION": 15.01234567,
        "ECCENTRICITY": 0.0012345,
        "INCLINATION": 97.4,
        "RA_OF_ASC_NODE": 210.1234,
        "ARG_OF_PERICENTER": 45.6789,
        "MEAN_ANOMALY": 314.5678,
        "EPHEMERIS_TYPE": 0,
        "CLASSIFICATION_TYPE": "U",
        "NORAD_CAT_ID": 57482,
        "ELEMENT_SET_NO": 999,
        "REV_AT_EPOCH": 4321,
        "BSTAR": 0.00010599,
        "MEAN_MOTION_DOT": 1.234e-5,
        "MEAN_MOTION_DDOT": 0
    }"#;

    #[test]
    fn converts_gp_object() {
        let entry: CatalogEntry = serde_json::from_str(VELOX_JSON).unwrap();
        let record = OrbitalElementRecord::try_from(entry).unwrap();
        assert_eq!(record, crate::tle::fixtures::sample_record());
    }

    #[test]
    fn reports_missing_field_by_name() {
        let mut entry: CatalogEntry = serde_json::from_str(VELOX_JSON).unwrap();
        entry.bstar = None;
        let err = OrbitalElementRecord::try_from(entry).unwrap_err();
        assert!(matches!(err, TleError::MalformedElementRecord { field: "bstar", .. }));
    }

    #[test]
    fn epoch_with_offset_is_accepted() {
        let epoch = parse_epoch("2024-05-02T08:30:15.5+02:00").unwrap();
        assert_eq!(epoch.hour(), 6);
        assert_eq!(epoch.ordinal(), 123);
        assert!(parse_epoch("yesterday").is_err());
    }

    #[test]
    fn classification_defaults_to_unclassified() {
        assert_eq!(parse_classification(None).unwrap(), 'U');
        assert_eq!(parse_classification(Some("C".into())).unwrap(), 'C');
        assert!(parse_classification(Some("UC".into())).is_err());
    }
}
