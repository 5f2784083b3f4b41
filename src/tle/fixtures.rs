use chrono::{Duration, TimeZone, Utc};

use crate::tle::types::{InternationalDesignator, OrbitalElementRecord};

/// Record of the 57482 example object.
pub fn sample_record() -> OrbitalElementRecord {
    OrbitalElementRecord {
        catalog_number: 57482,
        object_name: Some("VELOX-AM".into()),
        international_designator: "2023-091A".parse().unwrap(),
        classification: 'U',
        epoch: Utc.with_ymd_and_hms(2024, 5, 2, 6, 30, 15).unwrap()
            + Duration::microseconds(123_456),
        mean_motion_dot: 1.234e-5,
        mean_motion_ddot: 0.0,
        bstar: 1.0599e-4,
        inclination_deg: 97.4,
        right_ascension_deg: 210.1234,
        eccentricity: 0.0012345,
        argument_of_perigee_deg: 45.6789,
        mean_anomaly_deg: 314.5678,
        mean_motion: 15.01234567,
        revolution_number: 4321,
        element_set_number: 999,
        ephemeris_type: 0,
    }
}

/// ISS elements from the widely published 2008-264 TLE.
pub fn iss_record() -> OrbitalElementRecord {
    OrbitalElementRecord {
        catalog_number: 25544,
        object_name: Some("ISS (ZARYA)".into()),
        international_designator: InternationalDesignator {
            launch_year: 1998,
            launch_number: 67,
            piece: "A".into(),
        },
        classification: 'U',
        epoch: Utc.with_ymd_and_hms(2008, 9, 20, 12, 25, 40).unwrap()
            + Duration::microseconds(104_192),
        mean_motion_dot: -2.182e-5,
        mean_motion_ddot: 0.0,
        bstar: -1.1606e-5,
        inclination_deg: 51.6416,
        right_ascension_deg: 247.4627,
        eccentricity: 0.0006703,
        argument_of_perigee_deg: 130.536,
        mean_anomaly_deg: 325.0288,
        mean_motion: 15.72125391,
        revolution_number: 56353,
        element_set_number: 292,
        ephemeris_type: 0,
    }
}
