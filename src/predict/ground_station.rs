use crate::predict::error::PredictError;

// WGS-84
const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
const EARTH_ECCENTRICITY_SQ: f64 = 0.00669437999014;

/// Observer location on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl GroundStation {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<Self, PredictError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            let reason = format!("latitude {} outside [-90, 90]", latitude_deg);
            return Err(PredictError::InvalidStation(reason));
        }
        if !(-180.0..=360.0).contains(&longitude_deg) {
            let reason = format!("longitude {} outside [-180, 360]", longitude_deg);
            return Err(PredictError::InvalidStation(reason));
        }
        if !altitude_m.is_finite() {
            let reason = "altitude is not finite".to_string();
            return Err(PredictError::InvalidStation(reason));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        })
    }

    /// Parses `"lat, lon"` in degrees.
    pub fn from_coordinates(coordinates: &str, altitude_m: f64) -> Result<Self, PredictError> {
        let invalid = || PredictError::InvalidStation(coordinates.to_string());
        let (lat, lon) = coordinates.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse().map_err(|_| invalid())?;
        let lon = lon.trim().parse().map_err(|_| invalid())?;
        Self::new(lat, lon, altitude_m)
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        let (sin_lat, cos_lat) = self.lat_rad().sin_cos();
        let (sin_lon, cos_lon) = self.lon_rad().sin_cos();
        let w = (1.0 - EARTH_ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
        let n = EARTH_EQUATORIAL_RADIUS_KM / w;
        let alt_km = self.altitude_m / 1000.0;
        [
            (n + alt_km) * cos_lat * cos_lon,
            (n + alt_km) * cos_lat * sin_lon,
            (n * (1.0 - EARTH_ECCENTRICITY_SQ) + alt_km) * sin_lat,
        ]
    }

    /// Rotates an ECEF offset from the station into local (east, north, up).
    pub fn to_enu(&self, dr: [f64; 3]) -> [f64; 3] {
        let (sin_lat, cos_lat) = self.lat_rad().sin_cos();
        let (sin_lon, cos_lon) = self.lon_rad().sin_cos();

        let east = -sin_lon * dr[0] + cos_lon * dr[1];
        let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
        let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
        [east, north, up]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_coordinate_string() {
        let station = GroundStation::from_coordinates(" 1.3568, 103.692 ", 23.0).unwrap();
        assert_relative_eq!(station.latitude_deg, 1.3568);
        assert_relative_eq!(station.longitude_deg, 103.692);
        assert_relative_eq!(station.altitude_m, 23.0);
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(GroundStation::from_coordinates("1.3568", 0.0).is_err());
        assert!(GroundStation::from_coordinates("north, east", 0.0).is_err());
        assert!(GroundStation::from_coordinates("91.0, 0.0", 0.0).is_err());
    }

    #[test]
    fn equator_prime_meridian_sits_on_x_axis() {
        let station = GroundStation::new(0.0, 0.0, 0.0).unwrap();
        let [x, y, z] = station.position_ecef_km();
        assert_relative_eq!(x, EARTH_EQUATORIAL_RADIUS_KM, epsilon = 1e-9);
        assert_relative_eq!(y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn local_axes() {
        let station = GroundStation::new(0.0, 0.0, 0.0).unwrap();
        let [e, n, u] = station.to_enu([1.0, 0.0, 0.0]);
        assert_relative_eq!(u, 1.0, epsilon = 1e-12);
        assert_relative_eq!(e, 0.0, epsilon = 1e-12);
        assert_relative_eq!(n, 0.0, epsilon = 1e-12);
        let [_, n, _] = station.to_enu([0.0, 0.0, 1.0]);
        assert_relative_eq!(n, 1.0, epsilon = 1e-12);
    }
}
