use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A geodetic point: latitude and longitude in degrees, altitude in kilometres.
///
/// Longitude is always held in (-180, 180] and latitude in [-90, 90]; every
/// constructor normalizes, so no `GeoPoint` carries an out-of-range angle.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display, Serialize, Deserialize)]
#[display(
    fmt = "{{lat: {:.4}°, lon: {:.4}°, alt: {:.3} km}}",
    "latitude",
    "longitude",
    "altitude_km"
)]
#[serde(from = "RawGeoPoint")]
pub struct GeoPoint {
    /// [deg], positive north
    latitude: f64,
    /// [deg], positive east
    longitude: f64,
    /// [km] above the reference surface
    altitude_km: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, altitude_km: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: normalize_longitude(longitude),
            altitude_km,
        }
    }

    /// A point on the reference surface (altitude 0)
    pub fn on_surface(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 0.0)
    }

    pub fn from_radians(latitude: f64, longitude: f64, altitude_km: f64) -> Self {
        Self::new(latitude.to_degrees(), longitude.to_degrees(), altitude_km)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_km
    }

    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// Same latitude/longitude at a different altitude
    pub fn with_altitude_km(&self, altitude_km: f64) -> Self {
        Self {
            altitude_km,
            ..*self
        }
    }

    /// Earth-centered Cartesian position [km] on a sphere of radius
    /// `body_radius_km + altitude_km`.
    pub fn spherical_position_km(&self, body_radius_km: f64) -> na::Vector3<f64> {
        let r = body_radius_km + self.altitude_km;
        let (sin_lat, cos_lat) = self.latitude_radians().sin_cos();
        let (sin_lon, cos_lon) = self.longitude_radians().sin_cos();
        na::Vector3::new(r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat)
    }
}

/// Wrap a longitude [deg] into (-180, 180]
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        180.0
    } else {
        wrapped
    }
}

// Deserialized points go through the normalizing constructor
#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude_km: f64,
}

impl From<RawGeoPoint> for GeoPoint {
    fn from(raw: RawGeoPoint) -> Self {
        GeoPoint::new(raw.latitude, raw.longitude, raw.altitude_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn longitude_wraps_into_half_open_range() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_abs_diff_eq!(normalize_longitude(190.0), -170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(-190.0), 170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(540.0), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(-725.5), -5.5, epsilon = 1e-12);
    }

    #[test]
    fn constructor_normalizes() {
        let p = GeoPoint::new(95.0, 270.0, 1.5);
        assert_eq!(p.latitude(), 90.0);
        assert_abs_diff_eq!(p.longitude(), -90.0, epsilon = 1e-12);
        assert_eq!(p.altitude_km(), 1.5);
    }

    #[test]
    fn spherical_position_on_axes() {
        let p = GeoPoint::on_surface(0.0, 90.0).spherical_position_km(10.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);

        let pole = GeoPoint::new(90.0, 0.0, 5.0).spherical_position_km(10.0);
        assert_abs_diff_eq!(pole.z, 15.0, epsilon = 1e-12);
    }
}
