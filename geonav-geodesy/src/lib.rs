//! Bidirectional conversion between geodetic coordinates and Earth-centered
//! Cartesian coordinates over an ellipsoidal Earth model.
//!
//! The conversion uses the local geocentric radius of the ellipsoid at the
//! point's latitude, so a round trip through [`Ellipsoid::to_cartesian`]
//! and [`Ellipsoid::to_geodetic`] reproduces the original point to within
//! floating-point error. All functions are pure; angles are degrees at the
//! API boundary and radians internally.

use geonav_core::{CartesianPoint, GeoPoint};

/// An ellipsoid of revolution approximating the Earth, described by its
/// equatorial and polar radii in meters.
///
/// Conversions are methods on an ellipsoid value rather than free functions
/// over global constants so that a non-standard Earth model (or another
/// body entirely) can be threaded through explicitly.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ellipsoid {
    pub equatorial_radius: f64,
    pub polar_radius: f64,
}

impl Ellipsoid {
    /// The WGS84 reference ellipsoid.
    pub const WGS84: Ellipsoid = Ellipsoid {
        equatorial_radius: 6_378_137.0,
        polar_radius: 6_356_752.0,
    };

    /// The distance in meters from the Earth's center to the ellipsoid
    /// surface at the given latitude in degrees. Varies between the polar
    /// radius (at the poles) and the equatorial radius (at the equator):
    ///
    /// `R(lat) = sqrt(((a² cos)² + (b² sin)²) / ((a cos)² + (b sin)²))`
    pub fn geocentric_radius(&self, latitude: f64) -> f64 {
        let a = self.equatorial_radius;
        let b = self.polar_radius;
        let lat = latitude.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();

        let numerator = (a * a * cos_lat).powi(2) + (b * b * sin_lat).powi(2);
        let denominator = (a * cos_lat).powi(2) + (b * sin_lat).powi(2);
        (numerator / denominator).sqrt()
    }

    /// Converts a geodetic position into Earth-centered Cartesian
    /// coordinates in meters.
    pub fn to_cartesian(&self, geo: GeoPoint) -> CartesianPoint {
        let lat = geo.latitude.to_radians();
        let lon = geo.longitude.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        let radius = self.geocentric_radius(geo.latitude) + geo.altitude;
        CartesianPoint::new(
            radius * cos_lat * cos_lon,
            radius * cos_lat * sin_lon,
            radius * sin_lat,
        )
    }

    /// Converts an Earth-centered Cartesian position back into geodetic
    /// coordinates.
    ///
    /// The input must not be the Earth's center: a zero-radius point has no
    /// latitude or longitude. That is a caller bug, not a recoverable
    /// condition, so it fails fast here.
    pub fn to_geodetic(&self, point: CartesianPoint) -> GeoPoint {
        let radius = point.norm();
        assert!(
            radius > 0.0,
            "the Earth's center has no geodetic coordinates"
        );

        let latitude = (point.z / radius).asin().to_degrees();
        let longitude = point.y.atan2(point.x).to_degrees();
        let altitude = radius - self.geocentric_radius(latitude);
        GeoPoint::new(latitude, longitude, altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(geo: GeoPoint) {
        let back = Ellipsoid::WGS84.to_geodetic(Ellipsoid::WGS84.to_cartesian(geo));
        assert!(
            (back.latitude - geo.latitude).abs() < 1e-6,
            "latitude {} -> {}",
            geo.latitude,
            back.latitude
        );
        assert!(
            (back.longitude - geo.longitude).abs() < 1e-6,
            "longitude {} -> {}",
            geo.longitude,
            back.longitude
        );
        assert!(
            (back.altitude - geo.altitude).abs() < 1e-3,
            "altitude {} -> {}",
            geo.altitude,
            back.altitude
        );
    }

    #[test]
    fn round_trip_across_hemispheres() {
        assert_round_trip(GeoPoint::new(40.7128, -74.0060, 10.0));
        assert_round_trip(GeoPoint::new(32.09237848, 35.17513055, 564.05338779));
        assert_round_trip(GeoPoint::new(-33.8688, 151.2093, 5.0));
        assert_round_trip(GeoPoint::new(0.0, 0.0, 0.0));
        assert_round_trip(GeoPoint::new(-89.9, 12.5, 1200.0));
    }

    #[test]
    fn geocentric_radius_is_bounded_by_the_ellipsoid_radii() {
        let wgs84 = Ellipsoid::WGS84;
        assert!((wgs84.geocentric_radius(0.0) - wgs84.equatorial_radius).abs() < 1e-6);
        assert!((wgs84.geocentric_radius(90.0) - wgs84.polar_radius).abs() < 1e-6);
        for lat in [-75.0, -30.0, 15.0, 45.0, 60.0] {
            let radius = wgs84.geocentric_radius(lat);
            assert!(radius > wgs84.polar_radius);
            assert!(radius < wgs84.equatorial_radius);
        }
    }

    #[test]
    fn equator_prime_meridian_lies_on_the_x_axis() {
        let point = Ellipsoid::WGS84.to_cartesian(GeoPoint::new(0.0, 0.0, 0.0));
        assert!((point.x - Ellipsoid::WGS84.equatorial_radius).abs() < 1e-6);
        assert!(point.y.abs() < 1e-6);
        assert!(point.z.abs() < 1e-6);
    }

    #[test]
    fn altitude_raises_the_radius() {
        let geo = GeoPoint::new(45.0, 7.0, 1000.0);
        let surface = Ellipsoid::WGS84.to_cartesian(GeoPoint::new(45.0, 7.0, 0.0));
        let raised = Ellipsoid::WGS84.to_cartesian(geo);
        assert!((raised.norm() - surface.norm() - 1000.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn the_earths_center_is_rejected() {
        Ellipsoid::WGS84.to_geodetic(CartesianPoint::new(0.0, 0.0, 0.0));
    }
}
