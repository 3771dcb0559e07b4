use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Vector3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A position on the Earth in geodetic coordinates.
///
/// Latitude and longitude are in degrees, with latitude in `[-90, 90]` and
/// longitude in `[-180, 180]`. Altitude is in meters above the reference
/// ellipsoid surface at that latitude.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// A position in Earth-centered Cartesian coordinates, in meters.
///
/// The X axis points through the prime meridian at the equator, the Y axis
/// through 90°E at the equator, and the Z axis through the north pole.
/// Conversion to and from [`GeoPoint`] is performed by the `geonav-geodesy`
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CartesianPoint(pub Vector3<f64>);

impl CartesianPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// Euclidean distance to another point, in meters.
    pub fn distance(self, other: Self) -> f64 {
        (self.0 - other.0).norm()
    }

    /// Returns the point displaced by the given offsets, in meters.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self(self.0 + Vector3::new(dx, dy, dz))
    }
}
