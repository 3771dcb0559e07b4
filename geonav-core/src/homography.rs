use crate::PixelPoint;
use core::ops::Mul;
use derive_more::{AsMut, AsRef, From, Into};
use nalgebra::{Matrix3, Point2};

/// A planar projective transform (homography) mapping pixel coordinates in
/// a source image onto pixel coordinates in a destination image. For a
/// downward-facing camera over distant or planar ground, the dominant
/// motion between two frames is well modeled by such a transform.
///
/// Homographies are produced by an external [`MotionEstimator`](crate::MotionEstimator)
/// and consumed read-only by the navigation core.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, From, Into)]
pub struct Homography(pub Matrix3<f64>);

impl Homography {
    /// The transform under which every pixel maps to itself.
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// A pure pixel translation by `(dx, dy)`.
    pub fn from_translation(dx: f64, dy: f64) -> Self {
        Self(Matrix3::new(
            1.0, 0.0, dx, //
            0.0, 1.0, dy, //
            0.0, 0.0, 1.0,
        ))
    }

    /// Builds the transform from a row-major `3x3` array, the layout used
    /// by recorded homography logs.
    pub fn from_row_major(elements: [f64; 9]) -> Self {
        Self(Matrix3::from_row_slice(&elements))
    }

    /// Maps a source-image pixel to the corresponding destination-image
    /// pixel by projective division.
    ///
    /// The input must have a finite image under the transform, which holds
    /// for any physically meaningful frame-to-frame motion. Points on the
    /// line at infinity (`w = 0`) produce non-finite coordinates.
    pub fn transform(&self, point: PixelPoint) -> PixelPoint {
        let h = self.0 * point.to_homogeneous();
        PixelPoint(Point2::new(h.x / h.z, h.y / h.z))
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        self.0
    }
}

/// Composition with matrix semantics: `(a * b).transform(p)` equals
/// `a.transform(b.transform(p))`. Chaining per-frame homographies this way
/// yields the transform across a span of skipped frames.
impl Mul for Homography {
    type Output = Homography;

    fn mul(self, rhs: Homography) -> Homography {
        Homography(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_pixel_to_itself() {
        let point = PixelPoint::new(320.0, 240.0);
        assert_eq!(Homography::identity().transform(point), point);
    }

    #[test]
    fn translation_moves_pixel() {
        let moved = Homography::from_translation(-2.0, 5.0).transform(PixelPoint::new(10.0, 10.0));
        assert_eq!(moved, PixelPoint::new(8.0, 15.0));
    }

    #[test]
    fn composition_chains_transforms() {
        let a = Homography::from_translation(1.0, 0.0);
        let b = Homography::from_translation(0.0, 3.0);
        let chained = a * b;
        let point = PixelPoint::new(0.0, 0.0);
        assert_eq!(
            chained.transform(point),
            a.transform(b.transform(point))
        );
    }

    #[test]
    fn row_major_layout_round_trips() {
        let h = Homography::from_row_major([1.0, 0.0, 4.0, 0.0, 1.0, -3.0, 0.0, 0.0, 1.0]);
        assert_eq!(h, Homography::from_translation(4.0, -3.0));
    }
}
