use crate::OdometrySettings;
use geonav_core::{GeoPoint, Homography, PixelPoint, Trajectory, Waypoint};
use geonav_geodesy::Ellipsoid;
use std::f64::consts::PI;

/// The result of integrating one motion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The candidate moved far enough from the last waypoint and was
    /// appended to the trajectory.
    Accepted(Waypoint),
    /// The candidate movement was within the noise threshold and was
    /// discarded; the trajectory is unchanged.
    BelowThreshold { distance: f64 },
}

/// Integrates per-step planar homographies into a geographic trajectory.
///
/// Seeded from one externally supplied origin, the integrator tracks the
/// frame's center pixel through each transform, converts its displacement
/// to meters, and extends the trajectory it owns. The displacement
/// convention is fixed as original minus transformed: a transform that
/// moves the frame content down-right means the platform moved up-left.
pub struct DeadReckoning {
    settings: OdometrySettings,
    ellipsoid: Ellipsoid,
    trajectory: Trajectory,
    center: PixelPoint,
    up: PixelPoint,
    /// Accumulated heading in radians, counterclockwise in image axes.
    heading: f64,
}

impl DeadReckoning {
    /// Creates an integrator for frames of the given pixel dimensions,
    /// with the trajectory seeded from `origin` converted through
    /// `ellipsoid`.
    pub fn new(
        ellipsoid: Ellipsoid,
        origin: GeoPoint,
        frame_width: u32,
        frame_height: u32,
        settings: OdometrySettings,
    ) -> Self {
        let seed = ellipsoid.to_cartesian(origin);
        Self {
            settings,
            ellipsoid,
            trajectory: Trajectory::from_origin(seed),
            center: PixelPoint::new(frame_width as f64 / 2.0, frame_height as f64 / 2.0),
            up: PixelPoint::new(frame_width as f64 / 2.0, 0.0),
            heading: 0.0,
        }
    }

    /// Integrates one homography mapping previous-frame pixels onto
    /// current-frame pixels.
    pub fn step(&mut self, transform: &Homography) -> StepOutcome {
        let moved_center = transform.transform(self.center);

        // Displacement convention: original minus transformed.
        let mut dx = (self.center.x - moved_center.x) * self.settings.meters_per_pixel_x;
        let mut dy = (self.center.y - moved_center.y) * self.settings.meters_per_pixel_y;

        if self.settings.track_heading {
            let moved_up = transform.transform(self.up);
            let turn = turn_angle(
                (self.up.x - self.center.x, self.up.y - self.center.y),
                (moved_up.x - moved_center.x, moved_up.y - moved_center.y),
            );
            self.heading += turn;
            (dx, dy) = rotate(dx, dy, self.heading);
        }

        let last = self.trajectory.last().position();
        let candidate = last.translated(dx, dy, 0.0);
        let distance = candidate.distance(last);
        if distance > self.settings.movement_threshold {
            StepOutcome::Accepted(self.trajectory.append(candidate))
        } else {
            StepOutcome::BelowThreshold { distance }
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Accumulated heading in radians since the origin.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn settings(&self) -> OdometrySettings {
        self.settings
    }

    /// The trajectory converted back to geodetic coordinates, for display
    /// or export.
    pub fn geodetic_waypoints(&self) -> Vec<GeoPoint> {
        self.trajectory
            .waypoints()
            .iter()
            .map(|waypoint| self.ellipsoid.to_geodetic(waypoint.position()))
            .collect()
    }
}

/// The signed angle from `previous` to `current`, normalized into
/// `(-pi, pi]`.
fn turn_angle(previous: (f64, f64), current: (f64, f64)) -> f64 {
    let angle = current.1.atan2(current.0) - previous.1.atan2(previous.0);
    if angle > PI {
        angle - 2.0 * PI
    } else if angle <= -PI {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Rotates a 2D vector counterclockwise by `angle` radians.
fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geonav_core::nalgebra::Matrix3;

    fn reckoning(settings: OdometrySettings) -> DeadReckoning {
        let origin = GeoPoint::new(32.09237848, 35.17513055, 564.05338779);
        DeadReckoning::new(Ellipsoid::WGS84, origin, 100, 100, settings)
    }

    fn flat_settings(threshold: f64) -> OdometrySettings {
        OdometrySettings {
            meters_per_pixel_x: 1.0,
            meters_per_pixel_y: 1.0,
            movement_threshold: threshold,
            track_heading: false,
        }
    }

    /// Rotation by `angle` around the pixel `(cx, cy)`.
    fn rotation_about(angle: f64, cx: f64, cy: f64) -> Homography {
        let (sin, cos) = angle.sin_cos();
        Homography(Matrix3::new(
            cos,
            -sin,
            cx - cos * cx + sin * cy,
            sin,
            cos,
            cy - sin * cx - cos * cy,
            0.0,
            0.0,
            1.0,
        ))
    }

    #[test]
    fn identity_never_appends_a_waypoint() {
        let mut reckoning = reckoning(flat_settings(1.0));
        for _ in 0..50 {
            let outcome = reckoning.step(&Homography::identity());
            assert!(matches!(outcome, StepOutcome::BelowThreshold { distance } if distance == 0.0));
        }
        assert_eq!(reckoning.trajectory().len(), 1);
    }

    #[test]
    fn straight_line_dead_reckoning() {
        // Three identical translation-only transforms, each worth (2, 0)
        // meters of displacement, against a threshold of 1 meter.
        let mut reckoning = reckoning(flat_settings(1.0));
        let origin = reckoning.trajectory().last().position();
        let step = Homography::from_translation(-2.0, 0.0);

        for _ in 0..3 {
            assert!(matches!(
                reckoning.step(&step),
                StepOutcome::Accepted(_)
            ));
        }

        let waypoints = reckoning.trajectory().waypoints();
        assert_eq!(waypoints.len(), 4);
        for (i, offset) in [2.0, 4.0, 6.0].iter().enumerate() {
            let expected = origin.translated(*offset, 0.0, 0.0);
            let actual = waypoints[i + 1].position();
            assert!(
                actual.distance(expected) < 1e-9,
                "waypoint {} at {:?}, expected {:?}",
                i + 1,
                actual,
                expected
            );
        }
    }

    #[test]
    fn sub_threshold_movement_is_noise() {
        let mut reckoning = reckoning(flat_settings(1.0));
        let outcome = reckoning.step(&Homography::from_translation(-0.5, 0.0));
        assert!(matches!(
            outcome,
            StepOutcome::BelowThreshold { distance } if (distance - 0.5).abs() < 1e-9
        ));
        assert_eq!(reckoning.trajectory().len(), 1);
    }

    #[test]
    fn heading_rotates_subsequent_displacement() {
        let settings = OdometrySettings {
            track_heading: true,
            movement_threshold: 1.0,
            ..OdometrySettings::default()
        };
        let mut reckoning = reckoning(settings);
        let origin = reckoning.trajectory().last().position();

        // A quarter turn about the frame center moves nothing, so the
        // step is rejected, but the heading accumulates.
        let outcome = reckoning.step(&rotation_about(PI / 2.0, 50.0, 50.0));
        assert!(matches!(outcome, StepOutcome::BelowThreshold { .. }));
        assert!((reckoning.heading() - PI / 2.0).abs() < 1e-9);

        // A (2, 0) meter displacement is now rotated into (0, 2).
        let outcome = reckoning.step(&Homography::from_translation(-2.0, 0.0));
        let StepOutcome::Accepted(waypoint) = outcome else {
            panic!("rotated displacement should pass the threshold");
        };
        let expected = origin.translated(0.0, 2.0, 0.0);
        assert!(waypoint.position().distance(expected) < 1e-9);
    }

    #[test]
    fn translation_does_not_disturb_heading() {
        let settings = OdometrySettings {
            track_heading: true,
            movement_threshold: 1.0,
            ..OdometrySettings::default()
        };
        let mut reckoning = reckoning(settings);
        reckoning.step(&Homography::from_translation(-3.0, 4.0));
        assert!(reckoning.heading().abs() < 1e-12);
    }

    #[test]
    fn geodetic_waypoints_start_at_the_origin() {
        let reckoning = reckoning(flat_settings(1.0));
        let geo = reckoning.geodetic_waypoints();
        assert_eq!(geo.len(), 1);
        assert!((geo[0].latitude - 32.09237848).abs() < 1e-6);
        assert!((geo[0].longitude - 35.17513055).abs() < 1e-6);
        assert!((geo[0].altitude - 564.05338779).abs() < 1e-3);
    }

    #[test]
    fn turn_angle_normalizes_into_half_open_interval() {
        // A small rotation across the atan2 branch cut stays small.
        let angle = turn_angle((-1.0, -0.01), (-1.0, 0.01));
        assert!((angle - 0.02).abs() < 1e-3);
        let angle = turn_angle((-1.0, 0.01), (-1.0, -0.01));
        assert!((angle + 0.02).abs() < 1e-3);
        // A half turn lands on +pi, not -pi.
        let angle = turn_angle((1.0, 0.0), (-1.0, 0.0));
        assert!((angle - PI).abs() < 1e-12);
    }

    #[test]
    fn per_axis_scale_factors_apply_elementwise() {
        let settings = OdometrySettings {
            meters_per_pixel_x: 0.5,
            meters_per_pixel_y: 2.0,
            movement_threshold: 0.1,
            track_heading: false,
        };
        let mut reckoning = reckoning(settings);
        let origin = reckoning.trajectory().last().position();
        reckoning.step(&Homography::from_translation(-2.0, -1.0));
        let expected = origin.translated(1.0, 2.0, 0.0);
        assert!(reckoning.trajectory().last().position().distance(expected) < 1e-9);
    }
}
