#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Calibration and tuning for the dead-reckoning integrator.
///
/// The per-axis scale factors are calibrated externally from a known
/// ground-truth distance and the frame resolution (for a downward-facing
/// camera, ground span covered by the frame divided by frame size in
/// pixels) and stay constant for a flight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(Serialize, Deserialize),
    serde(default)
)]
pub struct OdometrySettings {
    /// Ground meters covered per pixel of horizontal displacement.
    pub meters_per_pixel_x: f64,
    /// Ground meters covered per pixel of vertical displacement.
    pub meters_per_pixel_y: f64,
    /// Minimum metric movement for a step to append a waypoint; smaller
    /// candidate movements are discarded as estimation noise.
    pub movement_threshold: f64,
    /// Whether to accumulate heading from the transform's rotation and
    /// rotate each displacement into the heading frame.
    pub track_heading: bool,
}

impl Default for OdometrySettings {
    fn default() -> Self {
        Self {
            meters_per_pixel_x: 1.0,
            meters_per_pixel_y: 1.0,
            movement_threshold: 1.5,
            track_heading: true,
        }
    }
}
