use crate::Homography;
use thiserror::Error;

/// Reasons an external motion estimator can fail to produce a transform
/// for a pair of frames. These failures are per-step: the integrator
/// recovers by skipping the step, leaving the trajectory untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotionEstimationError {
    /// Too few feature associations survived matching to fit a model.
    #[error("too few feature matches to fit a homography ({found} found, {required} required)")]
    InsufficientMatches { found: usize, required: usize },
    /// The robust fitting process did not converge on a model.
    #[error("robust homography fit failed to converge")]
    FitFailed,
    /// No motion record exists for this frame pair (replay sources).
    #[error("no recorded transform for this frame pair")]
    MissingRecord,
}

/// The seam to an external frame-to-frame motion estimation backend.
///
/// An implementation detects features in both frames, associates them, and
/// robustly fits the dominant planar projective motion, returning the
/// homography that maps `previous`-frame pixels onto `current`-frame
/// pixels. When no reliable model can be fit it must fail explicitly
/// rather than return a degenerate transform.
pub trait MotionEstimator<F> {
    fn estimate_motion(
        &self,
        previous: &F,
        current: &F,
    ) -> Result<Homography, MotionEstimationError>;
}

/// A pull-based source of video frames. Decoding is entirely the
/// implementor's concern; the navigation core only sequences frames.
pub trait FrameSource {
    type Frame;

    /// Returns the next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Option<Self::Frame>;
}
