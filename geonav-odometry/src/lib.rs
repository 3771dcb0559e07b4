//! Dead reckoning by homography chaining.
//!
//! An external motion estimator produces a planar homography between each
//! pair of sampled frames. [`DeadReckoning`] turns the pixel displacement
//! of the frame center under that transform into a metric displacement
//! using a calibrated meters-per-pixel scale, optionally rotates it by the
//! heading accumulated from the transform's rotation of a reference "up"
//! pixel, and appends the resulting position to an owned trajectory when
//! the movement exceeds a noise threshold.
//!
//! [`TrackingLoop`] drives the integrator over a frame stream with a
//! configurable sampling cadence, absorbing per-step estimator failures so
//! a noisy stretch of video cannot corrupt the trajectory.
//!
//! The integrator holds no shared state and must be driven by one caller
//! at a time; serialize access externally if frames arrive concurrently.

mod pipeline;
mod reckoning;
mod settings;

pub use pipeline::*;
pub use reckoning::*;
pub use settings::*;
