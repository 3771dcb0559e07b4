use crate::{DeadReckoning, StepOutcome};
use geonav_core::{FrameSource, MotionEstimator};
use log::{debug, warn};

/// Counters describing one run of the tracking loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingReport {
    /// Frames pulled from the source, including unsampled ones.
    pub frames_seen: usize,
    /// Steps whose movement passed the threshold and appended a waypoint.
    pub steps_accepted: usize,
    /// Steps discarded as sub-threshold noise.
    pub steps_rejected: usize,
    /// Steps skipped because the motion estimator failed.
    pub steps_failed: usize,
}

/// Drives a frame source and a motion estimator through a dead-reckoning
/// integrator at a fixed sampling cadence.
///
/// One sampled frame in every `sample_interval` is paired with the
/// previously sampled frame and handed to the estimator. An estimator
/// failure skips the step without advancing the trajectory; the previous
/// sampled frame still advances so one bad frame cannot stall tracking.
#[derive(Debug, Clone, Copy)]
pub struct TrackingLoop {
    sample_interval: usize,
}

impl TrackingLoop {
    /// `sample_interval` is clamped to at least 1 (process every frame).
    pub fn new(sample_interval: usize) -> Self {
        Self {
            sample_interval: sample_interval.max(1),
        }
    }

    pub fn sample_interval(&self) -> usize {
        self.sample_interval
    }

    /// Consumes the source until exhaustion, integrating sampled steps
    /// into `reckoning`.
    pub fn run<S, E>(
        &self,
        source: &mut S,
        estimator: &E,
        reckoning: &mut DeadReckoning,
    ) -> TrackingReport
    where
        S: FrameSource,
        E: MotionEstimator<S::Frame>,
    {
        let mut report = TrackingReport::default();

        let Some(mut previous) = source.next_frame() else {
            return report;
        };
        report.frames_seen = 1;

        while let Some(frame) = source.next_frame() {
            report.frames_seen += 1;
            if (report.frames_seen - 1) % self.sample_interval != 0 {
                continue;
            }

            match estimator.estimate_motion(&previous, &frame) {
                Ok(transform) => match reckoning.step(&transform) {
                    StepOutcome::Accepted(waypoint) => {
                        debug!(
                            "frame {}: waypoint {} appended",
                            report.frames_seen,
                            waypoint.index()
                        );
                        report.steps_accepted += 1;
                    }
                    StepOutcome::BelowThreshold { distance } => {
                        debug!(
                            "frame {}: movement {:.3} m below threshold",
                            report.frames_seen, distance
                        );
                        report.steps_rejected += 1;
                    }
                },
                Err(e) => {
                    warn!("frame {}: step skipped: {}", report.frames_seen, e);
                    report.steps_failed += 1;
                }
            }
            previous = frame;
        }

        report
    }
}
