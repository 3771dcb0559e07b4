//! # geonav-core
//!
//! This library provides the common abstractions and types shared by the
//! geonav crates. This includes the geodetic and Earth-centered Cartesian
//! value types, pixel coordinates, planar homographies, trajectories, and
//! the trait seams through which external collaborators (motion estimators,
//! scene-retrieval engines, and frame sources) plug into the navigation
//! core. The crate is deliberately small so that every other crate in the
//! workspace can depend on it without pulling in heavy machinery.
//!
//! The navigation core never performs feature detection, feature
//! association, or robust model fitting itself. Those concerns live behind
//! [`MotionEstimator`] and [`SceneRetrieval`], which any feature-matching
//! backend can implement.

mod estimator;
mod geo;
mod homography;
mod pixel;
mod retrieval;
mod trajectory;

pub use estimator::*;
pub use geo::*;
pub use homography::*;
pub use nalgebra;
pub use pixel::*;
pub use retrieval::*;
pub use trajectory::*;
