//! # `geonav`
//!
//! Batteries-included visual geonavigation crate. It re-exports the
//! member crates of the workspace in one place for discoverability and for
//! quickly putting together a navigation routine. Production applications
//! should depend on the member crates individually instead of pulling in
//! everything through this facade.
//!
//! The shared value types and collaborator traits from `geonav-core` live
//! in the crate root; everything else is grouped into modules:
//!
//! * [`geodesy`] - geodetic ↔ Earth-centered Cartesian conversion
//! * [`tile`] - the map tile index used for retrieval relocalization
//! * [`odometry`] - dead reckoning by homography chaining

pub use geonav_core::*;

/// Geodetic ↔ Earth-centered Cartesian conversion
#[cfg(feature = "geodesy")]
pub mod geodesy {
    pub use geonav_geodesy::*;
}

/// The map tile index used for retrieval relocalization
#[cfg(feature = "tile")]
pub mod tile {
    pub use geonav_tile::*;
}

/// Dead reckoning by homography chaining
#[cfg(feature = "odometry")]
pub mod odometry {
    pub use geonav_odometry::*;
}
