use crate::CartesianPoint;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A Cartesian position tagged with its sequence index in the trajectory
/// that produced it. Waypoints are created only by [`Trajectory`] and are
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Waypoint {
    index: usize,
    position: CartesianPoint,
}

impl Waypoint {
    /// The monotonically increasing sequence index, starting at 0 for the
    /// trajectory origin.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> CartesianPoint {
        self.position
    }
}

/// An ordered, append-only sequence of waypoints beginning at an
/// externally supplied origin. The dead-reckoning integrator owns one
/// trajectory and appends to it when a motion step passes its acceptance
/// threshold; nothing is ever removed or rewritten.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
}

impl Trajectory {
    /// Creates a trajectory seeded with the origin as waypoint 0.
    pub fn from_origin(origin: CartesianPoint) -> Self {
        Self {
            waypoints: vec![Waypoint {
                index: 0,
                position: origin,
            }],
        }
    }

    /// Appends a new waypoint at the given position and returns it.
    pub fn append(&mut self, position: CartesianPoint) -> Waypoint {
        let waypoint = Waypoint {
            index: self.waypoints.len(),
            position,
        };
        self.waypoints.push(waypoint);
        waypoint
    }

    /// The most recently appended waypoint. Always exists since the
    /// trajectory is seeded with its origin.
    pub fn last(&self) -> Waypoint {
        *self
            .waypoints
            .last()
            .unwrap_or_else(|| unreachable!("trajectory always contains its origin"))
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints, including the origin.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_waypoint_zero() {
        let trajectory = Trajectory::from_origin(CartesianPoint::new(1.0, 2.0, 3.0));
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.last().index(), 0);
        assert_eq!(
            trajectory.last().position(),
            CartesianPoint::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn append_assigns_increasing_indices() {
        let mut trajectory = Trajectory::from_origin(CartesianPoint::new(0.0, 0.0, 0.0));
        let first = trajectory.append(CartesianPoint::new(2.0, 0.0, 0.0));
        let second = trajectory.append(CartesianPoint::new(4.0, 0.0, 0.0));
        assert_eq!(first.index(), 1);
        assert_eq!(second.index(), 2);
        assert_eq!(trajectory.last(), second);
        assert_eq!(trajectory.waypoints().len(), 3);
    }
}
