//! Pose lattice snapping
//!
//! Collapses a continuous directed segment onto the nearest lattice pose:
//! the tail is rounded onto the position lattice, the heading onto the
//! angular lattice, and the head is rebuilt one unit along the snapped
//! heading (the original segment length is not preserved).
//!
//! Positions round half away from zero (`f64::round`).

use log::warn;

use crate::common::error::{DesignerError, DesignerResult};
use crate::common::{DirectedSegment, DiscretePose, Point2D, Pose2D};

use super::angle::AngleQuantizer;

/// Uniform position lattice with a configurable spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionLattice {
    resolution: f64,
}

impl PositionLattice {
    pub fn new(resolution: f64) -> DesignerResult<Self> {
        if resolution.is_finite() && resolution > 0.0 {
            Ok(Self { resolution })
        } else {
            Err(DesignerError::InvalidConfiguration(format!(
                "position resolution must be a positive number, got {}",
                resolution
            )))
        }
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Nearest lattice index of a coordinate
    pub fn to_index(&self, value: f64) -> i32 {
        (value / self.resolution).round() as i32
    }

    /// Coordinate of a lattice index
    pub fn to_coordinate(&self, index: i32) -> f64 {
        index as f64 * self.resolution
    }

    pub fn snap(&self, value: f64) -> f64 {
        self.to_coordinate(self.to_index(value))
    }
}

impl Default for PositionLattice {
    fn default() -> Self {
        Self { resolution: 1.0 }
    }
}

/// Snaps segments and poses onto the position x angle lattice
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseLatticeSnapper {
    quantizer: AngleQuantizer,
    positions: PositionLattice,
}

impl PoseLatticeSnapper {
    pub fn new(quantizer: AngleQuantizer, positions: PositionLattice) -> Self {
        Self {
            quantizer,
            positions,
        }
    }

    pub fn quantizer(&self) -> &AngleQuantizer {
        &self.quantizer
    }

    pub fn positions(&self) -> &PositionLattice {
        &self.positions
    }

    /// Snap a segment: lattice tail plus a unit head at the snapped heading
    pub fn snap_segment(&self, segment: &DirectedSegment) -> DirectedSegment {
        if segment.is_degenerate() {
            warn!(
                "snapping zero-length segment at ({:.3}, {:.3}); heading taken as 0",
                segment.tail.x, segment.tail.y
            );
        }

        let tail = Point2D::new(
            self.positions.snap(segment.tail.x),
            self.positions.snap(segment.tail.y),
        );
        let heading = self.quantizer.snap(segment.heading());

        DirectedSegment::from_heading(tail, heading)
    }

    /// Snap a continuous pose onto the lattice
    pub fn snap_pose(&self, pose: &Pose2D) -> Pose2D {
        Pose2D::new(
            self.positions.snap(pose.x),
            self.positions.snap(pose.y),
            self.quantizer.snap(pose.yaw),
        )
    }

    /// Lattice coordinates of a segment under the current bin count
    pub fn discrete_pose(&self, segment: &DirectedSegment) -> DiscretePose {
        DiscretePose::new(
            self.positions.to_index(segment.tail.x),
            self.positions.to_index(segment.tail.y),
            self.quantizer.discretize(segment.heading()),
        )
    }

    /// Continuous representative of a lattice pose
    pub fn realize(&self, pose: &DiscretePose) -> Pose2D {
        Pose2D::new(
            self.positions.to_coordinate(pose.x),
            self.positions.to_coordinate(pose.y),
            self.quantizer.realize(pose.angle_bin),
        )
    }
}
