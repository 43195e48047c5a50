//! Pose discretization and lattice snapping
//!
//! # Components
//!
//! - `angle`: heading quantization onto `n` uniform bins
//! - `snap`: position lattice and segment/pose snapping
//! - `analysis`: neighbor and widest-arc sweeps over the lattice
//!
//! # Example
//!
//! ```
//! use primitive_designer::lattice::{AngleQuantizer, PoseLatticeSnapper, PositionLattice};
//! use primitive_designer::common::{DirectedSegment, Point2D};
//!
//! let quantizer = AngleQuantizer::new(16).unwrap();
//! let snapper = PoseLatticeSnapper::new(quantizer, PositionLattice::default());
//!
//! let drag = DirectedSegment::new(Point2D::new(0.4, 2.6), Point2D::new(3.0, 4.1));
//! let snapped = snapper.snap_segment(&drag);
//! assert_eq!(snapped.tail, Point2D::new(0.0, 3.0));
//! assert_eq!(snapper.discrete_pose(&snapped).angle_bin, 1);
//! ```

pub mod angle;
pub mod snap;
pub mod analysis;

pub use angle::{normalize_angle, AngleQuantizer, DEFAULT_NUM_ANGLE_BINS};
pub use snap::{PoseLatticeSnapper, PositionLattice};
pub use analysis::{discrete_neighbors, widest_arcs, LatticeMotion};
