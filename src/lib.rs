//! PrimitiveDesigner - interactive motion primitive design on a pose lattice
//!
//! An operator places a start and a goal pose for a unicycle vehicle on a
//! 2D plane and inspects the connecting motion, either editing freely or
//! constrained to a discrete lattice of integer positions and quantized
//! headings.

// Core modules
pub mod common;
pub mod config;
pub mod utils;

// Lattice engine and editing
pub mod lattice;
pub mod viewport;
pub mod interaction;
pub mod motion;

// Re-export common types for convenience
pub use common::{DirectedSegment, DiscretePose, Point2D, Pose2D, ViewportSize, WorldExtent};
pub use common::{MotionPlanner, Visualizable};
pub use common::{DesignerError, DesignerResult};
pub use config::DesignerConfig;
pub use interaction::{EditMode, EditSession, SegmentRole};
pub use lattice::{AngleQuantizer, PoseLatticeSnapper};
pub use viewport::CoordinateMapper;
