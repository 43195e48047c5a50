//! Utility modules for primitive_designer

pub mod scene;
pub mod visualization;

pub use scene::{grid_lines, Arrow, GridLine, GridLineKind, LatticeMarker, Scene};
pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
