//! Viewport to world coordinate mapping
//!
//! Viewport coordinates have their origin at the top-left corner with y
//! growing downwards; world coordinates follow the [`WorldExtent`] with y
//! growing upwards. The mapping is a pure scale, y-flip and translation:
//! nothing is clamped, so points outside the viewport map outside the
//! extent.

use crate::common::{Point2D, ViewportSize, WorldExtent};

/// Affine map from a pixel viewport onto a world extent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateMapper {
    extent: WorldExtent,
}

impl CoordinateMapper {
    pub fn new(extent: WorldExtent) -> Self {
        Self { extent }
    }

    pub fn extent(&self) -> &WorldExtent {
        &self.extent
    }

    /// World coordinates of a viewport point
    pub fn to_world(&self, viewport_point: Point2D, viewport: ViewportSize) -> Point2D {
        let e = &self.extent;
        let world_x = e.width() * viewport_point.x / viewport.width + e.min.x;
        let world_y = e.height() * (1.0 - viewport_point.y / viewport.height) + e.min.y;
        Point2D::new(world_x, world_y)
    }
}
