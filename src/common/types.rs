//! Common types used throughout primitive_designer

use nalgebra::{Isometry2, Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::common::error::{DesignerError, DesignerResult};

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Point one unit away from `self` along `heading`
    pub fn unit_step(&self, heading: f64) -> Point2D {
        (self.to_vector() + Rotation2::new(heading) * Vector2::x()).into()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

impl From<Point2<f64>> for Point2D {
    fn from(p: Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Continuous 2D pose (position + orientation). Yaw is not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0 }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Planar distance between the two positions
    pub fn distance_to(&self, other: &Pose2D) -> f64 {
        self.position().distance(&other.position())
    }

    /// Rigid transform from the pose's local frame into the world frame
    pub fn isometry(&self) -> Isometry2<f64> {
        Isometry2::new(Vector2::new(self.x, self.y), self.yaw)
    }

    /// World coordinates of `(x, y)` given in the pose's local frame
    pub fn transform_local(&self, x: f64, y: f64) -> Point2D {
        (self.isometry() * Point2::new(x, y)).into()
    }
}

/// Pose on the integer position lattice crossed with the angular lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscretePose {
    pub x: i32,
    pub y: i32,
    /// Always in `[0, num_angle_bins)`
    pub angle_bin: usize,
}

impl DiscretePose {
    pub fn new(x: i32, y: i32, angle_bin: usize) -> Self {
        Self { x, y, angle_bin }
    }
}

/// Editing primitive: a tail point and a head point.
///
/// The heading is always derived from the two points and never stored, so
/// it cannot drift away from the geometry it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedSegment {
    pub tail: Point2D,
    pub head: Point2D,
}

impl DirectedSegment {
    pub fn new(tail: Point2D, head: Point2D) -> Self {
        Self { tail, head }
    }

    /// Unit-length segment starting at `tail` pointing along `heading`
    pub fn from_heading(tail: Point2D, heading: f64) -> Self {
        Self {
            tail,
            head: tail.unit_step(heading),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.head.x - self.tail.x == 0.0 && self.head.y - self.tail.y == 0.0
    }

    /// Heading of the segment; a degenerate segment has heading 0.
    pub fn heading(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (self.head.y - self.tail.y).atan2(self.head.x - self.tail.x)
    }

    /// Heading of the segment, or `DegenerateSegment` when head == tail
    pub fn checked_heading(&self) -> DesignerResult<f64> {
        if self.is_degenerate() {
            Err(DesignerError::DegenerateSegment)
        } else {
            Ok(self.heading())
        }
    }

    pub fn length(&self) -> f64 {
        self.tail.distance(&self.head)
    }

    /// Continuous pose at the tail with the derived heading
    pub fn pose(&self) -> Pose2D {
        Pose2D::new(self.tail.x, self.tail.y, self.heading())
    }
}

/// Fixed rectangular world region; also bounds the position lattice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldExtent {
    pub min: Point2D,
    pub max: Point2D,
}

impl WorldExtent {
    pub fn new(min: Point2D, max: Point2D) -> DesignerResult<Self> {
        let extent = Self { min, max };
        extent.validate()?;
        Ok(extent)
    }

    pub fn validate(&self) -> DesignerResult<()> {
        if self.min.x < self.max.x && self.min.y < self.max.y {
            Ok(())
        } else {
            Err(DesignerError::InvalidConfiguration(format!(
                "world extent min ({}, {}) must be below max ({}, {})",
                self.min.x, self.min.y, self.max.x, self.max.y
            )))
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Inclusive integer range of lattice x coordinates
    pub fn lattice_x_range(&self) -> std::ops::RangeInclusive<i32> {
        (self.min.x.ceil() as i32)..=(self.max.x.floor() as i32)
    }

    /// Inclusive integer range of lattice y coordinates
    pub fn lattice_y_range(&self) -> std::ops::RangeInclusive<i32> {
        (self.min.y.ceil() as i32)..=(self.max.y.floor() as i32)
    }
}

impl Default for WorldExtent {
    fn default() -> Self {
        Self {
            min: Point2D::new(-15.0, -15.0),
            max: Point2D::new(15.0, 15.0),
        }
    }
}

/// Pixel size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> DesignerResult<Self> {
        if width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(DesignerError::InvalidConfiguration(format!(
                "viewport size must be positive, got {}x{}",
                width, height
            )))
        }
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self { width: 500.0, height: 500.0 }
    }
}
