//! Scene description for drawing an edit session
//!
//! A [`Scene`] is plain geometry (grid lines, drag guides, motion strips and
//! pose arrows) built from the session state; [`Visualizable`] turns it into
//! visualizer series.

use crate::common::{DirectedSegment, MotionPlanner, Point2D, Pose2D, Visualizable, WorldExtent};
use crate::interaction::{EditSession, SegmentRole};
use crate::lattice::LatticeMotion;

use super::visualization::{colors, PathStyle, PointStyle, Visualizer};

/// Spacing of the emphasised grid lines
pub const MAJOR_GRID_SPACING: i32 = 5;

/// Arrow outline in its local frame (unit length along +x, centred at 0)
const ARROW_OUTLINE: [(f64, f64); 8] = [
    (-0.5, 0.15),
    (-0.5, -0.15),
    (0.066, -0.15),
    (0.066, -0.3),
    (0.5, 0.0),
    (0.066, 0.3),
    (0.066, 0.15),
    (-0.5, 0.15),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLineKind {
    Minor,
    Major,
    Axis,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub kind: GridLineKind,
    pub from: Point2D,
    pub to: Point2D,
}

/// Unit lattice lines across `extent`: axes at zero, major lines every
/// [`MAJOR_GRID_SPACING`] units, minor lines elsewhere.
pub fn grid_lines(extent: &WorldExtent) -> Vec<GridLine> {
    let kind_of = |c: i32| {
        if c == 0 {
            GridLineKind::Axis
        } else if c % MAJOR_GRID_SPACING == 0 {
            GridLineKind::Major
        } else {
            GridLineKind::Minor
        }
    };

    let vertical = extent.lattice_x_range().map(|x| GridLine {
        kind: kind_of(x),
        from: Point2D::new(x as f64, extent.min.y),
        to: Point2D::new(x as f64, extent.max.y),
    });
    let horizontal = extent.lattice_y_range().map(|y| GridLine {
        kind: kind_of(y),
        from: Point2D::new(extent.min.x, y as f64),
        to: Point2D::new(extent.max.x, y as f64),
    });

    vertical.chain(horizontal).collect()
}

/// Pose marker
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub pose: Pose2D,
    pub color: &'static str,
}

impl Arrow {
    pub fn new(pose: Pose2D, color: &'static str) -> Self {
        Self { pose, color }
    }

    /// Closed outline in world coordinates
    pub fn outline(&self) -> Vec<Point2D> {
        ARROW_OUTLINE
            .iter()
            .map(|&(x, y)| self.pose.transform_local(x, y))
            .collect()
    }
}

/// Lattice goal tried by an analysis sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeMarker {
    pub position: Point2D,
    pub feasible: bool,
}

/// Everything drawn for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub extent: WorldExtent,
    pub grid: Vec<GridLine>,
    /// Segments currently being dragged
    pub guides: Vec<DirectedSegment>,
    pub motions: Vec<Vec<Pose2D>>,
    pub arrows: Vec<Arrow>,
    pub markers: Vec<LatticeMarker>,
}

impl Scene {
    /// Empty scene showing only the grid
    pub fn new(extent: WorldExtent) -> Self {
        Self {
            grid: grid_lines(&extent),
            extent,
            guides: Vec::new(),
            motions: Vec::new(),
            arrows: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Frame for the session: drag guides (continuous mode only), the
    /// planned motion and the start/goal arrows.
    pub fn from_session<P: MotionPlanner + ?Sized>(session: &EditSession, planner: &P) -> Self {
        let mut scene = Self::new(*session.extent());

        if !session.discrete_mode_active() {
            scene.guides = [SegmentRole::Start, SegmentRole::Goal]
                .into_iter()
                .filter(|&role| session.is_dragging(role))
                .map(|role| *session.segment(role))
                .collect();
        }

        let motion = session.plan_motion(planner);
        if !motion.is_empty() {
            scene.motions.push(motion);
        }

        scene.arrows.push(Arrow::new(session.start_pose(), colors::START));
        scene.arrows.push(Arrow::new(session.goal_pose(), colors::GOAL));
        scene
    }

    /// Overlay lattice motions: every goal gets a marker, feasible ones
    /// also their motion strip and, when `show_arrows`, a goal arrow.
    pub fn add_lattice_motions(&mut self, motions: &[LatticeMotion], show_arrows: bool) {
        for m in motions {
            self.markers.push(LatticeMarker {
                position: m.goal.position(),
                feasible: m.is_feasible(),
            });
            if !m.is_feasible() {
                continue;
            }
            self.motions.push(m.motion.clone());
            if show_arrows {
                self.arrows.push(Arrow::new(m.goal, colors::LATTICE_GOAL));
            }
        }
    }
}

impl Visualizable for Scene {
    fn visualize(&self, vis: &mut Visualizer) {
        for line in &self.grid {
            let (color, width) = match line.kind {
                GridLineKind::Minor => (colors::MINOR_GRID, 0.5),
                GridLineKind::Major => (colors::MAJOR_GRID, 1.0),
                GridLineKind::Axis => (colors::AXIS, 1.5),
            };
            vis.plot_polyline(&[line.from, line.to], &PathStyle::new(color, "").with_line_width(width));
        }

        for guide in &self.guides {
            vis.plot_polyline(&[guide.tail, guide.head], &PathStyle::new(colors::GUIDE, ""));
        }

        for motion in &self.motions {
            vis.plot_motion(motion, &PathStyle::new(colors::MOTION, "").with_line_width(1.5));
        }

        for arrow in &self.arrows {
            vis.plot_polyline(&arrow.outline(), &PathStyle::new(arrow.color, ""));
        }

        for marker in &self.markers {
            let (color, symbol) = if marker.feasible {
                (colors::LATTICE_GOAL, 'O')
            } else {
                (colors::UNREACHABLE, 'x')
            };
            let style = PointStyle::new(color, "").with_size(0.6).with_symbol(symbol);
            vis.plot_point(marker.position, &style);
        }
    }
}
