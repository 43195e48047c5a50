//! Edit session for the start and goal poses
//!
//! Holds the start and goal directed segments and the edit mode. In
//! continuous mode the segments are dragged freely with the pointer; on the
//! transition into discrete mode both are snapped onto the pose lattice and
//! from then on are edited through lattice setters (heading bin, integer
//! position) until the mode is toggled back.
//!
//! Headings are never stored: they are derived from each segment on read,
//! and discrete read-outs are recomputed under the current bin count.

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::common::error::{DesignerError, DesignerResult};
use crate::common::{DirectedSegment, DiscretePose, MotionPlanner, Point2D, Pose2D, WorldExtent};
use crate::config::{DesignerConfig, MAX_NUM_ANGLE_BINS};
use crate::lattice::{AngleQuantizer, PoseLatticeSnapper};

/// Heading of the default start segment [deg]
pub const INITIAL_START_HEADING_DEG: f64 = 11.25;
/// Heading of the default goal segment [deg]
pub const INITIAL_GOAL_HEADING_DEG: f64 = 0.0;
/// Distance of the default goal tail from the origin along the start heading [m]
pub const INITIAL_GOAL_DISTANCE: f64 = 10.0;

/// Editing mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Segments follow the pointer
    #[default]
    Continuous,
    /// Segments sit on the pose lattice
    Discrete,
}

/// Which of the two edited segments an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    Start,
    Goal,
}

/// Position component addressed by a discrete setter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Start/goal pose editing state machine
#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    start: DirectedSegment,
    goal: DirectedSegment,
    start_active: bool,
    goal_active: bool,
    snapper: PoseLatticeSnapper,
    extent: WorldExtent,
}

impl EditSession {
    /// Create a session with the default segments.
    ///
    /// A session created in discrete mode starts out snapped.
    pub fn new(extent: WorldExtent, snapper: PoseLatticeSnapper, initial_mode: EditMode) -> Self {
        let (start, goal) = Self::default_segments();
        let mut session = Self {
            mode: initial_mode,
            start,
            goal,
            start_active: false,
            goal_active: false,
            snapper,
            extent,
        };
        if initial_mode == EditMode::Discrete {
            session.snap_segments();
        }
        session
    }

    pub fn with_defaults() -> Self {
        Self::new(
            WorldExtent::default(),
            PoseLatticeSnapper::default(),
            EditMode::Continuous,
        )
    }

    /// Session as the designer window opens it: `initial_mode`, then one
    /// toggle when `toggle_on_startup` is set.
    pub fn from_config(config: &DesignerConfig) -> DesignerResult<Self> {
        config.validate()?;
        let mut session = Self::new(
            config.world,
            config.lattice.to_snapper()?,
            config.session.initial_mode,
        );
        if config.session.toggle_on_startup {
            session.toggle_mode();
        }
        Ok(session)
    }

    /// Start at the origin heading 11.25 degrees, goal ten units further
    /// along that heading pointing along +x.
    pub fn default_segments() -> (DirectedSegment, DirectedSegment) {
        let start_heading = INITIAL_START_HEADING_DEG.to_radians();
        let goal_heading = INITIAL_GOAL_HEADING_DEG.to_radians();

        let start = DirectedSegment::from_heading(Point2D::origin(), start_heading);
        let goal_tail = Point2D::new(
            INITIAL_GOAL_DISTANCE * start_heading.cos(),
            INITIAL_GOAL_DISTANCE * start_heading.sin(),
        );
        let goal = DirectedSegment::from_heading(goal_tail, goal_heading);
        (start, goal)
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn discrete_mode_active(&self) -> bool {
        self.mode == EditMode::Discrete
    }

    pub fn start(&self) -> &DirectedSegment {
        &self.start
    }

    pub fn goal(&self) -> &DirectedSegment {
        &self.goal
    }

    pub fn segment(&self, role: SegmentRole) -> &DirectedSegment {
        match role {
            SegmentRole::Start => &self.start,
            SegmentRole::Goal => &self.goal,
        }
    }

    fn segment_mut(&mut self, role: SegmentRole) -> &mut DirectedSegment {
        match role {
            SegmentRole::Start => &mut self.start,
            SegmentRole::Goal => &mut self.goal,
        }
    }

    /// Whether `role` is currently being dragged
    pub fn is_dragging(&self, role: SegmentRole) -> bool {
        match role {
            SegmentRole::Start => self.start_active,
            SegmentRole::Goal => self.goal_active,
        }
    }

    pub fn extent(&self) -> &WorldExtent {
        &self.extent
    }

    pub fn snapper(&self) -> &PoseLatticeSnapper {
        &self.snapper
    }

    pub fn quantizer(&self) -> &AngleQuantizer {
        self.snapper.quantizer()
    }

    pub fn num_angle_bins(&self) -> usize {
        self.quantizer().num_bins()
    }

    pub fn start_pose(&self) -> Pose2D {
        self.start.pose()
    }

    pub fn goal_pose(&self) -> Pose2D {
        self.goal.pose()
    }

    /// Lattice read-out of a segment under the current bin count
    pub fn discrete_pose(&self, role: SegmentRole) -> DiscretePose {
        self.snapper.discrete_pose(self.segment(role))
    }

    pub fn discrete_start(&self) -> DiscretePose {
        self.discrete_pose(SegmentRole::Start)
    }

    pub fn discrete_goal(&self) -> DiscretePose {
        self.discrete_pose(SegmentRole::Goal)
    }

    /// Motion connecting the current start and goal poses
    pub fn plan_motion<P: MotionPlanner + ?Sized>(&self, planner: &P) -> Vec<Pose2D> {
        planner.plan(&self.start_pose(), &self.goal_pose())
    }

    /// Flip the edit mode; entering discrete mode snaps both segments.
    /// Any drag in progress is dropped.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            EditMode::Continuous => EditMode::Discrete,
            EditMode::Discrete => EditMode::Continuous,
        };
        info!(
            "toggle discrete mode: {}",
            if self.discrete_mode_active() { "on" } else { "off" }
        );

        if self.discrete_mode_active() {
            self.snap_segments();
        }

        self.start_active = false;
        self.goal_active = false;
    }

    fn snap_segments(&mut self) {
        self.start = self.snapper.snap_segment(&self.start);
        self.goal = self.snapper.snap_segment(&self.goal);
        debug!(
            "snapped start to {:?}, goal to {:?}",
            self.discrete_start(),
            self.discrete_goal()
        );
    }

    fn require_mode(&self, mode: EditMode, operation: &str) -> DesignerResult<()> {
        if self.mode == mode {
            Ok(())
        } else {
            warn!("{} rejected in {:?} mode", operation, self.mode);
            Err(DesignerError::ModeViolation(format!(
                "{} requires {:?} mode, session is in {:?} mode",
                operation, mode, self.mode
            )))
        }
    }

    /// Put the tail of `role` at `world_point` and start dragging its head
    pub fn begin_drag(&mut self, role: SegmentRole, world_point: Point2D) -> DesignerResult<()> {
        self.require_mode(EditMode::Continuous, "begin_drag")?;

        self.segment_mut(role).tail = world_point;
        match role {
            SegmentRole::Start => self.start_active = true,
            SegmentRole::Goal => self.goal_active = true,
        }
        debug!(
            "selected {:?} tail: ({:.3}, {:.3})",
            role, world_point.x, world_point.y
        );
        Ok(())
    }

    /// Move the head of every segment being dragged to `world_point`
    pub fn update_drag(&mut self, world_point: Point2D) -> DesignerResult<()> {
        self.require_mode(EditMode::Continuous, "update_drag")?;
        if !self.start_active && !self.goal_active {
            return Err(DesignerError::ModeViolation(
                "update_drag without an active drag".to_string(),
            ));
        }

        if self.start_active {
            self.start.head = world_point;
        }
        if self.goal_active {
            self.goal.head = world_point;
        }
        trace!("drag head at ({:.3}, {:.3})", world_point.x, world_point.y);
        Ok(())
    }

    /// Stop dragging `role`; the segment keeps its last values
    pub fn end_drag(&mut self, role: SegmentRole) {
        let was_active = self.is_dragging(role);
        match role {
            SegmentRole::Start => self.start_active = false,
            SegmentRole::Goal => self.goal_active = false,
        }
        if was_active && self.segment(role).checked_heading().is_err() {
            warn!("{:?} segment has zero length; its heading is taken as 0", role);
        }
    }

    /// Change the angular lattice resolution.
    ///
    /// Discrete read-outs are recomputed from the segment headings; in
    /// discrete mode both segments are re-snapped to the new lattice.
    pub fn set_angle_bin_count(&mut self, num_bins: usize) -> DesignerResult<()> {
        if num_bins > MAX_NUM_ANGLE_BINS {
            warn!("rejected angle bin count {}", num_bins);
            return Err(DesignerError::InvalidConfiguration(format!(
                "angle bin count must be <= {}, got {}",
                MAX_NUM_ANGLE_BINS, num_bins
            )));
        }
        let quantizer = AngleQuantizer::new(num_bins)?;
        info!("set num angles to {}", num_bins);

        self.snapper = PoseLatticeSnapper::new(quantizer, *self.snapper.positions());
        if self.discrete_mode_active() {
            self.snap_segments();
        }
        Ok(())
    }

    /// Point `role` along the representative heading of `bin`
    pub fn set_discrete_heading(&mut self, role: SegmentRole, bin: usize) -> DesignerResult<()> {
        self.require_mode(EditMode::Discrete, "set_discrete_heading")?;
        debug!("set discrete {:?} angle to {}", role, bin);

        let heading = self.quantizer().realize(bin);
        let segment = self.segment_mut(role);
        *segment = DirectedSegment::from_heading(segment.tail, heading);
        Ok(())
    }

    /// Move the tail of `role` to lattice index `value` along `axis`,
    /// keeping the segment's current heading.
    ///
    /// Values outside the world extent are accepted as is.
    pub fn set_discrete_position_component(
        &mut self,
        role: SegmentRole,
        axis: Axis,
        value: i32,
    ) -> DesignerResult<()> {
        self.require_mode(EditMode::Discrete, "set_discrete_position_component")?;
        debug!("set discrete {:?} {:?} to {}", role, axis, value);

        let coordinate = self.snapper.positions().to_coordinate(value);
        let segment = self.segment_mut(role);
        let heading = segment.heading();
        let mut tail = segment.tail;
        match axis {
            Axis::X => tail.x = coordinate,
            Axis::Y => tail.y = coordinate,
        }
        *segment = DirectedSegment::from_heading(tail, heading);
        Ok(())
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::PositionLattice;
    use std::f64::consts::PI;

    fn discrete_session() -> EditSession {
        let mut session = EditSession::with_defaults();
        session.toggle_mode();
        session
    }

    #[test]
    fn test_default_segments() {
        let session = EditSession::with_defaults();
        assert_eq!(session.mode(), EditMode::Continuous);
        assert_eq!(session.start().tail, Point2D::origin());
        assert!((session.start_pose().yaw - PI / 16.0).abs() < 1e-12);
        assert!((session.goal().tail.x - 10.0 * (PI / 16.0).cos()).abs() < 1e-12);
        assert!(session.goal_pose().yaw.abs() < 1e-12);
    }

    #[test]
    fn test_toggle_into_discrete_snaps_both_segments() {
        let session = discrete_session();
        assert!(session.discrete_mode_active());

        // 11.25 degrees sits on the half-bin boundary and rounds up
        assert_eq!(session.discrete_start(), DiscretePose::new(0, 0, 1));
        // goal tail (9.81, 1.95) rounds to (10, 2)
        assert_eq!(session.discrete_goal(), DiscretePose::new(10, 2, 0));
        assert_eq!(session.goal().tail, Point2D::new(10.0, 2.0));
        assert!((session.start().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_double_toggle_is_stable_once_snapped() {
        let mut session = discrete_session();
        let (start, goal) = (*session.start(), *session.goal());

        session.toggle_mode();
        assert_eq!(session.mode(), EditMode::Continuous);
        session.toggle_mode();

        assert_eq!(*session.start(), start);
        assert_eq!(*session.goal(), goal);
    }

    #[test]
    fn test_initial_discrete_mode_starts_snapped() {
        let session = EditSession::new(
            WorldExtent::default(),
            PoseLatticeSnapper::default(),
            EditMode::Discrete,
        );
        assert_eq!(session.start().tail, Point2D::origin());
        assert_eq!(session.goal().tail, Point2D::new(10.0, 2.0));
    }

    #[test]
    fn test_drag_sets_tail_then_head() {
        let mut session = EditSession::with_defaults();
        session.begin_drag(SegmentRole::Goal, Point2D::new(3.0, 4.0)).unwrap();
        assert!(session.is_dragging(SegmentRole::Goal));
        assert!(!session.is_dragging(SegmentRole::Start));

        session.update_drag(Point2D::new(3.0, 8.0)).unwrap();
        assert_eq!(session.goal().tail, Point2D::new(3.0, 4.0));
        assert_eq!(session.goal().head, Point2D::new(3.0, 8.0));
        assert!((session.goal_pose().yaw - PI / 2.0).abs() < 1e-12);

        session.end_drag(SegmentRole::Goal);
        assert!(!session.is_dragging(SegmentRole::Goal));
        assert_eq!(session.goal().head, Point2D::new(3.0, 8.0));
    }

    #[test]
    fn test_simultaneous_drags_share_head() {
        let mut session = EditSession::with_defaults();
        session.begin_drag(SegmentRole::Start, Point2D::new(0.0, 0.0)).unwrap();
        session.begin_drag(SegmentRole::Goal, Point2D::new(1.0, 0.0)).unwrap();
        session.update_drag(Point2D::new(2.0, 2.0)).unwrap();
        assert_eq!(session.start().head, Point2D::new(2.0, 2.0));
        assert_eq!(session.goal().head, Point2D::new(2.0, 2.0));
    }

    #[test]
    fn test_drag_rejected_in_discrete_mode() {
        let mut session = discrete_session();
        let before = *session.start();
        let err = session.begin_drag(SegmentRole::Start, Point2D::new(5.0, 5.0)).unwrap_err();
        assert!(matches!(err, DesignerError::ModeViolation(_)));
        assert_eq!(*session.start(), before);
        assert!(session.update_drag(Point2D::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_update_without_drag_rejected() {
        let mut session = EditSession::with_defaults();
        let before = *session.goal();
        assert!(session.update_drag(Point2D::new(1.0, 1.0)).is_err());
        assert_eq!(*session.goal(), before);
    }

    #[test]
    fn test_toggle_clears_active_drags() {
        let mut session = EditSession::with_defaults();
        session.begin_drag(SegmentRole::Start, Point2D::new(1.2, 0.6)).unwrap();
        session.update_drag(Point2D::new(4.0, 0.7)).unwrap();
        session.toggle_mode();
        assert!(!session.is_dragging(SegmentRole::Start));
        assert_eq!(session.discrete_start(), DiscretePose::new(1, 1, 0));
    }

    #[test]
    fn test_zero_length_drag_keeps_working() {
        let mut session = EditSession::with_defaults();
        let p = Point2D::new(2.2, 2.2);
        session.begin_drag(SegmentRole::Start, p).unwrap();
        session.update_drag(p).unwrap();
        session.end_drag(SegmentRole::Start);
        assert_eq!(session.start_pose().yaw, 0.0);

        session.toggle_mode();
        assert_eq!(session.discrete_start(), DiscretePose::new(2, 2, 0));
    }

    #[test]
    fn test_set_angle_bin_count_rejects_zero() {
        let mut session = discrete_session();
        let before = (*session.start(), *session.goal());
        let err = session.set_angle_bin_count(0).unwrap_err();
        assert!(matches!(err, DesignerError::InvalidConfiguration(_)));
        assert_eq!(session.num_angle_bins(), 16);
        assert_eq!((*session.start(), *session.goal()), before);
    }

    #[test]
    fn test_set_angle_bin_count_rejects_above_maximum() {
        let mut session = discrete_session();
        let before = (*session.start(), *session.goal());
        let err = session.set_angle_bin_count(MAX_NUM_ANGLE_BINS + 1).unwrap_err();
        assert!(matches!(err, DesignerError::InvalidConfiguration(_)));
        assert_eq!(session.num_angle_bins(), 16);
        assert_eq!((*session.start(), *session.goal()), before);

        session.set_angle_bin_count(MAX_NUM_ANGLE_BINS).unwrap();
        assert_eq!(session.num_angle_bins(), MAX_NUM_ANGLE_BINS);
    }

    #[test]
    fn test_bin_count_change_recomputes_from_heading() {
        let mut session = EditSession::with_defaults();
        // 100 degrees: bin 4 of 16, bin 1 of 4
        session.begin_drag(SegmentRole::Goal, Point2D::origin()).unwrap();
        let heading = 100.0_f64.to_radians();
        session.update_drag(Point2D::new(heading.cos(), heading.sin())).unwrap();
        session.end_drag(SegmentRole::Goal);
        assert_eq!(session.discrete_goal().angle_bin, 4);

        session.set_angle_bin_count(4).unwrap();
        assert_eq!(session.discrete_goal().angle_bin, 1);
        // continuous mode keeps the raw heading
        assert!((session.goal_pose().yaw - heading).abs() < 1e-12);
    }

    #[test]
    fn test_bin_count_change_resnaps_in_discrete_mode() {
        let mut session = discrete_session();
        session.set_discrete_heading(SegmentRole::Goal, 3).unwrap();
        session.set_angle_bin_count(4).unwrap();

        // 67.5 degrees is nearest to the 90 degree bin of 4
        assert_eq!(session.discrete_goal().angle_bin, 1);
        assert!((session.goal_pose().yaw - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_discrete_heading() {
        let mut session = discrete_session();
        session.set_discrete_heading(SegmentRole::Start, 4).unwrap();
        assert!((session.start_pose().yaw - PI / 2.0).abs() < 1e-12);
        assert_eq!(session.discrete_start().angle_bin, 4);
        assert_eq!(session.start().tail, Point2D::origin());

        // wraps modulo the bin count
        session.set_discrete_heading(SegmentRole::Start, 17).unwrap();
        assert_eq!(session.discrete_start().angle_bin, 1);
    }

    #[test]
    fn test_discrete_setters_rejected_in_continuous_mode() {
        let mut session = EditSession::with_defaults();
        assert!(session.set_discrete_heading(SegmentRole::Goal, 2).is_err());
        assert!(session
            .set_discrete_position_component(SegmentRole::Goal, Axis::X, 2)
            .is_err());
    }

    #[test]
    fn test_set_position_component_keeps_heading() {
        let mut session = discrete_session();
        session.set_discrete_heading(SegmentRole::Goal, 6).unwrap();
        let heading = session.goal_pose().yaw;

        session
            .set_discrete_position_component(SegmentRole::Goal, Axis::X, -7)
            .unwrap();
        session
            .set_discrete_position_component(SegmentRole::Goal, Axis::Y, 3)
            .unwrap();

        assert_eq!(session.goal().tail, Point2D::new(-7.0, 3.0));
        assert!((session.goal_pose().yaw - heading).abs() < 1e-12);
        assert_eq!(session.discrete_goal(), DiscretePose::new(-7, 3, 6));
    }

    #[test]
    fn test_out_of_extent_position_accepted() {
        let mut session = discrete_session();
        session
            .set_discrete_position_component(SegmentRole::Start, Axis::X, 40)
            .unwrap();
        assert_eq!(session.start().tail.x, 40.0);
        assert!(!session.extent().contains(&session.start().tail));
    }

    #[test]
    fn test_position_lattice_resolution_applies_to_setters() {
        let snapper =
            PoseLatticeSnapper::new(AngleQuantizer::default(), PositionLattice::new(0.5).unwrap());
        let mut session = EditSession::new(WorldExtent::default(), snapper, EditMode::Discrete);
        session
            .set_discrete_position_component(SegmentRole::Goal, Axis::Y, 3)
            .unwrap();
        assert_eq!(session.goal().tail.y, 1.5);
        assert_eq!(session.discrete_goal().y, 3);
    }

    #[test]
    fn test_from_config() {
        let mut config = DesignerConfig::default();
        config.session.initial_mode = EditMode::Discrete;
        config.session.toggle_on_startup = false;
        config.lattice.num_angle_bins = 8;
        let session = EditSession::from_config(&config).unwrap();
        assert!(session.discrete_mode_active());
        assert_eq!(session.num_angle_bins(), 8);

        config.lattice.num_angle_bins = 0;
        assert!(EditSession::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_applies_startup_toggle() {
        let config = DesignerConfig::default();
        assert!(config.session.toggle_on_startup);
        let session = EditSession::from_config(&config).unwrap();
        assert!(session.discrete_mode_active());
        assert_eq!(session.discrete_start(), DiscretePose::new(0, 0, 1));
        assert_eq!(session.discrete_goal(), DiscretePose::new(10, 2, 0));

        let mut config = DesignerConfig::default();
        config.session.initial_mode = EditMode::Discrete;
        let session = EditSession::from_config(&config).unwrap();
        assert_eq!(session.mode(), EditMode::Continuous);

        config.session.toggle_on_startup = false;
        let session = EditSession::from_config(&config).unwrap();
        assert_eq!(session.mode(), EditMode::Discrete);
    }
}
