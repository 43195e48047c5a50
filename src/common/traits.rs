//! Common traits defining the seams between the editing core and its collaborators

use crate::common::types::*;

/// Trait for motion generators connecting two continuous poses
pub trait MotionPlanner {
    /// Plan a motion from start to goal.
    ///
    /// Returns an ordered pose sequence, or an empty vector when no
    /// connecting motion was found.
    fn plan(&self, start: &Pose2D, goal: &Pose2D) -> Vec<Pose2D>;
}

/// Trait for things that can draw themselves onto a visualizer
pub trait Visualizable {
    /// Draw current state to visualizer
    fn visualize(&self, vis: &mut crate::utils::Visualizer);
}
