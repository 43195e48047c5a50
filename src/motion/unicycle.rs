//
// Unicycle motion generation by move-to-pose feedback
// Author: Daniel Ingram (daniel-s-ingram)
//         Atsushi Sakai(@Atsushi_twi)
//         Ryohei Sasaki(@rsasaki0109)
// P. I. Corke, "Robotics, Vision & Control", Springer 2017, ISBN 978-3-319-54413-7

use std::f64::consts::PI;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::common::error::{DesignerError, DesignerResult};
use crate::common::{MotionPlanner, Pose2D};

/// Gains and integration settings of the unicycle planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnicyclePlannerConfig {
    /// Distance gain
    pub kp_rho: f64,
    /// Bearing gain
    pub kp_alpha: f64,
    /// Final heading gain (negative)
    pub kp_beta: f64,
    /// Integration step [s]
    pub dt: f64,
    /// Distance at which the goal counts as reached [m]
    pub goal_tolerance: f64,
    /// Steps before giving up
    pub max_steps: usize,
}

impl Default for UnicyclePlannerConfig {
    fn default() -> Self {
        Self {
            kp_rho: 9.0,
            kp_alpha: 15.0,
            kp_beta: -3.0,
            dt: 0.01,
            goal_tolerance: 0.001,
            max_steps: 5000,
        }
    }
}

impl UnicyclePlannerConfig {
    pub fn validate(&self) -> DesignerResult<()> {
        if self.kp_rho <= 0.0 {
            return Err(DesignerError::InvalidConfiguration(format!(
                "kp_rho must be positive, got {}",
                self.kp_rho
            )));
        }
        if self.dt <= 0.0 || self.goal_tolerance <= 0.0 {
            return Err(DesignerError::InvalidConfiguration(format!(
                "dt and goal_tolerance must be positive, got {} and {}",
                self.dt, self.goal_tolerance
            )));
        }
        if self.max_steps == 0 {
            return Err(DesignerError::InvalidConfiguration(
                "max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Wrap an angle to [-pi, pi]
fn wrap_to_pi(angle: f64) -> f64 {
    let mut a = angle;
    while a > PI {
        a -= 2.0 * PI;
    }
    while a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Unicycle motion generator driving the polar move-to-pose control law
#[derive(Debug, Clone)]
pub struct UnicyclePlanner {
    config: UnicyclePlannerConfig,
}

impl UnicyclePlanner {
    pub fn new(config: UnicyclePlannerConfig) -> DesignerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: UnicyclePlannerConfig::default(),
        }
    }

    pub fn config(&self) -> &UnicyclePlannerConfig {
        &self.config
    }

    /// Advance `pose` one control step towards `goal`
    fn step(&self, pose: &Pose2D, goal: &Pose2D, rho: f64) -> Pose2D {
        let c = &self.config;
        let dx = goal.x - pose.x;
        let dy = goal.y - pose.y;

        let alpha = wrap_to_pi(dy.atan2(dx) - pose.yaw);
        let beta = wrap_to_pi(goal.yaw - pose.yaw - alpha);

        let mut v = c.kp_rho * rho;
        let w = c.kp_alpha * alpha + c.kp_beta * beta;
        if alpha > PI / 2.0 || alpha < -PI / 2.0 {
            v = -v;
        }

        let yaw = pose.yaw + w * c.dt;
        Pose2D::new(
            pose.x + v * yaw.cos() * c.dt,
            pose.y + v * yaw.sin() * c.dt,
            yaw,
        )
    }
}

impl Default for UnicyclePlanner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl MotionPlanner for UnicyclePlanner {
    fn plan(&self, start: &Pose2D, goal: &Pose2D) -> Vec<Pose2D> {
        let mut pose = *start;
        let mut motion = vec![pose];

        for _ in 0..self.config.max_steps {
            let rho = pose.distance_to(goal);
            if rho <= self.config.goal_tolerance {
                return motion;
            }
            pose = self.step(&pose, goal, rho);
            motion.push(pose);
        }

        trace!(
            "no motion from ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2}) within {} steps",
            start.x, start.y, start.yaw, goal.x, goal.y, goal.yaw, self.config.max_steps
        );
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_motion_reaches_goal() {
        let planner = UnicyclePlanner::with_defaults();
        let goal = Pose2D::new(5.0, 0.0, 0.0);
        let motion = planner.plan(&Pose2D::origin(), &goal);

        assert!(motion.len() > 1);
        assert_eq!(motion[0], Pose2D::origin());
        let last = motion.last().unwrap();
        assert!(last.distance_to(&goal) <= 0.001);
        for p in &motion {
            assert!(p.y.abs() < 1e-9);
        }
    }

    #[test]
    fn test_turning_motion_reaches_goal() {
        let planner = UnicyclePlanner::with_defaults();
        let goal = Pose2D::new(4.0, 3.0, PI / 2.0);
        let motion = planner.plan(&Pose2D::origin(), &goal);

        assert!(!motion.is_empty());
        assert!(motion.last().unwrap().distance_to(&goal) <= 0.001);
    }

    #[test]
    fn test_goal_equal_to_start() {
        let planner = UnicyclePlanner::with_defaults();
        let start = Pose2D::new(1.0, 2.0, 0.3);
        assert_eq!(planner.plan(&start, &start), vec![start]);
    }

    #[test]
    fn test_step_budget_exhausted_returns_empty() {
        let config = UnicyclePlannerConfig {
            max_steps: 3,
            ..Default::default()
        };
        let planner = UnicyclePlanner::new(config).unwrap();
        assert!(planner.plan(&Pose2D::origin(), &Pose2D::new(10.0, 1.0, 0.0)).is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = UnicyclePlannerConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert!(UnicyclePlanner::new(config).is_err());
        let config = UnicyclePlannerConfig {
            max_steps: 0,
            ..Default::default()
        };
        assert!(UnicyclePlanner::new(config).is_err());
    }

    #[test]
    fn test_wrap_to_pi() {
        assert!((wrap_to_pi(3.0 * PI) - PI).abs() < 1e-10);
        assert!((wrap_to_pi(-1.5 * PI) - 0.5 * PI).abs() < 1e-10);
    }
}
