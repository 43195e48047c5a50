//! Control panel model
//!
//! Spin boxes for the bin count, the start and goal heading bins and the
//! goal lattice position. They are only enabled in discrete mode and are
//! re-synchronised with the session after every change, so they always
//! show the current lattice read-out.

use crate::common::error::{DesignerError, DesignerResult};
use crate::config::MAX_NUM_ANGLE_BINS;

use super::edit_session::{Axis, EditSession, SegmentRole};

/// Bounded integer input, optionally wrapping around its range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinBox {
    value: i32,
    min: i32,
    max: i32,
    wrapping: bool,
    enabled: bool,
}

impl SpinBox {
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        let mut spin = Self {
            value: min,
            min,
            max: max.max(min),
            wrapping: false,
            enabled: true,
        };
        spin.set_value(value);
        spin
    }

    pub fn with_wrapping(mut self) -> Self {
        self.wrapping = true;
        self
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_range(&mut self, min: i32, max: i32) {
        self.min = min;
        self.max = max.max(min);
        self.value = self.value.clamp(self.min, self.max);
    }

    /// Store `value`, wrapped or clamped into range; returns the stored value
    pub fn set_value(&mut self, value: i32) -> i32 {
        self.value = if self.wrapping && (value < self.min || value > self.max) {
            let span = self.max - self.min + 1;
            self.min + (value - self.min).rem_euclid(span)
        } else {
            value.clamp(self.min, self.max)
        };
        self.value
    }

    pub fn step_by(&mut self, steps: i32) -> i32 {
        self.set_value(self.value.saturating_add(steps))
    }
}

/// User actions on the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    ToggleMode,
    SetAngleBinCount(i32),
    SetStartAngle(i32),
    SetGoalAngle(i32),
    SetGoalX(i32),
    SetGoalY(i32),
}

/// Spin box state mirroring an [`EditSession`]
#[derive(Debug, Clone)]
pub struct ControlPanel {
    pub num_angles: SpinBox,
    pub start_angle: SpinBox,
    pub goal_angle: SpinBox,
    pub goal_x: SpinBox,
    pub goal_y: SpinBox,
}

impl ControlPanel {
    pub fn new(session: &EditSession) -> Self {
        let extent = session.extent();
        let (x_range, y_range) = (extent.lattice_x_range(), extent.lattice_y_range());

        let mut panel = Self {
            num_angles: SpinBox::new(1, MAX_NUM_ANGLE_BINS as i32, 1),
            start_angle: SpinBox::new(0, 0, 0).with_wrapping(),
            goal_angle: SpinBox::new(0, 0, 0).with_wrapping(),
            goal_x: SpinBox::new(*x_range.start(), *x_range.end(), 0),
            goal_y: SpinBox::new(*y_range.start(), *y_range.end(), 0),
        };
        panel.sync(session);
        panel
    }

    /// Text of the mode toggle button
    pub fn toggle_label(&self, session: &EditSession) -> &'static str {
        if session.discrete_mode_active() {
            "Toggle Continuous Mode"
        } else {
            "Toggle Discrete Mode"
        }
    }

    /// Apply a panel action to the session and refresh the spin boxes.
    ///
    /// Spin box actions are rejected while the panel is disabled.
    pub fn apply(&mut self, session: &mut EditSession, event: ControlEvent) -> DesignerResult<()> {
        if event != ControlEvent::ToggleMode && !session.discrete_mode_active() {
            return Err(DesignerError::ModeViolation(format!(
                "{:?} while the control panel is disabled",
                event
            )));
        }

        match event {
            ControlEvent::ToggleMode => session.toggle_mode(),
            ControlEvent::SetAngleBinCount(n) => {
                let n = self.num_angles.set_value(n);
                session.set_angle_bin_count(n as usize)?;
            }
            ControlEvent::SetStartAngle(bin) => {
                let bin = self.start_angle.set_value(bin);
                session.set_discrete_heading(SegmentRole::Start, bin as usize)?;
            }
            ControlEvent::SetGoalAngle(bin) => {
                let bin = self.goal_angle.set_value(bin);
                session.set_discrete_heading(SegmentRole::Goal, bin as usize)?;
            }
            ControlEvent::SetGoalX(x) => {
                let x = self.goal_x.set_value(x);
                session.set_discrete_position_component(SegmentRole::Goal, Axis::X, x)?;
            }
            ControlEvent::SetGoalY(y) => {
                let y = self.goal_y.set_value(y);
                session.set_discrete_position_component(SegmentRole::Goal, Axis::Y, y)?;
            }
        }

        self.sync(session);
        Ok(())
    }

    /// Pull ranges, values and enablement from the session
    pub fn sync(&mut self, session: &EditSession) {
        let n = session.num_angle_bins() as i32;
        let start = session.discrete_start();
        let goal = session.discrete_goal();

        self.num_angles.set_value(n);
        self.start_angle.set_range(0, n - 1);
        self.goal_angle.set_range(0, n - 1);
        self.start_angle.set_value(start.angle_bin as i32);
        self.goal_angle.set_value(goal.angle_bin as i32);
        self.goal_x.set_value(goal.x);
        self.goal_y.set_value(goal.y);

        let enabled = session.discrete_mode_active();
        for spin in [
            &mut self.num_angles,
            &mut self.start_angle,
            &mut self.goal_angle,
            &mut self.goal_x,
            &mut self.goal_y,
        ] {
            spin.set_enabled(enabled);
        }
    }
}
