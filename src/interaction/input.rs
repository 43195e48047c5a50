//! Pointer input adapter
//!
//! Translates viewport pointer events into edit session operations.
//! The primary button drags the start segment, the secondary button the
//! goal segment, and the middle button flips the arrow overlay flag.
//! Pointer events are ignored while the session is in discrete mode.

use log::debug;

use crate::common::error::DesignerResult;
use crate::common::{Point2D, ViewportSize, WorldExtent};
use crate::config::DesignerConfig;
use crate::viewport::CoordinateMapper;

use super::edit_session::{EditSession, SegmentRole};

/// Pointer buttons delivered by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Segment dragged by this button, if any
    pub fn role(&self) -> Option<SegmentRole> {
        match self {
            PointerButton::Primary => Some(SegmentRole::Start),
            PointerButton::Secondary => Some(SegmentRole::Goal),
            PointerButton::Middle => None,
        }
    }
}

/// Routes pointer events from a viewport into an [`EditSession`]
#[derive(Debug, Clone)]
pub struct InputController {
    mapper: CoordinateMapper,
    viewport: ViewportSize,
    show_arrows: bool,
}

impl InputController {
    pub fn new(extent: WorldExtent, viewport: ViewportSize) -> Self {
        Self {
            mapper: CoordinateMapper::new(extent),
            viewport,
            show_arrows: true,
        }
    }

    pub fn from_config(config: &DesignerConfig) -> DesignerResult<Self> {
        Ok(Self::new(config.world, config.viewport.to_viewport_size()?))
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Whether lattice arrows are drawn in overlays
    pub fn show_arrows(&self) -> bool {
        self.show_arrows
    }

    /// New drawing surface size
    pub fn resize(&mut self, width: f64, height: f64) -> DesignerResult<()> {
        self.viewport = ViewportSize::new(width, height)?;
        Ok(())
    }

    /// World position of a viewport point under the current surface size
    pub fn to_world(&self, point: Point2D) -> Point2D {
        self.mapper.to_world(point, self.viewport)
    }

    /// Returns whether the view needs a repaint
    pub fn pointer_down(
        &mut self,
        session: &mut EditSession,
        button: PointerButton,
        point: Point2D,
    ) -> bool {
        if session.discrete_mode_active() {
            return false;
        }

        match button.role() {
            Some(role) => session.begin_drag(role, self.to_world(point)).is_ok(),
            None => {
                self.show_arrows = !self.show_arrows;
                debug!("arrow overlay {}", if self.show_arrows { "on" } else { "off" });
                true
            }
        }
    }

    /// Returns whether a dragged segment moved
    pub fn pointer_move(&mut self, session: &mut EditSession, point: Point2D) -> bool {
        if session.discrete_mode_active() {
            return false;
        }
        if !session.is_dragging(SegmentRole::Start) && !session.is_dragging(SegmentRole::Goal) {
            return false;
        }
        session.update_drag(self.to_world(point)).is_ok()
    }

    /// Returns whether the view needs a repaint
    pub fn pointer_up(&mut self, session: &mut EditSession, button: PointerButton) -> bool {
        if session.discrete_mode_active() {
            return false;
        }
        match button.role() {
            Some(role) => {
                session.end_drag(role);
                true
            }
            None => false,
        }
    }
}
