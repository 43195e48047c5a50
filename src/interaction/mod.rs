//! Interactive editing of the start and goal poses
//!
//! # Components
//!
//! - `edit_session`: continuous/discrete edit state machine
//! - `input`: pointer events mapped through the viewport into the session
//! - `control_panel`: spin box model for the discrete-mode setters

pub mod edit_session;
pub mod input;
pub mod control_panel;

pub use edit_session::{Axis, EditMode, EditSession, SegmentRole};
pub use input::{InputController, PointerButton};
pub use control_panel::{ControlEvent, ControlPanel, SpinBox};
