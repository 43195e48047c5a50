//! Motion generators consumed by the designer for display

pub mod unicycle;

pub use unicycle::{UnicyclePlanner, UnicyclePlannerConfig};
