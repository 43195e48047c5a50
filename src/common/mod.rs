//! Common types, traits, and error definitions for primitive_designer
//!
//! This module provides the geometry and error building blocks shared by
//! the lattice engine, the edit session and the rendering layer.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
