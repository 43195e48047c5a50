//! Designer configuration loaded from YAML
//!
//! Every section falls back to its defaults, so a config file only needs
//! to name the values it changes:
//!
//! ```yaml
//! lattice:
//!   num_angle_bins: 32
//! session:
//!   initial_mode: discrete
//!   toggle_on_startup: false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::{DesignerError, DesignerResult};
use crate::common::{ViewportSize, WorldExtent};
use crate::interaction::EditMode;
use crate::lattice::{AngleQuantizer, PoseLatticeSnapper, PositionLattice, DEFAULT_NUM_ANGLE_BINS};
use crate::motion::UnicyclePlannerConfig;

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/designer.yaml";

/// Largest bin count offered by the control panel
pub const MAX_NUM_ANGLE_BINS: usize = 256;

/// Angular and positional lattice settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeSection {
    /// Number of heading bins over a full turn
    pub num_angle_bins: usize,
    /// Spacing of the position lattice [m]
    pub position_resolution: f64,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            num_angle_bins: DEFAULT_NUM_ANGLE_BINS,
            position_resolution: 1.0,
        }
    }
}

impl LatticeSection {
    pub fn to_snapper(&self) -> DesignerResult<PoseLatticeSnapper> {
        Ok(PoseLatticeSnapper::new(
            AngleQuantizer::new(self.num_angle_bins)?,
            PositionLattice::new(self.position_resolution)?,
        ))
    }
}

/// Edit session start-up behaviour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Mode the session is constructed in
    pub initial_mode: EditMode,
    /// Toggle the mode once after construction, as the designer window does
    pub toggle_on_startup: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            initial_mode: EditMode::Continuous,
            toggle_on_startup: true,
        }
    }
}

/// Drawing surface size in pixels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSection {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSection {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
        }
    }
}

impl ViewportSection {
    pub fn to_viewport_size(&self) -> DesignerResult<ViewportSize> {
        ViewportSize::new(self.width, self.height)
    }
}

/// Where rendered frames go
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub directory: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: "img/primitive_designer".to_string(),
        }
    }
}

/// Full designer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct DesignerConfig {
    /// Editable region, also the bounds of the position lattice
    #[serde(default)]
    pub world: WorldExtent,

    #[serde(default)]
    pub lattice: LatticeSection,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub viewport: ViewportSection,

    /// Unicycle motion generator used for display
    #[serde(default)]
    pub planner: UnicyclePlannerConfig,

    #[serde(default)]
    pub output: OutputSection,
}

impl DesignerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> DesignerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path, or fall back to defaults
    pub fn load_default() -> DesignerResult<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> DesignerResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| DesignerError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DesignerResult<()> {
        self.world.validate()?;
        self.lattice.to_snapper()?;
        if self.lattice.num_angle_bins > MAX_NUM_ANGLE_BINS {
            return Err(DesignerError::InvalidConfiguration(format!(
                "angle bin count must be <= {}, got {}",
                MAX_NUM_ANGLE_BINS, self.lattice.num_angle_bins
            )));
        }
        self.viewport.to_viewport_size()?;
        self.planner.validate()?;
        Ok(())
    }
}
