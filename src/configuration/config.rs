//! Configuration types for loading incline scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – which variant to run and the frame step
//! - [`ParametersConfig`] – incline geometry, initial speed and friction
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   variant: "roll_down"     # or "roll_up"
//!   dt: 0.05                 # frame step in seconds, optional
//!   max_steps: 100000        # driver bound, optional
//!
//! parameters:
//!   angle: 30.0              # degrees, 0..=90
//!   length: 10.0             # incline length, > 0
//!   horizontal_length: 10.0  # roll_down: horizontal run (> 0), roll_up: start distance (>= 0)
//!   v0: 0.0                  # initial speed, 0..=c
//!   friction_incline: 0.1    # 0..=1
//!   friction_horizontal: 0.1 # 0..=1
//! ```
//!
//! [`ScenarioConfig::validate`] rejects anything outside these ranges, so
//! the steppers only ever see valid input.

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::params::{DEFAULT_DT, SPEED_OF_LIGHT};

/// Which stepper to run
/// `variant: "roll_down"` or `variant: "roll_up"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantConfig {
    #[serde(rename = "roll_down")] // slide down the incline, out along the horizontal
    RollDown,

    #[serde(rename = "roll_up")] // approach along the horizontal, roll up the incline
    RollUp,
}

impl std::fmt::Display for VariantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantConfig::RollDown => f.write_str("roll_down"),
            VariantConfig::RollUp => f.write_str("roll_up"),
        }
    }
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_max_steps() -> usize {
    100_000
}

/// Engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub variant: VariantConfig, // stepper to build
    #[serde(default = "default_dt")]
    pub dt: f64, // frame step, seconds
    #[serde(default = "default_max_steps")]
    pub max_steps: usize, // stop driving a run after this many steps
}

/// Physical parameters for a scenario, angle in degrees
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub angle: f64, // incline angle, degrees
    pub length: f64, // incline length
    pub horizontal_length: f64, // horizontal run (roll_down) or initial distance (roll_up)
    pub v0: f64, // initial speed
    pub friction_incline: f64, // friction coefficient on the incline
    pub friction_horizontal: f64, // friction coefficient on the horizontal
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
}

/// Reasons a scenario is rejected before a simulation is built
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("angle must be between 0 and 90 degrees, got {0}")]
    AngleOutOfRange(f64),

    #[error("{field} must be between 0 and 1, got {value}")]
    FrictionOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be greater than 0, got {value}")]
    NonPositiveLength { field: &'static str, value: f64 },

    #[error("initial distance cannot be negative, got {0}")]
    NegativeDistance(f64),

    #[error("initial speed cannot be negative, got {0}")]
    NegativeSpeed(f64),

    #[error("initial speed cannot exceed the speed of light, got {0}")]
    FasterThanLight(f64),

    #[error("time step must be greater than 0, got {0}")]
    InvalidTimeStep(f64),
}

impl ScenarioConfig {
    /// Parse and validate a YAML scenario
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;
        let fields = [
            ("angle", p.angle),
            ("length", p.length),
            ("horizontal_length", p.horizontal_length),
            ("v0", p.v0),
            ("friction_incline", p.friction_incline),
            ("friction_horizontal", p.friction_horizontal),
            ("dt", self.engine.dt),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        if !(0.0..=90.0).contains(&p.angle) {
            return Err(ConfigError::AngleOutOfRange(p.angle));
        }
        for (field, value) in [
            ("friction_incline", p.friction_incline),
            ("friction_horizontal", p.friction_horizontal),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FrictionOutOfRange { field, value });
            }
        }
        if p.length <= 0.0 {
            return Err(ConfigError::NonPositiveLength { field: "length", value: p.length });
        }
        match self.engine.variant {
            VariantConfig::RollDown if p.horizontal_length <= 0.0 => {
                return Err(ConfigError::NonPositiveLength {
                    field: "horizontal_length",
                    value: p.horizontal_length,
                });
            }
            VariantConfig::RollUp if p.horizontal_length < 0.0 => {
                return Err(ConfigError::NegativeDistance(p.horizontal_length));
            }
            _ => {}
        }
        if p.v0 < 0.0 {
            return Err(ConfigError::NegativeSpeed(p.v0));
        }
        if p.v0 > SPEED_OF_LIGHT {
            return Err(ConfigError::FasterThanLight(p.v0));
        }
        if self.engine.dt <= 0.0 {
            return Err(ConfigError::InvalidTimeStep(self.engine.dt));
        }
        Ok(())
    }
}
