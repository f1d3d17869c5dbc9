//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`QUAD_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use quadrilateral_core::{
    Bounds2, InputMode, ShapeConstraints, ShapeModelConfig, ToleranceIntervals, Vec2,
    DEFAULT_POSITIONS,
};
use quadrilateral_input::{TangibleAdapter, VertexController};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shape bounds, validity limits and default layout
    #[serde(default)]
    pub shape: ShapeConfig,
    /// Tolerance intervals for equality comparisons
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    /// Keyboard, drag and tangible input
    #[serde(default)]
    pub input: InputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`QUAD_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // QUAD_TOLERANCE__DEVICE_SCALE=8 -> tolerance.device_scale = 8.0
        figment = figment.merge(Env::prefixed("QUAD_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Model configuration built from the shape and tolerance sections
    ///
    /// Values are validated by `ShapeModel::new`, not here.
    pub fn to_shape_model_config(&self) -> ShapeModelConfig {
        ShapeModelConfig {
            constraints: self.shape.constraints(),
            tolerances: self.tolerance.intervals(),
            default_positions: self.shape.default_positions(),
        }
    }

    /// Input mode the session starts in
    pub fn start_mode(&self) -> Result<InputMode, ConfigError> {
        InputMode::parse(&self.input.start_mode).ok_or_else(|| {
            ConfigError::invalid(format!("unknown input mode '{}'", self.input.start_mode))
        })
    }

    pub fn vertex_controller(&self) -> VertexController {
        VertexController::new()
            .with_grid_spacing(self.input.grid_spacing)
            .with_reduced_step_spacing(self.input.reduced_step_spacing)
            .with_snapping(self.input.snap_to_grid)
    }

    pub fn tangible_adapter(&self) -> TangibleAdapter {
        TangibleAdapter::new(self.input.tangible_unit_scale, self.input.smoothing_window)
    }
}

/// Shape configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Lower-left corner of the model bounds [x, y]
    pub bounds_min: [f64; 2],
    /// Upper-right corner of the model bounds [x, y]
    pub bounds_max: [f64; 2],
    /// Shortest allowed side
    pub min_side_length: f64,
    /// Smallest allowed interior angle in degrees
    pub min_angle_degrees: f64,
    /// Closest a vertex may come to a side it isn't part of
    pub vertex_clearance: f64,
    /// Positions of A, B, C, D at start and after reset
    pub default_positions: [[f64; 2]; 4],
}

impl Default for ShapeConfig {
    fn default() -> Self {
        let constraints = ShapeConstraints::default();
        Self {
            bounds_min: constraints.bounds.min.into(),
            bounds_max: constraints.bounds.max.into(),
            min_side_length: constraints.min_side_length,
            min_angle_degrees: constraints.min_angle.to_degrees(),
            vertex_clearance: constraints.vertex_clearance,
            default_positions: DEFAULT_POSITIONS.map(Into::into),
        }
    }
}

impl ShapeConfig {
    pub fn constraints(&self) -> ShapeConstraints {
        ShapeConstraints {
            bounds: Bounds2::new(self.bounds_min.into(), self.bounds_max.into()),
            min_side_length: self.min_side_length,
            min_angle: self.min_angle_degrees.to_radians(),
            vertex_clearance: self.vertex_clearance,
        }
    }

    pub fn default_positions(&self) -> [Vec2; 4] {
        self.default_positions.map(Vec2::from)
    }
}

/// Tolerance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Angle-vs-angle and parallelism margin (radians)
    pub inter_angle: f64,
    /// Length-vs-length margin (model units)
    pub inter_length: f64,
    /// Margin against right and flat angles (radians)
    pub static_angle: f64,
    /// Multiplier in reduced-step mode, in [0, 1]
    pub reduced_step_scale: f64,
    /// Multiplier in device mode, >= 1
    pub device_scale: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        let intervals = ToleranceIntervals::default();
        Self {
            inter_angle: intervals.inter_angle,
            inter_length: intervals.inter_length,
            static_angle: intervals.static_angle,
            reduced_step_scale: intervals.reduced_step_scale,
            device_scale: intervals.device_scale,
        }
    }
}

impl ToleranceConfig {
    pub fn intervals(&self) -> ToleranceIntervals {
        ToleranceIntervals {
            inter_angle: self.inter_angle,
            inter_length: self.inter_length,
            static_angle: self.static_angle,
            reduced_step_scale: self.reduced_step_scale,
            device_scale: self.device_scale,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Keyboard step and drag snapping grid
    pub grid_spacing: f64,
    /// Grid in reduced-step mode
    pub reduced_step_spacing: f64,
    /// Snap drags and steps to the grid
    pub snap_to_grid: bool,
    /// Model units per tangible device unit
    pub tangible_unit_scale: f64,
    /// Tangible readings averaged together (1 = no smoothing)
    pub smoothing_window: usize,
    /// Input mode at start (standard, reduced, device)
    pub start_mode: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            grid_spacing: 0.25,
            reduced_step_spacing: 0.0625,
            snap_to_grid: true,
            tangible_unit_scale: 0.05,
            smoothing_window: 5,
            start_mode: "standard".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Include the raw condition mask in reports
    pub show_conditions: bool,
    /// Print a report after every accepted change
    pub report_changes: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_conditions: false,
            report_changes: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrilateral_core::ShapeModel;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.input.grid_spacing, 0.25);
        assert_eq!(config.tolerance.device_scale, 5.0);
        assert_eq!(config.start_mode().unwrap(), InputMode::Standard);
    }

    #[test]
    fn test_defaults_match_model_defaults() {
        let config = AppConfig::default().to_shape_model_config();
        let model_default = ShapeModelConfig::default();
        assert_eq!(config.default_positions, model_default.default_positions);
        assert_eq!(config.tolerances, model_default.tolerances);
        assert_eq!(config.constraints.bounds, model_default.constraints.bounds);
        assert!((config.constraints.min_angle - model_default.constraints.min_angle).abs() < 1e-12);
        assert!(ShapeModel::new(config).is_ok());
    }

    #[test]
    fn test_unknown_start_mode() {
        let mut config = AppConfig::default();
        config.input.start_mode = "telepathy".to_string();
        let err = config.start_mode().unwrap_err();
        assert!(err.to_string().contains("telepathy"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("inter_length"));
        assert!(toml.contains("grid_spacing"));
        assert!(toml.contains("log_level"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[tolerance]\ninter_angle = 0.01\ninter_length = 0.02\nstatic_angle = 0.01\nreduced_step_scale = 0.5\ndevice_scale = 2.0\n").unwrap();
        assert_eq!(config.tolerance.device_scale, 2.0);
        assert_eq!(config.input.smoothing_window, 5);
    }
}
