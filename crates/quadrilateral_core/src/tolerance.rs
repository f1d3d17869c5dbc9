//! Tolerance intervals for "equal within tolerance" comparisons
//!
//! Strict tolerances make target shapes unreachable with imprecise input,
//! loose ones make the detector report shapes that aren't there. Base
//! intervals are scaled per [`InputMode`]: reduced-step input lands on a
//! finer grid so it gets tighter intervals, and a tangible device is noisy
//! so it gets looser ones.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use quadrilateral_math::{equals_epsilon, line_direction_difference};
use serde::{Serialize, Deserialize};

/// How positions are currently being proposed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputMode {
    /// Mouse or keyboard at the normal grid spacing
    #[default]
    Standard,
    /// Keyboard or drag with the fine grid (shift held)
    ReducedStep,
    /// Positions arriving from a tangible measurement device
    Device,
}

impl InputMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Some(InputMode::Standard),
            "reduced" | "reduced-step" | "fine" => Some(InputMode::ReducedStep),
            "device" | "tangible" => Some(InputMode::Device),
            _ => None,
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Standard => f.write_str("standard"),
            InputMode::ReducedStep => f.write_str("reduced-step"),
            InputMode::Device => f.write_str("device"),
        }
    }
}

/// Base tolerance intervals and per-mode scale factors
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToleranceIntervals {
    /// Angle-vs-angle and tilt-vs-tilt margin (radians)
    pub inter_angle: f64,
    /// Length-vs-length margin (model units)
    pub inter_length: f64,
    /// Margin against fixed angles such as π/2 and π (radians)
    pub static_angle: f64,
    /// Multiplier in reduced-step mode, in [0, 1]
    pub reduced_step_scale: f64,
    /// Multiplier in device mode, >= 1
    pub device_scale: f64,
}

impl Default for ToleranceIntervals {
    fn default() -> Self {
        Self {
            inter_angle: 1e-3,
            inter_length: 0.01,
            static_angle: 1e-3,
            reduced_step_scale: 0.25,
            device_scale: 5.0,
        }
    }
}

impl ToleranceIntervals {
    /// Check every interval and scale factor lies in its allowed range
    pub fn validate(&self) -> Result<(), ToleranceError> {
        for (name, value) in [("inter_angle", self.inter_angle), ("static_angle", self.static_angle)] {
            if !(0.0..=TAU).contains(&value) {
                return Err(ToleranceError::AngleOutOfRange { name, value });
            }
        }
        if !self.inter_length.is_finite() || self.inter_length < 0.0 {
            return Err(ToleranceError::NegativeLength(self.inter_length));
        }
        if !(0.0..=1.0).contains(&self.reduced_step_scale) {
            return Err(ToleranceError::ScaleOutOfRange {
                name: "reduced_step_scale",
                value: self.reduced_step_scale,
            });
        }
        if !self.device_scale.is_finite() || self.device_scale < 1.0 {
            return Err(ToleranceError::ScaleOutOfRange {
                name: "device_scale",
                value: self.device_scale,
            });
        }
        Ok(())
    }

    /// Scale factor applied to every interval in `mode`
    pub fn scale_for(&self, mode: InputMode) -> f64 {
        match mode {
            InputMode::Standard => 1.0,
            InputMode::ReducedStep => self.reduced_step_scale,
            InputMode::Device => self.device_scale,
        }
    }

    /// Effective tolerances for `mode`
    pub fn effective(&self, mode: InputMode) -> Tolerances {
        let scale = self.scale_for(mode);
        Tolerances {
            angle: self.inter_angle * scale,
            length: self.inter_length * scale,
            static_angle: self.static_angle * scale,
        }
    }
}

/// Effective tolerances after mode scaling
///
/// All comparisons are `|a - b| <= tolerance` and therefore symmetric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub angle: f64,
    pub length: f64,
    pub static_angle: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        ToleranceIntervals::default().effective(InputMode::Standard)
    }
}

impl Tolerances {
    /// Two vertex angles are equal
    #[inline]
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        equals_epsilon(a, b, self.angle)
    }

    /// Two side lengths are equal
    #[inline]
    pub fn lengths_equal(&self, a: f64, b: f64) -> bool {
        equals_epsilon(a, b, self.length)
    }

    /// An angle equals a fixed target angle
    #[inline]
    pub fn equals_static_angle(&self, angle: f64, target: f64) -> bool {
        equals_epsilon(angle, target, self.static_angle)
    }

    #[inline]
    pub fn is_right_angle(&self, angle: f64) -> bool {
        self.equals_static_angle(angle, FRAC_PI_2)
    }

    /// The angle is π, i.e. the vertex sits on the line through its neighbours
    #[inline]
    pub fn is_flat_angle(&self, angle: f64) -> bool {
        self.equals_static_angle(angle, PI)
    }

    /// Reflex and not flat
    #[inline]
    pub fn is_reflex_angle(&self, angle: f64) -> bool {
        angle > PI && !self.is_flat_angle(angle)
    }

    /// Two side tilts describe parallel lines
    #[inline]
    pub fn tilts_parallel(&self, a: f64, b: f64) -> bool {
        line_direction_difference(a, b) <= self.angle
    }
}

/// Invalid tolerance configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ToleranceError {
    /// Angle interval outside [0, 2π]
    AngleOutOfRange { name: &'static str, value: f64 },
    /// Length interval negative or not finite
    NegativeLength(f64),
    /// Scale factor outside its range
    ScaleOutOfRange { name: &'static str, value: f64 },
}

impl fmt::Display for ToleranceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToleranceError::AngleOutOfRange { name, value } => {
                write!(f, "Tolerance '{}' must be within [0, 2π], got {}", name, value)
            }
            ToleranceError::NegativeLength(value) => {
                write!(f, "Length tolerance must be finite and non-negative, got {}", value)
            }
            ToleranceError::ScaleOutOfRange { name, value } => {
                write!(f, "Scale factor '{}' out of range: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ToleranceError {}
