//! Tangible measurement input
//!
//! A physical quadrilateral reports its four side lengths and four interior
//! angles. The adapter rebuilds vertex positions from those numbers and
//! damps sensor noise with a moving average. It knows nothing about the
//! transport the measurements arrived over.

use std::collections::VecDeque;

use quadrilateral_math::Vec2;

/// One reading from a tangible device
///
/// Lengths are in device units, angles in radians and ordered A, B, C, D.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangibleMeasurements {
    pub top_length: f64,
    pub right_length: f64,
    pub bottom_length: f64,
    pub left_length: f64,
    pub angles: [f64; 4],
}

impl TangibleMeasurements {
    /// Build from lengths (top, right, bottom, left) and angles in degrees
    pub fn from_degrees(lengths: [f64; 4], angles: [f64; 4]) -> Self {
        Self {
            top_length: lengths[0],
            right_length: lengths[1],
            bottom_length: lengths[2],
            left_length: lengths[3],
            angles: angles.map(f64::to_radians),
        }
    }

    /// All lengths positive and every value finite
    pub fn is_valid(&self) -> bool {
        let lengths = [self.top_length, self.right_length, self.bottom_length, self.left_length];
        lengths.iter().all(|l| l.is_finite() && *l > 0.0) && self.angles.iter().all(|a| a.is_finite())
    }
}

/// Rebuild A, B, C, D from a measurement, centred on the origin
///
/// A starts at the origin with AB along +x. D hangs off A by the left
/// length at angle A below AB, and C hangs off B by the right length at
/// angle B. The bottom length and angles C and D are redundant for the
/// construction and are only used to report disagreement.
pub fn positions_from_measurements(
    measurements: &TangibleMeasurements,
    unit_scale: f64,
) -> Option<[Vec2; 4]> {
    if !measurements.is_valid() || !(unit_scale.is_finite() && unit_scale > 0.0) {
        return None;
    }

    let [angle_a, angle_b, _, _] = measurements.angles;
    let a = Vec2::ZERO;
    let b = Vec2::new(measurements.top_length, 0.0);
    let d = a + Vec2::new(angle_a.cos(), -angle_a.sin()) * measurements.left_length;
    let c = b + (-Vec2::X).rotated(angle_b) * measurements.right_length;

    let bottom = c.distance(d);
    if (bottom - measurements.bottom_length).abs() > 0.1 * measurements.bottom_length {
        log::debug!(
            "Tangible bottom length {:.3} disagrees with reconstructed {:.3}",
            measurements.bottom_length,
            bottom
        );
    }

    let centroid = (a + b + c + d) / 4.0;
    Some([a, b, c, d].map(|p| (p - centroid) * unit_scale))
}

/// Moving average over the last `window` position sets
#[derive(Clone, Debug)]
pub struct PositionSmoother {
    window: usize,
    history: VecDeque<[Vec2; 4]>,
}

impl PositionSmoother {
    /// A window of 0 is treated as 1 (no smoothing)
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            history: VecDeque::with_capacity(window),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Add a sample and return the average of the retained samples
    pub fn push(&mut self, positions: [Vec2; 4]) -> [Vec2; 4] {
        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(positions);

        let count = self.history.len() as f64;
        let mut sum = [Vec2::ZERO; 4];
        for sample in &self.history {
            for (total, p) in sum.iter_mut().zip(sample) {
                *total += *p;
            }
        }
        sum.map(|total| total / count)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Converts device measurements into smoothed proposed positions
#[derive(Clone, Debug)]
pub struct TangibleAdapter {
    /// Model units per device unit
    pub unit_scale: f64,
    smoother: PositionSmoother,
}

impl TangibleAdapter {
    pub fn new(unit_scale: f64, smoothing_window: usize) -> Self {
        Self {
            unit_scale,
            smoother: PositionSmoother::new(smoothing_window),
        }
    }

    /// Proposed positions for a new reading, or None if it is unusable
    pub fn process(&mut self, measurements: &TangibleMeasurements) -> Option<[Vec2; 4]> {
        match positions_from_measurements(measurements, self.unit_scale) {
            Some(positions) => Some(self.smoother.push(positions)),
            None => {
                log::warn!("Ignoring invalid tangible measurement {:?}", measurements);
                None
            }
        }
    }

    pub fn smoother(&self) -> &PositionSmoother {
        &self.smoother
    }

    /// Forget smoothing history, e.g. after the model is reset
    pub fn reset(&mut self) {
        self.smoother.clear();
    }
}
