//! Scalar pose parameters with declared ranges and step sizes.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

/// Rotation limit for the two arm hinges (2π/3).
pub const ARM_PITCH_LIMIT: f32 = 2.0 * FRAC_PI_3;

/// Half-extent of base travel; keeps the base on the 10x10 grid.
pub const BASE_TRAVEL_LIMIT: f32 = 4.5;

/// One degree of freedom of the model's placement.
///
/// Every parameter has a declared `[min, max]` range and a fixed step
/// size; the controller only ever moves a parameter by whole steps and
/// the value is clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseParam {
    /// Base offset along world X.
    BaseX,
    /// Base offset along world Z.
    BaseZ,
    /// Turntable rotation about Y.
    TopYaw,
    /// Lower arm hinge rotation about X.
    Arm1Pitch,
    /// Upper arm hinge rotation about X.
    Arm2Pitch,
    /// Pen rotation about X (always driven by Up/Down).
    PenPitch,
    /// Pen rotation about Y (Left/Right without shift).
    PenYaw,
    /// Pen rotation about Z (Left/Right with shift).
    PenRoll,
}

impl PoseParam {
    /// Number of pose parameters.
    pub const COUNT: usize = 8;

    /// Declared valid range `[min, max]` for this parameter.
    #[must_use]
    pub const fn range(self) -> (f32, f32) {
        match self {
            Self::BaseX | Self::BaseZ => {
                (-BASE_TRAVEL_LIMIT, BASE_TRAVEL_LIMIT)
            }
            Self::TopYaw => (-PI, PI),
            Self::Arm1Pitch | Self::Arm2Pitch => {
                (-ARM_PITCH_LIMIT, ARM_PITCH_LIMIT)
            }
            Self::PenPitch | Self::PenYaw | Self::PenRoll => {
                (-FRAC_PI_2, FRAC_PI_2)
            }
        }
    }

    /// Fixed per-frame step size for this parameter.
    #[must_use]
    pub const fn step_size(self) -> f32 {
        match self {
            Self::BaseX | Self::BaseZ => 0.1,
            _ => 0.05,
        }
    }
}

/// Current values of every pose parameter.
///
/// Mutated only by the input controller; read by the transform composer.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseState {
    values: [f32; PoseParam::COUNT],
}

impl Default for PoseState {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseState {
    /// All parameters at rest (zero).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [0.0; PoseParam::COUNT],
        }
    }

    /// Current value of `param`.
    #[must_use]
    pub const fn get(&self, param: PoseParam) -> f32 {
        self.values[param as usize]
    }

    /// Set `param` directly, clamped to its declared range.
    pub fn set_clamped(&mut self, param: PoseParam, value: f32) {
        let (min, max) = param.range();
        self.values[param as usize] = value.clamp(min, max);
    }

    /// Apply one step in the given direction (`sign` is +1.0 or -1.0),
    /// clamped to the parameter's range. Stepping past a bound is a
    /// silent no-op for the excess, not an error.
    pub fn step(&mut self, param: PoseParam, sign: f32) {
        let next = self.get(param) + sign * param.step_size();
        self.set_clamped(param, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_never_leave_declared_bounds() {
        let mut pose = PoseState::new();
        for _ in 0..1000 {
            pose.step(PoseParam::Arm1Pitch, 1.0);
        }
        assert!(pose.get(PoseParam::Arm1Pitch) <= ARM_PITCH_LIMIT);
        assert!(
            (pose.get(PoseParam::Arm1Pitch) - ARM_PITCH_LIMIT).abs() < 1e-6
        );

        for _ in 0..5000 {
            pose.step(PoseParam::BaseX, -1.0);
        }
        assert!(
            (pose.get(PoseParam::BaseX) + BASE_TRAVEL_LIMIT).abs() < 1e-6
        );
    }

    #[test]
    fn forty_up_steps_accumulate_exactly() {
        let mut pose = PoseState::new();
        for _ in 0..40 {
            pose.step(PoseParam::Arm1Pitch, 1.0);
        }
        let expected = (40.0 * 0.05_f32).min(ARM_PITCH_LIMIT);
        assert!((pose.get(PoseParam::Arm1Pitch) - expected).abs() < 1e-5);
    }

    #[test]
    fn set_clamped_clamps_both_ends() {
        let mut pose = PoseState::new();
        pose.set_clamped(PoseParam::PenRoll, 10.0);
        assert!((pose.get(PoseParam::PenRoll) - FRAC_PI_2).abs() < 1e-6);
        pose.set_clamped(PoseParam::PenRoll, -10.0);
        assert!((pose.get(PoseParam::PenRoll) + FRAC_PI_2).abs() < 1e-6);
    }
}
