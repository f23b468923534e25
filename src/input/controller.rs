//! The input-to-pose state machine.
//!
//! Replaces the ambient-global keyboard flags of the classic picking
//! demo with an explicit controller: which target is active (`Mode`), a
//! direction latched from key-down to key-up, and a shift modifier. One
//! clamped step is applied per frame while a direction is held.

use crate::camera::controller::ORBIT_STEP;
use crate::scene::part::Part;
use crate::scene::pose::{PoseParam, PoseState};

/// The target currently receiving directional input.
///
/// Modes are mutually exclusive; selecting one always clears any other.
/// `Joint` and `Button` are pickable but rigid, so they have no mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No target: directional keys do nothing.
    #[default]
    None,
    /// Translate the base across the grid plane.
    Base,
    /// Rotate the turntable.
    Top,
    /// Rotate the lower arm hinge.
    Arm1,
    /// Rotate the upper arm hinge.
    Arm2,
    /// Rotate the pen (three axes; see [`PoseController::apply_step`]).
    Pen,
    /// Orbit the camera (no part selection, no clamping).
    Camera,
}

impl Mode {
    /// The part this mode edits, if any (`None` and `Camera` edit none).
    #[must_use]
    pub const fn part(self) -> Option<Part> {
        match self {
            Self::Base => Some(Part::Base),
            Self::Top => Some(Part::Top),
            Self::Arm1 => Some(Part::Arm1),
            Self::Arm2 => Some(Part::Arm2),
            Self::Pen => Some(Part::Pen),
            Self::None | Self::Camera => None,
        }
    }

    /// The editing mode for a picked part. Rigid parts (`Joint`,
    /// `Button`) map to `None`, so picking one clears whatever mode
    /// was active.
    #[must_use]
    pub const fn for_part(part: Part) -> Self {
        match part {
            Part::Base => Self::Base,
            Part::Top => Self::Top,
            Part::Arm1 => Self::Arm1,
            Part::Arm2 => Self::Arm2,
            Part::Pen => Self::Pen,
            Part::Joint | Part::Button => Self::None,
        }
    }
}

/// A directional key latched from key-down until key-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// No directional key held.
    #[default]
    None,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
}

impl Direction {
    /// Map a physical key string (`winit::keyboard::KeyCode` debug
    /// format) to a direction, if it is an arrow key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            _ => None,
        }
    }
}

/// A camera orbit delta produced by one frame of camera-mode input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitDelta {
    /// Azimuth change (radians).
    pub azimuth: f32,
    /// Elevation change (radians).
    pub elevation: f32,
}

/// Explicit input state: active mode, latched direction, shift modifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoseController {
    mode: Mode,
    direction: Direction,
    shift: bool,
}

impl PoseController {
    /// Controller with no active mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The currently latched direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.shift
    }

    /// Toggle `mode`: pressing the active mode's key deselects it;
    /// pressing any other mode key switches to that mode (modes are
    /// mutually exclusive). Returns the resulting mode.
    pub fn toggle_mode(&mut self, mode: Mode) -> Mode {
        self.mode = if self.mode == mode { Mode::None } else { mode };
        self.mode
    }

    /// Force the mode directly (used when picking activates a part).
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// A directional key went down: latch it.
    pub fn press_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// A key went up. Any non-modifier release clears the direction
    /// latch; shift is exempt so it can be held and dropped mid-hold
    /// without stopping motion.
    pub fn release_key(&mut self, key: &str) {
        if !key.starts_with("Shift") {
            self.direction = Direction::None;
        }
    }

    /// Update the shift modifier (independent of the direction latch).
    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }

    /// Apply exactly one step of the active mode to the pose, clamped
    /// to the target parameter's range. Returns a camera orbit delta
    /// instead when the camera mode is active (orbit angles are free,
    /// so they are not part of [`PoseState`]).
    ///
    /// Pen mode keeps the classic asymmetry: Up/Down always drives
    /// pitch; Left/Right drives yaw, or roll while shift is held.
    pub fn apply_step(&self, pose: &mut PoseState) -> Option<OrbitDelta> {
        let dir = self.direction;
        if dir == Direction::None {
            return None;
        }
        match self.mode {
            Mode::None => None,
            Mode::Base => {
                match dir {
                    Direction::Left => pose.step(PoseParam::BaseX, -1.0),
                    Direction::Right => pose.step(PoseParam::BaseX, 1.0),
                    Direction::Up => pose.step(PoseParam::BaseZ, -1.0),
                    Direction::Down => pose.step(PoseParam::BaseZ, 1.0),
                    Direction::None => {}
                }
                None
            }
            Mode::Top => {
                match dir {
                    Direction::Left => pose.step(PoseParam::TopYaw, 1.0),
                    Direction::Right => pose.step(PoseParam::TopYaw, -1.0),
                    _ => {}
                }
                None
            }
            Mode::Arm1 => {
                match dir {
                    Direction::Up => pose.step(PoseParam::Arm1Pitch, 1.0),
                    Direction::Down => pose.step(PoseParam::Arm1Pitch, -1.0),
                    _ => {}
                }
                None
            }
            Mode::Arm2 => {
                match dir {
                    Direction::Up => pose.step(PoseParam::Arm2Pitch, 1.0),
                    Direction::Down => pose.step(PoseParam::Arm2Pitch, -1.0),
                    _ => {}
                }
                None
            }
            Mode::Pen => {
                let lateral = if self.shift {
                    PoseParam::PenRoll
                } else {
                    PoseParam::PenYaw
                };
                match dir {
                    Direction::Up => pose.step(PoseParam::PenPitch, 1.0),
                    Direction::Down => pose.step(PoseParam::PenPitch, -1.0),
                    Direction::Left => pose.step(lateral, 1.0),
                    Direction::Right => pose.step(lateral, -1.0),
                    Direction::None => {}
                }
                None
            }
            Mode::Camera => {
                let (azimuth, elevation) = match dir {
                    Direction::Left => (ORBIT_STEP, 0.0),
                    Direction::Right => (-ORBIT_STEP, 0.0),
                    Direction::Up => (0.0, ORBIT_STEP),
                    Direction::Down => (0.0, -ORBIT_STEP),
                    Direction::None => (0.0, 0.0),
                };
                Some(OrbitDelta { azimuth, elevation })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_mutually_exclusive() {
        let mut ctl = PoseController::new();
        assert_eq!(ctl.toggle_mode(Mode::Arm1), Mode::Arm1);
        assert_eq!(ctl.toggle_mode(Mode::Arm2), Mode::Arm2);
        assert_eq!(ctl.mode(), Mode::Arm2);
    }

    #[test]
    fn same_mode_key_toggles_off() {
        let mut ctl = PoseController::new();
        assert_eq!(ctl.toggle_mode(Mode::Pen), Mode::Pen);
        assert_eq!(ctl.toggle_mode(Mode::Pen), Mode::None);
    }

    #[test]
    fn direction_latches_until_release() {
        let mut ctl = PoseController::new();
        let _ = ctl.toggle_mode(Mode::Arm1);
        ctl.press_direction(Direction::Up);

        let mut pose = PoseState::new();
        for _ in 0..3 {
            let _ = ctl.apply_step(&mut pose);
        }
        assert!((pose.get(PoseParam::Arm1Pitch) - 0.15).abs() < 1e-6);

        ctl.release_key("ArrowUp");
        let _ = ctl.apply_step(&mut pose);
        assert!((pose.get(PoseParam::Arm1Pitch) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn forty_frames_of_up_move_arm1_by_two() {
        let mut ctl = PoseController::new();
        let _ = ctl.toggle_mode(Mode::Arm1);
        ctl.press_direction(Direction::Up);

        let mut pose = PoseState::new();
        for _ in 0..40 {
            let _ = ctl.apply_step(&mut pose);
        }
        assert!((pose.get(PoseParam::Arm1Pitch) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn pen_modifier_swaps_the_lateral_axis() {
        let mut ctl = PoseController::new();
        let _ = ctl.toggle_mode(Mode::Pen);
        let mut pose = PoseState::new();

        ctl.press_direction(Direction::Left);
        let _ = ctl.apply_step(&mut pose);
        assert!(pose.get(PoseParam::PenYaw) > 0.0);
        assert!(pose.get(PoseParam::PenRoll).abs() < 1e-6);

        ctl.set_shift(true);
        let _ = ctl.apply_step(&mut pose);
        assert!(pose.get(PoseParam::PenRoll) > 0.0);

        // Up/Down drives pitch regardless of the modifier.
        ctl.press_direction(Direction::Up);
        let _ = ctl.apply_step(&mut pose);
        assert!(pose.get(PoseParam::PenPitch) > 0.0);
    }

    #[test]
    fn camera_mode_returns_an_orbit_delta() {
        let mut ctl = PoseController::new();
        let _ = ctl.toggle_mode(Mode::Camera);
        ctl.press_direction(Direction::Right);

        let mut pose = PoseState::new();
        let before = pose.clone();
        let delta = ctl.apply_step(&mut pose);
        assert_eq!(
            delta,
            Some(OrbitDelta {
                azimuth: -ORBIT_STEP,
                elevation: 0.0
            })
        );
        assert_eq!(pose, before);
    }

    #[test]
    fn no_mode_means_no_motion() {
        let ctl = {
            let mut c = PoseController::new();
            c.press_direction(Direction::Up);
            c
        };
        let mut pose = PoseState::new();
        assert_eq!(ctl.apply_step(&mut pose), None);
        assert_eq!(pose, PoseState::new());
    }

    #[test]
    fn any_non_modifier_release_clears_the_latch() {
        let mut ctl = PoseController::new();
        let _ = ctl.toggle_mode(Mode::Arm1);
        ctl.press_direction(Direction::Up);

        // Releasing a mode key while the arrow is still down must stop
        // the motion, not leave the part stepping forever.
        ctl.release_key("KeyT");
        assert_eq!(ctl.direction(), Direction::None);

        let mut pose = PoseState::new();
        assert_eq!(ctl.apply_step(&mut pose), None);
        assert_eq!(pose, PoseState::new());
    }

    #[test]
    fn shift_release_keeps_the_latch() {
        let mut ctl = PoseController::new();
        let _ = ctl.toggle_mode(Mode::Pen);
        ctl.press_direction(Direction::Left);

        ctl.release_key("ShiftLeft");
        assert_eq!(ctl.direction(), Direction::Left);
    }

    #[test]
    fn picked_parts_map_to_their_editing_mode() {
        assert_eq!(Mode::for_part(Part::Base), Mode::Base);
        assert_eq!(Mode::for_part(Part::Top), Mode::Top);
        assert_eq!(Mode::for_part(Part::Arm1), Mode::Arm1);
        assert_eq!(Mode::for_part(Part::Arm2), Mode::Arm2);
        assert_eq!(Mode::for_part(Part::Pen), Mode::Pen);
    }

    #[test]
    fn picking_a_rigid_part_clears_the_active_mode() {
        let mut ctl = PoseController::new();
        let _ = ctl.toggle_mode(Mode::Arm1);

        ctl.set_mode(Mode::for_part(Part::Joint));
        assert_eq!(ctl.mode(), Mode::None);

        let _ = ctl.toggle_mode(Mode::Pen);
        ctl.set_mode(Mode::for_part(Part::Button));
        assert_eq!(ctl.mode(), Mode::None);
    }

    #[test]
    fn arrow_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("KeyW"), None);
    }
}
