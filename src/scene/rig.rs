//! Declarative local-transform rules for each part.
//!
//! Every part carries a fixed, ordered list of local operations applied
//! on top of its parent's world matrix. One shared composition routine
//! ([`crate::scene::transform::compose_world`]) executes these lists for
//! both the display and the picking pass, which is what guarantees the
//! two passes stay geometrically identical.

use glam::{Mat4, Quat, Vec3};

use super::pose::{PoseParam, PoseState};
use super::part::Part;

/// Height of the base platform (the turntable sits on top of it).
pub const BASE_HEIGHT: f32 = 0.5;
/// Height of the turntable cylinder.
pub const TOP_HEIGHT: f32 = 0.4;
/// Length of the lower arm segment.
pub const ARM1_LENGTH: f32 = 1.6;
/// Gap between the elbow center and the upper arm's lower end.
pub const ARM2_LIFT: f32 = 0.2;
/// Length of the upper arm segment.
pub const ARM2_LENGTH: f32 = 1.4;
/// Rest bias of the lower arm hinge (leans slightly back at pose zero).
pub const ARM1_REST_PITCH: f32 = -std::f32::consts::FRAC_PI_8;

/// A rotation axis for [`LocalOp::Rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// World/local X axis.
    X,
    /// World/local Y axis.
    Y,
    /// World/local Z axis.
    Z,
}

/// A scalar input to a local operation: a constant, a pose parameter, or
/// a pose parameter with a constant bias (e.g. rest angle + user delta).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Fixed value.
    Const(f32),
    /// Current value of a pose parameter.
    Pose(PoseParam),
    /// Pose parameter plus a constant bias.
    Biased(PoseParam, f32),
}

impl Scalar {
    /// Evaluate against the current pose.
    #[must_use]
    pub const fn eval(self, pose: &PoseState) -> f32 {
        match self {
            Self::Const(v) => v,
            Self::Pose(p) => pose.get(p),
            Self::Biased(p, bias) => pose.get(p) + bias,
        }
    }
}

/// One local transform operation. Order within a part's list is fixed
/// and meaningful: translate-then-rotate is not rotate-then-translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalOp {
    /// Translate by a 3-vector (components may be pose-driven).
    Translate([Scalar; 3]),
    /// Rotate by an angle (radians) about a fixed axis.
    Rotate(Axis, Scalar),
    /// Scale by a constant 3-vector.
    Scale([f32; 3]),
}

impl LocalOp {
    /// The operation's matrix under the current pose.
    #[must_use]
    pub fn matrix(self, pose: &PoseState) -> Mat4 {
        match self {
            Self::Translate([x, y, z]) => Mat4::from_translation(Vec3::new(
                x.eval(pose),
                y.eval(pose),
                z.eval(pose),
            )),
            Self::Rotate(axis, angle) => {
                let angle = angle.eval(pose);
                let quat = match axis {
                    Axis::X => Quat::from_rotation_x(angle),
                    Axis::Y => Quat::from_rotation_y(angle),
                    Axis::Z => Quat::from_rotation_z(angle),
                };
                Mat4::from_quat(quat)
            }
            Self::Scale([x, y, z]) => {
                Mat4::from_scale(Vec3::new(x, y, z))
            }
        }
    }
}

const ZERO: Scalar = Scalar::Const(0.0);

/// The fixed local-operation list for `part`.
///
/// Scale appears only on leaf parts so it never skews a child's frame.
#[must_use]
pub const fn local_ops(part: Part) -> &'static [LocalOp] {
    match part {
        Part::Base => &[LocalOp::Translate([
            Scalar::Pose(PoseParam::BaseX),
            ZERO,
            Scalar::Pose(PoseParam::BaseZ),
        ])],
        Part::Top => &[
            LocalOp::Translate([ZERO, Scalar::Const(BASE_HEIGHT), ZERO]),
            LocalOp::Rotate(Axis::Y, Scalar::Pose(PoseParam::TopYaw)),
        ],
        Part::Arm1 => &[
            LocalOp::Translate([ZERO, Scalar::Const(TOP_HEIGHT), ZERO]),
            LocalOp::Rotate(
                Axis::X,
                Scalar::Biased(PoseParam::Arm1Pitch, ARM1_REST_PITCH),
            ),
        ],
        Part::Joint => &[LocalOp::Translate([
            ZERO,
            Scalar::Const(ARM1_LENGTH),
            ZERO,
        ])],
        Part::Arm2 => &[
            LocalOp::Rotate(Axis::X, Scalar::Pose(PoseParam::Arm2Pitch)),
            LocalOp::Translate([ZERO, Scalar::Const(ARM2_LIFT), ZERO]),
        ],
        Part::Pen => &[
            LocalOp::Translate([ZERO, Scalar::Const(ARM2_LENGTH), ZERO]),
            LocalOp::Rotate(Axis::Y, Scalar::Pose(PoseParam::PenYaw)),
            LocalOp::Rotate(Axis::X, Scalar::Pose(PoseParam::PenPitch)),
            LocalOp::Rotate(Axis::Z, Scalar::Pose(PoseParam::PenRoll)),
        ],
        Part::Button => &[
            LocalOp::Translate([
                ZERO,
                Scalar::Const(0.55),
                Scalar::Const(0.12),
            ]),
            LocalOp::Scale([0.5, 0.5, 0.5]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_part_has_ops() {
        for part in Part::ALL {
            assert!(!local_ops(part).is_empty());
        }
    }

    #[test]
    fn scale_only_on_leaves() {
        let has_child = |part: Part| {
            Part::ALL.iter().any(|p| p.parent() == Some(part))
        };
        for part in Part::ALL {
            let scaled = local_ops(part)
                .iter()
                .any(|op| matches!(op, LocalOp::Scale(_)));
            if scaled {
                assert!(!has_child(part), "{} scales a child frame", part.label());
            }
        }
    }

    #[test]
    fn op_order_matters() {
        let pose = PoseState::new();
        let translate =
            LocalOp::Translate([Scalar::Const(1.0), ZERO, ZERO]).matrix(&pose);
        let rotate = LocalOp::Rotate(
            Axis::Y,
            Scalar::Const(std::f32::consts::FRAC_PI_2),
        )
        .matrix(&pose);
        let a = translate * rotate;
        let b = rotate * translate;
        assert_ne!(a, b);
    }

    #[test]
    fn biased_scalar_adds_rest_angle() {
        let mut pose = PoseState::new();
        pose.set_clamped(PoseParam::Arm1Pitch, 0.2);
        let s = Scalar::Biased(PoseParam::Arm1Pitch, ARM1_REST_PITCH);
        assert!((s.eval(&pose) - (0.2 + ARM1_REST_PITCH)).abs() < 1e-6);
    }
}
