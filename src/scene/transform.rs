//! World-matrix composition for the part hierarchy.

use glam::Mat4;

use super::part::Part;
use super::pose::PoseState;
use super::rig;

/// Per-part world matrices for one frame.
///
/// Recomputed once per frame in parent-before-child order and shared by
/// the display and picking passes; both passes consuming the same
/// snapshot is what makes picking geometrically exact.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldTransforms {
    mats: [Mat4; Part::COUNT],
}

impl WorldTransforms {
    /// The world matrix of `part`.
    #[must_use]
    pub fn get(&self, part: Part) -> Mat4 {
        self.mats[part.index()]
    }
}

/// Compose every part's world matrix from the current pose.
///
/// Pure function: visits [`Part::ALL`] in topological order and applies
/// each part's fixed local-operation list to its parent's already
/// computed world matrix (identity for the root), so
/// `world[part] = world[parent] * local(part, pose)` holds for every
/// part. Pose values are always in range (the controller clamps first),
/// so there is no failure mode.
#[must_use]
pub fn compose_world(pose: &PoseState) -> WorldTransforms {
    let mut mats = [Mat4::IDENTITY; Part::COUNT];
    for part in Part::ALL {
        let mut m = part
            .parent()
            .map_or(Mat4::IDENTITY, |parent| mats[parent.index()]);
        for op in rig::local_ops(part) {
            m *= op.matrix(pose);
        }
        mats[part.index()] = m;
    }
    WorldTransforms { mats }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4Swizzles};

    use super::*;
    use crate::scene::pose::PoseParam;

    /// Display and picking pass both call `compose_world` on the same
    /// pose; the results must be bit-for-bit identical.
    #[test]
    fn same_pose_yields_identical_matrices() {
        let mut pose = PoseState::new();
        pose.set_clamped(PoseParam::BaseX, 1.3);
        pose.set_clamped(PoseParam::TopYaw, 0.7);
        pose.set_clamped(PoseParam::Arm1Pitch, -0.4);
        pose.set_clamped(PoseParam::PenRoll, 0.2);

        let display = compose_world(&pose);
        let picking = compose_world(&pose);
        for part in Part::ALL {
            assert_eq!(display.get(part), picking.get(part));
        }
    }

    #[test]
    fn child_world_is_parent_times_local() {
        let mut pose = PoseState::new();
        pose.set_clamped(PoseParam::Arm2Pitch, 0.9);
        pose.set_clamped(PoseParam::BaseZ, -2.0);

        let world = compose_world(&pose);
        for part in Part::ALL {
            let parent = part
                .parent()
                .map_or(Mat4::IDENTITY, |p| world.get(p));
            let mut local = Mat4::IDENTITY;
            for op in rig::local_ops(part) {
                local *= op.matrix(&pose);
            }
            assert_eq!(world.get(part), parent * local);
        }
    }

    #[test]
    fn base_offset_carries_to_every_descendant() {
        let mut pose = PoseState::new();
        pose.set_clamped(PoseParam::BaseX, 2.5);
        let world = compose_world(&pose);

        let rest = compose_world(&PoseState::new());
        for part in Part::ALL {
            let moved = world.get(part).transform_point3(Vec3::ZERO);
            let still = rest.get(part).transform_point3(Vec3::ZERO);
            assert!((moved.x - still.x - 2.5).abs() < 1e-5);
            assert!((moved.y - still.y).abs() < 1e-5);
        }
    }

    #[test]
    fn turntable_yaw_spins_the_arm_but_not_the_base() {
        let mut pose = PoseState::new();
        pose.set_clamped(PoseParam::TopYaw, std::f32::consts::FRAC_PI_2);
        let world = compose_world(&pose);
        let rest = compose_world(&PoseState::new());

        assert_eq!(world.get(Part::Base), rest.get(Part::Base));
        // The arm's X axis should now point along roughly -Z.
        let x_axis = world.get(Part::Arm1).col(0).xyz();
        assert!(x_axis.z < -0.9);
    }
}
