//! Scene model: the articulated rig, its pose, and selection state.

pub mod mesh_gen;
pub mod part;
pub mod pose;
pub mod rig;
pub mod selection;
pub mod transform;
