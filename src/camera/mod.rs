//! Free orbit camera and its GPU uniform.

pub mod controller;
pub mod core;
