//! GPU plumbing: device/surface context and buffer upload helpers.

pub mod mesh;
pub mod render_context;
