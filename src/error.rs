//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::renderer::picking::PickingError;

/// Errors produced by the armature crate.
#[derive(Debug)]
pub enum ArmatureError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Pick readback failure.
    Pick(PickingError),
}

impl fmt::Display for ArmatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Pick(e) => write!(f, "pick error: {e}"),
        }
    }
}

impl std::error::Error for ArmatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Pick(e) => Some(e),
        }
    }
}

impl From<RenderContextError> for ArmatureError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<PickingError> for ArmatureError {
    fn from(e: PickingError) -> Self {
        Self::Pick(e)
    }
}
