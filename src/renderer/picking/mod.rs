//! GPU color-id picking: id encoding plus the offscreen pass.

pub mod pick_map;
pub mod pipeline;

pub use pick_map::{PickTarget, BACKGROUND_CODE};
pub use pipeline::{Picking, PickingError};
