// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D editor for a seven-part articulated model, built on
//! wgpu.
//!
//! The model is a small robot rig (base, turntable, two arm segments,
//! a pen, plus a rigid joint and button) posed over a reference grid.
//! Clicking a part selects it via a GPU color-id picking pass that
//! re-renders the scene offscreen with part ids in the red channel, so
//! selection matches the displayed pixels exactly. Arrow keys drive
//! the active part's pose parameter, or orbit the camera.
//!
//! # Key entry points
//!
//! - [`engine::Editor`] - the editor engine driven by the event loop
//! - [`scene::pose::PoseState`] - the clamped pose parameter vector
//! - [`scene::transform`] - hierarchical world-transform composition
//! - [`renderer::picking`] - the color-id picking pass and decoder

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod renderer;
pub mod scene;
