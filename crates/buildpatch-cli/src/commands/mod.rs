//! Command implementations for buildpatch

pub mod apply;
pub mod patch;
pub mod report;

pub use apply::run_apply;
pub use patch::{run_render, run_rewrite, run_set_prop, run_strip};
