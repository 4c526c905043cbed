//! File I/O for buildpatch
//!
//! The patching core only sees decoded text. This crate reads files as UTF-8,
//! writes results back with an atomic write-then-rename, and loads recipe
//! files in whichever serde format their extension names.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;

pub use checksum::compute_content_checksum;
pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use io::{WriteOptions, backup_path, read_text, write_atomic, write_text};
