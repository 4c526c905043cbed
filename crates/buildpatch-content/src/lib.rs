//! Text patching for Android build configuration files
//!
//! Operates on already-decoded text: line-targeted rewrites for files such as
//! `gradle.properties`, marker-delimited block removal for `build.gradle`, and
//! placeholder templates for regenerating whole build scripts. Nothing in this
//! crate touches the filesystem.

pub mod block;
pub mod diff;
pub mod document;
pub mod edit;
pub mod error;
pub mod recipe;
pub mod rule;
pub mod template;

pub use block::{BlockRemoval, BlockSpan, remove_marked_block, remove_marked_block_with_fallbacks};
pub use diff::{TextChanges, unified_diff};
pub use document::Document;
pub use edit::{Edit, EditKind};
pub use error::{Error, Result};
pub use recipe::{FilePatch, MatcherSpec, Patch, Recipe, RuleSpec, StartMarkers, TemplateSource};
pub use rule::{LineAction, LineMatcher, LineRule, apply_line_rules, property_rule};
pub use template::{BUILTIN_TEMPLATES, Template, dedent};
