//! Edit records for applied changes.

use serde::Serialize;
use std::ops::Range;

/// The kind of edit that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EditKind {
    /// A single line replaced by zero or more lines.
    LineRewrite {
        /// Zero-based index of the line in the source document.
        line: usize,
    },
    /// A marker-delimited span removed, keeping the end marker.
    BlockRemoval {
        /// The start candidate that anchored the removal.
        start_marker: String,
        end_marker: String,
    },
    /// The whole text replaced by a rendered template.
    Render,
}

/// A change applied to document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    #[serde(flatten)]
    pub kind: EditKind,
    /// Byte range in the source text that was replaced.
    pub span: Range<usize>,
    pub old_content: String,
    pub new_content: String,
}

impl Edit {
    /// Create a line rewrite edit.
    pub fn line_rewrite(
        line: usize,
        span: Range<usize>,
        old_content: impl Into<String>,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::LineRewrite { line },
            span,
            old_content: old_content.into(),
            new_content: new_content.into(),
        }
    }

    /// Create a whole-text render edit.
    pub fn render(old_content: impl Into<String>, new_content: impl Into<String>) -> Self {
        let old_content = old_content.into();
        Self {
            kind: EditKind::Render,
            span: 0..old_content.len(),
            old_content,
            new_content: new_content.into(),
        }
    }

    /// Net change in byte length caused by this edit.
    pub fn delta(&self) -> isize {
        self.new_content.len() as isize - self.old_content.len() as isize
    }
}
