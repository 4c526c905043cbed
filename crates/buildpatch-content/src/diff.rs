//! Line diffs between original and patched text

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Lines of context around each hunk in unified output
const CONTEXT_RADIUS: usize = 3;

/// Summary of line-level changes between two texts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextChanges {
    /// Lines present only in the new text
    pub inserted: usize,
    /// Lines present only in the old text
    pub deleted: usize,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f64,
}

impl TextChanges {
    /// Changes for two identical texts
    pub fn unchanged() -> Self {
        Self {
            inserted: 0,
            deleted: 0,
            similarity: 1.0,
        }
    }

    /// Compute line changes using `similar`'s line diff.
    pub fn compute(old: &str, new: &str) -> Self {
        if old == new {
            return Self::unchanged();
        }

        let diff = TextDiff::from_lines(old, new);
        let mut changes = Self {
            inserted: 0,
            deleted: 0,
            similarity: diff.ratio() as f64,
        };

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => changes.inserted += 1,
                ChangeTag::Delete => changes.deleted += 1,
                ChangeTag::Equal => {}
            }
        }

        changes
    }

    pub fn is_unchanged(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

impl Default for TextChanges {
    fn default() -> Self {
        Self::unchanged()
    }
}

/// Render a unified diff with `--- old_label` / `+++ new_label` headers.
///
/// Returns an empty string when the texts are identical.
pub fn unified_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    if old == new {
        return String::new();
    }
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(old_label, new_label)
        .to_string()
}
