//! Marker-delimited block removal
//!
//! A block is anchored by a literal start marker and closed by the first
//! literal end marker at or after it. Removing the block deletes everything
//! from the start marker through the end marker, then puts the end marker
//! text back at the cut point, so the end marker behaves as a boundary token
//! (typically a closing brace that leads into the next section).
//!
//! Matching is substring based, not syntax aware: an end marker that appears
//! inside a comment or string within the block still ends it.

use crate::edit::{Edit, EditKind};
use crate::error::{Error, Result};

/// A request to remove one marker-delimited block.
///
/// Start markers are tried in priority order and the first one present in the
/// text anchors the removal. Extra candidates exist to tolerate marker text
/// that was re-encoded or partially rewritten over time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRemoval {
    start_candidates: Vec<String>,
    end: String,
}

/// Where a block was found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan<'a> {
    /// The start candidate that matched
    pub start_marker: &'a str,
    /// Offset of the start marker
    pub start: usize,
    /// Offset just past the end marker
    pub end: usize,
}

impl BlockRemoval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_candidates: vec![start.into()],
            end: end.into(),
        }
    }

    /// Create a removal with prioritized start marker candidates
    pub fn with_fallbacks<I, S>(candidates: I, end: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_candidates: candidates.into_iter().map(Into::into).collect(),
            end: end.into(),
        }
    }

    pub fn start_candidates(&self) -> &[String] {
        &self.start_candidates
    }

    pub fn end_marker(&self) -> &str {
        &self.end
    }

    fn validate(&self) -> Result<()> {
        if self.start_candidates.is_empty() {
            return Err(Error::invalid_marker("at least one start marker is required"));
        }
        if self.start_candidates.iter().any(String::is_empty) {
            return Err(Error::invalid_marker("start marker must not be empty"));
        }
        if self.end.is_empty() {
            return Err(Error::invalid_marker("end marker must not be empty"));
        }
        Ok(())
    }

    /// Locate the block without modifying anything.
    pub fn locate<'a>(&'a self, text: &str) -> Result<BlockSpan<'a>> {
        self.validate()?;

        let (start_marker, start) = self
            .start_candidates
            .iter()
            .find_map(|candidate| {
                text.find(candidate.as_str())
                    .map(|pos| (candidate.as_str(), pos))
            })
            .ok_or_else(|| Error::marker_not_found(self.start_candidates.as_slice()))?;

        let end_pos = text[start..]
            .find(self.end.as_str())
            .ok_or_else(|| Error::marker_not_found(std::slice::from_ref(&self.end)))?;

        Ok(BlockSpan {
            start_marker,
            start,
            end: start + end_pos + self.end.len(),
        })
    }

    /// Remove the block, returning the new text and the applied edit.
    ///
    /// Result is `text[..start] + end_marker + text[end..]`. Nothing is
    /// returned on failure.
    pub fn apply(&self, text: &str) -> Result<(String, Edit)> {
        let span = self.locate(text)?;

        let removed = span.end - span.start;
        let mut result = String::with_capacity(text.len() - removed + self.end.len());
        result.push_str(&text[..span.start]);
        result.push_str(&self.end);
        result.push_str(&text[span.end..]);

        tracing::debug!(
            start_marker = span.start_marker,
            removed_bytes = removed - self.end.len(),
            "removed marked block"
        );

        let edit = Edit {
            kind: EditKind::BlockRemoval {
                start_marker: span.start_marker.to_string(),
                end_marker: self.end.clone(),
            },
            span: span.start..span.end,
            old_content: text[span.start..span.end].to_string(),
            new_content: self.end.clone(),
        };

        Ok((result, edit))
    }
}

/// Remove the block from the first `start_marker` through the next `end_marker`,
/// keeping the end marker text.
pub fn remove_marked_block(text: &str, start_marker: &str, end_marker: &str) -> Result<String> {
    BlockRemoval::new(start_marker, end_marker)
        .apply(text)
        .map(|(result, _)| result)
}

/// Like [`remove_marked_block`], trying each start candidate in order.
pub fn remove_marked_block_with_fallbacks<S: AsRef<str>>(
    text: &str,
    start_candidates: &[S],
    end_marker: &str,
) -> Result<String> {
    BlockRemoval::with_fallbacks(start_candidates.iter().map(AsRef::<str>::as_ref), end_marker)
        .apply(text)
        .map(|(result, _)| result)
}
