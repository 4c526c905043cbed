//! Line-oriented document type

use crate::edit::Edit;
use crate::rule::{LineAction, LineRule};

/// An ordered sequence of text lines.
///
/// Built by splitting text on line boundaries (`\n` or `\r\n`) and rendered
/// back by joining with `\n` plus a single trailing newline. Rendering is a
/// normalization, not a byte-faithful copy: a missing final newline is added
/// and `\r\n` endings become `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split text into lines
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Build a document from pre-split lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Apply line rules to every line in order.
    ///
    /// Rules are evaluated in the order given and the first matching rule
    /// decides the line's fate. A `Replace` action may expand one line into
    /// several (or none); a `Keep` action passes the line through and shields
    /// it from later rules.
    ///
    /// Returns one [`Edit`] per rewritten line. Spans are byte ranges in the
    /// normalized rendering of the document before the rules ran.
    pub fn apply_rules(&mut self, rules: &[LineRule]) -> Vec<Edit> {
        let mut output = Vec::with_capacity(self.lines.len());
        let mut edits = Vec::new();
        let mut offset = 0;

        for (index, line) in std::mem::take(&mut self.lines).into_iter().enumerate() {
            let span = offset..offset + line.len() + 1;
            offset = span.end;

            let Some(rule) = rules.iter().find(|rule| rule.matches(&line)) else {
                output.push(line);
                continue;
            };

            match &rule.action {
                LineAction::Keep => output.push(line),
                LineAction::Replace(replacement) => {
                    let new_content: String =
                        replacement.iter().map(|l| format!("{l}\n")).collect();
                    tracing::debug!(line = index, old = %line, "rewriting line");
                    edits.push(Edit::line_rewrite(
                        index,
                        span,
                        format!("{line}\n"),
                        new_content,
                    ));
                    output.extend(replacement.iter().cloned());
                }
            }
        }

        self.lines = output;
        edits
    }

    /// Render to text: lines joined by `\n` with one trailing newline.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
