//! Line rules: a predicate over one line paired with a replacement action

use regex::Regex;

use crate::document::Document;
use crate::error::{Error, Result};

/// Predicate over a single line.
#[derive(Debug, Clone)]
pub enum LineMatcher {
    /// Trimmed line starts with the literal prefix
    Prefix(String),
    /// Trimmed line equals the literal text
    Exact(String),
    /// Regular expression matches anywhere in the raw line
    Pattern(Regex),
}

impl LineMatcher {
    /// Compile a regex matcher
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Prefix(prefix) => line.trim().starts_with(prefix.as_str()),
            Self::Exact(text) => line.trim() == text.as_str(),
            Self::Pattern(re) => re.is_match(line),
        }
    }
}

/// What happens to a matched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Replace the line with these lines, in order
    Replace(Vec<String>),
    /// Pass the line through unchanged
    Keep,
}

/// A matcher paired with the action to take on matching lines.
#[derive(Debug, Clone)]
pub struct LineRule {
    pub matcher: LineMatcher,
    pub action: LineAction,
}

impl LineRule {
    pub fn new(matcher: LineMatcher, action: LineAction) -> Self {
        Self { matcher, action }
    }

    /// Replace lines whose trimmed text starts with `prefix`.
    pub fn prefix<I, S>(prefix: impl Into<String>, replacement: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            LineMatcher::Prefix(prefix.into()),
            LineAction::Replace(replacement.into_iter().map(Into::into).collect()),
        )
    }

    /// Pass matching lines through untouched.
    pub fn keep(matcher: LineMatcher) -> Self {
        Self::new(matcher, LineAction::Keep)
    }

    pub fn matches(&self, line: &str) -> bool {
        self.matcher.matches(line)
    }
}

/// Build a rule that sets a `key=value` property line.
///
/// Matches any line whose trimmed text starts with `key=` and replaces it with
/// `key=value`, followed by a `# note` comment line when a note is given.
/// Properties that are absent from the document are not added.
pub fn property_rule(key: &str, value: &str, note: Option<&str>) -> LineRule {
    let mut replacement = vec![format!("{key}={value}")];
    if let Some(note) = note {
        replacement.push(format!("# {note}"));
    }
    LineRule::prefix(format!("{key}="), replacement)
}

/// Apply line rules to text and return the normalized result.
///
/// Total over all inputs: text that no rule matches comes back unchanged
/// apart from newline normalization.
pub fn apply_line_rules(text: &str, rules: &[LineRule]) -> String {
    let mut doc = Document::parse(text);
    let edits = doc.apply_rules(rules);
    tracing::debug!(rewritten = edits.len(), rules = rules.len(), "applied line rules");
    doc.render()
}
