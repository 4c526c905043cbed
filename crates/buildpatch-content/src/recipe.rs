//! Declarative patch recipes
//!
//! A recipe lists target files and the patches to run against each, in order.
//! It deserializes from any serde format; in TOML it reads as:
//!
//! ```toml
//! [[file]]
//! path = "gradle.properties"
//!
//! [[file.patch]]
//! op = "set-property"
//! key = "android.enableJetifier"
//! value = "false"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::block::BlockRemoval;
use crate::document::Document;
use crate::edit::Edit;
use crate::error::Result;
use crate::rule::{LineAction, LineMatcher, LineRule, property_rule};
use crate::template::Template;

/// A set of file patches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, rename = "file")]
    pub files: Vec<FilePatch>,
}

/// Patches to apply to a single file, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePatch {
    /// Target path, relative to the recipe root
    pub path: PathBuf,
    #[serde(default, rename = "patch")]
    pub patches: Vec<Patch>,
}

impl FilePatch {
    /// Whether the file is generated from scratch, so it need not exist yet
    pub fn creates_file(&self) -> bool {
        matches!(self.patches.first(), Some(Patch::Render { .. }))
    }

    /// Run every patch in order, stopping at the first failure.
    pub fn apply(&self, text: &str) -> Result<(String, Vec<Edit>)> {
        let mut current = text.to_string();
        let mut edits = Vec::new();
        for patch in &self.patches {
            let (next, mut applied) = patch.apply(&current)?;
            tracing::debug!(path = %self.path.display(), %patch, edits = applied.len(), "applied patch");
            current = next;
            edits.append(&mut applied);
        }
        Ok((current, edits))
    }
}

/// One patch operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Patch {
    /// Rewrite lines with an ordered rule list
    RewriteLines { rules: Vec<RuleSpec> },
    /// Set a `key=value` property, optionally followed by a comment line
    SetProperty {
        key: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Remove a marker-delimited block, keeping the end marker
    RemoveBlock { start: StartMarkers, end: String },
    /// Replace the whole text with a rendered template
    Render {
        template: TemplateSource,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        vars: BTreeMap<String, String>,
    },
}

impl Patch {
    /// Apply to text, returning the new text and the edits made.
    pub fn apply(&self, text: &str) -> Result<(String, Vec<Edit>)> {
        match self {
            Self::RewriteLines { rules } => {
                let rules = rules
                    .iter()
                    .map(RuleSpec::to_rule)
                    .collect::<Result<Vec<_>>>()?;
                Ok(rewrite(text, &rules))
            }
            Self::SetProperty { key, value, note } => {
                let rule = property_rule(key, value, note.as_deref());
                Ok(rewrite(text, std::slice::from_ref(&rule)))
            }
            Self::RemoveBlock { start, end } => {
                let removal = BlockRemoval::with_fallbacks(start.candidates().iter(), end.as_str());
                let (result, edit) = removal.apply(text)?;
                Ok((result, vec![edit]))
            }
            Self::Render { template, vars } => {
                let rendered = template.load()?.render(vars)?;
                let edit = Edit::render(text, rendered.as_str());
                Ok((rendered, vec![edit]))
            }
        }
    }
}

fn rewrite(text: &str, rules: &[LineRule]) -> (String, Vec<Edit>) {
    let mut doc = Document::parse(text);
    let edits = doc.apply_rules(rules);
    if edits.is_empty() {
        tracing::warn!("no lines matched any rule");
    }
    (doc.render(), edits)
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RewriteLines { rules } => write!(f, "rewrite-lines ({} rules)", rules.len()),
            Self::SetProperty { key, value, .. } => write!(f, "set-property {key}={value}"),
            Self::RemoveBlock { start, end } => {
                let first = start.candidates().first().map(String::as_str).unwrap_or("");
                write!(f, "remove-block {first:?}..{end:?}")
            }
            Self::Render { template, .. } => write!(f, "render {template}"),
        }
    }
}

/// One start marker or a prioritized list of fallbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StartMarkers {
    One(String),
    Many(Vec<String>),
}

impl StartMarkers {
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::One(marker) => std::slice::from_ref(marker),
            Self::Many(markers) => markers,
        }
    }
}

/// Serializable form of a [`LineRule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(flatten)]
    pub matcher: MatcherSpec,
    /// Replacement lines; absent means pass the line through unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<Vec<String>>,
}

impl RuleSpec {
    pub fn to_rule(&self) -> Result<LineRule> {
        let matcher = match &self.matcher {
            MatcherSpec::Prefix(prefix) => LineMatcher::Prefix(prefix.clone()),
            MatcherSpec::Exact(text) => LineMatcher::Exact(text.clone()),
            MatcherSpec::Pattern(pattern) => LineMatcher::pattern(pattern)?,
        };
        let action = match &self.replace {
            Some(lines) => LineAction::Replace(lines.clone()),
            None => LineAction::Keep,
        };
        Ok(LineRule::new(matcher, action))
    }
}

/// Serializable form of a [`LineMatcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatcherSpec {
    Prefix(String),
    Exact(String),
    Pattern(String),
}

/// Where a template body comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateSource {
    /// A template shipped with the crate, by name
    Builtin(String),
    /// The template body itself
    Inline(String),
}

impl TemplateSource {
    pub fn load(&self) -> Result<Template> {
        match self {
            Self::Builtin(name) => Template::builtin(name),
            Self::Inline(body) => Ok(Template::new(body.as_str())),
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(name) => write!(f, "builtin:{name}"),
            Self::Inline(_) => f.write_str("inline"),
        }
    }
}
