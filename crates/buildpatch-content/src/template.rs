//! Placeholder templates for generated build scripts
//!
//! Placeholders are written `__NAME__` where `NAME` is upper-case ASCII
//! letters, digits and single underscores. Values are substituted in one pass,
//! so a value that itself looks like a placeholder is inserted literally.

use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::error::{Error, Result};

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__([A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*)__").expect("hardcoded regex must compile")
});

const REACT_NATIVE_ROOT: &str = include_str!("../templates/react-native-root.gradle");

/// Names accepted by [`Template::builtin`]
pub const BUILTIN_TEMPLATES: &[&str] = &["react-native-root"];

/// A build-script body with `__NAME__` placeholders and default values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    body: String,
    defaults: BTreeMap<String, String>,
}

impl Template {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            defaults: BTreeMap::new(),
        }
    }

    /// Set a default used when the caller does not supply a value.
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Load a built-in template by name.
    ///
    /// `react-native-root` is the root `android/build.gradle` for the React
    /// Native 0.75 stack. With no overrides it pins the SDK levels and tool
    /// versions that stack expects and points the Kotlin plugin at the
    /// `${kotlinVersion}` ext property.
    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "react-native-root" => Ok(Self::new(REACT_NATIVE_ROOT)
                .with_default("BUILD_TOOLS_VERSION", "34.0.0")
                .with_default("MIN_SDK_VERSION", "23")
                .with_default("COMPILE_SDK_VERSION", "34")
                .with_default("TARGET_SDK_VERSION", "34")
                .with_default("NDK_VERSION", "25.2.9519653")
                .with_default("KOTLIN_VERSION", "1.9.24")
                .with_default("AGP_VERSION", "8.5.2")
                .with_default("KOTLIN", "${kotlinVersion}")),
            other => Err(Error::UnknownTemplate(other.to_string())),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Placeholder names referenced by the body, sorted and deduplicated.
    pub fn placeholders(&self) -> BTreeSet<String> {
        PLACEHOLDER_PATTERN
            .captures_iter(&self.body)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Dedent the body and substitute placeholders.
    ///
    /// Caller values override defaults. Fails with `UnresolvedPlaceholder`
    /// naming the first placeholder that has neither.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String> {
        let dedented = dedent(&self.body);
        let mut missing: Option<String> = None;

        let rendered = PLACEHOLDER_PATTERN.replace_all(&dedented, |caps: &Captures| {
            let name = &caps[1];
            match vars.get(name).or_else(|| self.defaults.get(name)) {
                Some(value) => value.clone(),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        if let Some(name) = missing {
            return Err(Error::UnresolvedPlaceholder { name });
        }
        Ok(rendered.into_owned())
    }
}

/// Remove the longest common leading whitespace prefix from non-blank lines.
///
/// The prefix is compared literally, so a tab and spaces never share a
/// margin. Whitespace-only lines are emptied and do not count towards it.
pub fn dedent(text: &str) -> String {
    fn leading(line: &str) -> &str {
        &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
    }

    let margin = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading)
        .reduce(|common, indent| {
            let shared = common
                .bytes()
                .zip(indent.bytes())
                .take_while(|(a, b)| a == b)
                .count();
            &common[..shared]
        })
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
