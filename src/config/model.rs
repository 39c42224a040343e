// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::glob::join_glob_list;

/// Top-level rule file as read from TOML, before validation.
///
/// ```toml
/// [rule.objects]
/// description = "compile C sources"
/// inputs = "/src/*.c, /src/*.h"
/// outputs = ["/build/*.o", "/build/app"]
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// All rules from `[rule.<name>]`, keyed by rule name.
    #[serde(default)]
    pub rule: BTreeMap<String, RuleConfig>,
}

/// Validated rule file. Construct via `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    rule: BTreeMap<String, RuleConfig>,
}

impl ConfigFile {
    /// Only `validate.rs` calls this, after checking every pattern.
    pub(crate) fn new_unchecked(rule: BTreeMap<String, RuleConfig>) -> Self {
        Self { rule }
    }

    pub fn rules(&self) -> &BTreeMap<String, RuleConfig> {
        &self.rule
    }

    pub fn rule(&self, name: &str) -> Option<&RuleConfig> {
        self.rule.get(name)
    }
}

/// `[rule.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Free-form text shown by `check`.
    #[serde(default)]
    pub description: Option<String>,

    pub inputs: GlobSpec,

    pub outputs: GlobSpec,
}

impl RuleConfig {
    pub fn input_globs(&self) -> String {
        self.inputs.to_glob_list()
    }

    pub fn output_globs(&self) -> String {
        self.outputs.to_glob_list()
    }
}

/// Either a ready-made glob list (`"/a/*.c, /b/*.h"`) or an array of single
/// patterns (`["/a/*.c", "/b/*.h"]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GlobSpec {
    List(String),
    Patterns(Vec<String>),
}

impl GlobSpec {
    /// Render as one comma-delimited glob list. Commas inside array items are
    /// escaped so each item stays a single pattern.
    pub fn to_glob_list(&self) -> String {
        match self {
            GlobSpec::List(list) => list.clone(),
            GlobSpec::Patterns(patterns) => join_glob_list(patterns),
        }
    }
}
