use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use filetime::{set_file_mtime, FileTime};
use tempfile::TempDir;

use stalecheck::config::{ConfigFile, GlobSpec, RawConfigFile, RuleConfig};

/// Temporary directory tree with files at chosen modification times.
///
/// Paths handed to tests are absolute, so they can be used in glob lists
/// directly.
pub struct FileTree {
    dir: TempDir,
}

impl FileTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Absolute glob string for a pattern relative to the tree root.
    pub fn glob(&self, rel_pattern: &str) -> String {
        self.path(rel_pattern).to_string_lossy().into_owned()
    }

    /// Create a file (and its parents) with mtime `secs` since the epoch.
    pub fn file(&self, rel: &str, secs: i64) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, rel.as_bytes()).expect("write file");
        self.touch(rel, secs);
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).expect("create dir");
        path
    }

    /// Set the mtime of an existing entry.
    pub fn touch(&self, rel: &str, secs: i64) {
        set_file_mtime(self.path(rel), FileTime::from_unix_time(secs, 0)).expect("set mtime");
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                rule: BTreeMap::new(),
            },
        }
    }

    pub fn with_rule(mut self, name: &str, rule: RuleConfig) -> Self {
        self.config.rule.insert(name.to_string(), rule);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RuleConfig`.
pub struct RuleConfigBuilder {
    rule: RuleConfig,
}

impl RuleConfigBuilder {
    pub fn new(inputs: &str, outputs: &str) -> Self {
        Self {
            rule: RuleConfig {
                description: None,
                inputs: GlobSpec::List(inputs.to_string()),
                outputs: GlobSpec::List(outputs.to_string()),
            },
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.rule.description = Some(text.to_string());
        self
    }

    pub fn output_patterns(mut self, patterns: &[&str]) -> Self {
        self.rule.outputs = GlobSpec::Patterns(patterns.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn build(self) -> RuleConfig {
        self.rule
    }
}
