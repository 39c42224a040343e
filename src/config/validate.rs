// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile, RuleConfig};
use crate::errors::{Result, StalecheckError};
use crate::glob::parse_glob_list;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StalecheckError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.rule))
    }
}

/// Check a raw rule file without consuming it.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_rules(cfg)?;
    for (name, rule) in cfg.rule.iter() {
        validate_rule(name, rule)?;
    }
    Ok(())
}

fn ensure_has_rules(cfg: &RawConfigFile) -> Result<()> {
    if cfg.rule.is_empty() {
        return Err(StalecheckError::ConfigError(
            "config must contain at least one [rule.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_rule(name: &str, rule: &RuleConfig) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StalecheckError::ConfigError(
            "rule names must not be empty".to_string(),
        ));
    }

    for (field, globs) in [("inputs", rule.input_globs()), ("outputs", rule.output_globs())] {
        parse_glob_list(&globs).map_err(|e| {
            StalecheckError::ConfigError(format!("rule '{name}' has invalid {field}: {e}"))
        })?;
    }
    Ok(())
}
