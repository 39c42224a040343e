// src/config/mod.rs

//! Rule file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a rule file from disk (`loader.rs`).
//! - Validate the glob patterns of every rule (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, CONFIG_ENV_VAR};
pub use model::{ConfigFile, GlobSpec, RawConfigFile, RuleConfig};
pub use validate::validate_config;
