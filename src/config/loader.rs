// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Load a pipeline file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (reference resolution, acyclicity). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a pipeline file from path and run semantic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - unknown `before`/`after` references,
///   - self-references,
///   - dependency cycles,
///   - an empty task set.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Helper to resolve a default pipeline file path.
///
/// Currently this just returns `Pipedag.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `PIPEDAG_CONFIG`).
/// - Support project-local config discovery.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Pipedag.toml")
}
