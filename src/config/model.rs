// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level pipeline definition as read from a TOML file.
///
/// ```toml
/// [task.fetch]
/// description = "download inputs"
///
/// [task.build]
/// after = ["fetch"]
/// before = ["package"]
///
/// [task.package]
/// ```
///
/// Only `[task.<name>]` sections exist; every field inside a task is
/// optional, so `[task.A]` on its own declares an unconstrained task.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// All tasks from `[task.<name>]`.
    ///
    /// Keys are the *task names* (e.g. `"A"`, `"build"`).
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TaskConfig {
    /// Free-form description, carried as the vertex payload and shown by
    /// `--dry-run`.
    #[serde(default)]
    pub description: Option<String>,

    /// Tasks this one must be ordered *before*.
    #[serde(default)]
    pub before: Vec<String>,

    /// Tasks this one must be ordered *after*.
    ///
    /// This is the TOML `after = ["A", "B"]` field.
    #[serde(default)]
    pub after: Vec<String>,
}
