#![allow(dead_code)]

use std::collections::BTreeMap;

use pipedag::config::{ConfigFile, TaskConfig};
use pipedag::dag::DependencyGraph;
use pipedag::errors::Result;

/// Builder for `ConfigFile` to simplify test setup.
///
/// The result is deliberately *not* validated, so tests can construct broken
/// pipelines and assert on the validator's diagnostics.
pub struct ConfigFileBuilder {
    config: ConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: ConfigFile {
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn build(self) -> ConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new() -> Self {
        Self {
            task: TaskConfig {
                description: None,
                before: vec![],
                after: vec![],
            },
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.task.description = Some(text.to_string());
        self
    }

    pub fn before(mut self, name: &str) -> Self {
        self.task.before.push(name.to_string());
        self
    }

    pub fn after(mut self, name: &str) -> Self {
        self.task.after.push(name.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

impl Default for TaskConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a payload-less graph from `(dependency, dependent)` pairs.
pub fn graph_from_edges(edges: &[(&str, &str)]) -> Result<DependencyGraph<()>> {
    let mut graph = DependencyGraph::new();
    for (dependency, dependent) in edges {
        graph.add_edge(dependency, dependent)?;
    }
    Ok(graph)
}

/// Collect a graph's emission order into a vector of names.
pub fn sorted_names<T>(graph: &mut DependencyGraph<T>) -> Result<Vec<String>> {
    let mut ordered = Vec::new();
    graph.topological_sort(|vertex, _path| ordered.push(vertex.name().to_string()))?;
    Ok(ordered)
}
