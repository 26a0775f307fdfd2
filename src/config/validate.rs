// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::ConfigFile;
use crate::errors::{PipedagError, Result};

/// Run semantic validation against a loaded pipeline definition.
///
/// This checks:
/// - there is at least one task
/// - all `before`/`after` references refer to declared tasks
/// - no task references itself
/// - the task graph has no cycles
///
/// The graph builder would catch cycles on its own (with a precise path),
/// but validating the whole file up front gives the author one early
/// diagnostic instead of a failure halfway through construction.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_task_references(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &ConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(PipedagError::ConfigError(
            "pipeline must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_references(cfg: &ConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        for (field, refs) in [("before", &task.before), ("after", &task.after)] {
            for dep in refs.iter() {
                if !cfg.task.contains_key(dep) {
                    return Err(PipedagError::ConfigError(format!(
                        "task '{}' references unknown task '{}' in `{}`",
                        name, dep, field
                    )));
                }
                if dep == name {
                    return Err(PipedagError::ConfigError(format!(
                        "task '{}' cannot reference itself in `{}`",
                        name, field
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &ConfigFile) -> Result<()> {
    // Build a simple petgraph graph from the tasks and their orderings.
    //
    // Edge direction: dependency -> dependent
    // For:
    //   [task.B]
    //   after = ["A"]
    // we add edge A -> B, and `before = ["C"]` on B adds B -> C.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
        for dependent in task.before.iter() {
            graph.add_edge(name.as_str(), dependent.as_str(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(PipedagError::Cycle(format!(
                "task '{}' is part of a dependency cycle",
                node
            )))
        }
    }
}
