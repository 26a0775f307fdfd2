// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::{ConfigFile, TaskConfig};
use crate::dag::{DependencyGraph, TaskRefs};
use crate::errors::Result;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - pipeline file loading + validation
/// - graph construction
/// - rendering (stage diagram by default, flat order with `--order`)
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let mut graph = graph_from_config(&cfg)?;
    info!(tasks = graph.len(), "pipeline graph built");

    let rendered = if args.order {
        graph.render_order()?
    } else {
        graph.render_pipeline()?
    };
    println!("{rendered}");

    Ok(())
}

/// Build a [`DependencyGraph`] from a validated pipeline definition.
///
/// Each `[task.<name>]` is declared in turn, carrying its config as the
/// vertex payload; `before`/`after` lists become edges in file-declaration
/// order.
pub fn graph_from_config(cfg: &ConfigFile) -> Result<DependencyGraph<TaskConfig>> {
    let mut graph = DependencyGraph::new();

    for (name, task) in cfg.task.iter() {
        graph.add_task(
            name,
            Some(task.clone()),
            TaskRefs::Many(task.before.clone()),
            TaskRefs::Many(task.after.clone()),
        )?;
    }

    debug!(tasks = graph.len(), "graph constructed from pipeline file");
    Ok(graph)
}

/// Simple dry-run output: print tasks, descriptions and orderings.
fn print_dry_run(cfg: &ConfigFile) {
    println!("pipedag dry-run");
    println!();

    println!("tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        println!("  - {name}");
        if let Some(ref description) = task.description {
            println!("      description: {description}");
        }
        if !task.before.is_empty() {
            println!("      before: {:?}", task.before);
        }
        if !task.after.is_empty() {
            println!("      after: {:?}", task.after);
        }
    }

    debug!("dry-run complete (nothing rendered)");
}
