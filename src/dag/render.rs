// src/dag/render.rs

//! Text projections of the graph: the flat execution order and the staged
//! pipeline diagram. Both are display-only and leave the edge set untouched,
//! so repeated calls on an unchanged graph return identical strings.

use super::graph::DependencyGraph;
use crate::errors::Result;

/// Separator between names in the flat order string.
const ORDER_SEPARATOR: &str = " --> ";
/// Arrow between first-row cells of the pipeline diagram.
const STAGE_ARROW: &str = " -> ";

impl<T> DependencyGraph<T> {
    /// Render the execution order as names joined by `" --> "`.
    ///
    /// An empty graph renders as the empty string.
    pub fn render_order(&mut self) -> Result<String> {
        let mut ordered = Vec::new();
        self.topological_sort(|vertex, _path| ordered.push(vertex.name().to_string()))?;
        Ok(ordered.join(ORDER_SEPARATOR))
    }

    /// Render the staged pipeline diagram.
    ///
    /// One column per stage, columns ordered by the stage's first appearance
    /// in the execution order. The first row carries each stage's first task
    /// with `" -> "` arrows between cells; further rows stack the remaining
    /// tasks of each stage vertically. A cell is `[name]` with the name
    /// padded to the longest name in the graph, so every column is equally
    /// wide:
    ///
    /// ```text
    /// [A] -> [B] -> [D]
    ///        [C]
    /// ```
    pub fn render_pipeline(&mut self) -> Result<String> {
        let mut emitted: Vec<(usize, String)> = Vec::new();
        self.topological_sort(|vertex, _path| {
            emitted.push((vertex.stage().unwrap_or(1), vertex.name().to_string()));
        })?;

        // Group by stage, keeping the order stages were first seen in.
        let mut columns: Vec<(usize, Vec<String>)> = Vec::new();
        for (stage, name) in emitted {
            match columns.iter_mut().find(|(s, _)| *s == stage) {
                Some((_, names)) => names.push(name),
                None => columns.push((stage, vec![name])),
            }
        }

        if columns.is_empty() {
            return Ok(String::new());
        }

        let max_name_len = self
            .vertices
            .iter()
            .map(|v| v.name().len())
            .max()
            .unwrap_or(0);
        let cell_width = max_name_len + 2;
        let rows = columns.iter().map(|(_, names)| names.len()).max().unwrap_or(0);

        let mut lines = Vec::new();
        for row in 0..rows {
            let mut line = String::new();
            for (col, (_, names)) in columns.iter().enumerate() {
                if col > 0 {
                    if row == 0 {
                        line.push_str(STAGE_ARROW);
                    } else {
                        line.push_str(&" ".repeat(STAGE_ARROW.len()));
                    }
                }
                match names.get(row) {
                    Some(name) => {
                        line.push('[');
                        line.push_str(name);
                        line.push_str(&" ".repeat(max_name_len - name.len()));
                        line.push(']');
                    }
                    None => line.push_str(&" ".repeat(cell_width)),
                }
            }
            lines.push(line.trim_end().to_string());
        }

        Ok(lines.join("\n"))
    }
}
