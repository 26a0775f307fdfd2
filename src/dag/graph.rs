// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::errors::{PipedagError, Result};

/// Index of a vertex in the graph's arena.
///
/// Vertices are never removed, so an id stays valid for the lifetime of the
/// graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub(crate) usize);

/// A named task in the dependency graph.
///
/// The payload is opaque to the graph; dependencies are held as arena ids,
/// not owned references, so the structure itself can never form an ownership
/// cycle.
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    pub(crate) name: String,
    pub(crate) payload: Option<T>,
    /// Direct dependencies, in the order their edges were added.
    pub(crate) deps: Vec<VertexId>,
    /// True once some other vertex depends on this one.
    pub(crate) has_dependents: bool,
    /// 1-based length of the longest dependency chain ending here.
    pub(crate) stage: Option<usize>,
}

impl<T> Vertex<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Whether any edge has been added *from* this vertex, i.e. some other
    /// task was declared to depend on it.
    pub fn has_dependents(&self) -> bool {
        self.has_dependents
    }

    /// Stage assigned by the last [`DependencyGraph::compute_stages`] call,
    /// or `None` if stages have not been computed yet.
    pub fn stage(&self) -> Option<usize> {
        self.stage
    }
}

/// Names referenced by a bulk task declaration: none, one, or several.
#[derive(Debug, Clone, Default)]
pub enum TaskRefs {
    #[default]
    Empty,
    One(String),
    Many(Vec<String>),
}

impl TaskRefs {
    fn into_names(self) -> Vec<String> {
        match self {
            TaskRefs::Empty => Vec::new(),
            TaskRefs::One(name) => vec![name],
            TaskRefs::Many(names) => names,
        }
    }
}

impl From<&str> for TaskRefs {
    fn from(name: &str) -> Self {
        TaskRefs::One(name.to_string())
    }
}

impl From<String> for TaskRefs {
    fn from(name: String) -> Self {
        TaskRefs::One(name)
    }
}

impl From<Vec<String>> for TaskRefs {
    fn from(names: Vec<String>) -> Self {
        TaskRefs::Many(names)
    }
}

impl From<&[&str]> for TaskRefs {
    fn from(names: &[&str]) -> Self {
        TaskRefs::Many(names.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TaskRefs {
    fn from(names: [&str; N]) -> Self {
        TaskRefs::Many(names.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Directed acyclic graph of named tasks.
///
/// Vertices live in an insertion-ordered arena with a name index on the
/// side, so iteration order always equals first-insertion order regardless
/// of how the index hashes. Edges point from a dependency towards the task
/// that depends on it; acyclicity is enforced on every edge insertion, never
/// after the fact.
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    /// Vertices in first-insertion order.
    pub(crate) vertices: Vec<Vertex<T>>,
    /// Name -> arena index.
    index: HashMap<String, VertexId>,
}

impl<T> DependencyGraph<T> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of registered vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.vertices.get(id.0)
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex<T>> {
        self.index.get(name).and_then(|id| self.vertices.get(id.0))
    }

    /// All vertex names, in first-insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(|v| v.name.as_str())
    }

    /// Direct dependencies of a task, in edge-insertion order.
    pub fn dependencies_of(&self, name: &str) -> impl Iterator<Item = &str> {
        self.vertex_by_name(name)
            .into_iter()
            .flat_map(|v| v.deps.iter())
            .filter_map(|id| self.vertices.get(id.0).map(|dep| dep.name.as_str()))
    }

    /// Register a vertex, returning its id.
    ///
    /// Empty names are rejected with `None`. Re-registering an existing name
    /// returns the existing vertex unchanged, except that an explicitly
    /// supplied payload replaces the stored one (last write wins). Structure
    /// (dependencies, dependents) is never reset.
    pub fn add_vertex(&mut self, name: &str, payload: Option<T>) -> Option<VertexId> {
        if name.is_empty() {
            return None;
        }

        if let Some(&id) = self.index.get(name) {
            if let Some(payload) = payload {
                self.vertices[id.0].payload = Some(payload);
            }
            return Some(id);
        }

        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            name: name.to_string(),
            payload,
            deps: Vec::new(),
            has_dependents: false,
            stage: None,
        });
        self.index.insert(name.to_string(), id);
        debug!(vertex = name, "registered vertex");
        Some(id)
    }

    /// Record that `dependent` requires `dependency` to be ordered first.
    ///
    /// Both endpoints are created if missing. Empty names, self-loops and
    /// duplicate edges are silently ignored so that bulk declaration sites
    /// stay simple. An edge that would close a cycle is rejected with
    /// [`PipedagError::Cycle`] *before* any state is touched, so a failed
    /// call leaves the graph exactly as it was.
    pub fn add_edge(&mut self, dependency: &str, dependent: &str) -> Result<()> {
        if dependency.is_empty() || dependent.is_empty() || dependency == dependent {
            return Ok(());
        }

        let (dep_id, to_id) = match (
            self.add_vertex(dependency, None),
            self.add_vertex(dependent, None),
        ) {
            (Some(dep_id), Some(to_id)) => (dep_id, to_id),
            _ => return Ok(()),
        };

        if self.vertices[to_id.0].deps.contains(&dep_id) {
            return Ok(());
        }

        // If `dependent` is already among the transitive dependencies of
        // `dependency`, this edge would close a cycle. Walk that chain first
        // and abort with the offending path before mutating anything.
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        let mut on_stack = HashSet::new();
        self.visit(
            dep_id,
            &mut |vertex, path| {
                if vertex.name == dependent {
                    return Err(PipedagError::Cycle(format!(
                        "{} --> {}",
                        path.join(" --> "),
                        dependent
                    )));
                }
                Ok(())
            },
            &mut visited,
            &mut path,
            &mut on_stack,
        )?;

        self.vertices[dep_id.0].has_dependents = true;
        self.vertices[to_id.0].deps.push(dep_id);
        debug!(dependency, dependent, "recorded dependency edge");
        Ok(())
    }

    /// Bulk declaration: register `name` with `payload`, then add one edge
    /// per entry of `run_before` (`name` must run before it) and `run_after`
    /// (`name` must run after it).
    ///
    /// Edges are inserted in the order the lists are given, which also
    /// determines the path reported if one of them closes a cycle.
    pub fn add_task(
        &mut self,
        name: &str,
        payload: Option<T>,
        run_before: impl Into<TaskRefs>,
        run_after: impl Into<TaskRefs>,
    ) -> Result<()> {
        self.add_vertex(name, payload);

        for target in run_before.into().into_names() {
            self.add_edge(name, &target)?;
        }
        for source in run_after.into().into_names() {
            self.add_edge(&source, name)?;
        }
        Ok(())
    }

    /// Depth-first post-order walk over `id`'s dependency chain.
    ///
    /// The callback fires once per newly visited vertex, after all of its
    /// transitive dependencies have fired, and receives the current visit
    /// stack (root of this walk down to the vertex itself). `visited` is
    /// shared across walks so diamonds emit each vertex once; `on_stack` is
    /// the defensive backstop for cycles that insertion should have made
    /// impossible.
    fn visit<'a, F>(
        &'a self,
        id: VertexId,
        f: &mut F,
        visited: &mut HashSet<VertexId>,
        path: &mut Vec<&'a str>,
        on_stack: &mut HashSet<VertexId>,
    ) -> Result<()>
    where
        F: FnMut(&'a Vertex<T>, &[&'a str]) -> Result<()>,
    {
        let Some(vertex) = self.vertices.get(id.0) else {
            return Ok(());
        };

        if on_stack.contains(&id) {
            return Err(PipedagError::Cycle(format!(
                "{} --> {}",
                path.join(" --> "),
                vertex.name
            )));
        }
        if visited.contains(&id) {
            return Ok(());
        }

        on_stack.insert(id);
        path.push(&vertex.name);
        visited.insert(id);

        for &dep in &vertex.deps {
            self.visit(dep, f, visited, path, on_stack)?;
        }

        f(vertex, path)?;

        on_stack.remove(&id);
        path.pop();
        Ok(())
    }

    /// Emit every vertex exactly once, each after all of its transitive
    /// dependencies.
    ///
    /// Stages are recomputed first so that callers rendering the result see
    /// ranks matching the current edge set. Walks start from the vertices
    /// nothing depends on; a single visited-set shared across those walks
    /// covers the whole graph. Output order is fully determined by vertex
    /// first-insertion order and per-vertex edge-insertion order.
    pub fn topological_sort<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&Vertex<T>, &[&str]),
    {
        self.compute_stages();

        let mut visited = HashSet::new();
        let mut path = Vec::new();
        let mut on_stack = HashSet::new();

        for id in 0..self.vertices.len() {
            if !self.vertices[id].has_dependents {
                self.visit(
                    VertexId(id),
                    &mut |vertex, path| {
                        f(vertex, path);
                        Ok(())
                    },
                    &mut visited,
                    &mut path,
                    &mut on_stack,
                )?;
            }
        }
        Ok(())
    }
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
