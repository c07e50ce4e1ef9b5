// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipegraph contributors

//! Generic directed-graph container
//!
//! Owns the adjacency map from each vertex to its set of direct
//! successors. Vertices and successor sets both preserve first-insertion
//! order, which is observable through iteration and text rendering.
//! Cycles are representable at the data-structure level; acyclicity is
//! only checked lazily by [`Dag::topological_order`].

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::errors::{GraphError, GraphResult};
use crate::graph::topo::TopologicalSorter;

/// One entry in a seeded construction: either a standalone vertex or a
/// directed edge. Applied in sequence order by [`Dag::from_edges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeSpec<V> {
    Vertex(V),
    Edge(V, V),
}

impl<V> From<V> for EdgeSpec<V> {
    fn from(vertex: V) -> Self {
        Self::Vertex(vertex)
    }
}

impl<V> From<(V, V)> for EdgeSpec<V> {
    fn from((source, destination): (V, V)) -> Self {
        Self::Edge(source, destination)
    }
}

/// Directed graph keyed by vertex value
///
/// Insertion is idempotent for both vertices and edges, and edge
/// endpoints are auto-created, so the mutation operations never fail.
#[derive(Debug, Clone)]
pub struct Dag<V> {
    adjacency: IndexMap<V, IndexSet<V>>,
}

// Manual impl: a derived Default would demand V: Default, which opaque
// vertex types like StepId do not provide.
impl<V> Default for Dag<V> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }
}

impl<V> Dag<V>
where
    V: Eq + Hash + Clone + fmt::Debug,
{
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }

    /// Build a graph from an ordered sequence of edge specifications
    ///
    /// Each specification is either a standalone vertex or a directed
    /// edge; later entries may extend vertices created by earlier ones.
    pub fn from_edges<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EdgeSpec<V>>,
    {
        let mut dag = Self::new();
        for spec in specs {
            match spec.into() {
                EdgeSpec::Vertex(vertex) => dag.add_vertex(vertex),
                EdgeSpec::Edge(source, destination) => dag.add_edge(source, destination),
            }
        }
        dag
    }

    /// Check whether a vertex is tracked by the graph
    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Get the direct-successor set of a vertex
    ///
    /// Returns [`GraphError::NotFound`] if the vertex is not tracked.
    pub fn successors(&self, vertex: &V) -> GraphResult<&IndexSet<V>, V> {
        self.adjacency.get(vertex).ok_or_else(|| GraphError::NotFound {
            vertex: vertex.clone(),
        })
    }

    /// Number of distinct vertices, irrespective of edges
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Check whether the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Insert a vertex with an empty successor set
    ///
    /// No-op if the vertex is already tracked. Never fails.
    pub fn add_vertex(&mut self, vertex: V) {
        if !self.adjacency.contains_key(&vertex) {
            trace!(vertex = ?vertex, "adding vertex");
            self.adjacency.insert(vertex, IndexSet::new());
        }
    }

    /// Insert a directed edge, auto-creating missing endpoints
    ///
    /// Idempotent: the successor set is a set, not a multiset. Never fails.
    pub fn add_edge(&mut self, source: V, destination: V) {
        trace!(source = ?source, destination = ?destination, "adding edge");
        // Source registers before destination so first-insertion order
        // matches the edge specification.
        self.add_vertex(source.clone());
        self.add_vertex(destination.clone());
        self.adjacency.entry(source).or_default().insert(destination);
    }

    /// Remove a vertex and every edge pointing at it
    ///
    /// Non-cascading: successors of the removed vertex stay in the graph,
    /// orphaned or not. Use [`Dag::remove_vertex_cascading`] for deep
    /// deletion. Returns [`GraphError::NotFound`] if the vertex is absent.
    pub fn remove_vertex(&mut self, vertex: &V) -> GraphResult<(), V> {
        if self.adjacency.shift_remove(vertex).is_none() {
            return Err(GraphError::NotFound {
                vertex: vertex.clone(),
            });
        }
        for successors in self.adjacency.values_mut() {
            successors.shift_remove(vertex);
        }
        debug!(vertex = ?vertex, "removed vertex");
        Ok(())
    }

    /// Remove a vertex together with every vertex reachable from it
    ///
    /// All incoming edges to any removed vertex are dropped from the
    /// surviving vertices. Terminates on cyclic input. Returns
    /// [`GraphError::NotFound`] if the named vertex is absent.
    pub fn remove_vertex_cascading(&mut self, vertex: &V) -> GraphResult<(), V> {
        if !self.contains(vertex) {
            return Err(GraphError::NotFound {
                vertex: vertex.clone(),
            });
        }
        let doomed = self.reachable_from(vertex);
        for victim in &doomed {
            self.adjacency.shift_remove(victim);
        }
        for successors in self.adjacency.values_mut() {
            for victim in &doomed {
                successors.shift_remove(victim);
            }
        }
        debug!(vertex = ?vertex, removed = doomed.len(), "removed vertex cascading");
        Ok(())
    }

    /// Iterate over vertices in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    /// Iterate over `(vertex, successor set)` pairs in first-insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&V, &IndexSet<V>)> {
        self.adjacency.iter()
    }

    /// Extract the induced subgraph rooted at a vertex
    ///
    /// The result is a fresh, independent graph containing the root and
    /// every vertex transitively reachable from it, with all edges among
    /// the included vertices preserved. If the root is not tracked, the
    /// result contains the root as its only vertex. Terminates on cyclic
    /// input.
    pub fn subgraph(&self, root: &V) -> Dag<V> {
        let mut sub = Dag::new();
        sub.add_vertex(root.clone());
        if !self.contains(root) {
            return sub;
        }
        for vertex in self.reachable_from(root) {
            // Every successor of a reachable vertex is itself reachable,
            // so this copies exactly the induced edge set.
            let Some(successors) = self.adjacency.get(&vertex) else {
                continue;
            };
            sub.add_vertex(vertex.clone());
            for successor in successors {
                sub.add_edge(vertex.clone(), successor.clone());
            }
        }
        sub
    }

    /// Produce one valid topological ordering of all vertices
    ///
    /// Every edge's source appears strictly before its destination. The
    /// ordering is deterministic for a given graph state. Returns
    /// [`GraphError::CycleDetected`] if the graph contains a cycle.
    pub fn topological_order(&self) -> GraphResult<Vec<V>, V> {
        TopologicalSorter::new(self).sort()
    }

    /// Render the graph as deterministic, human-readable text
    ///
    /// One line per vertex in insertion order, formatted as
    /// `vertex -> [successor, successor, ...]` with successors in their
    /// insertion order. The empty graph renders as the empty string.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (vertex, successors) in &self.adjacency {
            let rendered: Vec<String> = successors.iter().map(|s| format!("{s:?}")).collect();
            out.push_str(&format!("{vertex:?} -> [{}]\n", rendered.join(", ")));
        }
        out
    }

    /// Collect the root and everything reachable from it, breadth-first,
    /// in visit order. Guarded against revisiting, so cycles terminate.
    fn reachable_from(&self, root: &V) -> IndexSet<V> {
        let mut visited: IndexSet<V> = IndexSet::new();
        let mut queue: VecDeque<V> = VecDeque::from([root.clone()]);
        while let Some(vertex) = queue.pop_front() {
            if !visited.insert(vertex.clone()) {
                continue;
            }
            let Some(successors) = self.adjacency.get(&vertex) else {
                continue;
            };
            for successor in successors {
                if !visited.contains(successor) {
                    queue.push_back(successor.clone());
                }
            }
        }
        visited
    }

    pub(crate) fn adjacency(&self) -> &IndexMap<V, IndexSet<V>> {
        &self.adjacency
    }
}

impl<'a, V> IntoIterator for &'a Dag<V>
where
    V: Eq + Hash + Clone + fmt::Debug,
{
    type Item = &'a V;
    type IntoIter = indexmap::map::Keys<'a, V, IndexSet<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.adjacency.keys()
    }
}

impl<V> fmt::Display for Dag<V>
where
    V: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use super::*;

    /// Opt-in test logging: RUST_LOG=pipegraph=trace shows mutation events
    fn init_tracing() {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pipegraph=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init();
    }

    #[test]
    fn test_initial_set() {
        //     1
        //    / \
        //   2   3
        //  /
        // 4
        let dag: Dag<i32> = Dag::from_edges([
            EdgeSpec::Vertex(1),
            EdgeSpec::Edge(1, 2),
            EdgeSpec::Edge(1, 3),
            EdgeSpec::Edge(2, 4),
        ]);

        assert_eq!(dag.vertex_count(), 4);
        assert_eq!(dag.successors(&1).unwrap().len(), 2);
        assert_eq!(dag.successors(&2).unwrap().len(), 1);
        assert_eq!(dag.successors(&3).unwrap().len(), 0);
    }

    #[test]
    fn test_default_does_not_require_default_vertices() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        struct Label(&'static str);

        let mut dag: Dag<Label> = Dag::default();
        assert!(dag.is_empty());
        dag.add_vertex(Label("a"));
        assert_eq!(dag.vertex_count(), 1);
    }

    #[test]
    fn test_from_edges_via_conversions() {
        let dag: Dag<i32> = Dag::from_edges([EdgeSpec::from(1), EdgeSpec::from((1, 2))]);
        assert_eq!(dag.vertex_count(), 2);
        assert!(dag.successors(&1).unwrap().contains(&2));
    }

    #[test]
    fn test_add_vertex_and_edge() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_vertex(2);
        assert_eq!(dag.vertex_count(), 1);
        assert!(dag.successors(&2).unwrap().is_empty());

        dag.add_edge(2, 3);
        assert_eq!(dag.vertex_count(), 2);
        assert!(dag.successors(&2).unwrap().contains(&3));

        dag.add_edge(2, 4);
        assert_eq!(dag.vertex_count(), 3);
        assert_eq!(dag.successors(&2).unwrap().len(), 2);
    }

    #[test]
    fn test_insertion_is_idempotent() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_vertex(1);
        dag.add_vertex(1);
        assert_eq!(dag.vertex_count(), 1);

        dag.add_edge(1, 2);
        dag.add_edge(1, 2);
        assert_eq!(dag.vertex_count(), 2);
        assert_eq!(dag.successors(&1).unwrap().len(), 1);

        dag.add_vertex(2);
        assert_eq!(dag.vertex_count(), 2);
    }

    #[test]
    fn test_edge_auto_creates_endpoints() {
        let mut dag: Dag<&str> = Dag::new();
        dag.add_edge("u", "v");
        assert!(dag.contains(&"u"));
        assert!(dag.contains(&"v"));
        assert!(dag.successors(&"u").unwrap().contains(&"v"));
        assert!(dag.successors(&"v").unwrap().is_empty());
        let order: Vec<&str> = dag.iter().copied().collect();
        assert_eq!(order, vec!["u", "v"]);
    }

    #[test]
    fn test_vertex_count_ignores_edges() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_vertex(1);
        dag.add_vertex(2);
        assert_eq!(dag.vertex_count(), 2);
        dag.add_edge(1, 2); // both endpoints already exist
        assert_eq!(dag.vertex_count(), 2);
        dag.add_edge(1, 3);
        assert_eq!(dag.vertex_count(), 3);
    }

    #[test]
    fn test_contains() {
        let mut dag: Dag<&str> = Dag::new();
        dag.add_vertex("first");
        assert!(dag.contains(&"first"));
        assert!(!dag.contains(&"second"));
    }

    #[test]
    fn test_successors_of_unknown_vertex() {
        let dag: Dag<i32> = Dag::new();
        assert!(matches!(
            dag.successors(&7),
            Err(GraphError::NotFound { vertex: 7 })
        ));
    }

    #[test]
    fn test_iteration_in_insertion_order() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_vertex(1);
        dag.add_vertex(3);
        dag.add_vertex(2);

        let order: Vec<i32> = dag.iter().copied().collect();
        assert_eq!(order, vec![1, 3, 2]);

        // iterating again after mutation reflects the current state
        dag.add_vertex(5);
        let order: Vec<i32> = (&dag).into_iter().copied().collect();
        assert_eq!(order, vec![1, 3, 2, 5]);
    }

    #[test]
    fn test_remove_vertex_keeps_descendants() {
        //   1
        //  / \
        // 2   3
        //    / \
        //   4   5
        init_tracing();
        let mut dag: Dag<i32> = Dag::new();
        dag.add_edge(1, 2);
        dag.add_edge(1, 3);
        dag.add_edge(3, 4);
        dag.add_edge(3, 5);

        dag.remove_vertex(&3).unwrap();
        assert_eq!(dag.vertex_count(), 4);
        assert!(!dag.contains(&3));
        assert!(dag.contains(&4));
        assert!(dag.contains(&5));
        assert!(!dag.successors(&1).unwrap().contains(&3));
        assert!(matches!(dag.successors(&3), Err(GraphError::NotFound { .. })));
    }

    #[test]
    fn test_remove_vertex_cascading() {
        init_tracing();
        let mut dag: Dag<i32> = Dag::new();
        dag.add_edge(1, 2);
        dag.add_edge(1, 3);
        dag.add_edge(3, 4);
        dag.add_edge(3, 5);

        dag.remove_vertex_cascading(&3).unwrap();
        //   1
        //  /
        // 2
        assert_eq!(dag.vertex_count(), 2);
        assert!(matches!(dag.successors(&3), Err(GraphError::NotFound { .. })));
        assert!(matches!(dag.successors(&4), Err(GraphError::NotFound { .. })));
        assert!(!dag.successors(&1).unwrap().contains(&3));
    }

    #[test]
    fn test_remove_vertex_cascading_terminates_on_cycle() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_edge(1, 2);
        dag.add_edge(2, 3);
        dag.add_edge(3, 2);
        dag.add_edge(4, 2);

        dag.remove_vertex_cascading(&2).unwrap();
        assert_eq!(dag.vertex_count(), 2);
        assert!(dag.successors(&1).unwrap().is_empty());
        assert!(dag.successors(&4).unwrap().is_empty());
    }

    #[test]
    fn test_remove_unknown_vertex() {
        let mut dag: Dag<i32> = Dag::new();
        assert!(matches!(
            dag.remove_vertex(&1),
            Err(GraphError::NotFound { vertex: 1 })
        ));
        assert!(matches!(
            dag.remove_vertex_cascading(&1),
            Err(GraphError::NotFound { vertex: 1 })
        ));
    }

    #[test]
    fn test_subgraph() {
        //   1
        //  / \
        // 2   3
        //    / \
        //   4   5
        let mut dag: Dag<i32> = Dag::new();
        dag.add_edge(1, 2);
        dag.add_edge(1, 3);
        dag.add_edge(3, 4);
        dag.add_edge(3, 5);

        let child = dag.subgraph(&3);
        //   3
        //  / \
        // 4   5
        assert_eq!(child.vertex_count(), 3);
        assert_eq!(child.successors(&3).unwrap().len(), 2);
        assert!(child.successors(&4).unwrap().is_empty());
        assert!(!child.contains(&1));
    }

    #[test]
    fn test_subgraph_of_unknown_root() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_edge(1, 2);

        let lone = dag.subgraph(&9);
        assert_eq!(lone.vertex_count(), 1);
        assert!(lone.successors(&9).unwrap().is_empty());
    }

    #[test]
    fn test_subgraph_terminates_on_cycle() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_edge(1, 2);
        dag.add_edge(2, 3);
        dag.add_edge(3, 1);
        dag.add_edge(3, 4);

        let sub = dag.subgraph(&2);
        assert_eq!(sub.vertex_count(), 4);
        assert!(sub.successors(&3).unwrap().contains(&1));
        assert!(sub.successors(&3).unwrap().contains(&4));
        assert!(sub.successors(&1).unwrap().contains(&2));
    }

    #[test]
    fn test_subgraph_is_independent_of_source() {
        let mut dag: Dag<i32> = Dag::new();
        dag.add_edge(1, 2);

        let mut sub = dag.subgraph(&1);
        sub.add_edge(2, 3);
        assert!(dag.contains(&1));
        assert!(!dag.contains(&3));
        assert_eq!(dag.successors(&2).unwrap().len(), 0);
    }

    #[test]
    fn test_render_text() {
        let mut dag: Dag<i32> = Dag::new();
        assert_eq!(dag.render_text(), "");

        dag.add_vertex(1);
        assert_eq!(dag.render_text(), "1 -> []\n");

        dag.add_edge(1, 2);
        assert_eq!(dag.render_text(), "1 -> [2]\n2 -> []\n");

        dag.add_edge(1, 3);
        assert_eq!(dag.render_text(), "1 -> [2, 3]\n2 -> []\n3 -> []\n");

        dag.add_vertex(4);
        assert_eq!(dag.render_text(), "1 -> [2, 3]\n2 -> []\n3 -> []\n4 -> []\n");
        assert_eq!(dag.to_string(), dag.render_text());
    }
}
