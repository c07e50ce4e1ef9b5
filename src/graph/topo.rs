// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipegraph contributors

//! Topological sorting with cycle detection
//!
//! Kahn's algorithm over a borrowed [`Dag`]: repeatedly extract a vertex
//! with in-degree zero. The ready queue is seeded and relaxed in
//! insertion order, so the result is deterministic for a fixed graph
//! state. Runs in O(V + E).

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::errors::{GraphError, GraphResult};
use crate::graph::Dag;

/// Cycle-aware sorter borrowing a graph
pub struct TopologicalSorter<'a, V> {
    dag: &'a Dag<V>,
}

impl<'a, V> TopologicalSorter<'a, V>
where
    V: Eq + Hash + Clone + fmt::Debug,
{
    /// Create a sorter over the given graph
    pub fn new(dag: &'a Dag<V>) -> Self {
        Self { dag }
    }

    /// Produce one valid topological ordering, source before destination
    ///
    /// Returns [`GraphError::CycleDetected`] the first time no in-degree
    /// zero vertex remains while unvisited vertices exist; the error
    /// carries the residual unsorted vertices in insertion order.
    pub fn sort(&self) -> GraphResult<Vec<V>, V> {
        let adjacency = self.dag.adjacency();
        let vertex_count = adjacency.len();
        let vertices: Vec<&V> = adjacency.keys().collect();

        // Resolve every successor set to key positions once, up front.
        // Edge endpoints are always tracked keys, so every position
        // resolves; the queue below then works on plain indices.
        let mut successor_indices: Vec<Vec<usize>> = Vec::with_capacity(vertex_count);
        let mut indegree = vec![0usize; vertex_count];
        for successors in adjacency.values() {
            let indices: Vec<usize> = successors
                .iter()
                .filter_map(|successor| adjacency.get_index_of(successor))
                .collect();
            for &index in &indices {
                indegree[index] += 1;
            }
            successor_indices.push(indices);
        }

        let mut ready: VecDeque<usize> = (0..vertex_count).filter(|&i| indegree[i] == 0).collect();
        let mut order: Vec<V> = Vec::with_capacity(vertex_count);

        while let Some(index) = ready.pop_front() {
            order.push(vertices[index].clone());
            for &successor_index in &successor_indices[index] {
                indegree[successor_index] -= 1;
                if indegree[successor_index] == 0 {
                    ready.push_back(successor_index);
                }
            }
        }

        if order.len() < vertex_count {
            // Vertices never drained to in-degree zero are exactly the
            // cycle members plus anything only reachable through a cycle.
            let remaining: Vec<V> = vertices
                .iter()
                .enumerate()
                .filter(|(index, _)| indegree[*index] > 0)
                .map(|(_, vertex)| (*vertex).clone())
                .collect();
            debug!(remaining = remaining.len(), "cycle detected during topological sort");
            return Err(GraphError::CycleDetected { remaining });
        }

        Ok(order)
    }
}
