// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipegraph contributors

//! Error types for graph operations
//!
//! The graph surface has exactly two failure modes: addressing a vertex
//! that is not tracked, and asking for a topological order of a graph
//! that contains a cycle. Mutation operations never fail.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T, V> = Result<T, GraphError<V>>;

/// Main error type for pipegraph
#[derive(Error, Debug, Diagnostic)]
pub enum GraphError<V: fmt::Debug> {
    #[error("vertex {vertex:?} is not in the graph")]
    #[diagnostic(
        code(pipegraph::vertex_not_found),
        help("Insert the vertex with add_vertex or add_edge before querying it")
    )]
    NotFound { vertex: V },

    #[error("cycle detected: {} vertices cannot be ordered", .remaining.len())]
    #[diagnostic(
        code(pipegraph::cycle_detected),
        help("Remove one edge of the cycle to restore a valid topological order")
    )]
    CycleDetected {
        /// Vertices left unsorted when no in-degree-zero vertex remained,
        /// in first-insertion order. Every cycle member is included, along
        /// with any vertex only reachable through a cycle.
        remaining: Vec<V>,
    },
}
