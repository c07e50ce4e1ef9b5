// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipegraph contributors

//! Directed-graph container and ordering algorithms
//!
//! This module owns the core data structure: the adjacency map, its
//! mutation and query operations, subgraph extraction, and the
//! topological sorter used for cycle detection.

mod dag;
mod topo;

pub use dag::{Dag, EdgeSpec};
pub use topo::TopologicalSorter;
