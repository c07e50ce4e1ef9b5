// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipegraph contributors

//! # pipegraph - DAG container and step-pipeline builder
//!
//! `pipegraph` is a generic directed-graph container with deterministic
//! topological ordering and cycle detection, plus a thin pipeline façade
//! where each step is a graph vertex.
//!
//! ## Features
//!
//! - **Idempotent mutation** - adding a vertex or edge twice is a no-op
//! - **Auto-created endpoints** - edges never point at untracked vertices
//! - **Deterministic ordering** - iteration, rendering, and topological
//!   order all follow first-insertion order
//! - **Lazy cycle detection** - cycles are representable and only
//!   reported when an ordering is requested
//! - **Subgraph extraction** - induced reachable subgraph from any root
//!
//! ## Quick Start
//!
//! ```
//! use pipegraph::{Dag, GraphError};
//!
//! let mut dag: Dag<i32> = Dag::new();
//! dag.add_edge(1, 2);
//! dag.add_edge(1, 3);
//!
//! assert_eq!(dag.topological_order().unwrap(), vec![1, 2, 3]);
//! assert_eq!(dag.render_text(), "1 -> [2, 3]\n2 -> []\n3 -> []\n");
//!
//! dag.add_edge(3, 1);
//! assert!(matches!(
//!     dag.topological_order(),
//!     Err(GraphError::CycleDetected { .. })
//! ));
//! ```
//!
//! Building a pipeline of steps:
//!
//! ```
//! use pipegraph::Pipeline;
//!
//! let mut pipeline = Pipeline::new();
//! let root = pipeline.add_step(None);
//! let child = root.add_step(&mut pipeline);
//!
//! assert_eq!(pipeline.graph().vertex_count(), 2);
//! assert!(pipeline.graph().successors(&root).unwrap().contains(&child));
//! ```

pub mod errors;
pub mod graph;
pub mod pipeline;

// Re-export commonly used types
pub use errors::{GraphError, GraphResult};
pub use graph::{Dag, EdgeSpec, TopologicalSorter};
pub use pipeline::{Pipeline, StepId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
