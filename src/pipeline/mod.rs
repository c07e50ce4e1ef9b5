// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipegraph contributors

//! Pipeline façade over the graph container
//!
//! A pipeline is a DAG of steps. Each step is a vertex identified purely
//! by a [`StepId`] handle; steps carry no payload beyond identity. The
//! façade performs no validation of its own: it only creates vertices
//! and wires edges, so its failure behavior is exactly the graph's.

use tracing::trace;

use crate::errors::GraphResult;
use crate::graph::Dag;

/// Opaque handle identifying one step within its owning [`Pipeline`]
///
/// Ids are allocated from a per-pipeline counter and never reused, so
/// two distinct steps are never equal. A `StepId` does not keep its
/// pipeline alive; operations that need the pipeline take it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(usize);

impl StepId {
    /// Create a child of this step, forwarding to [`Pipeline::add_step`]
    pub fn add_step(self, pipeline: &mut Pipeline) -> StepId {
        pipeline.add_step(Some(self))
    }
}

/// A pipeline of steps backed by one graph instance for its lifetime
#[derive(Debug, Default)]
pub struct Pipeline {
    graph: Dag<StepId>,
    next_id: usize,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self {
            graph: Dag::new(),
            next_id: 0,
        }
    }

    /// Create a new step, optionally as the child of an existing one
    ///
    /// With no parent the step is inserted as a standalone vertex; with a
    /// parent an edge `parent -> step` is added. Never fails: edge
    /// insertion auto-registers the parent, though every id handed out by
    /// this pipeline is already tracked.
    pub fn add_step(&mut self, parent: Option<StepId>) -> StepId {
        let step = StepId(self.next_id);
        self.next_id += 1;
        trace!(step = ?step, parent = ?parent, "adding step");
        match parent {
            None => self.graph.add_vertex(step),
            Some(parent) => self.graph.add_edge(parent, step),
        }
        step
    }

    /// Read access to the underlying step graph
    pub fn graph(&self) -> &Dag<StepId> {
        &self.graph
    }

    /// A valid execution sequence for the pipeline's steps
    ///
    /// Parents appear before their children. Fails with
    /// [`crate::errors::GraphError::CycleDetected`] if the step graph has
    /// been wired into a cycle.
    pub fn execution_order(&self) -> GraphResult<Vec<StepId>, StepId> {
        self.graph.topological_order()
    }
}
