use gradx_core::{device::Device, dtype::DType};
use std::sync::Arc;

/// Pointer from a gradient-function node to one upstream `(grad_fn,
/// output_nr)` pair. An undefined edge means "no gradient flows here".
#[derive(Clone)]
pub struct Edge {
    grad_fn: Option<Arc<Node>>,
    output_nr: usize,
}

impl Edge {
    pub fn new(grad_fn: Arc<Node>, output_nr: usize) -> Self {
        Self {
            grad_fn: Some(grad_fn),
            output_nr,
        }
    }

    pub fn undefined() -> Self {
        Self {
            grad_fn: None,
            output_nr: 0,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.grad_fn.is_some()
    }

    pub fn grad_fn(&self) -> Option<&Arc<Node>> {
        self.grad_fn.as_ref()
    }

    pub fn output_nr(&self) -> usize {
        self.output_nr
    }
}

/// Saved context the backward engine needs to run one node's local gradient
/// rule. The manual operation set only ever builds these two kinds; the
/// schema-generated wrappers live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Built by `copy_`: backward must cast/move the incoming gradient back
    /// to the source's placement.
    CopyBackwards { src_device: Device, src_dtype: DType },
    /// Implicit leaf sink. Records the leaf's placement at materialization
    /// time; `set_data` compares against it to drop stale accumulators.
    AccumulateGrad { device: Device, dtype: DType },
}

/// One gradient-function node. Immutable after construction; shared by every
/// variable produced by the same operation and by successors' edge lists.
pub struct Node {
    kind: NodeKind,
    next_edges: Vec<Edge>,
}

impl Node {
    pub fn new(kind: NodeKind, next_edges: Vec<Edge>) -> Self {
        Self { kind, next_edges }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            NodeKind::CopyBackwards { .. } => "CopyBackwards",
            NodeKind::AccumulateGrad { .. } => "AccumulateGrad",
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn next_edges(&self) -> &[Edge] {
        &self.next_edges
    }

    pub fn device(&self) -> Device {
        match self.kind {
            NodeKind::CopyBackwards { src_device, .. } => src_device,
            NodeKind::AccumulateGrad { device, .. } => device,
        }
    }

    pub fn dtype(&self) -> DType {
        match self.kind {
            NodeKind::CopyBackwards { src_dtype, .. } => src_dtype,
            NodeKind::AccumulateGrad { dtype, .. } => dtype,
        }
    }
}
