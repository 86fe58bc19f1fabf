//! Pure functions over input metadata: which edges a new node points to, and
//! how a variable is rebased onto a node after an in-place operation.

use crate::{
    node::{Edge, Node},
    variable::Variable,
};
use gradx_core::error::{Error, Result};
use std::sync::Arc;

/// True iff any input participates in gradient tracking.
pub fn compute_requires_grad(inputs: &[&Variable]) -> Result<bool> {
    for input in inputs {
        if input.requires_grad()? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The upstream edge gradient flow into `v` would follow: its own `grad_fn`,
/// the implicit accumulator for a tracked leaf, or no edge at all.
pub fn gradient_edge(v: &Variable) -> Result<Edge> {
    if let Some(grad_fn) = v.grad_fn()? {
        return Ok(Edge::new(grad_fn, v.output_nr()?));
    }
    if v.requires_grad()? {
        return Ok(Edge::new(v.grad_accumulator()?, 0));
    }
    Ok(Edge::undefined())
}

/// One edge per input, in input order.
pub fn collect_next_edges(inputs: &[&Variable]) -> Result<Vec<Edge>> {
    inputs.iter().map(|input| gradient_edge(input)).collect()
}

/// Atomically replace `v`'s graph position with `(new_grad_fn, 0)`. A `None`
/// node means the operation took the non-differentiable path: no-op.
pub fn rebase_history(v: &Variable, grad_fn: Option<Arc<Node>>) -> Result<()> {
    match grad_fn {
        Some(grad_fn) => v.meta().rebase(grad_fn),
        None => Ok(()),
    }
}

/// Gate in front of every in-place mutation: writing through a view that
/// still participates in gradient tracking would corrupt values another
/// holder's backward depends on.
pub fn check_inplace(v: &Variable) -> Result<()> {
    if v.is_view() && v.requires_grad()? {
        return Err(Error::ViewSafety(
            "a view of a Variable that requires grad is being used in an in-place operation".into(),
        ));
    }
    Ok(())
}
