//! The hand-specified operation set: in-place copy, resize, detach and raw
//! metadata replacement. These cannot be generated from a schema because they
//! mutate shared storage, change identity, or interact with view tracking.
//!
//! Every operation follows the same protocol: optional trace entry, unpack
//! and validate, run the storage-level primitive with autograd suspended
//! (the `raw_*` entry points), then update version/metadata and bind the
//! trace output.

use crate::{
    graph::{check_inplace, collect_next_edges, compute_requires_grad, rebase_history},
    handle::TensorHandle,
    node::{Node, NodeKind},
    trace::TraceRecorder,
    unpack::unpack,
    variable::Variable,
};
use gradx_core::error::{Error, Result};
use std::sync::Arc;

/// In-place overwrite of `self_`'s values with `src`'s, broadcasting and
/// casting as the storage layer does. Builds a `CopyBackwards` node only when
/// gradient tracking is required and the destination is floating-point:
/// copying into an integer destination never requires grad, whatever the
/// input flags say.
pub fn copy_(self_: &TensorHandle, src: &TensorHandle, non_blocking: bool, tracer: Option<&dyn TraceRecorder>) -> Result<TensorHandle> {
    let token = tracer.map(|t| t.begin_op("copy_", &[self_, src]));

    let dst = unpack(self_, "self", 0)?;
    let src_var = unpack(src, "src", 1)?;
    check_inplace(&dst)?;

    let mut requires_grad = compute_requires_grad(&[&dst, &src_var])?;
    requires_grad &= dst.dtype()?.is_float();

    let grad_fn = if requires_grad {
        let next_edges = collect_next_edges(&[&dst, &src_var])?;
        Some(Arc::new(Node::new(
            NodeKind::CopyBackwards {
                src_device: src_var.device()?,
                src_dtype: src_var.dtype()?,
            },
            next_edges,
        )))
    } else {
        None
    };

    {
        let dst_tensor = dst.tensor()?;
        let src_tensor = src_var.tensor()?;
        dst_tensor.raw_copy_from(&src_tensor, non_blocking)?;
    }

    // Bump after the mutation landed, so a failed copy never advances the
    // epoch. Exactly once per logical mutation.
    dst.bump_version();
    rebase_history(&dst, grad_fn)?;

    if let (Some(tracer), Some(token)) = (tracer, token) {
        tracer.end_op(token, self_);
    }
    Ok(self_.clone())
}

/// In-place reallocation. Disallowed outright on gradient-tracked variables;
/// never builds a node and never bumps the version (the values-in-place
/// history is meaningless once the storage changed size). The traced value,
/// if any, goes stale.
pub fn resize_(self_: &TensorHandle, size: &[usize], tracer: Option<&dyn TraceRecorder>) -> Result<TensorHandle> {
    let var = unpack(self_, "self", 0)?;
    if var.requires_grad()? {
        return Err(Error::InvalidOperation("cannot resize variables that require grad".into()));
    }

    if let Some(tracer) = tracer {
        tracer.stale_value(self_);
    }

    var.tensor_mut()?.raw_resize(size)?;
    Ok(self_.clone())
}

/// `resize_` with the target shape taken from `the_template`.
pub fn resize_as_(self_: &TensorHandle, the_template: &TensorHandle, tracer: Option<&dyn TraceRecorder>) -> Result<TensorHandle> {
    let var = unpack(self_, "self", 0)?;
    let template = unpack(the_template, "the_template", 1)?;
    if var.requires_grad()? {
        return Err(Error::InvalidOperation("cannot resize variables that require grad".into()));
    }

    if let Some(tracer) = tracer {
        tracer.stale_value(self_);
    }

    let shape = template.shape()?;
    var.tensor_mut()?.raw_resize(&shape)?;
    Ok(self_.clone())
}

/// The one manual operation that is not in-place: a new variable viewing
/// `self_`'s storage with no gradient history, never able to require grad
/// again through metadata mutation. `self_` is left untouched.
pub fn detach(self_: &TensorHandle, tracer: Option<&dyn TraceRecorder>) -> Result<TensorHandle> {
    let token = tracer.map(|t| t.begin_op("detach", &[self_]));

    let var = unpack(self_, "self", 0)?;
    let result = Variable::make_view(&var, false, false)?;
    if let Some(name) = var.name()? {
        result.set_name(name)?;
    }

    let out = TensorHandle::from(result);
    if let (Some(tracer), Some(token)) = (tracer, token) {
        tracer.end_op(token, &out);
    }
    Ok(out)
}

/// In-place detach. Refused on views: severing the view relationship in
/// place would silently break other holders; they must use `detach` instead.
pub fn detach_(self_: &TensorHandle, tracer: Option<&dyn TraceRecorder>) -> Result<TensorHandle> {
    let token = tracer.map(|t| t.begin_op("detach_", &[self_]));

    let var = unpack(self_, "self", 0)?;
    if var.is_view() {
        return Err(Error::InvalidOperation("Can't detach views in-place. Use detach() instead".into()));
    }
    var.meta().clear_history()?;

    if let (Some(tracer), Some(token)) = (tracer, token) {
        tracer.end_op(token, self_);
    }
    Ok(self_.clone())
}

/// Replace every non-autograd field of `self_` (storage pointer, layout,
/// device, dtype) with `new_data`'s, keeping `self_`'s gradient history and
/// version lineage. Always ignores the metadata-change lock: this is the
/// escape hatch for rewriting a variable's tensor wholesale.
pub fn set_data(self_: &TensorHandle, new_data: &TensorHandle) -> Result<()> {
    let var = unpack(self_, "self", 0)?;
    let new = unpack(new_data, "new_data", 1)?;

    let (cur_dtype, compatible) = {
        let cur = var.tensor()?;
        let incoming = new.tensor()?;
        (cur.dtype(), cur.has_compatible_shallow_copy_type(&incoming))
    };
    if !compatible {
        return Err(Error::IncompatibleType(
            "Attempted to call `variable.set_data(tensor)`, but `variable` and `tensor` have incompatible tensor type".into(),
        ));
    }

    let (new_dtype, new_device, incoming) = {
        let tensor = new.tensor()?;
        (tensor.dtype(), tensor.device(), tensor.clone())
    };

    // A live accumulator pinned to the old device or dtype must never be fed
    // gradients for the new one. Checked and dropped under the metadata lock,
    // which is released before the storage swap below.
    var.meta().invalidate_stale_accumulator(cur_dtype, new_dtype, new_device)?;

    // The version counter is deliberately left alone: `self_` keeps its own
    // lineage rather than adopting `new_data`'s.
    var.tensor_mut()?.shallow_copy_from(&incoming);
    Ok(())
}

/// A leaf variable sharing `self_`'s storage with no history, a fresh
/// version lineage and changeable metadata.
pub fn variable_data(self_: &TensorHandle) -> Result<TensorHandle> {
    let var = unpack(self_, "self", 0)?;
    let tensor = var.tensor()?.clone();
    let result = Variable::new(tensor, false)?;
    Ok(TensorHandle::from(result))
}
