mod utils;

use gradx_autograd::{
    graph::{check_inplace, collect_next_edges, compute_requires_grad, gradient_edge, rebase_history},
    Node, NodeKind, Variable,
};
use gradx_core::{
    device::Device,
    dtype::DType,
    error::{Error, Result},
    tensor::Tensor,
};
use std::sync::Arc;
use utils::{leaf_f32, setup_device};

fn copy_node() -> Arc<Node> {
    Arc::new(Node::new(
        NodeKind::CopyBackwards {
            src_device: Device::CPU,
            src_dtype: DType::F32,
        },
        vec![],
    ))
}

#[test]
fn requires_grad_over_inputs() -> Result<()> {
    let a = leaf_f32(vec![1.0], false)?;
    let b = leaf_f32(vec![2.0], true)?;

    assert!(!compute_requires_grad(&[&a])?);
    assert!(compute_requires_grad(&[&a, &b])?);
    assert!(!compute_requires_grad(&[])?);

    Ok(())
}

#[test]
fn edge_for_untracked_leaf_is_undefined() -> Result<()> {
    let v = leaf_f32(vec![1.0], false)?;
    let edge = gradient_edge(&v)?;

    assert!(!edge.is_defined());

    Ok(())
}

#[test]
fn edge_for_tracked_leaf_is_the_accumulator() -> Result<()> {
    let v = leaf_f32(vec![1.0], true)?;
    let edge = gradient_edge(&v)?;

    assert!(edge.is_defined());
    assert_eq!(edge.output_nr(), 0);
    assert_eq!(edge.grad_fn().map(|n| n.name()), Some("AccumulateGrad"));

    Ok(())
}

#[test]
fn edge_for_op_output_is_its_grad_fn() -> Result<()> {
    setup_device();

    let node = copy_node();
    let t = Tensor::new(vec![1.0f32])?;
    let v = Variable::from_op(t, node.clone(), 1);
    let edge = gradient_edge(&v)?;

    assert!(edge.grad_fn().map(|n| Arc::ptr_eq(n, &node)).unwrap_or(false));
    assert_eq!(edge.output_nr(), 1);

    Ok(())
}

#[test]
fn collected_edges_keep_input_order() -> Result<()> {
    let a = leaf_f32(vec![1.0], false)?;
    let b = leaf_f32(vec![2.0], true)?;

    let edges = collect_next_edges(&[&a, &b])?;

    assert_eq!(edges.len(), 2);
    assert!(!edges[0].is_defined());
    assert!(edges[1].is_defined());

    Ok(())
}

#[test]
fn accumulator_is_cached_while_alive() -> Result<()> {
    let v = leaf_f32(vec![1.0], true)?;

    let first = v.grad_accumulator()?;
    let second = v.grad_accumulator()?;

    assert!(Arc::ptr_eq(&first, &second));
    assert!(v.has_live_accumulator()?);

    drop(first);
    drop(second);

    // only weakly held: dropping the strong handles frees it
    assert!(!v.has_live_accumulator()?);

    Ok(())
}

#[test]
fn accumulator_records_placement() -> Result<()> {
    let v = leaf_f32(vec![1.0], true)?;
    let acc = v.grad_accumulator()?;

    assert_eq!(acc.device(), Device::CPU);
    assert_eq!(acc.dtype(), DType::F32);
    assert!(acc.next_edges().is_empty());

    Ok(())
}

#[test]
fn rebase_moves_onto_slot_zero() -> Result<()> {
    setup_device();

    let t = Tensor::new(vec![1.0f32])?;
    let v = Variable::from_op(t, copy_node(), 3);

    let replacement = copy_node();
    rebase_history(&v, Some(replacement.clone()))?;

    assert!(v.grad_fn()?.map(|n| Arc::ptr_eq(&n, &replacement)).unwrap_or(false));
    assert_eq!(v.output_nr()?, 0);

    Ok(())
}

#[test]
fn rebase_without_node_is_a_no_op() -> Result<()> {
    let v = leaf_f32(vec![1.0], false)?;
    rebase_history(&v, None)?;

    assert!(v.is_leaf()?);
    assert!(v.grad_fn()?.is_none());

    Ok(())
}

#[test]
fn inplace_check_rejects_tracked_views() -> Result<()> {
    let base = leaf_f32(vec![1.0, 2.0], true)?;
    let view = Variable::make_view(&base, true, true)?;

    let result = check_inplace(&view);

    assert!(matches!(result, Err(Error::ViewSafety(_))));

    Ok(())
}

#[test]
fn inplace_check_allows_detached_views_and_leaves() -> Result<()> {
    let base = leaf_f32(vec![1.0, 2.0], true)?;
    let detached = Variable::make_view(&base, false, false)?;

    check_inplace(&base)?;
    check_inplace(&detached)?;

    Ok(())
}
