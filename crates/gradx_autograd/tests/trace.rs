mod utils;

use gradx_autograd::{ops, trace::TraceRecorder, TensorHandle, Variable};
use gradx_core::error::{Error, Result};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};
use utils::{handle, leaf_f32};

#[derive(Default)]
struct RecordingTracer {
    events: Mutex<Vec<String>>,
    next_token: AtomicU64,
}

impl RecordingTracer {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl TraceRecorder for RecordingTracer {
    fn begin_op(&self, op: &'static str, inputs: &[&TensorHandle]) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.events.lock().unwrap().push(format!("begin:{}:{}:{}", token, op, inputs.len()));
        token
    }

    fn end_op(&self, token: u64, _output: &TensorHandle) {
        self.events.lock().unwrap().push(format!("end:{}", token));
    }

    fn stale_value(&self, _value: &TensorHandle) {
        self.events.lock().unwrap().push("stale".to_string());
    }
}

#[test]
fn copy_is_bracketed() -> Result<()> {
    let tracer = RecordingTracer::default();
    let dst = leaf_f32(vec![0.0, 0.0], false)?;
    let src = leaf_f32(vec![1.0, 2.0], false)?;

    ops::copy_(&handle(&dst), &handle(&src), false, Some(&tracer))?;

    assert_eq!(tracer.events(), ["begin:0:copy_:2", "end:0"]);
    assert_eq!(dst.to_flatten_vec::<f32>()?, [1.0, 2.0]);

    Ok(())
}

#[test]
fn failed_copy_never_binds_an_output() -> Result<()> {
    let tracer = RecordingTracer::default();
    let base = leaf_f32(vec![0.0], true)?;
    let view = Variable::make_view(&base, true, true)?;
    let src = leaf_f32(vec![1.0], false)?;

    let result = ops::copy_(&handle(&view), &handle(&src), false, Some(&tracer));

    assert!(matches!(result, Err(Error::ViewSafety(_))));
    assert_eq!(tracer.events(), ["begin:0:copy_:2"]);

    Ok(())
}

#[test]
fn resize_marks_the_value_stale() -> Result<()> {
    let tracer = RecordingTracer::default();
    let v = leaf_f32(vec![1.0, 2.0], false)?;

    ops::resize_(&handle(&v), &[4], Some(&tracer))?;

    assert_eq!(tracer.events(), ["stale"]);
    assert_eq!(v.shape()?, [4]);

    Ok(())
}

#[test]
fn resize_as_marks_the_value_stale() -> Result<()> {
    let tracer = RecordingTracer::default();
    let v = leaf_f32(vec![1.0, 2.0], false)?;
    let template = leaf_f32(vec![0.0; 6], false)?;

    ops::resize_as_(&handle(&v), &handle(&template), Some(&tracer))?;

    assert_eq!(tracer.events(), ["stale"]);
    assert_eq!(v.shape()?, [6]);

    Ok(())
}

#[test]
fn rejected_resize_records_nothing() -> Result<()> {
    let tracer = RecordingTracer::default();
    let v = leaf_f32(vec![1.0], true)?;

    let result = ops::resize_(&handle(&v), &[4], Some(&tracer));

    assert!(matches!(result, Err(Error::InvalidOperation(_))));
    assert!(tracer.events().is_empty());

    Ok(())
}

#[test]
fn detach_binds_the_new_output() -> Result<()> {
    let tracer = RecordingTracer::default();
    let v = leaf_f32(vec![1.0], true)?;

    let out = ops::detach(&handle(&v), Some(&tracer))?;

    assert_eq!(tracer.events(), ["begin:0:detach:1", "end:0"]);
    assert!(out.is_variable());

    Ok(())
}

#[test]
fn operations_run_without_a_recorder() -> Result<()> {
    let dst = leaf_f32(vec![0.0], false)?;
    let src = leaf_f32(vec![7.0], false)?;

    ops::copy_(&handle(&dst), &handle(&src), false, None)?;
    ops::resize_(&handle(&dst), &[2], None)?;
    ops::detach_(&handle(&dst), None)?;

    assert_eq!(dst.shape()?, [2]);

    Ok(())
}

#[test]
fn tokens_distinguish_nested_operations() -> Result<()> {
    let tracer = RecordingTracer::default();
    let a = leaf_f32(vec![0.0], false)?;
    let b = leaf_f32(vec![1.0], false)?;

    ops::copy_(&handle(&a), &handle(&b), false, Some(&tracer))?;
    ops::detach(&handle(&a), Some(&tracer))?;

    assert_eq!(tracer.events(), ["begin:0:copy_:2", "end:0", "begin:1:detach:1", "end:1"]);

    Ok(())
}
