use crate::handle::TensorHandle;

/// Optional sink mirroring manual operations into an external trace (a JIT
/// recorder, typically). Injected as `Option<&dyn TraceRecorder>`; every
/// operation is fully correct with no recorder attached, and nothing a
/// recorder does may influence autograd bookkeeping.
pub trait TraceRecorder: Send + Sync {
    /// Called before argument validation; returns a token identifying the
    /// trace node so outputs can be bound after the operation completes.
    fn begin_op(&self, op: &'static str, inputs: &[&TensorHandle]) -> u64;

    /// Called after the operation succeeded, with the operation's output.
    fn end_op(&self, token: u64, output: &TensorHandle);

    /// The traced value for `value` is no longer meaningful (its storage was
    /// resized); the recorder should forget it.
    fn stale_value(&self, value: &TensorHandle);
}
