use crate::node::{Node, NodeKind};
use gradx_core::{
    device::Device,
    dtype::DType,
    error::{Error, Result},
};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Per-variable differentiability record. One mutex guards the whole record:
/// a backward pass may read the accumulator while the forward thread runs a
/// `set_data`-style mutation. The lock is never held across a storage
/// mutation.
pub struct AutogradMeta {
    state: Mutex<MetaState>,
}

struct MetaState {
    grad_fn: Option<Arc<Node>>,
    output_nr: usize,
    requires_grad: bool,
    grad_accumulator: Weak<Node>,
    allow_metadata_change: bool,
    name: Option<String>,
}

impl AutogradMeta {
    pub fn new(requires_grad: bool, allow_metadata_change: bool) -> Self {
        Self {
            state: Mutex::new(MetaState {
                grad_fn: None,
                output_nr: 0,
                requires_grad,
                grad_accumulator: Weak::new(),
                allow_metadata_change,
                name: None,
            }),
        }
    }

    pub fn from_op(grad_fn: Arc<Node>, output_nr: usize) -> Self {
        Self {
            state: Mutex::new(MetaState {
                grad_fn: Some(grad_fn),
                output_nr,
                requires_grad: false,
                grad_accumulator: Weak::new(),
                allow_metadata_change: true,
                name: None,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MetaState>> {
        self.state.lock().map_err(|_| Error::MetadataLocked)
    }

    pub fn grad_fn(&self) -> Result<Option<Arc<Node>>> {
        Ok(self.lock()?.grad_fn.clone())
    }

    pub fn output_nr(&self) -> Result<usize> {
        Ok(self.lock()?.output_nr)
    }

    /// A variable requires grad when its flag is set or when it was produced
    /// by a differentiable operation.
    pub fn requires_grad(&self) -> Result<bool> {
        let state = self.lock()?;
        Ok(state.requires_grad || state.grad_fn.is_some())
    }

    pub fn is_leaf(&self) -> Result<bool> {
        Ok(self.lock()?.grad_fn.is_none())
    }

    pub fn set_requires_grad_flag(&self, requires_grad: bool) -> Result<()> {
        self.lock()?.requires_grad = requires_grad;
        Ok(())
    }

    pub fn allow_metadata_change(&self) -> Result<bool> {
        Ok(self.lock()?.allow_metadata_change)
    }

    pub fn name(&self) -> Result<Option<String>> {
        Ok(self.lock()?.name.clone())
    }

    pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
        self.lock()?.name = Some(name.into());
        Ok(())
    }

    /// Move this variable onto a freshly built node: `(new_grad_fn, 0)`.
    pub fn rebase(&self, grad_fn: Arc<Node>) -> Result<()> {
        let mut state = self.lock()?;
        state.grad_fn = Some(grad_fn);
        state.output_nr = 0;
        Ok(())
    }

    /// In-place detach: drop the graph position and the flag.
    pub fn clear_history(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.requires_grad = false;
        state.grad_fn = None;
        state.output_nr = 0;
        Ok(())
    }

    /// The lazily materialized accumulator node for a leaf. Cached weakly;
    /// callers own the strong handle (edge lists, the traversal engine).
    pub fn grad_accumulator_or_init(&self, device: Device, dtype: DType) -> Result<Arc<Node>> {
        let mut state = self.lock()?;
        if let Some(live) = state.grad_accumulator.upgrade() {
            return Ok(live);
        }

        let node = Arc::new(Node::new(NodeKind::AccumulateGrad { device, dtype }, vec![]));
        state.grad_accumulator = Arc::downgrade(&node);
        Ok(node)
    }

    pub fn live_accumulator(&self) -> Result<Option<Arc<Node>>> {
        Ok(self.lock()?.grad_accumulator.upgrade())
    }

    /// `set_data` support: drop the cached accumulator when the incoming
    /// metadata no longer matches what the accumulator was pinned to.
    pub fn invalidate_stale_accumulator(&self, cur_dtype: DType, new_dtype: DType, new_device: Device) -> Result<()> {
        let mut state = self.lock()?;
        if let Some(live) = state.grad_accumulator.upgrade() {
            if new_dtype != cur_dtype || live.device() != new_device {
                state.grad_accumulator = Weak::new();
            }
        }
        Ok(())
    }
}
