use crate::{
    meta::AutogradMeta,
    node::Node,
    ops,
    version::VersionCounter,
    TensorHandle,
};
use gradx_core::{
    device::Device,
    dtype::DType,
    error::{Error, Result},
    scalar::ScalarElem,
    tensor::Tensor,
};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A tensor plus autograd bookkeeping. Cheap to clone: clones are the same
/// variable (shared metadata, storage and version lineage).
#[derive(Clone)]
pub struct Variable {
    inner: Arc<VariableImpl>,
}

struct VariableImpl {
    tensor: RwLock<Tensor>,
    version: VersionCounter,
    // Set for views; the base keeps the storage alive and is consulted by the
    // in-place safety check.
    view_base: Option<Variable>,
    meta: AutogradMeta,
}

impl std::fmt::Debug for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variable").finish_non_exhaustive()
    }
}

impl Variable {
    /// Promote a plain tensor into a leaf variable.
    pub fn new(tensor: Tensor, requires_grad: bool) -> Result<Self> {
        if requires_grad && !tensor.dtype().is_float() {
            return Err(Error::UnsupportedDType);
        }

        Ok(Self {
            inner: Arc::new(VariableImpl {
                tensor: RwLock::new(tensor),
                version: VersionCounter::new(),
                view_base: None,
                meta: AutogradMeta::new(requires_grad, true),
            }),
        })
    }

    /// Wrap one output of a differentiable operation: `(grad_fn, output_nr)`.
    pub fn from_op(tensor: Tensor, grad_fn: Arc<Node>, output_nr: usize) -> Self {
        Self {
            inner: Arc::new(VariableImpl {
                tensor: RwLock::new(tensor),
                version: VersionCounter::new(),
                view_base: None,
                meta: AutogradMeta::from_op(grad_fn, output_nr),
            }),
        }
    }

    /// A view of `base`: shares storage and version lineage. A
    /// non-differentiable view never requires grad and, when
    /// `allow_metadata_change` is false, refuses later metadata mutation.
    pub fn make_view(base: &Variable, differentiable: bool, allow_metadata_change: bool) -> Result<Variable> {
        let tensor = base.tensor()?.clone();
        let requires_grad = differentiable && base.requires_grad()?;

        Ok(Self {
            inner: Arc::new(VariableImpl {
                tensor: RwLock::new(tensor),
                version: base.inner.version.clone(),
                view_base: Some(base.clone()),
                meta: AutogradMeta::new(requires_grad, allow_metadata_change),
            }),
        })
    }

    // tensor access

    pub fn tensor(&self) -> Result<RwLockReadGuard<'_, Tensor>> {
        self.inner.tensor.read().map_err(|_| Error::BufferLocked)
    }

    pub(crate) fn tensor_mut(&self) -> Result<RwLockWriteGuard<'_, Tensor>> {
        self.inner.tensor.write().map_err(|_| Error::BufferLocked)
    }

    pub fn shape(&self) -> Result<Vec<usize>> {
        Ok(self.tensor()?.shape().to_vec())
    }

    pub fn size(&self) -> Result<usize> {
        Ok(self.tensor()?.size())
    }

    pub fn ndim(&self) -> Result<usize> {
        Ok(self.tensor()?.ndim())
    }

    pub fn device(&self) -> Result<Device> {
        Ok(self.tensor()?.device())
    }

    pub fn dtype(&self) -> Result<DType> {
        Ok(self.tensor()?.dtype())
    }

    pub fn to_flatten_vec<T: ScalarElem>(&self) -> Result<Vec<T>> {
        self.tensor()?.to_flatten_vec()
    }

    // autograd metadata

    pub(crate) fn meta(&self) -> &AutogradMeta {
        &self.inner.meta
    }

    pub fn requires_grad(&self) -> Result<bool> {
        self.inner.meta.requires_grad()
    }

    /// The flag is only directly settable on leaves; everywhere else it is
    /// implied by `grad_fn`. Detached views refuse to be re-enabled; re-wrap
    /// the tensor instead.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<()> {
        if requires_grad && !self.dtype()?.is_float() {
            return Err(Error::UnsupportedDType);
        }
        if !self.is_leaf()? {
            return Err(Error::InvalidOperation(
                "you can only change requires_grad flags of leaf variables".into(),
            ));
        }
        if requires_grad && !self.inner.meta.allow_metadata_change()? {
            return Err(Error::InvalidOperation(
                "metadata of this variable is locked; wrap its tensor in a new variable instead".into(),
            ));
        }
        self.inner.meta.set_requires_grad_flag(requires_grad)
    }

    pub fn grad_fn(&self) -> Result<Option<Arc<Node>>> {
        self.inner.meta.grad_fn()
    }

    pub fn is_leaf(&self) -> Result<bool> {
        self.inner.meta.is_leaf()
    }

    /// The output slot of `grad_fn` this variable corresponds to.
    pub fn output_nr(&self) -> Result<usize> {
        self.inner.meta.output_nr()
    }

    pub fn is_view(&self) -> bool {
        self.inner.view_base.is_some()
    }

    pub fn view_base(&self) -> Option<&Variable> {
        self.inner.view_base.as_ref()
    }

    pub fn name(&self) -> Result<Option<String>> {
        self.inner.meta.name()
    }

    pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
        self.inner.meta.set_name(name)
    }

    // version counter

    pub fn current_version(&self) -> u32 {
        self.inner.version.current()
    }

    pub fn bump_version(&self) {
        self.inner.version.bump();
    }

    pub(crate) fn version_counter(&self) -> &VersionCounter {
        &self.inner.version
    }

    // grad accumulator

    /// Materialize (or fetch) the accumulator node for this leaf. The strong
    /// handle belongs to the caller; the metadata only keeps a weak one.
    pub fn grad_accumulator(&self) -> Result<Arc<Node>> {
        let (device, dtype) = {
            let tensor = self.tensor()?;
            (tensor.device(), tensor.dtype())
        };
        self.inner.meta.grad_accumulator_or_init(device, dtype)
    }

    pub fn has_live_accumulator(&self) -> Result<bool> {
        Ok(self.inner.meta.live_accumulator()?.is_some())
    }

    // identity

    pub fn ptr_eq(&self, other: &Variable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn shares_storage_with(&self, other: &Variable) -> Result<bool> {
        Ok(self.tensor()?.shares_buffer_with(&*other.tensor()?))
    }

    pub fn shares_version_with(&self, other: &Variable) -> bool {
        self.inner.version.shares_with(&other.inner.version)
    }

    // manual operation set, tracer-less convenience forms

    pub fn copy_(&self, src: &Variable, non_blocking: bool) -> Result<()> {
        ops::copy_(&self.handle(), &src.handle(), non_blocking, None)?;
        Ok(())
    }

    pub fn resize_(&self, size: &[usize]) -> Result<()> {
        ops::resize_(&self.handle(), size, None)?;
        Ok(())
    }

    pub fn resize_as_(&self, template: &Variable) -> Result<()> {
        ops::resize_as_(&self.handle(), &template.handle(), None)?;
        Ok(())
    }

    pub fn detach(&self) -> Result<Variable> {
        let out = ops::detach(&self.handle(), None)?;
        crate::unpack::unpack(&out, "result", 0)
    }

    pub fn detach_(&self) -> Result<()> {
        ops::detach_(&self.handle(), None)?;
        Ok(())
    }

    pub fn set_data(&self, new_data: &Variable) -> Result<()> {
        ops::set_data(&self.handle(), &new_data.handle())
    }

    pub fn variable_data(&self) -> Result<Variable> {
        let out = ops::variable_data(&self.handle())?;
        crate::unpack::unpack(&out, "result", 0)
    }

    fn handle(&self) -> TensorHandle {
        TensorHandle::from(self.clone())
    }
}
