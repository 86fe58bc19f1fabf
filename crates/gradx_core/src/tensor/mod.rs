pub mod adapter;
mod creation;

use crate::{
    buffer::{Buffer, BufferManager},
    device::Device,
    dtype::DType,
    error::{Error, Result},
    layout::Layout,
    scalar::{Scalar, ScalarElem},
};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A plain strided tensor: storage plus layout, no differentiability
/// bookkeeping. Cloning shares the underlying buffer.
#[derive(Clone)]
pub struct Tensor {
    buffer: Arc<RwLock<dyn Buffer>>,
    layout: Layout,
    device: Device,
    dtype: DType,
}

impl Tensor {
    pub(crate) fn from_parts(buffer: Arc<RwLock<dyn Buffer>>, layout: Layout, device: Device, dtype: DType) -> Self {
        Self {
            buffer,
            layout,
            device,
            dtype,
        }
    }

    // data

    pub fn buffer(&self) -> Result<RwLockReadGuard<'_, dyn Buffer + 'static>> {
        self.buffer.read().map_err(|_| Error::BufferLocked)
    }

    pub fn buffer_mut(&self) -> Result<RwLockWriteGuard<'_, dyn Buffer + 'static>> {
        self.buffer.write().map_err(|_| Error::BufferLocked)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.layout.size_dim(dim)
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    // element access

    pub fn get(&self, indices: &[usize]) -> Result<Scalar> {
        let flat = self.flat_index(indices)?;
        self.buffer()?.read_scalar(flat)
    }

    pub fn set(&self, indices: &[usize], value: impl Into<Scalar>) -> Result<()> {
        let flat = self.flat_index(indices)?;
        self.buffer_mut()?.write_scalar(flat, value.into())
    }

    pub fn to_flatten_vec<T: ScalarElem>(&self) -> Result<Vec<T>> {
        let size = self.size();
        let ndim = self.ndim();
        let shape = self.shape().to_vec();
        let strides = self.strides().to_vec();

        let guard = self.buffer()?;
        let mut out = Vec::with_capacity(size);
        let mut idx = vec![0usize; ndim];
        for _ in 0..size {
            let flat: usize = idx.iter().zip(strides.iter()).map(|(i, s)| i * s).sum();
            out.push(T::from_scalar(guard.read_scalar(flat)?));

            for d in (0..ndim).rev() {
                idx[d] += 1;
                if idx[d] < shape[d] {
                    break;
                }
                idx[d] = 0;
            }
        }

        Ok(out)
    }

    fn flat_index(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.ndim() {
            return Err(Error::InvalidArgument(format!(
                "Expected {} indices but got {}",
                self.ndim(),
                indices.len()
            )));
        }
        for (d, (&i, &s)) in indices.iter().zip(self.shape().iter()).enumerate() {
            if i >= s {
                return Err(Error::IndexOutOfBounds {
                    index: i,
                    size: self.dim_size(d).unwrap_or(0),
                });
            }
        }
        Ok(indices.iter().zip(self.strides().iter()).map(|(i, s)| i * s).sum())
    }

    // identity

    pub fn shares_buffer_with(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Whether `other` may replace this tensor's metadata wholesale: same
    /// device family and same dtype family.
    pub fn has_compatible_shallow_copy_type(&self, other: &Tensor) -> bool {
        self.device.backend() == other.device.backend() && self.dtype.category() == other.dtype.category()
    }

    // ==== raw storage-level entry points ====
    //
    // These bypass any autograd layer sitting above this crate: no graph
    // nodes, no version bookkeeping. The autograd layer calls them once its
    // own validation is done.

    /// Overwrite this tensor's values with `src`, broadcasting `src` to this
    /// tensor's shape and casting to this tensor's dtype.
    pub fn raw_copy_from(&self, src: &Tensor, _non_blocking: bool) -> Result<()> {
        let dst_shape = self.shape().to_vec();
        if !src.layout().can_broadcast_to(&dst_shape) {
            return Err(Error::IncompatibleShape(format!(
                "cannot broadcast shape {:?} to {:?}",
                src.shape(),
                dst_shape
            )));
        }

        let size = self.size();
        let rank = dst_shape.len();

        let rank_diff = rank - src.ndim();
        let mut padded_shape = vec![1usize; rank_diff];
        padded_shape.extend(src.shape().iter());
        let mut padded_strides = vec![0usize; rank_diff];
        padded_strides.extend(src.strides().iter());
        for d in 0..rank {
            if padded_shape[d] == 1 {
                padded_strides[d] = 0;
            }
        }

        // Gather the source first so that copies between views of the same
        // storage never hold both buffer locks at once.
        let mut values = Vec::with_capacity(size);
        {
            let src_guard = src.buffer()?;
            let mut idx = vec![0usize; rank];
            for _ in 0..size {
                let flat: usize = idx.iter().zip(padded_strides.iter()).map(|(i, s)| i * s).sum();
                values.push(src_guard.read_scalar(flat)?);

                for d in (0..rank).rev() {
                    idx[d] += 1;
                    if idx[d] < dst_shape[d] {
                        break;
                    }
                    idx[d] = 0;
                }
            }
        }

        let mut dst_guard = self.buffer_mut()?;
        for (i, value) in values.into_iter().enumerate() {
            dst_guard.write_scalar(i, value)?;
        }
        Ok(())
    }

    /// Reallocate to `new_shape`, keeping the leading elements that still
    /// fit. Newly exposed elements are zero.
    pub fn raw_resize(&mut self, new_shape: &[usize]) -> Result<()> {
        let new_size = Layout::compute_size(new_shape);
        let old_len = self.buffer()?.len();

        if new_size != old_len {
            let new_buffer = BufferManager::create(new_size, self.device, self.dtype)?;
            let count = old_len.min(new_size);
            if count > 0 {
                let src_guard = self.buffer()?;
                let mut dst_guard = new_buffer.write().map_err(|_| Error::BufferLocked)?;
                unsafe {
                    dst_guard.copy_from(&*src_guard, 0, 0, count)?;
                }
            }
            self.buffer = new_buffer;
        }

        self.layout = Layout::from_shape(new_shape);
        Ok(())
    }

    /// Replace this tensor's storage pointer and metadata with `other`'s.
    /// The storage is shared afterwards, not copied.
    pub fn shallow_copy_from(&mut self, other: &Tensor) {
        self.buffer = Arc::clone(&other.buffer);
        self.layout = other.layout.clone();
        self.device = other.device;
        self.dtype = other.dtype;
    }
}
