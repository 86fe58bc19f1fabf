pub mod cpu;

use crate::{
    device::Device,
    dtype::DType,
    error::{Error, Result},
    scalar::Scalar,
};
use cpu::CpuBuffer;
use std::{
    ffi::c_void,
    sync::{Arc, RwLock},
};

pub struct BufferManager {}

impl BufferManager {
    pub fn create(size: usize, device: Device, dtype: DType) -> Result<Arc<RwLock<dyn Buffer>>> {
        let buffer: Arc<RwLock<dyn Buffer>> = match device {
            Device::CPU => Arc::new(RwLock::new(CpuBuffer::new(size, dtype)?)),
            Device::CUDA(id) => {
                return Err(Error::InvalidDevice(format!(
                    "CUDA device {} requested but no CUDA backend is compiled in",
                    id
                )))
            }
        };

        Ok(buffer)
    }
}

pub trait Buffer: Send + Sync {
    fn as_ptr(&self) -> *const c_void;
    fn as_mut_ptr(&mut self) -> *mut c_void;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn dtype(&self) -> DType;
    fn device(&self) -> Device;

    /// # Safety
    /// Requires both ranges to be in bounds, the same dtype on both buffers
    /// and no memory overlap.
    unsafe fn copy_from(&mut self, other: &dyn Buffer, src_offset: usize, dst_offset: usize, count: usize) -> Result<()>;

    /// # Safety
    /// Requires a valid source pointer covering `size_in_bytes` with no
    /// memory overlap with this buffer.
    unsafe fn copy_from_host(&mut self, src: *const c_void, size_in_bytes: usize, dst_offset: usize) -> Result<()>;

    /// # Safety
    /// Requires a valid destination pointer covering `size_in_bytes` with no
    /// memory overlap with this buffer.
    unsafe fn copy_to_host(&self, dst: *mut c_void, size_in_bytes: usize, src_offset: usize) -> Result<()>;

    /// Read the element at `index`, as a scalar of this buffer's dtype.
    fn read_scalar(&self, index: usize) -> Result<Scalar> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds { index, size: self.len() });
        }

        let offset = index * self.dtype().size_in_bytes();
        let ptr = unsafe { (self.as_ptr() as *const u8).add(offset) };
        Ok(unsafe { self.dtype().read_scalar(ptr) })
    }

    /// Write `value` at `index`, coercing it to this buffer's dtype.
    fn write_scalar(&mut self, index: usize, value: Scalar) -> Result<()> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds { index, size: self.len() });
        }

        let dtype = self.dtype();
        let offset = index * dtype.size_in_bytes();
        let ptr = unsafe { (self.as_mut_ptr() as *mut u8).add(offset) };
        unsafe { dtype.write_scalar(ptr, value) };
        Ok(())
    }

    fn copy_from_with_dtype_cast(&mut self, other: &dyn Buffer, src_offset: usize, dst_offset: usize, count: usize) -> Result<()> {
        if src_offset + count > other.len() || dst_offset + count > self.len() {
            return Err(Error::InvalidArgument("Offset and count exceed buffer dimensions".into()));
        }

        if other.dtype() == self.dtype() {
            unsafe {
                return self.copy_from(other, src_offset, dst_offset, count);
            }
        }

        for i in 0..count {
            let value = other.read_scalar(src_offset + i)?;
            self.write_scalar(dst_offset + i, value)?;
        }
        Ok(())
    }
}
