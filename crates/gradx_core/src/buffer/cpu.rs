use crate::{
    buffer::Buffer,
    device::Device,
    dtype::DType,
    error::{Error, Result},
};
use std::{ffi::c_void, ptr};

pub struct CpuBuffer {
    data: Vec<u8>,
    dtype: DType,
}

impl CpuBuffer {
    pub fn new(size: usize, dtype: DType) -> Result<Self> {
        let total_size = size
            .checked_mul(dtype.size_in_bytes())
            .ok_or_else(|| Error::InvalidArgument("Overflow in allocation".into()))?;
        Ok(Self {
            data: vec![0; total_size],
            dtype,
        })
    }
}

impl Buffer for CpuBuffer {
    fn as_ptr(&self) -> *const c_void {
        self.data.as_ptr() as *const _
    }

    fn as_mut_ptr(&mut self) -> *mut c_void {
        self.data.as_mut_ptr() as *mut _
    }

    fn len(&self) -> usize {
        self.data.len() / self.dtype.size_in_bytes()
    }

    fn dtype(&self) -> DType {
        self.dtype
    }

    fn device(&self) -> Device {
        Device::CPU
    }

    unsafe fn copy_from(&mut self, other: &dyn Buffer, src_offset: usize, dst_offset: usize, count: usize) -> Result<()> {
        if self.dtype() != other.dtype() {
            return Err(Error::DTypeMismatch {
                expected: self.dtype(),
                got: other.dtype(),
            });
        }
        if src_offset + count > other.len() || dst_offset + count > self.len() {
            return Err(Error::InvalidArgument("Offset and count exceed buffer dimensions".into()));
        }

        let elem = self.dtype.size_in_bytes();
        ptr::copy_nonoverlapping(
            (other.as_ptr() as *const u8).add(src_offset * elem),
            self.data.as_mut_ptr().add(dst_offset * elem),
            count * elem,
        );
        Ok(())
    }

    unsafe fn copy_from_host(&mut self, src: *const c_void, size_in_bytes: usize, dst_offset: usize) -> Result<()> {
        let start = dst_offset * self.dtype.size_in_bytes();
        if start + size_in_bytes > self.data.len() {
            return Err(Error::InvalidArgument("Size mismatch in copy_from_host".into()));
        }
        ptr::copy_nonoverlapping(src as *const u8, self.data.as_mut_ptr().add(start), size_in_bytes);
        Ok(())
    }

    unsafe fn copy_to_host(&self, dst: *mut c_void, size_in_bytes: usize, src_offset: usize) -> Result<()> {
        let start = src_offset * self.dtype.size_in_bytes();
        if start + size_in_bytes > self.data.len() {
            return Err(Error::InvalidArgument(format!(
                "Size mismatch in copy_to_host: requested {}, available {}",
                size_in_bytes,
                self.data.len() - start
            )));
        }
        ptr::copy_nonoverlapping(self.data.as_ptr().add(start), dst as *mut u8, size_in_bytes);
        Ok(())
    }
}
