//! Static registry of (backend, element-type) descriptors.
//!
//! Callers that need "every type a backend supports" enumerate this closed
//! table instead of consulting a global singleton.

use crate::{device::Backend, dtype::DType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub backend: Backend,
    pub dtype: DType,
}

impl TypeDescriptor {
    pub fn name(&self) -> String {
        format!("{}/{}", self.backend.as_str(), self.dtype.as_str())
    }
}

pub fn all_types_for_backend(backend: Backend) -> Vec<TypeDescriptor> {
    DType::ALL.iter().map(|&dtype| TypeDescriptor { backend, dtype }).collect()
}

pub fn all_cpu_types() -> Vec<TypeDescriptor> {
    all_types_for_backend(Backend::CPU)
}

pub fn all_cuda_types() -> Vec<TypeDescriptor> {
    all_types_for_backend(Backend::CUDA)
}
