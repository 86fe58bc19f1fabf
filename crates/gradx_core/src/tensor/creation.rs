use crate::{
    buffer::BufferManager,
    device::{get_default_device, Device},
    dtype::{get_default_dtype, DType},
    error::{Error, Result},
    layout::Layout,
    scalar::Scalar,
    tensor::{adapter::TensorAdapter, Tensor},
};
use rand::distributions::Distribution;

impl Tensor {
    pub fn new<T>(data: T) -> Result<Self>
    where
        T: TensorAdapter,
    {
        let dtype = data.dtype();
        Self::new_with_spec(data, get_default_device(), dtype)
    }

    pub fn new_with_spec<T>(data: T, device: Device, dtype: DType) -> Result<Self>
    where
        T: TensorAdapter,
    {
        let shape = data.to_shape();
        let scalars = data.to_flat_scalars()?;
        let tensor = Self::empty_with_spec(&shape, device, dtype)?;

        {
            let mut guard = tensor.buffer_mut()?;
            for (i, scalar) in scalars.into_iter().enumerate() {
                guard.write_scalar(i, scalar)?;
            }
        }

        Ok(tensor)
    }

    pub fn empty(shape: &[usize]) -> Result<Self> {
        Self::empty_with_spec(shape, get_default_device(), get_default_dtype())
    }

    pub fn empty_like(src: &Tensor) -> Result<Self> {
        Self::empty_with_spec(src.shape(), src.device(), src.dtype())
    }

    pub fn empty_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        let layout = Layout::from_shape(shape);
        let buffer = BufferManager::create(layout.size(), device, dtype)?;
        Ok(Self::from_parts(buffer, layout, device, dtype))
    }

    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::zeros_with_spec(shape, get_default_device(), get_default_dtype())
    }

    pub fn zeros_like(src: &Tensor) -> Result<Self> {
        Self::zeros_with_spec(src.shape(), src.device(), src.dtype())
    }

    pub fn zeros_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        // fresh buffers are zeroed
        Self::empty_with_spec(shape, device, dtype)
    }

    pub fn randn(shape: &[usize]) -> Result<Self> {
        Self::randn_with_spec(shape, get_default_device(), get_default_dtype())
    }

    pub fn randn_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        if !dtype.is_float() {
            return Err(Error::UnsupportedDType);
        }

        let tensor = Self::empty_with_spec(shape, device, dtype)?;
        let size = tensor.size();
        let mut rng = rand::thread_rng();
        let normal = rand_distr::StandardNormal;

        {
            let mut guard = tensor.buffer_mut()?;
            for i in 0..size {
                let sample: f64 = normal.sample(&mut rng);
                guard.write_scalar(i, Scalar::F64(sample))?;
            }
        }

        Ok(tensor)
    }
}
