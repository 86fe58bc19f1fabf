mod utils;

use gradx_core::{
    device::Device,
    dtype::DType,
    error::{Error, Result},
    Tensor,
};
use utils::setup_device;

#[test]
fn new() -> Result<()> {
    setup_device();

    let x = Tensor::new(vec![1, 2, 3])?;

    assert_eq!(x.dtype(), DType::I32);
    assert_eq!(x.to_flatten_vec::<i32>()?, [1, 2, 3]);

    Ok(())
}

#[test]
fn new_nested() -> Result<()> {
    setup_device();

    let x = Tensor::new(vec![vec![1.0f32, 2.0], vec![3.0, 4.0]])?;

    assert_eq!(x.shape(), [2, 2]);
    assert_eq!(x.to_flatten_vec::<f32>()?, [1.0, 2.0, 3.0, 4.0]);

    Ok(())
}

#[test]
fn new_ragged() {
    setup_device();

    let result = Tensor::new(vec![vec![1.0f32, 2.0], vec![3.0]]);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn new_with_spec_casts() -> Result<()> {
    setup_device();

    let x = Tensor::new_with_spec(vec![1, 2, 3], Device::CPU, DType::F64)?;

    assert_eq!(x.dtype(), DType::F64);
    assert_eq!(x.to_flatten_vec::<f64>()?, [1.0, 2.0, 3.0]);

    Ok(())
}

#[test]
fn zeros() -> Result<()> {
    setup_device();

    let x = Tensor::zeros_with_spec(&[2, 3], Device::CPU, DType::F32)?;

    assert_eq!(x.shape(), [2, 3]);
    assert_eq!(x.to_flatten_vec::<f32>()?, vec![0.0f32; 6]);

    Ok(())
}

#[test]
fn randn_shape() -> Result<()> {
    setup_device();

    let x = Tensor::randn_with_spec(&[4, 2], Device::CPU, DType::F32)?;

    assert_eq!(x.shape(), [4, 2]);
    assert_eq!(x.to_flatten_vec::<f32>()?.len(), 8);

    Ok(())
}

#[test]
fn randn_requires_float() {
    setup_device();

    let result = Tensor::randn_with_spec(&[4], Device::CPU, DType::I32);

    assert!(matches!(result, Err(Error::UnsupportedDType)));
}

#[test]
fn cuda_allocation_unavailable() {
    setup_device();

    let result = Tensor::zeros_with_spec(&[4], Device::CUDA(0), DType::F32);

    assert!(matches!(result, Err(Error::InvalidDevice(_))));
}
