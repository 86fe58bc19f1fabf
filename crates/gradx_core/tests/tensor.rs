mod utils;

use gradx_core::{
    device::Device,
    dtype::DType,
    error::{Error, Result},
    Tensor,
};
use utils::setup_device;

#[test]
fn get() -> Result<()> {
    setup_device();

    let x = Tensor::new(vec![3.0f32, 4.0, 5.0, 9.0, 7.0, 3.0])?;
    let scalar = x.get(&[4])?;

    assert_eq!(scalar.as_f32(), 7.0f32);

    Ok(())
}

#[test]
fn set() -> Result<()> {
    setup_device();

    let x = Tensor::new(vec![3.0f32, 4.0, 5.0, 9.0, 7.0, 3.0])?;
    x.set(&[4], 2.0f32)?;

    assert_eq!(x.to_flatten_vec::<f32>()?, vec![3.0f32, 4.0, 5.0, 9.0, 2.0, 3.0]);

    Ok(())
}

#[test]
fn get_out_of_bounds() -> Result<()> {
    setup_device();

    let x = Tensor::new(vec![1.0f32, 2.0])?;
    let result = x.get(&[2]);

    assert!(matches!(result, Err(Error::IndexOutOfBounds { index: 2, size: 2 })));

    Ok(())
}

#[test]
fn clone_shares_buffer() -> Result<()> {
    setup_device();

    let x = Tensor::new(vec![1.0f32, 2.0, 3.0])?;
    let y = x.clone();
    y.set(&[0], 9.0f32)?;

    assert!(x.shares_buffer_with(&y));
    assert_eq!(x.to_flatten_vec::<f32>()?, [9.0, 2.0, 3.0]);

    Ok(())
}

#[test]
fn raw_copy_from() -> Result<()> {
    setup_device();

    let dst = Tensor::zeros(&[3])?;
    let src = Tensor::new(vec![1.0f32, 2.0, 3.0])?;
    dst.raw_copy_from(&src, false)?;

    assert_eq!(dst.to_flatten_vec::<f32>()?, [1.0, 2.0, 3.0]);

    Ok(())
}

#[test]
fn raw_copy_from_broadcasts() -> Result<()> {
    setup_device();

    let dst = Tensor::zeros(&[2, 3])?;
    let src = Tensor::new(vec![1.0f32, 2.0, 3.0])?;
    dst.raw_copy_from(&src, false)?;

    assert_eq!(dst.to_flatten_vec::<f32>()?, [1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);

    Ok(())
}

#[test]
fn raw_copy_from_casts() -> Result<()> {
    setup_device();

    let dst = Tensor::zeros_with_spec(&[3], Device::CPU, DType::F32)?;
    let src = Tensor::new(vec![1, 2, 3])?;
    dst.raw_copy_from(&src, false)?;

    assert_eq!(dst.to_flatten_vec::<f32>()?, [1.0, 2.0, 3.0]);

    Ok(())
}

#[test]
fn raw_copy_from_shape_mismatch() -> Result<()> {
    setup_device();

    let dst = Tensor::zeros(&[2])?;
    let src = Tensor::new(vec![1.0f32, 2.0, 3.0])?;
    let result = dst.raw_copy_from(&src, false);

    assert!(matches!(result, Err(Error::IncompatibleShape(_))));

    Ok(())
}

#[test]
fn raw_resize_grow() -> Result<()> {
    setup_device();

    let mut x = Tensor::new(vec![1.0f32, 2.0, 3.0])?;
    x.raw_resize(&[2, 3])?;

    assert_eq!(x.shape(), [2, 3]);
    assert_eq!(x.to_flatten_vec::<f32>()?, [1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);

    Ok(())
}

#[test]
fn raw_resize_shrink() -> Result<()> {
    setup_device();

    let mut x = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0])?;
    x.raw_resize(&[2])?;

    assert_eq!(x.shape(), [2]);
    assert_eq!(x.to_flatten_vec::<f32>()?, [1.0, 2.0]);

    Ok(())
}

#[test]
fn shallow_copy_from() -> Result<()> {
    setup_device();

    let mut x = Tensor::new(vec![1.0f32, 2.0])?;
    let y = Tensor::new(vec![vec![1.0f64, 2.0], vec![3.0, 4.0]])?;
    x.shallow_copy_from(&y);

    assert!(x.shares_buffer_with(&y));
    assert_eq!(x.shape(), [2, 2]);
    assert_eq!(x.dtype(), DType::F64);

    Ok(())
}

#[test]
fn shallow_copy_compatibility() -> Result<()> {
    setup_device();

    let f32_t = Tensor::zeros_with_spec(&[2], Device::CPU, DType::F32)?;
    let f64_t = Tensor::zeros_with_spec(&[2], Device::CPU, DType::F64)?;
    let i32_t = Tensor::zeros_with_spec(&[2], Device::CPU, DType::I32)?;

    assert!(f32_t.has_compatible_shallow_copy_type(&f64_t));
    assert!(!f32_t.has_compatible_shallow_copy_type(&i32_t));

    Ok(())
}
