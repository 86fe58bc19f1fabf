#![allow(dead_code)]

use gradx_autograd::{TensorHandle, Variable};
use gradx_core::{
    device::{set_default_device, Device},
    dtype::DType,
    error::Result,
    tensor::Tensor,
};

// Helper functions
pub fn setup_device() {
    set_default_device(Device::CPU);
}

pub fn leaf_f32(data: Vec<f32>, requires_grad: bool) -> Result<Variable> {
    setup_device();

    let tensor = Tensor::new_with_spec(data, Device::CPU, DType::F32)?;
    Variable::new(tensor, requires_grad)
}

pub fn leaf_f64(data: Vec<f64>, requires_grad: bool) -> Result<Variable> {
    setup_device();

    let tensor = Tensor::new_with_spec(data, Device::CPU, DType::F64)?;
    Variable::new(tensor, requires_grad)
}

pub fn leaf_i32(data: Vec<i32>, requires_grad: bool) -> Result<Variable> {
    setup_device();

    let tensor = Tensor::new_with_spec(data, Device::CPU, DType::I32)?;
    Variable::new(tensor, requires_grad)
}

pub fn handle(v: &Variable) -> TensorHandle {
    TensorHandle::from(v.clone())
}
