pub mod buffer;
pub mod device;
pub mod dtype;
pub mod error;
pub mod layout;
pub mod scalar;
pub mod tensor;
pub mod types;

pub use tensor::Tensor;
