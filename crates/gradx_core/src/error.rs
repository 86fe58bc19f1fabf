use crate::{device::Device, dtype::DType};
use std::fmt;

#[derive(Debug)]
pub enum Error {
    // argument validation at the autograd boundary
    UndefinedTensor {
        arg: String,
        pos: usize,
    },
    NotAVariable {
        arg: String,
        pos: usize,
    },
    NotAVariableInList {
        arg: String,
        pos: usize,
        index: usize,
    },
    IncompatibleType(String),
    InvalidOperation(String),
    ViewSafety(String),
    //
    DTypeMismatch {
        expected: DType,
        got: DType,
    },
    DeviceMismatch {
        expected: Device,
        got: Device,
    },
    UnsupportedDType,
    InvalidArgument(String),
    InvalidDevice(String),
    IncompatibleShape(String),
    IndexOutOfBounds {
        index: usize,
        size: usize,
    },
    //
    BufferLocked,
    MetadataLocked,
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedTensor { arg, pos } => {
                write!(
                    f,
                    "Expected a Tensor of type Variable but found an undefined Tensor for argument #{} '{}'",
                    pos, arg
                )
            }
            Self::NotAVariable { arg, pos } => {
                write!(
                    f,
                    "Expected object of type Variable but found a plain tensor for argument #{} '{}'",
                    pos, arg
                )
            }
            Self::NotAVariableInList { arg, pos, index } => {
                write!(
                    f,
                    "Expected object of type Variable but found a plain tensor at position #{} for iterable argument #{} '{}'",
                    index, pos, arg
                )
            }
            Self::IncompatibleType(msg) => write!(f, "Incompatible tensor type: {}", msg),
            Self::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Self::ViewSafety(msg) => write!(f, "View safety violation: {}", msg),
            Self::DTypeMismatch { expected, got } => {
                write!(f, "DType mismatch: expected {:?}, got {:?}", expected, got)
            }
            Self::DeviceMismatch { expected, got } => {
                write!(f, "Device mismatch: expected {}, got {}", expected.name(), got.name())
            }
            Self::UnsupportedDType => write!(f, "Unsupported data type"),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::InvalidDevice(msg) => write!(f, "Invalid device: {}", msg),
            Self::IncompatibleShape(msg) => write!(f, "Incompatible shape: {}", msg),
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "Index out of bounds: index {} is out of bounds for tensor with size {}", index, size)
            }
            Self::BufferLocked => write!(f, "Buffer is locked"),
            Self::MetadataLocked => write!(f, "Autograd metadata is locked"),
        }
    }
}

impl std::error::Error for Error {}
