#![allow(non_upper_case_globals)]

use crate::scalar::Scalar;
use half::{bf16, f16};

pub const bfloat16: DType = DType::BF16;
pub const float16: DType = DType::F16;
pub const float32: DType = DType::F32;
pub const float64: DType = DType::F64;
pub const uint8: DType = DType::U8;
pub const uint32: DType = DType::U32;
pub const int8: DType = DType::I8;
pub const int32: DType = DType::I32;
pub const int64: DType = DType::I64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    BF16,
    F16,
    F32,
    F64,
    BOOL,
    U8,
    U32,
    I8,
    I32,
    I64,
}

/// Coarse dtype family used by the shallow-copy compatibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DTypeCategory {
    Float,
    Int,
    Uint,
    Bool,
}

impl DType {
    /// The closed set of element types, in declaration order. Backend type
    /// registries enumerate over this table.
    pub const ALL: &'static [DType] = &[
        Self::BF16,
        Self::F16,
        Self::F32,
        Self::F64,
        Self::BOOL,
        Self::U8,
        Self::U32,
        Self::I8,
        Self::I32,
        Self::I64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BF16 => "bf16",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::BOOL => "bool",
            Self::U8 => "u8",
            Self::U32 => "u32",
            Self::I8 => "i8",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        match self {
            Self::BF16 => 2,
            Self::F16 => 2,
            Self::F32 => 4,
            Self::F64 => 8,
            Self::BOOL => 1,
            Self::U8 => 1,
            Self::U32 => 4,
            Self::I8 => 1,
            Self::I32 => 4,
            Self::I64 => 8,
        }
    }

    #[allow(clippy::match_like_matches_macro)]
    pub fn is_uint(&self) -> bool {
        match self {
            Self::U8 | Self::U32 => true,
            _ => false,
        }
    }

    pub fn is_int(&self) -> bool {
        match self {
            Self::I8 | Self::I32 | Self::I64 => true,
            _ => false,
        }
    }

    pub fn is_float(&self) -> bool {
        match self {
            Self::BF16 | Self::F16 | Self::F32 | Self::F64 => true,
            Self::BOOL | Self::U8 | Self::U32 | Self::I8 | Self::I32 | Self::I64 => false,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::BOOL)
    }

    pub fn category(&self) -> DTypeCategory {
        match self {
            Self::BF16 | Self::F16 | Self::F32 | Self::F64 => DTypeCategory::Float,
            Self::I8 | Self::I32 | Self::I64 => DTypeCategory::Int,
            Self::U8 | Self::U32 => DTypeCategory::Uint,
            Self::BOOL => DTypeCategory::Bool,
        }
    }

    /// # Safety
    /// `ptr` must point to at least `size_in_bytes()` readable bytes holding a
    /// value of this dtype.
    pub unsafe fn read_scalar(&self, ptr: *const u8) -> Scalar {
        match self {
            Self::BF16 => Scalar::BF16((ptr as *const bf16).read_unaligned()),
            Self::F16 => Scalar::F16((ptr as *const f16).read_unaligned()),
            Self::F32 => Scalar::F32((ptr as *const f32).read_unaligned()),
            Self::F64 => Scalar::F64((ptr as *const f64).read_unaligned()),
            Self::BOOL => Scalar::BOOL(ptr.read() != 0),
            Self::U8 => Scalar::U8(ptr.read()),
            Self::U32 => Scalar::U32((ptr as *const u32).read_unaligned()),
            Self::I8 => Scalar::I8((ptr as *const i8).read_unaligned()),
            Self::I32 => Scalar::I32((ptr as *const i32).read_unaligned()),
            Self::I64 => Scalar::I64((ptr as *const i64).read_unaligned()),
        }
    }

    /// # Safety
    /// `ptr` must point to at least `size_in_bytes()` writable bytes. The
    /// value is coerced to this dtype before the write.
    pub unsafe fn write_scalar(&self, ptr: *mut u8, value: Scalar) {
        match self {
            Self::BF16 => (ptr as *mut bf16).write_unaligned(value.as_bf16()),
            Self::F16 => (ptr as *mut f16).write_unaligned(value.as_f16()),
            Self::F32 => (ptr as *mut f32).write_unaligned(value.as_f32()),
            Self::F64 => (ptr as *mut f64).write_unaligned(value.as_f64()),
            Self::BOOL => ptr.write(value.as_bool() as u8),
            Self::U8 => ptr.write(value.as_u8()),
            Self::U32 => (ptr as *mut u32).write_unaligned(value.as_u32()),
            Self::I8 => (ptr as *mut i8).write_unaligned(value.as_i8()),
            Self::I32 => (ptr as *mut i32).write_unaligned(value.as_i32()),
            Self::I64 => (ptr as *mut i64).write_unaligned(value.as_i64()),
        }
    }
}

thread_local! {
    static DEFAULT_DTYPE: std::cell::Cell<DType> = const { std::cell::Cell::new(DType::F32) };
}

pub fn get_default_dtype() -> DType {
    DEFAULT_DTYPE.with(|d| d.get())
}

pub fn set_default_dtype(dtype: DType) {
    DEFAULT_DTYPE.with(|d| d.set(dtype));
}
