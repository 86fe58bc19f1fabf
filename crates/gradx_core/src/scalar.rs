use crate::dtype::DType;
use half::{bf16, f16};

macro_rules! numeric_variants {
    (@as_f64 BF16, $x:ident) => { f64::from($x) };
    (@as_f64 F16, $x:ident) => { f64::from($x) };
    (@as_f64 $other:ident, $x:ident) => { $x as f64 };

    (@convert BF16, $v:expr) => { bf16::from_f64($v) };
    (@convert F16, $v:expr) => { f16::from_f64($v) };
    (@convert F32, $v:expr) => { $v as f32 };
    (@convert F64, $v:expr) => { $v };
    (@convert U8, $v:expr) => { $v as u8 };
    (@convert U32, $v:expr) => { $v as u32 };
    (@convert I8, $v:expr) => { $v as i8 };
    (@convert I32, $v:expr) => { $v as i32 };
    (@convert I64, $v:expr) => { $v as i64 };

    ($($variant:ident => $type:ty),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Scalar {
            BOOL(bool),
            $($variant($type),)*
        }

        impl Scalar {
            #[inline]
            pub fn new<T: Into<Self>>(value: T) -> Self {
                value.into()
            }

            #[inline]
            pub fn dtype(&self) -> DType {
                match self {
                    Self::BOOL(_) => DType::BOOL,
                    $(Self::$variant(_) => DType::$variant,)*
                }
            }

            #[inline]
            pub fn is_float(&self) -> bool {
                self.dtype().is_float()
            }

            #[inline]
            pub fn as_f64_any(&self) -> f64 {
                match *self {
                    Self::BOOL(x) => if x { 1.0 } else { 0.0 },
                    $(
                        Self::$variant(x) => {
                            numeric_variants!(@as_f64 $variant, x)
                        },
                    )*
                }
            }

            $(
                paste::paste! {
                    #[inline]
                    pub fn [<as_ $variant:lower>](&self) -> $type {
                        match *self {
                            Self::$variant(x) => x,
                            _ => numeric_variants!(@convert $variant, self.as_f64_any()),
                        }
                    }
                }
            )*

            #[inline]
            pub fn as_bool(&self) -> bool {
                self.as_f64_any() != 0.0
            }
        }

        impl From<bool> for Scalar {
            #[inline]
            fn from(x: bool) -> Self {
                Self::BOOL(x)
            }
        }

        $(
            impl From<$type> for Scalar {
                #[inline]
                fn from(x: $type) -> Self {
                    Self::$variant(x)
                }
            }
        )*
    };
}

numeric_variants!(
    BF16 => bf16,
    F16 => f16,
    F32 => f32,
    F64 => f64,
    U8 => u8,
    U32 => u32,
    I8 => i8,
    I32 => i32,
    I64 => i64,
);

/// Rust element types that map one-to-one onto a `DType`. Used by the tensor
/// adapters and by `to_flatten_vec`.
pub trait ScalarElem: Copy + 'static {
    const DTYPE: DType;

    fn to_scalar(self) -> Scalar;
    fn from_scalar(scalar: Scalar) -> Self;
}

macro_rules! impl_scalar_elem {
    ($($type:ty => $variant:ident),* $(,)?) => {
        $(
            impl ScalarElem for $type {
                const DTYPE: DType = DType::$variant;

                #[inline]
                fn to_scalar(self) -> Scalar {
                    Scalar::from(self)
                }

                #[inline]
                fn from_scalar(scalar: Scalar) -> Self {
                    paste::paste! { scalar.[<as_ $variant:lower>]() }
                }
            }
        )*
    };
}

impl_scalar_elem!(
    bf16 => BF16,
    f16 => F16,
    f32 => F32,
    f64 => F64,
    u8 => U8,
    u32 => U32,
    i8 => I8,
    i32 => I32,
    i64 => I64,
);

impl ScalarElem for bool {
    const DTYPE: DType = DType::BOOL;

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::BOOL(self)
    }

    #[inline]
    fn from_scalar(scalar: Scalar) -> Self {
        scalar.as_bool()
    }
}
