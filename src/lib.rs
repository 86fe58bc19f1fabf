pub mod prelude;

pub use gradx_autograd as autograd;
pub use gradx_core as core;

pub use gradx_core::dtype::{bfloat16, float16, float32, float64, int32, int64, int8, uint32, uint8};
