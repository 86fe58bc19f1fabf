pub use crate::autograd::{
    graph::{check_inplace, collect_next_edges, compute_requires_grad, gradient_edge, rebase_history},
    ops,
    unpack::{unpack, unpack_list, unpack_opt},
    Edge, Node, NodeKind, TensorHandle, TraceRecorder, Variable, VersionCounter,
};
pub use crate::core::{
    device::{get_default_device, set_default_device, Device},
    dtype::{get_default_dtype, set_default_dtype, DType},
    error::{Error, Result},
    scalar::Scalar,
    tensor::Tensor,
};
