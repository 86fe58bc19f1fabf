pub mod graph;
mod handle;
mod meta;
mod node;
pub mod ops;
pub mod trace;
pub mod unpack;
mod variable;
mod version;

pub use handle::TensorHandle;
pub use meta::AutogradMeta;
pub use node::{Edge, Node, NodeKind};
pub use trace::TraceRecorder;
pub use variable::Variable;
pub use version::VersionCounter;
