use crate::variable::Variable;
use gradx_core::tensor::Tensor;

/// An opaque tensor argument slot: possibly undefined, possibly a plain
/// tensor, possibly a full variable. Operations receive handles and run them
/// through `unpack` before touching any metadata.
#[derive(Clone, Default)]
pub struct TensorHandle {
    payload: Option<Payload>,
}

#[derive(Clone)]
enum Payload {
    Plain(Tensor),
    Var(Variable),
}

impl TensorHandle {
    pub fn undefined() -> Self {
        Self { payload: None }
    }

    pub fn defined(&self) -> bool {
        self.payload.is_some()
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.payload, Some(Payload::Var(_)))
    }

    pub fn variable(&self) -> Option<&Variable> {
        match &self.payload {
            Some(Payload::Var(v)) => Some(v),
            _ => None,
        }
    }

    pub fn plain(&self) -> Option<&Tensor> {
        match &self.payload {
            Some(Payload::Plain(t)) => Some(t),
            _ => None,
        }
    }
}

impl From<Tensor> for TensorHandle {
    fn from(tensor: Tensor) -> Self {
        Self {
            payload: Some(Payload::Plain(tensor)),
        }
    }
}

impl From<Variable> for TensorHandle {
    fn from(variable: Variable) -> Self {
        Self {
            payload: Some(Payload::Var(variable)),
        }
    }
}
