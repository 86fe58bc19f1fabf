//! Argument validation at the autograd boundary. Errors carry the argument
//! name and position so callers see exactly which slot was wrong.

use crate::{handle::TensorHandle, variable::Variable};
use gradx_core::error::{Error, Result};

/// The argument must be a defined variable.
pub fn unpack(t: &TensorHandle, name: &str, pos: usize) -> Result<Variable> {
    match t.variable() {
        Some(v) => Ok(v.clone()),
        None if !t.defined() => Err(Error::UndefinedTensor { arg: name.into(), pos }),
        None => Err(Error::NotAVariable { arg: name.into(), pos }),
    }
}

/// Like `unpack`, but an undefined handle is a legitimate absent argument.
pub fn unpack_opt(t: &TensorHandle, name: &str, pos: usize) -> Result<Option<Variable>> {
    if !t.defined() {
        return Ok(None);
    }
    unpack(t, name, pos).map(Some)
}

/// Per-element unpack for list arguments. Undefined elements pass through as
/// `None`; a defined non-variable element is still an error.
pub fn unpack_list(ts: &[TensorHandle], name: &str, pos: usize) -> Result<Vec<Option<Variable>>> {
    let mut out = Vec::with_capacity(ts.len());
    for (index, t) in ts.iter().enumerate() {
        if !t.defined() {
            out.push(None);
            continue;
        }
        match t.variable() {
            Some(v) => out.push(Some(v.clone())),
            None => {
                return Err(Error::NotAVariableInList {
                    arg: name.into(),
                    pos,
                    index,
                })
            }
        }
    }
    Ok(out)
}
