use crate::{
    dtype::DType,
    error::{Error, Result},
    scalar::{Scalar, ScalarElem},
};

/// Host data that can seed a tensor: knows its shape, its natural dtype and
/// how to flatten itself into scalars.
pub trait TensorAdapter {
    fn to_shape(&self) -> Vec<usize>;
    fn dtype(&self) -> DType;
    fn to_flat_scalars(&self) -> Result<Vec<Scalar>>;
}

impl<T: ScalarElem> TensorAdapter for Vec<T> {
    fn to_shape(&self) -> Vec<usize> {
        vec![self.len()]
    }

    fn dtype(&self) -> DType {
        T::DTYPE
    }

    fn to_flat_scalars(&self) -> Result<Vec<Scalar>> {
        Ok(self.iter().map(|&x| x.to_scalar()).collect())
    }
}

impl<T: ScalarElem> TensorAdapter for Vec<Vec<T>> {
    fn to_shape(&self) -> Vec<usize> {
        let inner = self.first().map_or(0, |row| row.len());
        vec![self.len(), inner]
    }

    fn dtype(&self) -> DType {
        T::DTYPE
    }

    fn to_flat_scalars(&self) -> Result<Vec<Scalar>> {
        let inner = self.first().map_or(0, |row| row.len());
        let mut out = Vec::with_capacity(self.len() * inner);
        for row in self {
            if row.len() != inner {
                return Err(Error::InvalidArgument("Nested Vec rows must all have the same length".into()));
            }
            out.extend(row.iter().map(|&x| x.to_scalar()));
        }
        Ok(out)
    }
}
