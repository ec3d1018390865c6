use std::collections::BTreeMap;

use nalgebra::{Const, OMatrix};

pub type Matrix<T, const N: usize, const M: usize> = OMatrix<T, Const<N>, Const<M>>;
pub type Vector<T, const N: usize> = Matrix<T, N, 1>;

/// Partial derivatives keyed by variable name. Absent keys are zero.
pub type Partials = BTreeMap<String, f64>;

pub type Result<T, E = crate::DualError> = std::result::Result<T, E>;
