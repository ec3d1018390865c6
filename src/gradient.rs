use itertools::Itertools;
use nalgebra::DVector;

use crate::prelude::*;
use crate::{DualError, DualNumber};

/// A function from `M` inputs to `N` outputs written over dual numbers, from which values and
/// Jacobians can be read off in a single evaluation.
pub trait HasJacobian<const M: usize, const N: usize> {
	fn value(&self, x: [DualNumber; M]) -> Result<[DualNumber; N]>;

	/// The variable name input `i` is seeded with.
	fn variable(&self, i: usize) -> String {
		format!("x{i}")
	}

	fn value_and_jacobian(&self, x: Vector<f64, M>) -> Result<(Vector<f64, N>, Matrix<f64, N, M>)> {
		let names: [String; M] = std::array::from_fn(|i| self.variable(i));
		ensure_distinct(names.iter().map(String::as_str))?;

		let x = std::array::from_fn(|i| DualNumber::variable(names[i].clone(), x[i]));
		let y = self.value(x)?;

		let j = Matrix::<f64, N, M>::from_fn(|i, j| y[i].partial(&names[j]));
		let y = Vector::<f64, N>::from_fn(|i, _| y[i].real());
		Ok((y, j))
	}
}

/// Evaluates `f` at `point`, seeding each named coordinate as a variable, and returns the value
/// with the gradient ordered like `point`.
pub fn value_and_gradient<F>(point: &[(&str, f64)], f: F) -> Result<(f64, DVector<f64>)>
where
	F: FnOnce(&[DualNumber]) -> Result<DualNumber>,
{
	ensure_distinct(point.iter().map(|&(name, _)| name))?;

	let x: Vec<_> = point
		.iter()
		.map(|&(name, value)| DualNumber::variable(name, value))
		.collect();
	let y = f(&x)?;

	let gradient = DVector::from_iterator(point.len(), point.iter().map(|(name, _)| y.partial(name)));
	Ok((y.real(), gradient))
}

fn ensure_distinct<'a>(names: impl Iterator<Item = &'a str>) -> Result<()> {
	match names.duplicates().next() {
		Some(name) => Err(DualError::InvalidArgument(format!(
			"duplicate variable `{name}`"
		))),
		None => Ok(()),
	}
}
