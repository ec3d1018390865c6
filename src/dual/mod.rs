mod arithmetic;
mod elementary;
mod fmt;

pub(crate) use elementary::ELEMENTARY;

use std::collections::btree_map::Entry;
use std::iter::{Product, Sum};

use itertools::{EitherOrBoth, Itertools};
use num_traits::{One, ToPrimitive, Zero};

use crate::prelude::*;
use crate::DualError;

/// A real value together with its partial derivatives with respect to named variables.
///
/// Every operation returns a fresh value. A variable missing from [`DualNumber::dual`] has a zero
/// partial derivative, so a number with no partials is a constant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DualNumber {
	real: f64,
	dual: Partials,
}

impl DualNumber {
	/// Builds a dual number from any numeric real part and `(variable, partial)` pairs.
	///
	/// Fails with [`DualError::InvalidArgument`] if a variable is listed twice or a number cannot
	/// be represented as an `f64`.
	pub fn new<R, K, V>(real: R, dual: impl IntoIterator<Item = (K, V)>) -> Result<Self>
	where
		R: ToPrimitive,
		K: Into<String>,
		V: ToPrimitive,
	{
		let real = real.to_f64().ok_or_else(|| {
			DualError::InvalidArgument("real component is not representable as f64".into())
		})?;

		let mut partials = Partials::new();
		for (name, value) in dual {
			let name = name.into();
			let value = value.to_f64().ok_or_else(|| {
				DualError::InvalidArgument(format!(
					"partial derivative for `{name}` is not representable as f64"
				))
			})?;
			match partials.entry(name) {
				Entry::Vacant(entry) => {
					entry.insert(value);
				}
				Entry::Occupied(entry) => {
					return Err(DualError::InvalidArgument(format!(
						"duplicate variable `{}`",
						entry.key()
					)))
				}
			}
		}

		Ok(DualNumber {
			real,
			dual: partials,
		})
	}

	pub fn from_parts(real: f64, dual: Partials) -> Self {
		DualNumber { real, dual }
	}

	pub fn constant(real: f64) -> Self {
		DualNumber {
			real,
			dual: Partials::new(),
		}
	}

	/// Seeds `name` as a differentiation variable at `value`.
	pub fn variable(name: impl Into<String>, value: f64) -> Self {
		DualNumber {
			real: value,
			dual: Partials::from([(name.into(), 1.0)]),
		}
	}

	pub fn real(&self) -> f64 {
		self.real
	}

	pub fn dual(&self) -> &Partials {
		&self.dual
	}

	/// The partial derivative with respect to `name`, zero if the value does not depend on it.
	pub fn partial(&self, name: &str) -> f64 {
		self.dual.get(name).copied().unwrap_or(0.0)
	}

	pub fn is_constant(&self) -> bool {
		self.dual.values().all(|d| *d == 0.0)
	}

	pub fn into_parts(self) -> (f64, Partials) {
		(self.real, self.dual)
	}

	/// Builds a result whose partials range over the variables of both operands. A variable
	/// missing from one side contributes zero from that side.
	pub(crate) fn combine(
		&self,
		other: &DualNumber,
		real: f64,
		partial: impl Fn(f64, f64) -> f64,
	) -> DualNumber {
		let dual = self
			.dual
			.iter()
			.merge_join_by(other.dual.iter(), |(a, _), (b, _)| a.cmp(b))
			.map(|entry| match entry {
				EitherOrBoth::Both((name, &a), (_, &b)) => (name.clone(), partial(a, b)),
				EitherOrBoth::Left((name, &a)) => (name.clone(), partial(a, 0.0)),
				EitherOrBoth::Right((name, &b)) => (name.clone(), partial(0.0, b)),
			})
			.collect();
		DualNumber { real, dual }
	}

	/// Chain rule for a unary function with value `real` and derivative `slope` at `self.real`.
	pub(crate) fn chain(&self, real: f64, slope: f64) -> DualNumber {
		DualNumber {
			real,
			dual: self
				.dual
				.iter()
				.map(|(name, &d)| (name.clone(), slope * d))
				.collect(),
		}
	}
}

impl From<f64> for DualNumber {
	fn from(value: f64) -> Self {
		DualNumber::constant(value)
	}
}

impl Zero for DualNumber {
	fn zero() -> Self {
		DualNumber::constant(0.0)
	}

	fn is_zero(&self) -> bool {
		self.real == 0.0 && self.is_constant()
	}
}

impl One for DualNumber {
	fn one() -> Self {
		DualNumber::constant(1.0)
	}
}

impl Sum for DualNumber {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(DualNumber::zero(), |acc, x| acc + x)
	}
}

impl<'a> Sum<&'a DualNumber> for DualNumber {
	fn sum<I: Iterator<Item = &'a DualNumber>>(iter: I) -> Self {
		iter.fold(DualNumber::zero(), |acc, x| acc + x)
	}
}

impl Product for DualNumber {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(DualNumber::one(), |acc, x| acc * x)
	}
}

impl<'a> Product<&'a DualNumber> for DualNumber {
	fn product<I: Iterator<Item = &'a DualNumber>>(iter: I) -> Self {
		iter.fold(DualNumber::one(), |acc, x| acc * x)
	}
}
