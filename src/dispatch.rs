//! Applying an operation chosen by name, for callers that only know the operation at runtime.
//!
//! Unlike the methods on [`DualNumber`], dispatch never fails: anything it cannot evaluate,
//! including a division by zero or a domain error, comes back as [`Dispatch::NotHandled`] so the
//! caller can fall back to another strategy. The underlying error is logged at debug level.

use std::panic::{self, AssertUnwindSafe};

use crate::prelude::*;
use crate::registry::{self, FunctionPair, FunctionRegistry};
use crate::{DualError, DualNumber};

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
	Dual(DualNumber),
	Scalar(f64),
}

impl Operand {
	pub fn real(&self) -> f64 {
		match self {
			Operand::Dual(d) => d.real(),
			Operand::Scalar(x) => *x,
		}
	}

	pub fn to_dual(&self) -> DualNumber {
		match self {
			Operand::Dual(d) => d.clone(),
			Operand::Scalar(x) => DualNumber::constant(*x),
		}
	}
}

impl From<DualNumber> for Operand {
	fn from(d: DualNumber) -> Self {
		Operand::Dual(d)
	}
}

impl From<&DualNumber> for Operand {
	fn from(d: &DualNumber) -> Self {
		Operand::Dual(d.clone())
	}
}

impl From<f64> for Operand {
	fn from(x: f64) -> Self {
		Operand::Scalar(x)
	}
}

/// How an operation is applied to its operands. Only element-wise calls are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Call,
	Reduce,
	Accumulate,
	ReduceAt,
	Outer,
	At,
}

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Dispatch {
	Handled(DualNumber),
	NotHandled,
}

impl Dispatch {
	pub fn is_handled(&self) -> bool {
		matches!(self, Dispatch::Handled(_))
	}

	pub fn handled(self) -> Option<DualNumber> {
		match self {
			Dispatch::Handled(d) => Some(d),
			Dispatch::NotHandled => None,
		}
	}
}

impl From<Dispatch> for Option<DualNumber> {
	fn from(dispatch: Dispatch) -> Self {
		dispatch.handled()
	}
}

/// Applies the operation `name` element-wise, consulting the process-wide registry for anything
/// other than `add`, `multiply`, `divide` and `power`.
pub fn apply(name: &str, operands: &[Operand]) -> Dispatch {
	apply_method(Method::Call, name, operands)
}

pub fn apply_method(method: Method, name: &str, operands: &[Operand]) -> Dispatch {
	dispatch(method, name, operands, registry::lookup)
}

/// Like [`apply_method`], against an explicitly owned registry.
pub fn apply_with(
	registry: &FunctionRegistry,
	method: Method,
	name: &str,
	operands: &[Operand],
) -> Dispatch {
	dispatch(method, name, operands, |name| registry.get(name))
}

fn dispatch(
	method: Method,
	name: &str,
	operands: &[Operand],
	lookup: impl FnOnce(&str) -> Option<FunctionPair>,
) -> Dispatch {
	if method != Method::Call {
		log::debug!("{name}: method {method:?} is not supported");
		return Dispatch::NotHandled;
	}
	match evaluate(name, operands, lookup) {
		Ok(Some(result)) => Dispatch::Handled(result),
		Ok(None) => Dispatch::NotHandled,
		Err(err) => {
			log::debug!("{name}: {err}");
			Dispatch::NotHandled
		}
	}
}

fn evaluate(
	name: &str,
	operands: &[Operand],
	lookup: impl FnOnce(&str) -> Option<FunctionPair>,
) -> Result<Option<DualNumber>> {
	let result = match (name, operands) {
		("add", [a, b]) => a.to_dual().plus(&b.to_dual()),
		("multiply", [a, b]) => a.to_dual().times(&b.to_dual()),
		("divide", [a, Operand::Scalar(b)]) => a.to_dual().checked_div_scalar(*b)?,
		("divide", [a, b]) => a.to_dual().checked_div(&b.to_dual())?,
		("power", [base, exponent]) => power(base, exponent)?,
		("add" | "multiply" | "divide" | "power", _) => {
			return Err(DualError::InvalidArgument(format!(
				"expected 2 operands, got {}",
				operands.len()
			)))
		}
		(_, [operand]) => match lookup(name) {
			Some(pair) => match apply_pair(name, &pair, operand)? {
				Some(result) => result,
				None => return Ok(None),
			},
			None => {
				log::debug!("{name}: no such function");
				return Ok(None);
			}
		},
		_ => {
			log::debug!("{name}: unsupported with {} operands", operands.len());
			return Ok(None);
		}
	};
	Ok(Some(result))
}

fn power(base: &Operand, exponent: &Operand) -> Result<DualNumber> {
	match (base, exponent) {
		(base, Operand::Scalar(n)) => Ok(base.to_dual().powf(*n)),
		(Operand::Scalar(b), Operand::Dual(e)) => DualNumber::scalar_pow(*b, e),
		(Operand::Dual(b), Operand::Dual(e)) => b.pow_dual(e),
	}
}

/// Evaluates a registered pair at the operand. A NaN produced from a non-NaN input is a domain
/// error; a panic inside the pair is reported as `Ok(None)`.
fn apply_pair(name: &str, pair: &FunctionPair, operand: &Operand) -> Result<Option<DualNumber>> {
	let x = operand.real();
	let (value, slope) = match panic::catch_unwind(AssertUnwindSafe(|| pair.evaluate(x))) {
		Ok(evaluated) => evaluated,
		Err(_) => {
			log::debug!("{name}: registered function panicked at {x}");
			return Ok(None);
		}
	};
	if !x.is_nan() && (value.is_nan() || slope.is_nan()) {
		return Err(DualError::domain(name, x));
	}
	Ok(Some(operand.to_dual().chain(value, slope)))
}
