use super::DualNumber;
use crate::prelude::*;
use crate::DualError;

/// A named real function paired with its derivative.
pub(crate) struct Elementary {
	pub name: &'static str,
	pub value: fn(f64) -> f64,
	pub derivative: fn(f64) -> f64,
}

pub(crate) const ELEMENTARY: [Elementary; 12] = [
	Elementary { name: "sin", value: f64::sin, derivative: f64::cos },
	Elementary { name: "cos", value: f64::cos, derivative: d_cos },
	Elementary { name: "tan", value: f64::tan, derivative: d_tan },
	Elementary { name: "sinh", value: f64::sinh, derivative: f64::cosh },
	Elementary { name: "cosh", value: f64::cosh, derivative: f64::sinh },
	Elementary { name: "tanh", value: f64::tanh, derivative: d_tanh },
	Elementary { name: "exp", value: f64::exp, derivative: f64::exp },
	Elementary { name: "log", value: f64::ln, derivative: d_log },
	Elementary { name: "sqrt", value: f64::sqrt, derivative: d_sqrt },
	Elementary { name: "arcsin", value: f64::asin, derivative: d_arcsin },
	Elementary { name: "arccos", value: f64::acos, derivative: d_arccos },
	Elementary { name: "arctan", value: f64::atan, derivative: d_arctan },
];

fn d_cos(x: f64) -> f64 {
	-x.sin()
}

fn d_tan(x: f64) -> f64 {
	1.0 / x.cos().powi(2)
}

fn d_tanh(x: f64) -> f64 {
	1.0 / x.cosh().powi(2)
}

fn d_log(x: f64) -> f64 {
	1.0 / x
}

fn d_sqrt(x: f64) -> f64 {
	1.0 / (2.0 * x.sqrt())
}

fn d_arcsin(x: f64) -> f64 {
	1.0 / (1.0 - x * x).sqrt()
}

fn d_arccos(x: f64) -> f64 {
	-1.0 / (1.0 - x * x).sqrt()
}

fn d_arctan(x: f64) -> f64 {
	1.0 / (1.0 + x * x)
}

impl DualNumber {
	/// Applies a real function `f` with derivative `df`, propagating every partial through the
	/// chain rule.
	pub fn lift(&self, f: impl Fn(f64) -> f64, df: impl Fn(f64) -> f64) -> DualNumber {
		self.chain(f(self.real), df(self.real))
	}

	pub fn sin(&self) -> DualNumber {
		self.lift(f64::sin, f64::cos)
	}

	pub fn cos(&self) -> DualNumber {
		self.lift(f64::cos, d_cos)
	}

	pub fn tan(&self) -> DualNumber {
		self.lift(f64::tan, d_tan)
	}

	pub fn sinh(&self) -> DualNumber {
		self.lift(f64::sinh, f64::cosh)
	}

	pub fn cosh(&self) -> DualNumber {
		self.lift(f64::cosh, f64::sinh)
	}

	pub fn tanh(&self) -> DualNumber {
		self.lift(f64::tanh, d_tanh)
	}

	pub fn exp(&self) -> DualNumber {
		let e = self.real.exp();
		self.chain(e, e)
	}

	/// Natural logarithm, defined for positive real parts.
	pub fn log(&self) -> Result<DualNumber> {
		if self.real <= 0.0 {
			return Err(DualError::domain("log", self.real));
		}
		Ok(self.lift(f64::ln, d_log))
	}

	/// Square root, defined for non-negative real parts.
	pub fn sqrt(&self) -> Result<DualNumber> {
		if self.real < 0.0 {
			return Err(DualError::domain("sqrt", self.real));
		}
		Ok(self.lift(f64::sqrt, d_sqrt))
	}

	pub fn arcsin(&self) -> Result<DualNumber> {
		self.check_unit_interval("arcsin")?;
		Ok(self.lift(f64::asin, d_arcsin))
	}

	pub fn arccos(&self) -> Result<DualNumber> {
		self.check_unit_interval("arccos")?;
		Ok(self.lift(f64::acos, d_arccos))
	}

	pub fn arctan(&self) -> DualNumber {
		self.lift(f64::atan, d_arctan)
	}

	fn check_unit_interval(&self, function: &'static str) -> Result<()> {
		if (-1.0..=1.0).contains(&self.real) {
			Ok(())
		} else {
			Err(DualError::domain(function, self.real))
		}
	}
}
