use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Pow;

use super::DualNumber;
use crate::prelude::*;
use crate::DualError;

impl DualNumber {
	pub(crate) fn plus(&self, rhs: &DualNumber) -> DualNumber {
		self.combine(rhs, self.real + rhs.real, |a, b| a + b)
	}

	pub(crate) fn minus(&self, rhs: &DualNumber) -> DualNumber {
		self.combine(rhs, self.real - rhs.real, |a, b| a - b)
	}

	pub(crate) fn times(&self, rhs: &DualNumber) -> DualNumber {
		let (x, y) = (self.real, rhs.real);
		self.combine(rhs, x * y, |a, b| x * b + a * y)
	}

	fn plus_scalar(&self, rhs: f64) -> DualNumber {
		self.plus(&DualNumber::constant(rhs))
	}

	fn minus_scalar(&self, rhs: f64) -> DualNumber {
		self.minus(&DualNumber::constant(rhs))
	}

	fn times_scalar(&self, rhs: f64) -> DualNumber {
		self.times(&DualNumber::constant(rhs))
	}

	/// Quotient rule. Fails with [`DualError::DivideByZero`] if `rhs` has a zero real part,
	/// whatever its partials are.
	pub fn checked_div(&self, rhs: &DualNumber) -> Result<DualNumber> {
		let (x, y) = (self.real, rhs.real);
		if y == 0.0 {
			return Err(DualError::DivideByZero);
		}
		Ok(self.combine(rhs, x / y, |a, b| (a * y - x * b) / (y * y)))
	}

	/// Divides the real part and every partial by a constant.
	pub fn checked_div_scalar(&self, rhs: f64) -> Result<DualNumber> {
		if rhs == 0.0 {
			return Err(DualError::DivideByZero);
		}
		let dual = self
			.dual
			.iter()
			.map(|(name, &d)| (name.clone(), d / rhs))
			.collect();
		Ok(DualNumber::from_parts(self.real / rhs, dual))
	}

	/// Raises to a constant exponent.
	pub fn powf(&self, n: f64) -> DualNumber {
		let x = self.real;
		// x^0 is flat everywhere, including at x = 0 where n * x^(n - 1) is 0 * inf.
		let slope = if n == 0.0 { 0.0 } else { n * x.powf(n - 1.0) };
		self.chain(x.powf(n), slope)
	}

	/// Raises to an exponent that itself carries partials. The base must be positive for its
	/// logarithm to exist.
	pub fn pow_dual(&self, exponent: &DualNumber) -> Result<DualNumber> {
		let (x, y) = (self.real, exponent.real);
		if x <= 0.0 {
			return Err(DualError::domain("pow", x));
		}
		let real = x.powf(y);
		let base_slope = x.powf(y - 1.0) * y;
		let exponent_slope = real * x.ln();
		Ok(self.combine(exponent, real, |a, b| base_slope * a + exponent_slope * b))
	}

	/// `base ^ exponent` for a constant base, which must be positive.
	pub fn scalar_pow(base: f64, exponent: &DualNumber) -> Result<DualNumber> {
		DualNumber::constant(base).pow_dual(exponent)
	}
}

macro_rules! binary_op {
	($op:ident, $method:ident, $imp:ident, $scalar_imp:ident, $output:ty) => {
		impl $op<DualNumber> for DualNumber {
			type Output = $output;

			fn $method(self, rhs: DualNumber) -> Self::Output {
				DualNumber::$imp(&self, &rhs)
			}
		}

		impl $op<&DualNumber> for DualNumber {
			type Output = $output;

			fn $method(self, rhs: &DualNumber) -> Self::Output {
				DualNumber::$imp(&self, rhs)
			}
		}

		impl $op<DualNumber> for &DualNumber {
			type Output = $output;

			fn $method(self, rhs: DualNumber) -> Self::Output {
				DualNumber::$imp(self, &rhs)
			}
		}

		impl $op<&DualNumber> for &DualNumber {
			type Output = $output;

			fn $method(self, rhs: &DualNumber) -> Self::Output {
				DualNumber::$imp(self, rhs)
			}
		}

		impl $op<f64> for DualNumber {
			type Output = $output;

			fn $method(self, rhs: f64) -> Self::Output {
				DualNumber::$scalar_imp(&self, rhs)
			}
		}

		impl $op<f64> for &DualNumber {
			type Output = $output;

			fn $method(self, rhs: f64) -> Self::Output {
				DualNumber::$scalar_imp(self, rhs)
			}
		}

		impl $op<DualNumber> for f64 {
			type Output = $output;

			fn $method(self, rhs: DualNumber) -> Self::Output {
				DualNumber::$imp(&DualNumber::constant(self), &rhs)
			}
		}

		impl $op<&DualNumber> for f64 {
			type Output = $output;

			fn $method(self, rhs: &DualNumber) -> Self::Output {
				DualNumber::$imp(&DualNumber::constant(self), rhs)
			}
		}
	};
}

binary_op!(Add, add, plus, plus_scalar, DualNumber);
binary_op!(Sub, sub, minus, minus_scalar, DualNumber);
binary_op!(Mul, mul, times, times_scalar, DualNumber);
binary_op!(Div, div, checked_div, checked_div_scalar, Result<DualNumber>);

impl Neg for DualNumber {
	type Output = DualNumber;

	fn neg(self) -> Self::Output {
		-&self
	}
}

impl Neg for &DualNumber {
	type Output = DualNumber;

	fn neg(self) -> Self::Output {
		self.chain(-self.real, -1.0)
	}
}

impl Pow<f64> for DualNumber {
	type Output = DualNumber;

	fn pow(self, n: f64) -> Self::Output {
		self.powf(n)
	}
}

impl Pow<f64> for &DualNumber {
	type Output = DualNumber;

	fn pow(self, n: f64) -> Self::Output {
		self.powf(n)
	}
}

impl Pow<DualNumber> for DualNumber {
	type Output = Result<DualNumber>;

	fn pow(self, exponent: DualNumber) -> Self::Output {
		self.pow_dual(&exponent)
	}
}

impl Pow<&DualNumber> for &DualNumber {
	type Output = Result<DualNumber>;

	fn pow(self, exponent: &DualNumber) -> Self::Output {
		self.pow_dual(exponent)
	}
}

impl Pow<DualNumber> for f64 {
	type Output = Result<DualNumber>;

	fn pow(self, exponent: DualNumber) -> Self::Output {
		DualNumber::scalar_pow(self, &exponent)
	}
}

impl Pow<&DualNumber> for f64 {
	type Output = Result<DualNumber>;

	fn pow(self, exponent: &DualNumber) -> Self::Output {
		DualNumber::scalar_pow(self, exponent)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::proptest::*;
	use approx::assert_relative_eq;
	use proptest::prelude::*;

	fn dual<const K: usize>(real: f64, dual: [(&str, f64); K]) -> DualNumber {
		DualNumber::new(real, dual).unwrap()
	}

	#[test]
	fn arithmetic() {
		let d1 = dual(2.0, [("x", 1.0), ("y", 2.0)]);
		let d2 = dual(3.0, [("x", 2.0), ("z", 3.0)]);

		assert_eq!(&d1 + &d2, dual(5.0, [("x", 3.0), ("y", 2.0), ("z", 3.0)]));
		assert_eq!(&d1 + 2.0, dual(4.0, [("x", 1.0), ("y", 2.0)]));
		assert_eq!(&d1 - &d2, dual(-1.0, [("x", -1.0), ("y", 2.0), ("z", -3.0)]));
		assert_eq!(&d1 - 2.0, dual(0.0, [("x", 1.0), ("y", 2.0)]));
		assert_eq!(&d1 * &d2, dual(6.0, [("x", 7.0), ("y", 6.0), ("z", 6.0)]));
		assert_eq!(&d1 * 2.0, dual(4.0, [("x", 2.0), ("y", 4.0)]));
	}

	#[test]
	fn scalar_on_the_left() {
		let d = dual(6.0, [("x", 1.0), ("y", 2.0)]);

		assert_eq!(2.0 + &d, dual(8.0, [("x", 1.0), ("y", 2.0)]));
		assert_eq!(2.0 - &d, dual(-4.0, [("x", -1.0), ("y", -2.0)]));
		assert_eq!(2.0 * d, dual(12.0, [("x", 2.0), ("y", 4.0)]));
	}

	#[test]
	fn division() {
		let d1 = dual(6.0, [("x", 2.0)]);
		let d2 = dual(2.0, [("x", 1.0)]);

		assert_eq!((&d1 / &d2).unwrap(), dual(3.0, [("x", -0.5)]));
		assert_eq!((&d1 / 2.0).unwrap(), dual(3.0, [("x", 1.0)]));
		assert_eq!(
			d1.checked_div(&dual(0.0, [("x", 1.0)])),
			Err(DualError::DivideByZero)
		);
		assert_eq!(&d1 / 0.0, Err(DualError::DivideByZero));
	}

	#[test]
	fn division_by_a_small_scalar_keeps_partials_exact() {
		let x = DualNumber::variable("x", 1.0);

		let tenth = (&x / 0.1).unwrap();
		assert_eq!(tenth.real(), 10.0);
		assert_eq!(tenth.partial("x"), 10.0);

		let tiny = (x / 1e-170).unwrap();
		assert_relative_eq!(tiny.real(), 1e170, max_relative = 1e-15);
		assert_eq!(tiny.partial("x"), tiny.real());
	}

	#[test]
	fn scalar_divided_by_dual() {
		let d = dual(5.0, [("x", 2.0)]);
		assert_eq!((1.0 / &d).unwrap(), dual(0.2, [("x", -0.08)]));
		assert_eq!(1.0 / DualNumber::constant(0.0), Err(DualError::DivideByZero));
	}

	#[test]
	fn power() {
		let d = dual(2.0, [("x", 1.0)]);
		assert_eq!(d.clone().pow(3.0), dual(8.0, [("x", 12.0)]));

		let e = dual(2.0, [("x", 0.5)]);
		let result = (&d).pow(&e).unwrap();
		assert_relative_eq!(result.real(), 4.0);
		assert_relative_eq!(result.partial("x"), 4.0 + 4.0 * 2f64.ln() * 0.5);

		assert!(matches!(
			dual(-2.0, [("x", 1.0)]).pow(e.clone()),
			Err(DualError::DomainError { .. })
		));
		assert!(matches!(
			dual(0.0, [("x", 1.0)]).pow_dual(&e),
			Err(DualError::DomainError { .. })
		));
	}

	#[test]
	fn power_with_negative_base_and_constant_exponent() {
		let d = dual(-2.0, [("x", 1.0)]);
		assert_eq!(d.powf(3.0), dual(-8.0, [("x", 12.0)]));
	}

	#[test]
	fn zeroth_power_is_flat_at_zero() {
		let x = DualNumber::variable("x", 0.0);
		assert_eq!(x.powf(0.0), dual(1.0, [("x", 0.0)]));
	}

	#[test]
	fn scalar_raised_to_dual() {
		let d = dual(2.0, [("x", 2.0)]);

		let result = 3.0_f64.pow(&d).unwrap();
		assert_relative_eq!(result.real(), 9.0);
		assert_relative_eq!(result.partial("x"), 9.0 * 3f64.ln() * 2.0);
		assert_relative_eq!(result.partial("x"), 19.775021196, epsilon = 1e-8);

		assert!(matches!(0.0_f64.pow(&d), Err(DualError::DomainError { .. })));
		assert!(matches!(
			DualNumber::scalar_pow(-3.0, &d),
			Err(DualError::DomainError { .. })
		));
	}

	#[test]
	fn negation() {
		let d = dual(2.0, [("x", 1.0), ("y", 2.0)]);
		assert_eq!(-d, dual(-2.0, [("x", -1.0), ("y", -2.0)]));
	}

	#[test]
	fn equality() {
		assert_eq!(dual(1.0, [("x", 1.0)]), dual(1.0, [("x", 1.0)]));
		assert_ne!(dual(1.0, [("x", 1.0)]), dual(1.0, [("y", 1.0)]));
		assert_ne!(dual(1.0, [("x", 1.0)]), dual(1.0, [("x", 1.0), ("y", 0.0)]));
		assert_ne!(dual(1.0, [("x", 1.0)]), dual(2.0, [("x", 1.0)]));
	}

	proptest! {
		#[test]
		fn addition_commutes(a in dual_number(), b in dual_number(), s in scalar()) {
			assert_eq!(&a + &b, &b + &a);
			assert_eq!(&a + s, s + &a);
		}

		#[test]
		fn multiplication_commutes(a in dual_number(), b in dual_number(), s in scalar()) {
			assert_eq!(&a * &b, &b * &a);
			assert_eq!(&a * s, s * &a);
		}

		#[test]
		fn negation_is_an_involution(d in dual_number()) {
			assert_eq!(-(-&d), d);
		}

		#[test]
		fn subtraction_is_addition_of_negation(a in dual_number(), b in dual_number()) {
			let difference = &a - &b;
			let sum = &a + -&b;
			assert_eq!(difference.real(), sum.real());
			for (name, value) in difference.dual() {
				assert_eq!(*value, sum.partial(name));
			}
		}

		#[test]
		fn quotient_rule(a in scalar(), p in scalar(), b in nonzero_scalar(), q in scalar()) {
			let d1 = DualNumber::new(a, [("v", p)]).unwrap();
			let d2 = DualNumber::new(b, [("v", q)]).unwrap();
			let quotient = (d1 / d2).unwrap();
			assert_eq!(quotient.real(), a / b);
			assert_eq!(quotient.partial("v"), (p * b - a * q) / (b * b));
		}

		#[test]
		fn division_by_zero_real_fails(a in dual_number(), p in partials()) {
			let divisor = DualNumber::from_parts(0.0, p);
			assert_eq!(a.checked_div(&divisor), Err(DualError::DivideByZero));
		}

		#[test]
		fn integer_power_matches_repeated_product(d in dual_number()) {
			let cube = d.powf(3.0);
			let product = &(&d * &d) * &d;
			assert_relative_eq!(cube.real(), product.real(), epsilon = 1e-12);
			for (name, value) in product.dual() {
				assert_relative_eq!(cube.partial(name), *value, epsilon = 1e-12);
			}
		}

		#[test]
		fn dual_power_with_constant_exponent_matches_powf(d in positive_dual_number(), n in scalar()) {
			let via_dual = d.pow_dual(&DualNumber::constant(n)).unwrap();
			let via_scalar = d.powf(n);
			assert_relative_eq!(via_dual.real(), via_scalar.real(), max_relative = 1e-12);
			for (name, value) in via_scalar.dual() {
				assert_relative_eq!(via_dual.partial(name), *value, max_relative = 1e-12);
			}
		}
	}
}
