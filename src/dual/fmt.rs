use std::fmt::{self, Display, Write};

use super::DualNumber;

impl Display for DualNumber {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("Dual(real=")?;
		write_float(f, self.real)?;
		f.write_str(", dual={")?;
		for (i, (name, value)) in self.dual.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write_quoted(f, name)?;
			f.write_str(": ")?;
			write_float(f, *value)?;
		}
		f.write_str("})")
	}
}

/// Shortest round-trip form, always with a fractional part or an exponent: `2.0`, `0.1`,
/// `1e-05`, `1.5e+16`, `inf`, `nan`.
fn write_float(f: &mut fmt::Formatter, x: f64) -> fmt::Result {
	if x.is_nan() {
		return f.write_str("nan");
	}
	if x.is_infinite() {
		return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
	}
	let repr = format!("{x:?}");
	match repr.split_once('e') {
		Some((mantissa, exponent)) => {
			let (sign, digits) = match exponent.strip_prefix('-') {
				Some(digits) => ('-', digits),
				None => ('+', exponent),
			};
			write!(f, "{mantissa}e{sign}{digits:0>2}")
		}
		None => f.write_str(&repr),
	}
}

fn write_quoted(f: &mut fmt::Formatter, s: &str) -> fmt::Result {
	let quote = if s.contains('\'') && !s.contains('"') {
		'"'
	} else {
		'\''
	};
	f.write_char(quote)?;
	for c in s.chars() {
		match c {
			'\\' => f.write_str("\\\\")?,
			'\n' => f.write_str("\\n")?,
			'\r' => f.write_str("\\r")?,
			'\t' => f.write_str("\\t")?,
			c if c == quote => {
				f.write_char('\\')?;
				f.write_char(c)?;
			}
			c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
			c => f.write_char(c)?,
		}
	}
	f.write_char(quote)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Partials;

	fn render(real: f64, dual: &[(&str, f64)]) -> String {
		let dual = dual.iter().map(|&(name, value)| (name.to_string(), value));
		DualNumber::from_parts(real, dual.collect::<Partials>()).to_string()
	}

	#[test]
	fn single_variable() {
		assert_eq!(render(2.0, &[("x", 1.0)]), "Dual(real=2.0, dual={'x': 1.0})");
	}

	#[test]
	fn constant() {
		assert_eq!(render(-3.0, &[]), "Dual(real=-3.0, dual={})");
	}

	#[test]
	fn several_variables_in_key_order() {
		assert_eq!(
			render(0.1, &[("y", -0.5), ("x", 3.0)]),
			"Dual(real=0.1, dual={'x': 3.0, 'y': -0.5})"
		);
	}

	#[test]
	fn exponents() {
		assert_eq!(render(1e-5, &[]), "Dual(real=1e-05, dual={})");
		assert_eq!(render(1.5e16, &[]), "Dual(real=1.5e+16, dual={})");
		assert_eq!(render(2.5e-123, &[]), "Dual(real=2.5e-123, dual={})");
		assert_eq!(render(1e15, &[]), "Dual(real=1000000000000000.0, dual={})");
	}

	#[test]
	fn non_finite() {
		assert_eq!(
			render(f64::NAN, &[("x", f64::INFINITY), ("y", f64::NEG_INFINITY)]),
			"Dual(real=nan, dual={'x': inf, 'y': -inf})"
		);
	}

	#[test]
	fn quoting() {
		assert_eq!(render(0.0, &[("it's", 1.0)]), "Dual(real=0.0, dual={\"it's\": 1.0})");
		assert_eq!(render(0.0, &[("a\\b", 1.0)]), "Dual(real=0.0, dual={'a\\\\b': 1.0})");
		assert_eq!(
			render(0.0, &[("'\"", 1.0)]),
			"Dual(real=0.0, dual={'\\'\"': 1.0})"
		);
	}
}
