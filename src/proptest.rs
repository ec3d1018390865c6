use std::ops::RangeInclusive;

use crate::{prelude::*, DualNumber};
use proptest::prelude::*;

pub fn scalar() -> RangeInclusive<f64> {
	-2.0..=2.0
}

/// Scalars bounded away from zero.
pub fn nonzero_scalar() -> impl Strategy<Value = f64> {
	prop_oneof![-2.0..=-0.5, 0.5..=2.0]
}

pub fn variable() -> impl Strategy<Value = String> {
	"[a-e]"
}

pub fn partials() -> impl Strategy<Value = Partials> {
	proptest::collection::btree_map(variable(), scalar(), 0..4)
}

fn dual_number_with(real: impl Strategy<Value = f64>) -> impl Strategy<Value = DualNumber> {
	(real, partials()).prop_map(|(real, dual)| DualNumber::from_parts(real, dual))
}

pub fn dual_number() -> impl Strategy<Value = DualNumber> {
	dual_number_with(scalar())
}

/// Dual numbers that are safe divisors.
pub fn nonzero_dual_number() -> impl Strategy<Value = DualNumber> {
	dual_number_with(nonzero_scalar())
}

/// Dual numbers inside the domain of `log` and of a dual exponent's base.
pub fn positive_dual_number() -> impl Strategy<Value = DualNumber> {
	dual_number_with(0.1..=2.0)
}

/// Dual numbers strictly inside the domain of `arcsin` and `arccos`.
pub fn unit_interval_dual_number() -> impl Strategy<Value = DualNumber> {
	dual_number_with(-0.99..=0.99)
}
