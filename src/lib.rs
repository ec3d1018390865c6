//! Forward-mode automatic differentiation with dual numbers whose partial derivatives are keyed
//! by variable name.
//!
//! ```
//! use dual_autodiff::DualNumber;
//! use num_traits::Pow;
//!
//! let x = DualNumber::variable("x", 2.0);
//! let y = DualNumber::variable("y", 3.0);
//! let f = (&x * &y + x.sin()).pow(2.0);
//!
//! let g = 2.0 * (6.0 + 2f64.sin());
//! assert!((f.partial("x") - g * (3.0 + 2f64.cos())).abs() < 1e-12);
//! assert!((f.partial("y") - g * 2.0).abs() < 1e-12);
//! ```

mod dispatch;
mod dual;
mod error;
mod gradient;
mod prelude;
pub mod registry;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub use dispatch::{apply, apply_method, apply_with, Dispatch, Method, Operand};
pub use dual::DualNumber;
pub use error::DualError;
pub use gradient::{value_and_gradient, HasJacobian};
pub use prelude::*;
pub use registry::{
	function_snapshot, register_function, unregister_function, FunctionPair, FunctionRegistry,
};
