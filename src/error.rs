use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DualError {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("division by zero")]
	DivideByZero,

	#[error("{function} is undefined at {value}")]
	DomainError { function: String, value: f64 },
}

impl DualError {
	pub(crate) fn domain(function: impl Into<String>, value: f64) -> Self {
		DualError::DomainError {
			function: function.into(),
			value,
		}
	}
}
