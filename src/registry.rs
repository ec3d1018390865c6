//! Named real functions paired with their derivatives, consulted by [`crate::apply`].
//!
//! A process-wide table seeded with the elementary functions is reachable through
//! [`register_function`], [`function_snapshot`] and [`unregister_function`]. A
//! [`FunctionRegistry`] can also be owned directly and passed to [`crate::apply_with`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::dual::ELEMENTARY;

pub type UnaryFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A function and its derivative.
#[derive(Clone)]
pub struct FunctionPair {
	function: UnaryFn,
	derivative: UnaryFn,
}

impl FunctionPair {
	pub fn new(
		function: impl Fn(f64) -> f64 + Send + Sync + 'static,
		derivative: impl Fn(f64) -> f64 + Send + Sync + 'static,
	) -> Self {
		FunctionPair {
			function: Arc::new(function),
			derivative: Arc::new(derivative),
		}
	}

	pub fn value(&self, x: f64) -> f64 {
		(self.function)(x)
	}

	pub fn derivative(&self, x: f64) -> f64 {
		(self.derivative)(x)
	}

	/// Returns `(f(x), f'(x))`.
	pub fn evaluate(&self, x: f64) -> (f64, f64) {
		(self.value(x), self.derivative(x))
	}
}

impl fmt::Debug for FunctionPair {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("FunctionPair").finish_non_exhaustive()
	}
}

#[derive(Debug, Clone)]
pub struct FunctionRegistry {
	functions: HashMap<String, FunctionPair>,
}

impl FunctionRegistry {
	/// An empty registry. Use [`FunctionRegistry::default`] for one seeded with the elementary
	/// functions.
	pub fn new() -> Self {
		FunctionRegistry {
			functions: HashMap::new(),
		}
	}

	/// Registers `function` with its `derivative`, replacing any previous entry for `name`.
	pub fn add(
		&mut self,
		name: impl Into<String>,
		function: impl Fn(f64) -> f64 + Send + Sync + 'static,
		derivative: impl Fn(f64) -> f64 + Send + Sync + 'static,
	) {
		let name = name.into();
		log::trace!("registering function `{name}`");
		self.functions
			.insert(name, FunctionPair::new(function, derivative));
	}

	pub fn get(&self, name: &str) -> Option<FunctionPair> {
		self.functions.get(name).cloned()
	}

	/// A copy of every entry. Changing the copy leaves the registry untouched.
	pub fn get_all(&self) -> HashMap<String, FunctionPair> {
		self.functions.clone()
	}

	/// Removes `name` if present.
	pub fn remove(&mut self, name: &str) {
		if self.functions.remove(name).is_some() {
			log::trace!("unregistered function `{name}`");
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.functions.contains_key(name)
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<_> = self.functions.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.functions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.functions.is_empty()
	}
}

impl Default for FunctionRegistry {
	fn default() -> Self {
		let mut registry = FunctionRegistry::new();
		for elementary in &ELEMENTARY {
			registry.add(elementary.name, elementary.value, elementary.derivative);
		}
		registry
	}
}

static GLOBAL: OnceLock<RwLock<FunctionRegistry>> = OnceLock::new();

fn global() -> &'static RwLock<FunctionRegistry> {
	GLOBAL.get_or_init(|| RwLock::new(FunctionRegistry::default()))
}

/// Adds to, or overwrites in, the process-wide registry.
pub fn register_function(
	name: impl Into<String>,
	function: impl Fn(f64) -> f64 + Send + Sync + 'static,
	derivative: impl Fn(f64) -> f64 + Send + Sync + 'static,
) {
	global()
		.write()
		.unwrap_or_else(PoisonError::into_inner)
		.add(name, function, derivative);
}

/// A copy of the process-wide registry as it is now.
pub fn function_snapshot() -> HashMap<String, FunctionPair> {
	global()
		.read()
		.unwrap_or_else(PoisonError::into_inner)
		.get_all()
}

pub fn unregister_function(name: &str) {
	global()
		.write()
		.unwrap_or_else(PoisonError::into_inner)
		.remove(name);
}

pub(crate) fn lookup(name: &str) -> Option<FunctionPair> {
	global()
		.read()
		.unwrap_or_else(PoisonError::into_inner)
		.get(name)
}
