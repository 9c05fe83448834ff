//! Field handles: the live references by which the controller reads input values

use std::fmt;
use std::sync::{Arc, Mutex};

/// A live reference to one input's current value.
///
/// A handle is registered with the controller the first time its owning
/// input mounts and removed when it unmounts. Reading through the handle
/// always reflects the input's state at the moment of the call.
pub trait FieldHandle: fmt::Debug + Send + Sync {
	/// The field name, unique per form
	fn name(&self) -> &str;
	/// Read the input's current value. Always a fresh read, never cached.
	fn value(&self) -> serde_json::Value;
}

/// Standard [`FieldHandle`] backed by a shared mutable cell.
///
/// The host keeps one clone and writes on every change event; the controller
/// holds the other and reads at validation time.
///
/// # Examples
///
/// ```
/// use formflow::{FieldHandle, SharedValueHandle};
/// use serde_json::json;
///
/// let handle = SharedValueHandle::new("username");
/// assert_eq!(handle.value(), serde_json::Value::Null);
///
/// handle.set(json!("abc"));
/// assert_eq!(handle.value(), json!("abc"));
/// ```
#[derive(Debug, Clone)]
pub struct SharedValueHandle {
	name: String,
	value: Arc<Mutex<serde_json::Value>>,
}

impl SharedValueHandle {
	/// Create a handle with a null starting value
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: Arc::new(Mutex::new(serde_json::Value::Null)),
		}
	}
	/// Create a handle with a starting value
	///
	/// # Examples
	///
	/// ```
	/// use formflow::{FieldHandle, SharedValueHandle};
	/// use serde_json::json;
	///
	/// let handle = SharedValueHandle::with_value("age", json!("30"));
	/// assert_eq!(handle.value(), json!("30"));
	/// ```
	pub fn with_value(name: impl Into<String>, value: serde_json::Value) -> Self {
		Self {
			name: name.into(),
			value: Arc::new(Mutex::new(value)),
		}
	}
	/// Overwrite the current value. Called by the host on input change.
	pub fn set(&self, value: serde_json::Value) {
		*self.value.lock().unwrap() = value;
	}
	/// Box this handle for registration in a form tree
	pub fn into_handle(self) -> Arc<dyn FieldHandle> {
		Arc::new(self)
	}
}

impl FieldHandle for SharedValueHandle {
	fn name(&self) -> &str {
		&self.name
	}

	fn value(&self) -> serde_json::Value {
		self.value.lock().unwrap().clone()
	}
}
