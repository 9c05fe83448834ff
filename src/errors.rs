//! Validation error storage and the crate error type
//!
//! Validation errors are data, not exceptions: the validator returns them,
//! the controller stores them, and they never interrupt control flow. The
//! mapping is insertion-ordered because "the first error to fix" is defined
//! by the order the validator produced its output.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Invalid rule pattern for field '{field}': {source}")]
	InvalidPattern {
		field: String,
		#[source]
		source: regex::Error,
	},
}

pub type FormResult<T> = Result<T, FormError>;

/// Field name to error message mapping, preserving insertion order.
///
/// # Examples
///
/// ```
/// use formflow::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.insert("age", "form.errors.tooShort");
/// errors.insert("username", "form.errors.required");
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.first(), Some(("age", "form.errors.tooShort")));
/// assert_eq!(errors.get("username"), Some("form.errors.required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
	entries: IndexMap<String, String>,
}

impl ValidationErrors {
	/// Create an empty error mapping
	///
	/// # Examples
	///
	/// ```
	/// use formflow::ValidationErrors;
	///
	/// let errors = ValidationErrors::new();
	/// assert!(errors.is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			entries: IndexMap::new(),
		}
	}
	/// Store an error message for a field.
	///
	/// Re-inserting an existing field replaces its message but keeps the
	/// field's original position in the ordering.
	pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.entries.insert(field.into(), message.into());
	}
	/// Get the stored error for a field, if any
	///
	/// # Examples
	///
	/// ```
	/// use formflow::ValidationErrors;
	///
	/// let mut errors = ValidationErrors::new();
	/// errors.insert("email", "Enter a valid email address");
	///
	/// assert_eq!(errors.get("email"), Some("Enter a valid email address"));
	/// assert_eq!(errors.get("username"), None);
	/// ```
	pub fn get(&self, field: &str) -> Option<&str> {
		self.entries.get(field).map(String::as_str)
	}
	/// Remove exactly one field's error, leaving the rest untouched.
	///
	/// Returns the removed message, if the field had one.
	pub fn remove(&mut self, field: &str) -> Option<String> {
		// shift_remove keeps the relative order of the remaining entries
		self.entries.shift_remove(field)
	}
	pub fn contains_field(&self, field: &str) -> bool {
		self.entries.contains_key(field)
	}
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
	pub fn len(&self) -> usize {
		self.entries.len()
	}
	/// The first stored entry, in the order errors were produced
	///
	/// # Examples
	///
	/// ```
	/// use formflow::ValidationErrors;
	///
	/// let mut errors = ValidationErrors::new();
	/// assert_eq!(errors.first(), None);
	///
	/// errors.insert("b", "second field, first error");
	/// errors.insert("a", "first field, second error");
	/// assert_eq!(errors.first(), Some(("b", "second field, first error")));
	/// ```
	pub fn first(&self) -> Option<(&str, &str)> {
		self.entries
			.first()
			.map(|(field, message)| (field.as_str(), message.as_str()))
	}
	/// Iterate over entries in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(field, message)| (field.as_str(), message.as_str()))
	}
	/// Field names in insertion order
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}
}

impl FromIterator<(String, String)> for ValidationErrors {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for ValidationErrors {
	type Item = (String, String);
	type IntoIter = indexmap::map::IntoIter<String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_insertion_order_preserved() {
		// Arrange
		let mut errors = ValidationErrors::new();

		// Act
		errors.insert("zeta", "z error");
		errors.insert("alpha", "a error");
		errors.insert("mid", "m error");

		// Assert
		let fields: Vec<&str> = errors.fields().collect();
		assert_eq!(fields, vec!["zeta", "alpha", "mid"]);
		assert_eq!(errors.first(), Some(("zeta", "z error")));
	}

	#[rstest]
	fn test_reinsert_keeps_position() {
		// Arrange
		let mut errors = ValidationErrors::new();
		errors.insert("a", "first");
		errors.insert("b", "second");

		// Act
		errors.insert("a", "updated");

		// Assert
		assert_eq!(errors.first(), Some(("a", "updated")));
	}

	#[rstest]
	fn test_remove_leaves_others_in_order() {
		// Arrange
		let mut errors = ValidationErrors::new();
		errors.insert("a", "1");
		errors.insert("b", "2");
		errors.insert("c", "3");

		// Act
		let removed = errors.remove("b");

		// Assert
		assert_eq!(removed, Some("2".to_string()));
		let fields: Vec<&str> = errors.fields().collect();
		assert_eq!(fields, vec!["a", "c"]);
	}

	#[rstest]
	fn test_remove_missing_field_is_noop() {
		// Arrange
		let mut errors = ValidationErrors::new();
		errors.insert("a", "1");

		// Act
		let removed = errors.remove("nonexistent");

		// Assert
		assert_eq!(removed, None);
		assert_eq!(errors.len(), 1);
	}
}
