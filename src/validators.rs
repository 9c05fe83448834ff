//! Canned per-field rules assembled into a validator callback
//!
//! A [`RuleSet`] builds the `validate` closure a controller expects, so
//! common cases (required fields, length bounds, pattern checks) do not need
//! a hand-written validator. Rules evaluate in registration order, the first
//! failing rule per field wins, and the output order of the produced errors
//! follows registration order — which is what drives the controller's
//! "first error to fix" alert.
//!
//! Rules only fire for fields present in the input mapping, so the produced
//! validator stays pure and total over any subset of fields (single-field
//! blur validation included).

use crate::errors::{FormError, FormResult, ValidationErrors};
use regex::Regex;
use std::collections::HashMap;

enum Rule {
	Required { message: String },
	MinLength { min: usize, message: String },
	MaxLength { max: usize, message: String },
	Pattern { regex: Regex, message: String },
}

struct FieldRule {
	field: String,
	rule: Rule,
}

/// Declarative per-field validation rules.
///
/// # Examples
///
/// ```
/// use formflow::RuleSet;
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let validate = RuleSet::new()
/// 	.required("username", "form.errors.required")
/// 	.min_length("username", 3, "form.errors.tooShort")
/// 	.build();
///
/// let mut values = HashMap::new();
/// values.insert("username".to_string(), json!("ab"));
///
/// let errors = validate(&values);
/// assert_eq!(errors.get("username"), Some("form.errors.tooShort"));
/// ```
#[derive(Default)]
pub struct RuleSet {
	rules: Vec<FieldRule>,
}

impl RuleSet {
	pub fn new() -> Self {
		Self::default()
	}
	/// Require a non-empty value for the field.
	///
	/// A missing key does not fail the rule (subset semantics); a null value
	/// or a string that is empty after trimming does.
	pub fn required(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
		self.rules.push(FieldRule {
			field: field.into(),
			rule: Rule::Required {
				message: message.into(),
			},
		});
		self
	}
	/// Require at least `min` characters.
	///
	/// Length is counted in characters, not bytes, so multi-byte input (CJK,
	/// emoji, accents) is measured the way a user would count it.
	pub fn min_length(
		mut self,
		field: impl Into<String>,
		min: usize,
		message: impl Into<String>,
	) -> Self {
		self.rules.push(FieldRule {
			field: field.into(),
			rule: Rule::MinLength {
				min,
				message: message.into(),
			},
		});
		self
	}
	/// Require at most `max` characters
	pub fn max_length(
		mut self,
		field: impl Into<String>,
		max: usize,
		message: impl Into<String>,
	) -> Self {
		self.rules.push(FieldRule {
			field: field.into(),
			rule: Rule::MaxLength {
				max,
				message: message.into(),
			},
		});
		self
	}
	/// Require the whole value to match a regex pattern.
	///
	/// # Examples
	///
	/// ```
	/// use formflow::RuleSet;
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let validate = RuleSet::new()
	/// 	.matches("age", r"^[0-9]+$", "form.errors.notANumber")
	/// 	.unwrap()
	/// 	.build();
	///
	/// let mut values = HashMap::new();
	/// values.insert("age".to_string(), json!("3o"));
	/// assert_eq!(validate(&values).get("age"), Some("form.errors.notANumber"));
	/// ```
	pub fn matches(
		mut self,
		field: impl Into<String>,
		pattern: &str,
		message: impl Into<String>,
	) -> FormResult<Self> {
		let field = field.into();
		let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
			field: field.clone(),
			source,
		})?;
		self.rules.push(FieldRule {
			field,
			rule: Rule::Pattern {
				regex,
				message: message.into(),
			},
		});
		Ok(self)
	}
	/// Compile the rules into a validator callback of the controller's
	/// contract shape
	pub fn build(
		self,
	) -> impl Fn(&HashMap<String, serde_json::Value>) -> ValidationErrors + Send + Sync + 'static {
		move |values| {
			let mut errors = ValidationErrors::new();
			for FieldRule { field, rule } in &self.rules {
				// First failing rule per field wins
				if errors.contains_field(field) {
					continue;
				}
				let Some(value) = values.get(field) else {
					continue;
				};
				if let Some(message) = apply_rule(rule, value) {
					errors.insert(field.clone(), message);
				}
			}
			errors
		}
	}
}

fn apply_rule(rule: &Rule, value: &serde_json::Value) -> Option<String> {
	match rule {
		Rule::Required { message } => {
			let empty = match value {
				serde_json::Value::Null => true,
				serde_json::Value::String(s) => s.trim().is_empty(),
				_ => false,
			};
			empty.then(|| message.clone())
		}
		Rule::MinLength { min, message } => value
			.as_str()
			.is_some_and(|s| s.chars().count() < *min)
			.then(|| message.clone()),
		Rule::MaxLength { max, message } => value
			.as_str()
			.is_some_and(|s| s.chars().count() > *max)
			.then(|| message.clone()),
		Rule::Pattern { regex, message } => value
			.as_str()
			.is_some_and(|s| !regex.is_match(s))
			.then(|| message.clone()),
	}
}
