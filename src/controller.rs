//! The form controller: field registration, validation dispatch, and the
//! submission lifecycle
//!
//! One controller is created per rendered form, lives for the form's
//! lifetime, and is discarded with it. The only state that survives is an
//! optional external draft save.
//!
//! ## State machine
//!
//! Per field, driven by blur and focus events:
//!
//! ```mermaid
//! stateDiagram-v2
//!     pristine --> validated: blur (validate_field)
//!     validated --> invalid: error stored
//!     validated --> pristine: no error
//!     invalid --> pristine: focus (clear_input_errors)
//! ```
//!
//! For the whole form:
//!
//! ```mermaid
//! stateDiagram-v2
//!     Idle --> Validating: submit()
//!     Validating --> IdleWithErrors: errors found
//!     Validating --> Submitting: clean, handler dispatched
//!     Submitting --> Idle: handler calls set_loading(false)
//! ```
//!
//! The controller does not enforce mutual exclusion on submission: the host
//! is expected to disable the submit control while `is_loading` is true. Two
//! `submit()` calls racing before the flag is set will both dispatch.

use crate::draft::DraftStore;
use crate::errors::ValidationErrors;
use crate::handle::FieldHandle;
use crate::node::{FormNode, RenderedNode};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

type Validator =
	Box<dyn Fn(&HashMap<String, serde_json::Value>) -> ValidationErrors + Send + Sync>;
type SubmitHandler = Box<dyn Fn(HashMap<String, serde_json::Value>, SubmitContext) + Send + Sync>;

/// Scroll/focus target for the error summary: the first field with an error,
/// in the order the validator produced its output.
///
/// Storing all errors but surfacing only one target is deliberate
/// single-target-focus policy, not a limitation.
#[derive(Debug, Clone, Default)]
pub struct FormAlert {
	pub first_error_to_fix: Option<Arc<dyn FieldHandle>>,
}

impl FormAlert {
	/// An empty alert (nothing to fix)
	pub fn none() -> Self {
		Self::default()
	}
	/// An alert targeting the given field handle
	pub fn pointing_at(handle: Arc<dyn FieldHandle>) -> Self {
		Self {
			first_error_to_fix: Some(handle),
		}
	}
	pub fn is_empty(&self) -> bool {
		self.first_error_to_fix.is_none()
	}
	/// The name of the targeted field, if any
	pub fn first_field_name(&self) -> Option<&str> {
		self.first_error_to_fix.as_deref().map(FieldHandle::name)
	}
}

/// Where the form is in its submission lifecycle
///
/// # Examples
///
/// ```
/// use formflow::{FormController, FormPhase, ValidationErrors};
///
/// let controller = FormController::new("profile", |_| ValidationErrors::new(), |_, _| {});
/// assert_eq!(controller.phase(), FormPhase::Idle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
	Idle,
	IdleWithErrors,
	Submitting,
}

/// Shared error/alert/loading state.
///
/// Lives behind `Arc<Mutex<_>>` so a [`SubmitContext`] retained by the
/// submit handler can report completion after `submit()` has returned.
#[derive(Debug, Default)]
struct FormState {
	errors: ValidationErrors,
	alert: FormAlert,
	is_loading: bool,
}

/// Progress-reporting surface handed to the submit handler.
///
/// The controller does not await the handler and has no opinion on retry or
/// network failures; the handler owns the loading/alert state for the
/// duration of the operation and eventually calls [`set_loading(false)`]
/// and/or [`set_form_alert`] to signal completion or failure.
///
/// [`set_loading(false)`]: SubmitContext::set_loading
/// [`set_form_alert`]: SubmitContext::set_form_alert
#[derive(Clone)]
pub struct SubmitContext {
	state: Arc<Mutex<FormState>>,
}

impl SubmitContext {
	pub fn set_loading(&self, value: bool) {
		self.state.lock().unwrap().is_loading = value;
	}

	pub fn set_form_alert(&self, alert: FormAlert) {
		self.state.lock().unwrap().alert = alert;
	}
}

/// Owns a mapping from field name to input handle, runs caller-supplied
/// validation, tracks loading/alert/error state, and stamps per-field state
/// into a declared tree of child nodes.
///
/// # Examples
///
/// ```
/// use formflow::{FormController, FormNode, SharedValueHandle, ValidationErrors};
/// use serde_json::json;
///
/// let mut controller = FormController::new(
/// 	"signup",
/// 	|values| {
/// 		let mut errors = ValidationErrors::new();
/// 		if let Some(v) = values.get("username") {
/// 			if v.as_str().is_none_or(str::is_empty) {
/// 				errors.insert("username", "form.errors.required");
/// 			}
/// 		}
/// 		errors
/// 	},
/// 	|_values, _ctx| {},
/// );
///
/// let username = SharedValueHandle::with_value("username", json!("abc"));
/// controller.render(vec![FormNode::input(username.into_handle())]);
///
/// assert!(controller.validate_form().is_empty());
/// ```
pub struct FormController {
	name: String,
	default_values: HashMap<String, serde_json::Value>,
	style: Option<crate::node::NodeProps>,
	save_draft_enabled: bool,
	draft_store: Option<Arc<dyn DraftStore>>,
	field_handles: HashMap<String, Arc<dyn FieldHandle>>,
	state: Arc<Mutex<FormState>>,
	validate: Validator,
	on_submit: SubmitHandler,
}

impl FormController {
	/// Create a controller for the named form.
	///
	/// `validate` must be pure and total over any subset of fields: it is
	/// called with single-field input on blur and with the full snapshot on
	/// submit. `on_submit` is dispatched only after a fresh validation pass
	/// returned no errors.
	///
	/// # Examples
	///
	/// ```
	/// use formflow::{FormController, ValidationErrors};
	///
	/// let controller = FormController::new("settings", |_| ValidationErrors::new(), |_, _| {});
	/// assert_eq!(controller.name(), "settings");
	/// assert!(!controller.is_loading());
	/// ```
	pub fn new<V, S>(name: impl Into<String>, validate: V, on_submit: S) -> Self
	where
		V: Fn(&HashMap<String, serde_json::Value>) -> ValidationErrors + Send + Sync + 'static,
		S: Fn(HashMap<String, serde_json::Value>, SubmitContext) + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			default_values: HashMap::new(),
			style: None,
			save_draft_enabled: true,
			draft_store: None,
			field_handles: HashMap::new(),
			state: Arc::new(Mutex::new(FormState::default())),
			validate: Box::new(validate),
			on_submit: Box::new(on_submit),
		}
	}
	/// Set per-field default values, looked up by field name at render time
	///
	/// # Examples
	///
	/// ```
	/// use formflow::{FormController, ValidationErrors};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut defaults = HashMap::new();
	/// defaults.insert("country".to_string(), json!("NL"));
	///
	/// let controller = FormController::new("address", |_| ValidationErrors::new(), |_, _| {})
	/// 	.with_default_values(defaults);
	/// ```
	pub fn with_default_values(
		mut self,
		default_values: HashMap<String, serde_json::Value>,
	) -> Self {
		self.default_values = default_values;
		self
	}
	/// Set form-level presentation props; when present, the render output is
	/// wrapped in one plain node carrying them
	pub fn with_style(mut self, style: crate::node::NodeProps) -> Self {
		self.style = Some(style);
		self
	}
	/// Attach the external draft-persistence collaborator
	pub fn with_draft_store(mut self, store: Arc<dyn DraftStore>) -> Self {
		self.draft_store = Some(store);
		self
	}
	/// Disable draft saving for this form; [`save_draft`](Self::save_draft)
	/// becomes a no-op
	pub fn without_draft_saving(mut self) -> Self {
		self.save_draft_enabled = false;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_loading(&self) -> bool {
		self.state.lock().unwrap().is_loading
	}

	/// Current error state (a snapshot)
	pub fn errors(&self) -> ValidationErrors {
		self.state.lock().unwrap().errors.clone()
	}

	/// Current alert state (a snapshot)
	pub fn alert(&self) -> FormAlert {
		self.state.lock().unwrap().alert.clone()
	}

	/// The form's position in its lifecycle, derived from loading and error
	/// state
	pub fn phase(&self) -> FormPhase {
		let state = self.state.lock().unwrap();
		if state.is_loading {
			FormPhase::Submitting
		} else if state.errors.is_empty() {
			FormPhase::Idle
		} else {
			FormPhase::IdleWithErrors
		}
	}

	/// Names of the currently mounted fields, sorted
	pub fn field_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.field_handles.keys().cloned().collect();
		names.sort();
		names
	}

	/// The registered handle for a field, if mounted
	pub fn field_handle(&self, name: &str) -> Option<Arc<dyn FieldHandle>> {
		self.field_handles.get(name).cloned()
	}

	/// Walk the declared tree depth-first, registering input handles and
	/// stamping current form state into the output.
	///
	/// Children are rewritten before their parent is finalized, and the tree
	/// shape is otherwise preserved. Plain nodes pass through with their
	/// props untouched. Fields declared in a previous pass but absent from
	/// this one are unregistered.
	///
	/// # Examples
	///
	/// ```
	/// use formflow::{FormController, FormNode, RenderedNode, SharedValueHandle, ValidationErrors};
	///
	/// let mut controller = FormController::new("profile", |_| ValidationErrors::new(), |_, _| {});
	/// let rendered = controller.render(vec![
	/// 	FormNode::input(SharedValueHandle::new("name").into_handle()),
	/// 	FormNode::submit(Default::default()),
	/// ]);
	///
	/// assert_eq!(rendered.len(), 2);
	/// assert_eq!(controller.field_names(), vec!["name".to_string()]);
	/// assert!(matches!(rendered[1], RenderedNode::Submit { is_loading: false, .. }));
	/// ```
	pub fn render(&mut self, nodes: Vec<FormNode>) -> Vec<RenderedNode> {
		let mut mounted = HashSet::new();
		let rendered = self.render_nodes(nodes, &mut mounted);
		// Unmount pass: drop handles whose fields were not declared this time
		self.field_handles.retain(|name, _| mounted.contains(name));
		match &self.style {
			Some(style) => vec![RenderedNode::Plain {
				props: style.clone(),
				children: rendered,
			}],
			None => rendered,
		}
	}

	fn render_nodes(
		&mut self,
		nodes: Vec<FormNode>,
		mounted: &mut HashSet<String>,
	) -> Vec<RenderedNode> {
		nodes
			.into_iter()
			.map(|node| self.render_node(node, mounted))
			.collect()
	}

	fn render_node(&mut self, node: FormNode, mounted: &mut HashSet<String>) -> RenderedNode {
		match node {
			FormNode::Plain { props, children } => RenderedNode::Plain {
				props,
				children: self.render_nodes(children, mounted),
			},
			FormNode::Input { handle, children } => {
				// Depth first: nested children are rewritten before the
				// input itself is finalized
				let children = self.render_nodes(children, mounted);
				let name = handle.name().to_string();
				if !mounted.insert(name.clone()) {
					tracing::warn!(field = %name, "duplicate field name in form tree; last handle wins");
				}
				self.field_handles.insert(name.clone(), Arc::clone(&handle));
				let error_text = {
					let state = self.state.lock().unwrap();
					state.errors.get(&name).map(str::to_string)
				};
				RenderedNode::Input {
					default_value: self.default_values.get(&name).cloned(),
					error_text,
					name,
					handle,
					children,
				}
			}
			FormNode::Submit { props, children } => {
				let children = self.render_nodes(children, mounted);
				let state = self.state.lock().unwrap();
				RenderedNode::Submit {
					props,
					alert: state.alert.clone(),
					is_loading: state.is_loading,
					children,
				}
			}
		}
	}

	/// Read the current value of every registered field.
	///
	/// Returns a fresh snapshot on every call; nothing is cached.
	///
	/// # Examples
	///
	/// ```
	/// use formflow::{FormController, FormNode, SharedValueHandle, ValidationErrors};
	/// use serde_json::json;
	///
	/// let mut controller = FormController::new("profile", |_| ValidationErrors::new(), |_, _| {});
	/// let name = SharedValueHandle::with_value("name", json!("Ada"));
	/// controller.render(vec![FormNode::input(name.clone().into_handle())]);
	///
	/// assert_eq!(controller.form_values().get("name"), Some(&json!("Ada")));
	///
	/// name.set(json!("Grace"));
	/// assert_eq!(controller.form_values().get("name"), Some(&json!("Grace")));
	/// ```
	pub fn form_values(&self) -> HashMap<String, serde_json::Value> {
		self.field_handles
			.iter()
			.map(|(name, handle)| (name.clone(), handle.value()))
			.collect()
	}

	/// Validate a single field, merging its error (if any) into the stored
	/// errors without touching other fields. Intended to run on blur.
	///
	/// A passing field does not clear a previously stored error; that only
	/// happens on focus via [`clear_input_errors`](Self::clear_input_errors)
	/// or wholesale via [`validate_form`](Self::validate_form).
	pub fn validate_field(&mut self, field_name: &str) {
		let Some(handle) = self.field_handles.get(field_name) else {
			tracing::warn!(field = field_name, "validate_field on unregistered field");
			return;
		};

		let mut single = HashMap::new();
		single.insert(field_name.to_string(), handle.value());

		let result = (self.validate)(&single);
		if let Some(message) = result.get(field_name) {
			let message = message.to_string();
			self.state
				.lock()
				.unwrap()
				.errors
				.insert(field_name, message);
		}
	}

	/// Validate the full current snapshot.
	///
	/// A non-empty result replaces the stored errors wholesale and points
	/// the alert at the handle of the first field in the validator's own
	/// output order. The result is returned either way.
	///
	/// The validator's output must name only currently declared inputs; when
	/// the first errored field has no registered handle the alert target is
	/// left unset.
	///
	/// # Examples
	///
	/// ```
	/// use formflow::{FormController, FormNode, SharedValueHandle, ValidationErrors};
	/// use serde_json::json;
	///
	/// let mut controller = FormController::new(
	/// 	"profile",
	/// 	|_| {
	/// 		let mut errors = ValidationErrors::new();
	/// 		errors.insert("age", "form.errors.tooShort");
	/// 		errors
	/// 	},
	/// 	|_, _| {},
	/// );
	/// controller.render(vec![FormNode::input(SharedValueHandle::new("age").into_handle())]);
	///
	/// let errors = controller.validate_form();
	/// assert_eq!(errors.get("age"), Some("form.errors.tooShort"));
	/// assert_eq!(controller.alert().first_field_name(), Some("age"));
	/// ```
	pub fn validate_form(&mut self) -> ValidationErrors {
		let values = self.form_values();
		let errors = (self.validate)(&values);

		if !errors.is_empty() {
			let first_handle = errors
				.first()
				.and_then(|(field, _)| self.field_handles.get(field))
				.cloned();
			if first_handle.is_none() {
				tracing::warn!(
					field = errors.first().map(|(f, _)| f),
					"validator reported an error for a field with no registered handle"
				);
			}

			let mut state = self.state.lock().unwrap();
			state.errors = errors.clone();
			state.alert = FormAlert {
				first_error_to_fix: first_handle,
			};
		}

		errors
	}

	/// Clear the stored error for exactly one field, leaving others
	/// untouched. Intended to run on focus.
	pub fn clear_input_errors(&mut self, field_name: &str) {
		self.state.lock().unwrap().errors.remove(field_name);
	}

	/// Direct loading-state setter, also reachable through [`SubmitContext`]
	pub fn set_loading(&mut self, value: bool) {
		self.state.lock().unwrap().is_loading = value;
	}

	/// Direct alert setter, also reachable through [`SubmitContext`]
	pub fn set_form_alert(&mut self, alert: FormAlert) {
		self.state.lock().unwrap().alert = alert;
	}

	/// Snapshot current values, re-run full validation, and dispatch the
	/// submit handler exactly once if the pass came back clean.
	///
	/// Validation is always re-run synchronously here; a stale earlier pass
	/// is never trusted. On errors the dispatch is aborted — error and alert
	/// state were already updated by the validation pass.
	pub fn submit(&mut self) {
		let values = self.form_values();
		let errors = self.validate_form();
		if !errors.is_empty() {
			tracing::debug!(
				form = %self.name,
				error_count = errors.len(),
				"submission aborted, validation failed"
			);
			return;
		}

		tracing::debug!(form = %self.name, "dispatching submit handler");
		let context = SubmitContext {
			state: Arc::clone(&self.state),
		};
		(self.on_submit)(values, context);
	}

	/// Forward a shallow copy of the given values to the draft store, keyed
	/// by `"<form name>_draft"`. No-op when draft saving is disabled or no
	/// store is attached. Fire-and-forget: nothing is reported back.
	///
	/// # Examples
	///
	/// ```
	/// use formflow::{FormController, MemoryDraftStore, ValidationErrors};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let store = MemoryDraftStore::shared();
	/// let controller = FormController::new("signup", |_| ValidationErrors::new(), |_, _| {})
	/// 	.with_draft_store(store.clone());
	///
	/// let mut partial = HashMap::new();
	/// partial.insert("username".to_string(), json!("ab"));
	/// controller.save_draft(&partial);
	///
	/// assert!(store.get("signup_draft").is_some());
	/// ```
	pub fn save_draft(&self, values: &HashMap<String, serde_json::Value>) {
		if !self.save_draft_enabled {
			return;
		}
		let Some(store) = &self.draft_store else {
			return;
		};
		store.save_form_draft(&format!("{}_draft", self.name), values.clone());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::draft::MemoryDraftStore;
	use crate::handle::SharedValueHandle;
	use crate::node::NodeProps;
	use rstest::rstest;
	use serde_json::json;

	fn no_errors() -> impl Fn(&HashMap<String, serde_json::Value>) -> ValidationErrors {
		|_| ValidationErrors::new()
	}

	#[rstest]
	fn test_render_registers_and_unregisters_handles() {
		// Arrange
		let mut controller = FormController::new("f", no_errors(), |_, _| {});
		let a = SharedValueHandle::new("a").into_handle();
		let b = SharedValueHandle::new("b").into_handle();

		// Act: first pass mounts both, second pass drops "b"
		controller.render(vec![
			FormNode::input(Arc::clone(&a)),
			FormNode::input(Arc::clone(&b)),
		]);
		let after_first: Vec<String> = controller.field_names();
		controller.render(vec![FormNode::input(a)]);

		// Assert
		assert_eq!(after_first, vec!["a".to_string(), "b".to_string()]);
		assert_eq!(controller.field_names(), vec!["a".to_string()]);
	}

	#[rstest]
	fn test_render_stamps_default_and_error() {
		// Arrange
		let mut defaults = HashMap::new();
		defaults.insert("bio".to_string(), json!("hello"));
		let mut controller = FormController::new(
			"f",
			|_| {
				let mut errors = ValidationErrors::new();
				errors.insert("bio", "form.errors.tooLong");
				errors
			},
			|_, _| {},
		)
		.with_default_values(defaults);
		let bio = SharedValueHandle::new("bio").into_handle();
		controller.render(vec![FormNode::input(Arc::clone(&bio))]);
		controller.validate_form();

		// Act
		let rendered = controller.render(vec![FormNode::input(bio)]);

		// Assert
		match &rendered[0] {
			RenderedNode::Input {
				default_value,
				error_text,
				..
			} => {
				assert_eq!(default_value.as_ref(), Some(&json!("hello")));
				assert_eq!(error_text.as_deref(), Some("form.errors.tooLong"));
			}
			_ => panic!("expected input node"),
		}
	}

	#[rstest]
	fn test_render_is_depth_first_and_preserves_shape() {
		// Arrange
		let mut controller = FormController::new("f", no_errors(), |_, _| {});
		let inner = SharedValueHandle::new("inner").into_handle();
		let mut props = NodeProps::new();
		props.insert("style".to_string(), json!({"flex": 1}));

		// Act
		let rendered = controller.render(vec![FormNode::plain(props.clone())
			.with_children(vec![FormNode::input(inner)])]);

		// Assert: wrapper passes through with props intact, child rewritten
		match &rendered[0] {
			RenderedNode::Plain {
				props: out,
				children,
			} => {
				assert_eq!(out, &props);
				assert!(matches!(children[0], RenderedNode::Input { .. }));
			}
			_ => panic!("expected plain node"),
		}
		assert_eq!(controller.field_names(), vec!["inner".to_string()]);
	}

	#[rstest]
	fn test_form_level_style_wraps_output() {
		// Arrange
		let mut style = NodeProps::new();
		style.insert("style".to_string(), json!({"padding": 16}));
		let mut controller =
			FormController::new("f", no_errors(), |_, _| {}).with_style(style.clone());

		// Act
		let rendered = controller.render(vec![FormNode::submit(NodeProps::new())]);

		// Assert: one wrapper node carrying the form-level props
		assert_eq!(rendered.len(), 1);
		match &rendered[0] {
			RenderedNode::Plain { props, children } => {
				assert_eq!(props, &style);
				assert!(matches!(children[0], RenderedNode::Submit { .. }));
			}
			_ => panic!("expected style wrapper"),
		}
	}

	#[rstest]
	fn test_validate_field_merges_without_clearing_others() {
		// Arrange
		let mut controller = FormController::new(
			"f",
			|values| {
				let mut errors = ValidationErrors::new();
				for (field, value) in values {
					if value.as_str().is_none_or(str::is_empty) {
						errors.insert(field.clone(), "form.errors.required".to_string());
					}
				}
				errors
			},
			|_, _| {},
		);
		let a = SharedValueHandle::new("a");
		let b = SharedValueHandle::new("b");
		controller.render(vec![
			FormNode::input(a.clone().into_handle()),
			FormNode::input(b.into_handle()),
		]);
		controller.validate_form();
		assert_eq!(controller.errors().len(), 2);

		// Act: "a" now has a value; blur-validating it passes, but the old
		// error stays (only focus clears)
		a.set(json!("filled"));
		controller.validate_field("a");

		// Assert
		assert_eq!(controller.errors().len(), 2);
		assert_eq!(controller.errors().get("b"), Some("form.errors.required"));
	}

	#[rstest]
	fn test_validate_field_stores_fresh_error() {
		// Arrange
		let mut controller = FormController::new(
			"f",
			|values| {
				let mut errors = ValidationErrors::new();
				if values
					.get("age")
					.and_then(|v| v.as_str())
					.is_some_and(|v| v.len() < 2)
				{
					errors.insert("age", "form.errors.tooShort");
				}
				errors
			},
			|_, _| {},
		);
		let age = SharedValueHandle::with_value("age", json!("3"));
		controller.render(vec![FormNode::input(age.into_handle())]);

		// Act
		controller.validate_field("age");

		// Assert
		assert_eq!(controller.errors().get("age"), Some("form.errors.tooShort"));
	}

	#[rstest]
	fn test_validate_form_replaces_errors_wholesale() {
		// Arrange
		let pass = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
		let pass_for_validator = Arc::clone(&pass);
		let mut controller = FormController::new(
			"f",
			move |_| {
				let mut errors = ValidationErrors::new();
				if pass_for_validator.load(std::sync::atomic::Ordering::SeqCst) == 0 {
					errors.insert("a", "first pass error");
					errors.insert("b", "first pass error");
				} else {
					errors.insert("b", "second pass error");
				}
				errors
			},
			|_, _| {},
		);
		controller.render(vec![
			FormNode::input(SharedValueHandle::new("a").into_handle()),
			FormNode::input(SharedValueHandle::new("b").into_handle()),
		]);

		// Act
		controller.validate_form();
		pass.store(1, std::sync::atomic::Ordering::SeqCst);
		controller.validate_form();

		// Assert: the first pass's "a" error is gone, not merged
		let errors = controller.errors();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors.get("b"), Some("second pass error"));
		assert_eq!(controller.alert().first_field_name(), Some("b"));
	}

	#[rstest]
	fn test_alert_unset_for_unregistered_first_field() {
		// Arrange: validator names a field that was never declared
		let mut controller = FormController::new(
			"f",
			|_| {
				let mut errors = ValidationErrors::new();
				errors.insert("ghost", "form.errors.required");
				errors
			},
			|_, _| {},
		);

		// Act
		let errors = controller.validate_form();

		// Assert: errors stored, alert target left unset
		assert_eq!(errors.len(), 1);
		assert!(controller.alert().is_empty());
	}

	#[rstest]
	fn test_submit_context_reports_after_dispatch() {
		// Arrange: handler keeps the context and reports through it
		let captured: Arc<Mutex<Option<SubmitContext>>> = Arc::new(Mutex::new(None));
		let captured_for_handler = Arc::clone(&captured);
		let mut controller = FormController::new("f", no_errors(), move |_, ctx| {
			ctx.set_loading(true);
			*captured_for_handler.lock().unwrap() = Some(ctx);
		});
		controller.render(vec![FormNode::input(SharedValueHandle::new("a").into_handle())]);

		// Act
		controller.submit();
		assert!(controller.is_loading());
		assert_eq!(controller.phase(), FormPhase::Submitting);
		let ctx = captured.lock().unwrap().take().expect("handler ran");
		ctx.set_loading(false);

		// Assert
		assert!(!controller.is_loading());
		assert_eq!(controller.phase(), FormPhase::Idle);
	}

	#[rstest]
	fn test_phase_reflects_error_state() {
		// Arrange
		let mut controller = FormController::new(
			"f",
			|_| {
				let mut errors = ValidationErrors::new();
				errors.insert("a", "bad");
				errors
			},
			|_, _| {},
		);
		controller.render(vec![FormNode::input(SharedValueHandle::new("a").into_handle())]);

		// Act
		controller.submit();

		// Assert
		assert_eq!(controller.phase(), FormPhase::IdleWithErrors);

		// Focus clears the only error, back to Idle
		controller.clear_input_errors("a");
		assert_eq!(controller.phase(), FormPhase::Idle);
	}

	#[rstest]
	fn test_save_draft_disabled_never_reaches_store() {
		// Arrange
		let store = MemoryDraftStore::shared();
		let controller = FormController::new("f", no_errors(), |_, _| {})
			.with_draft_store(store.clone())
			.without_draft_saving();

		// Act
		let mut partial = HashMap::new();
		partial.insert("a".to_string(), json!("typed"));
		controller.save_draft(&partial);

		// Assert
		assert!(store.is_empty());
	}

	#[rstest]
	fn test_save_draft_uses_name_suffixed_key() {
		// Arrange
		let store = MemoryDraftStore::shared();
		let controller = FormController::new("newRoom", no_errors(), |_, _| {})
			.with_draft_store(store.clone());

		// Act
		let mut partial = HashMap::new();
		partial.insert("roomName".to_string(), json!("eng"));
		controller.save_draft(&partial);

		// Assert
		let draft = store.get("newRoom_draft").expect("draft stored");
		assert_eq!(draft.get("roomName"), Some(&json!("eng")));
	}
}
