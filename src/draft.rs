//! Draft persistence collaborator
//!
//! Drafts are partial, unsaved snapshots of form values persisted for later
//! resumption. Saving is fire-and-forget: a store that fails should log and
//! swallow the failure rather than surface it into the form lifecycle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// External draft-persistence collaborator.
///
/// The controller forwards value snapshots keyed by `"<form name>_draft"`.
pub trait DraftStore: Send + Sync {
	fn save_form_draft(&self, key: &str, values: HashMap<String, serde_json::Value>);
}

/// In-memory [`DraftStore`] for tests and single-session hosts.
///
/// # Examples
///
/// ```
/// use formflow::{DraftStore, MemoryDraftStore};
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let store = MemoryDraftStore::new();
///
/// let mut values = HashMap::new();
/// values.insert("username".to_string(), json!("abc"));
/// store.save_form_draft("signup_draft", values);
///
/// let draft = store.get("signup_draft").unwrap();
/// assert_eq!(draft.get("username"), Some(&json!("abc")));
/// ```
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
	drafts: Mutex<HashMap<String, HashMap<String, serde_json::Value>>>,
}

impl MemoryDraftStore {
	pub fn new() -> Self {
		Self::default()
	}
	/// Shared instance, ready to hand to a controller
	pub fn shared() -> Arc<Self> {
		Arc::new(Self::new())
	}
	/// Read back a stored draft
	pub fn get(&self, key: &str) -> Option<HashMap<String, serde_json::Value>> {
		self.drafts.lock().unwrap().get(key).cloned()
	}
	/// True when no draft has ever been stored
	pub fn is_empty(&self) -> bool {
		self.drafts.lock().unwrap().is_empty()
	}
	pub fn len(&self) -> usize {
		self.drafts.lock().unwrap().len()
	}
}

impl DraftStore for MemoryDraftStore {
	fn save_form_draft(&self, key: &str, values: HashMap<String, serde_json::Value>) {
		tracing::debug!(key, field_count = values.len(), "saving form draft");
		// Last write wins; a draft is a whole snapshot, not a merge.
		self.drafts.lock().unwrap().insert(key.to_string(), values);
	}
}
