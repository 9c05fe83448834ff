//! Typed render tree for declaratively nested form content
//!
//! The three node kinds replace runtime capability markers: whether an
//! element participates in field collection or submission triggering is part
//! of its type, not a flag inspected during traversal. Anything that is
//! neither an input nor a submit control is a plain presentation node and is
//! passed through the render pass without any injection, so form-internal
//! state can never leak into layout components.

use crate::controller::FormAlert;
use crate::handle::FieldHandle;
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque presentation props owned by the host, carried through untouched
pub type NodeProps = HashMap<String, serde_json::Value>;

/// One node of the declared form tree.
///
/// # Examples
///
/// ```
/// use formflow::{FormNode, SharedValueHandle};
///
/// let username = SharedValueHandle::new("username");
/// let tree = vec![
/// 	FormNode::plain(Default::default()).with_children(vec![
/// 		FormNode::input(username.into_handle()),
/// 		FormNode::submit(Default::default()),
/// 	]),
/// ];
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Debug)]
pub enum FormNode {
	/// Presentation-only content; never receives form state
	Plain {
		props: NodeProps,
		children: Vec<FormNode>,
	},
	/// A form-compatible input, identified by its handle's field name
	Input {
		handle: Arc<dyn FieldHandle>,
		children: Vec<FormNode>,
	},
	/// A submit control; triggers submission, does not register a field
	Submit {
		props: NodeProps,
		children: Vec<FormNode>,
	},
}

impl FormNode {
	pub fn plain(props: NodeProps) -> Self {
		Self::Plain {
			props,
			children: vec![],
		}
	}

	pub fn input(handle: Arc<dyn FieldHandle>) -> Self {
		Self::Input {
			handle,
			children: vec![],
		}
	}

	pub fn submit(props: NodeProps) -> Self {
		Self::Submit {
			props,
			children: vec![],
		}
	}

	/// Nest children under this node
	pub fn with_children(mut self, new_children: Vec<FormNode>) -> Self {
		match &mut self {
			Self::Plain { children, .. }
			| Self::Input { children, .. }
			| Self::Submit { children, .. } => *children = new_children,
		}
		self
	}
}

/// The output of a render pass: the declared tree with per-node form state
/// stamped in.
///
/// Plain nodes come out exactly as they went in, props included. Input nodes
/// carry their default value and current error message. Submit nodes carry
/// the alert and loading flag current at render time.
#[derive(Debug)]
pub enum RenderedNode {
	Plain {
		props: NodeProps,
		children: Vec<RenderedNode>,
	},
	Input {
		name: String,
		handle: Arc<dyn FieldHandle>,
		default_value: Option<serde_json::Value>,
		error_text: Option<String>,
		children: Vec<RenderedNode>,
	},
	Submit {
		props: NodeProps,
		alert: FormAlert,
		is_loading: bool,
		children: Vec<RenderedNode>,
	},
}

impl RenderedNode {
	/// The nested children of this node, whatever its kind
	pub fn children(&self) -> &[RenderedNode] {
		match self {
			Self::Plain { children, .. }
			| Self::Input { children, .. }
			| Self::Submit { children, .. } => children,
		}
	}

	/// The stamped error message, for input nodes that have one
	pub fn error_text(&self) -> Option<&str> {
		match self {
			Self::Input { error_text, .. } => error_text.as_deref(),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::handle::SharedValueHandle;
	use serde_json::json;

	#[test]
	fn test_with_children_replaces_nesting() {
		let node = FormNode::plain(NodeProps::new())
			.with_children(vec![FormNode::input(SharedValueHandle::new("a").into_handle())]);

		match node {
			FormNode::Plain { children, .. } => assert_eq!(children.len(), 1),
			_ => panic!("expected plain node"),
		}
	}

	#[test]
	fn test_props_round_trip() {
		let mut props = NodeProps::new();
		props.insert("testID".to_string(), json!("header"));

		match FormNode::plain(props.clone()) {
			FormNode::Plain { props: stored, .. } => assert_eq!(stored, props),
			_ => panic!("expected plain node"),
		}
	}
}
