//! Headless form controller for formflow
//!
//! This crate provides the form plumbing a host UI would otherwise wire by
//! hand:
//! - A typed render tree (plain / input / submit nodes) with per-field state
//!   stamped in during a depth-first render pass
//! - An explicit field-handle registry driven by mount/unmount
//! - Validation dispatch with insertion-ordered errors and a
//!   "first error to fix" alert
//! - A submission lifecycle that hands loading/alert reporting to the
//!   caller-supplied handler
//! - Fire-and-forget draft persistence through an external collaborator
//! - Declarative per-field validation rules compiled into a validator
//!   callback

pub mod controller;
pub mod draft;
pub mod errors;
pub mod handle;
pub mod node;
pub mod validators;

pub use controller::{FormAlert, FormController, FormPhase, SubmitContext};
pub use draft::{DraftStore, MemoryDraftStore};
pub use errors::{FormError, FormResult, ValidationErrors};
pub use handle::{FieldHandle, SharedValueHandle};
pub use node::{FormNode, NodeProps, RenderedNode};
pub use validators::RuleSet;
