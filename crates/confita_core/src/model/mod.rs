//! Conference domain model.
//!
//! # Responsibility
//! - Define the conference aggregate and its owned content outline.
//! - Own the `owner/name` composite identifier format.
//!
//! # Invariants
//! - Every conference is identified by its `(owner, name)` key.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod conference;
pub mod id;
pub mod tree_item;
