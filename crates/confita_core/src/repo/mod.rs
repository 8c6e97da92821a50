//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for the conference aggregate.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Conference::validate()` before persistence.
//! - Absence is a value (`None` / `false`), never an error.

pub mod columns;
pub mod conference_repo;
