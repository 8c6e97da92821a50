//! Conference store for the Confita conference-management application.
//!
//! Owns the conference aggregate, its SQLite persistence and the repository
//! contracts an API layer calls into.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::conference::{Conference, ConferenceValidationError};
pub use model::id::{ConferenceKey, IdError};
pub use model::tree_item::TreeItem;
pub use repo::conference_repo::{
    ConferenceRepository, RepoError, RepoResult, SqliteConferenceRepository,
};
pub use service::conference_service::ConferenceService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
