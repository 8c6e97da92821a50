//! Conference use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for hosts such as an HTTP API layer.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer remains storage-agnostic.

use crate::model::conference::Conference;
use crate::repo::conference_repo::{ConferenceRepository, RepoError, RepoResult};

/// Use-case service wrapper for conference CRUD operations.
pub struct ConferenceService<R: ConferenceRepository> {
    repo: R,
}

impl<R: ConferenceRepository> ConferenceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_global_conferences(&self) -> RepoResult<Vec<Conference>> {
        self.repo.list_global_conferences()
    }

    pub fn list_conferences(&self, owner: &str) -> RepoResult<Vec<Conference>> {
        self.repo.list_conferences(owner)
    }

    pub fn get_conference(&self, id: &str) -> RepoResult<Option<Conference>> {
        self.repo.get_conference(id)
    }

    /// Creates an empty conference stamped with the current time.
    ///
    /// # Contract
    /// - Fails with `RepoError::AlreadyExists` when the key is taken.
    /// - Returns the record exactly as stored.
    pub fn create_conference(&self, owner: &str, name: &str) -> RepoResult<Conference> {
        let conference = Conference::new(owner, name);
        if !self.repo.add_conference(&conference)? {
            return Err(RepoError::InvalidData(format!(
                "insert of conference {} reported no created row",
                conference.id()
            )));
        }
        Ok(conference)
    }

    pub fn add_conference(&self, conference: &Conference) -> RepoResult<bool> {
        self.repo.add_conference(conference)
    }

    /// Full replace of an existing conference; `Ok(false)` when absent.
    pub fn update_conference(&self, id: &str, conference: &Conference) -> RepoResult<bool> {
        self.repo.update_conference(id, conference)
    }

    pub fn delete_conference(&self, conference: &Conference) -> RepoResult<bool> {
        self.repo.delete_conference(conference)
    }

    pub fn delete_conference_by_id(&self, id: &str) -> RepoResult<bool> {
        self.repo.delete_conference_by_id(id)
    }
}
