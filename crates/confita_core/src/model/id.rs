//! Composite `owner/name` identifiers.
//!
//! # Invariants
//! - A valid id has exactly one `/` with non-empty text on both sides.
//! - `ConferenceKey::parse(key.to_id())` returns the same key.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Separator between owner and name in a composite id.
pub const ID_SEPARATOR: char = '/';

/// Error returned when a composite id cannot be split into owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Malformed(String),
}

impl Display for IdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(id) => write!(
                f,
                "malformed conference id `{id}`; expected `owner{ID_SEPARATOR}name`"
            ),
        }
    }
}

impl Error for IdError {}

/// Primary key of a conference row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConferenceKey {
    pub owner: String,
    pub name: String,
}

impl ConferenceKey {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Splits `owner/name` into its parts.
    ///
    /// # Errors
    /// - Returns `IdError::Malformed` when the separator count is not
    ///   exactly one or either side is empty.
    pub fn parse(id: &str) -> Result<Self, IdError> {
        let mut parts = id.split(ID_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(IdError::Malformed(id.to_string())),
        }
    }

    /// Joins owner and name back into the composite id form.
    pub fn to_id(&self) -> String {
        format!("{}{ID_SEPARATOR}{}", self.owner, self.name)
    }
}

impl Display for ConferenceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{ID_SEPARATOR}{}", self.owner, self.name)
    }
}
