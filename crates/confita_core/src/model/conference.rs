//! Conference aggregate model.
//!
//! # Responsibility
//! - Define the canonical conference record and its wire shape.
//! - Enforce the column-width contract before rows reach storage.
//!
//! # Invariants
//! - `(owner, name)` is the primary key and never changes after creation.
//! - Wire field names are lower camel case and must stay stable for
//!   existing API consumers.
//! - `tree_items` is owned exclusively by this record.

use crate::model::id::{ConferenceKey, ID_SEPARATOR};
use crate::model::tree_item::TreeItem;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum character count of short (`varchar(100)`) columns.
pub const SHORT_COLUMN_MAX_CHARS: usize = 100;

/// Validation errors for conference records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConferenceValidationError {
    EmptyOwner,
    EmptyName,
    /// Key part contains the composite id separator.
    ReservedCharacter { field: &'static str },
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl Display for ConferenceValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOwner => write!(f, "conference owner cannot be empty"),
            Self::EmptyName => write!(f, "conference name cannot be empty"),
            Self::ReservedCharacter { field } => {
                write!(f, "conference {field} cannot contain `{ID_SEPARATOR}`")
            }
            Self::FieldTooLong { field, max, actual } => write!(
                f,
                "conference {field} is {actual} characters long; at most {max} allowed"
            ),
        }
    }
}

impl Error for ConferenceValidationError {}

/// Conference aggregate root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conference {
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,

    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub introduction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub organizer: String,
    pub carousels: Option<Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub carousel_height: String,
    pub tags: Option<Vec<String>>,

    #[serde(deserialize_with = "null_as_default")]
    pub dataset_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dataset_preview_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preview_data: String,
    #[serde(deserialize_with = "null_as_default")]
    pub result_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bonus: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub person_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub display_state: String,

    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub enable_submission: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub default_item: String,
    pub tree_items: Option<Vec<TreeItem>>,
}

impl Conference {
    /// Creates an empty conference stamped with the current local time.
    ///
    /// `created_time` uses RFC 3339 with second precision, which also makes
    /// lexical order match chronological order for rows from one offset.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            created_time: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            ..Self::default()
        }
    }

    /// Returns the primary key of this record.
    pub fn key(&self) -> ConferenceKey {
        ConferenceKey::new(self.owner.as_str(), self.name.as_str())
    }

    /// Content outline roots; empty for both `null` and `[]`.
    pub fn outline(&self) -> &[TreeItem] {
        self.tree_items.as_deref().unwrap_or_default()
    }

    /// Returns the composite `owner/name` id of this record.
    pub fn id(&self) -> String {
        self.key().to_id()
    }

    /// Validates key presence and short column widths.
    ///
    /// Long-form columns (`introduction`, `previewData`, `defaultItem`) and
    /// list columns are unbounded and not checked.
    pub fn validate(&self) -> Result<(), ConferenceValidationError> {
        if self.owner.is_empty() {
            return Err(ConferenceValidationError::EmptyOwner);
        }
        if self.name.is_empty() {
            return Err(ConferenceValidationError::EmptyName);
        }
        if self.owner.contains(ID_SEPARATOR) {
            return Err(ConferenceValidationError::ReservedCharacter { field: "owner" });
        }
        if self.name.contains(ID_SEPARATOR) {
            return Err(ConferenceValidationError::ReservedCharacter { field: "name" });
        }

        for (field, value) in self.short_columns() {
            let actual = value.chars().count();
            if actual > SHORT_COLUMN_MAX_CHARS {
                return Err(ConferenceValidationError::FieldTooLong {
                    field,
                    max: SHORT_COLUMN_MAX_CHARS,
                    actual,
                });
            }
        }

        Ok(())
    }

    fn short_columns(&self) -> [(&'static str, &str); 17] {
        [
            ("owner", self.owner.as_str()),
            ("name", self.name.as_str()),
            ("createdTime", self.created_time.as_str()),
            ("displayName", self.display_name.as_str()),
            ("type", self.kind.as_str()),
            ("startDate", self.start_date.as_str()),
            ("endDate", self.end_date.as_str()),
            ("organizer", self.organizer.as_str()),
            ("carouselHeight", self.carousel_height.as_str()),
            ("datasetUrl", self.dataset_url.as_str()),
            ("datasetPreviewUrl", self.dataset_preview_url.as_str()),
            ("resultUrl", self.result_url.as_str()),
            ("displayState", self.display_state.as_str()),
            ("status", self.status.as_str()),
            ("language", self.language.as_str()),
            ("location", self.location.as_str()),
            ("address", self.address.as_str()),
        ]
    }
}

/// Treats an explicit JSON `null` like a missing field.
///
/// Scalar fields of older payloads may be `null`; they decode to `""`, `0`
/// or `false`. List fields are `Option<Vec<_>>` instead, so `null` and `[]`
/// stay distinct.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
