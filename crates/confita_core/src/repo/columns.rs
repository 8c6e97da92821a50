//! Text column codecs for list-valued conference fields.
//!
//! `carousels`, `tags` and `tree_items` each live in one TEXT column holding
//! JSON. `None` is stored as `null` and `Some(vec![])` as `[]`, so the two
//! stay distinct through storage. Blank text (rows written outside this
//! crate) decodes to `None`.

use crate::model::tree_item::TreeItem;
use crate::repo::conference_repo::{RepoError, RepoResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes a string list column.
pub fn encode_string_list(values: Option<&[String]>) -> RepoResult<String> {
    encode_json(&values)
}

/// Decodes a string list column.
pub fn decode_string_list(column: &str, text: &str) -> RepoResult<Option<Vec<String>>> {
    decode_json(column, text)
}

/// Encodes a conference content outline.
pub fn encode_tree_items(items: Option<&[TreeItem]>) -> RepoResult<String> {
    encode_json(&items)
}

/// Decodes a conference content outline.
pub fn decode_tree_items(column: &str, text: &str) -> RepoResult<Option<Vec<TreeItem>>> {
    decode_json(column, text)
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode list column: {err}")))
}

fn decode_json<T: DeserializeOwned>(column: &str, text: &str) -> RepoResult<Option<T>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map_err(|err| {
        RepoError::InvalidData(format!("invalid JSON in conferences.{column}: {err}"))
    })
}
