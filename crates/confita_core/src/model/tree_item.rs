//! Content outline node owned by a conference.

use crate::model::conference::null_as_default;
use serde::{Deserialize, Serialize};

/// One node of a conference's bilingual content outline.
///
/// Children are owned by value, so a tree can never contain cycles or share
/// a subtree with another conference. `children: None` (wire `null`) and
/// `Some(vec![])` (wire `[]`) are distinct and both survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeItem {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content_en: String,
    pub children: Option<Vec<TreeItem>>,
}

impl TreeItem {
    /// Creates a leaf node with the given key and title and `null` children.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Appends a child and returns `self` for chained construction.
    pub fn with_child(mut self, child: TreeItem) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Children as a slice; empty for both `null` and `[]`.
    pub fn child_items(&self) -> &[TreeItem] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Counts this node and all of its descendants.
    pub fn node_count(&self) -> usize {
        1 + self
            .child_items()
            .iter()
            .map(TreeItem::node_count)
            .sum::<usize>()
    }

    /// Depth-first search for a node by key, including `self`.
    pub fn find(&self, key: &str) -> Option<&TreeItem> {
        if self.key == key {
            return Some(self);
        }
        self.child_items().iter().find_map(|child| child.find(key))
    }
}
