use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, NonEmptyString};

/// Reference to the parent of a category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParentCategory {
    #[serde(rename = "parentCategoryId")]
    pub id: CategoryId,
    #[serde(rename = "parentCategoryName")]
    pub name: String,
}

/// Category row as returned by `GET /Categories`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(rename = "categoryId")]
    pub id: CategoryId,
    #[serde(rename = "categoryName")]
    pub name: String,
    #[serde(rename = "categoryDescription", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<ParentCategory>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Node of the category tree served by `GET /Categories/dropdown`.
///
/// The tree is an immutable snapshot owned by the server; the client never
/// edits it in place.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<CategoryNode>) -> Self {
        self.children = children;
        self
    }
}

/// Payload for creating or updating a category.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub category_name: NonEmptyString,
    pub category_description: String,
    /// Omitted entirely when the category sits at the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<CategoryId>,
    pub is_active: bool,
}
