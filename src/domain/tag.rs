use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, TagId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    #[serde(rename = "tagId")]
    pub id: TagId,
    #[serde(rename = "tagName")]
    pub name: String,
}

/// Payload for `POST /Tags`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTag {
    pub tag_name: NonEmptyString,
    pub note: Option<String>,
}
