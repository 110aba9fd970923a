//! Tag response types.

use jiff::Timestamp;
use luxlist_postgres::model;
use serde::{Deserialize, Serialize};

/// Represents a tag.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// ID of the tag.
    pub id: i64,
    /// Owner of the tag.
    pub user_id: i64,
    pub name: String,
    /// Display color, `#RRGGBB`.
    pub color: String,
    pub created_at: Timestamp,
}

impl Tag {
    /// Creates a Tag response from a database model.
    pub fn from_model(tag: model::Tag) -> Self {
        Self {
            id: tag.id,
            user_id: tag.user_id,
            name: tag.name,
            color: tag.color,
            created_at: tag.created_at.into(),
        }
    }
}

/// Single tag envelope, `{ "tag": ... }`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub tag: Tag,
}

impl TagResponse {
    pub fn from_model(tag: model::Tag) -> Self {
        Self {
            tag: Tag::from_model(tag),
        }
    }
}

/// List of tags, `{ "tags": [...] }`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tags {
    pub tags: Vec<Tag>,
}

impl Tags {
    pub fn from_models(tags: Vec<model::Tag>) -> Self {
        Self {
            tags: tags.into_iter().map(Tag::from_model).collect(),
        }
    }
}
