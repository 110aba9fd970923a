//! User response types.

use jiff::Timestamp;
use luxlist_postgres::model;
use serde::{Deserialize, Serialize};

/// Represents a user.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of the user.
    pub id: i64,
    /// Display name, which is also the login credential.
    pub name: String,
    /// Timestamp when the user first logged in.
    pub created_at: Timestamp,
}

impl User {
    /// Creates a User response from a database model.
    pub fn from_model(user: model::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            created_at: user.created_at.into(),
        }
    }
}
