//! Tag model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::tags;

/// A colored label owned by a single user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tag {
    pub id: i64,
    /// Owner of the tag.
    pub user_id: i64,
    pub name: String,
    /// Hex color in `#RRGGBB` form.
    pub color: String,
    pub created_at: Timestamp,
}

/// Data for creating a tag.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTag {
    pub user_id: i64,
    pub name: String,
    pub color: String,
}

/// Partial update of a tag.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateTag {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl UpdateTag {
    /// Returns whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}
