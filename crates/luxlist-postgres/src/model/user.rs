//! User model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::users;

/// A registered user. The name is the only credential.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub name: String,
    /// Timestamp when the user registered.
    pub created_at: Timestamp,
}

/// Data for registering a new user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Unique login name.
    pub name: String,
}

impl NewUser {
    /// Creates a new user payload with a trimmed name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_trims_name() {
        assert_eq!(NewUser::new("  alice ").name, "alice");
    }
}
