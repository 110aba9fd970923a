//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::not_blank;

/// Request payload for login.
///
/// The name is the only credential. An unseen name registers a new user.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Display name of the user.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
}

impl Login {
    /// Returns the name with surrounding whitespace removed.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}
