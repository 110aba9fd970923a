//! Tag request types.

use luxlist_postgres::model;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::{hex_color, not_blank};

/// Request payload for creating a tag.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTag {
    /// Tag name.
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub name: String,
    /// Display color, `#RRGGBB`.
    #[validate(custom(function = "hex_color"))]
    pub color: String,
}

impl CreateTag {
    /// Converts to database model.
    pub fn into_model(self, user_id: i64) -> model::NewTag {
        model::NewTag {
            user_id,
            name: self.name,
            color: self.color,
        }
    }
}

/// Request payload for updating a tag. Omitted fields are unchanged.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTag {
    /// New tag name.
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub name: Option<String>,
    /// New display color.
    #[validate(custom(function = "hex_color"))]
    pub color: Option<String>,
}

impl UpdateTag {
    /// Converts to database model.
    pub fn into_model(self) -> model::UpdateTag {
        model::UpdateTag {
            name: self.name,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_valid_color() {
        let request = CreateTag {
            name: "work".into(),
            color: "#12345".into(),
        };
        assert!(request.validate().is_err());

        let request = CreateTag {
            name: "work".into(),
            color: "#123456".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_update_is_valid() {
        let request = UpdateTag::default();
        assert!(request.validate().is_ok());
        assert!(request.into_model().is_empty());
    }

    #[test]
    fn update_rejects_blank_name() {
        let request = UpdateTag {
            name: Some("  ".into()),
            color: None,
        };
        assert!(request.validate().is_err());
    }
}
