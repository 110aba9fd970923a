//! Custom `validator` rules shared by request types.

use std::borrow::Cow;

use validator::ValidationError;

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("not_blank", "must not be empty"));
    }

    Ok(())
}

/// Accepts colors written as `#` followed by six characters.
pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    if value.len() != 7 || !value.starts_with('#') {
        return Err(validation_error(
            "hex_color",
            "must be a hex color such as #FFFFFF",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(not_blank("alice").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn colors_need_hash_and_seven_chars() {
        assert!(hex_color("#FFAA00").is_ok());
        assert!(hex_color("FFAA00").is_err());
        assert!(hex_color("#FFF").is_err());
        assert!(hex_color("#FFAA0000").is_err());
    }
}
