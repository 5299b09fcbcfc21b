//! Task field rules: column bounds, the priority enum, and validation helpers.
//!
//! The bounds mirror the `VARCHAR(n)` widths of the `tasks` table, so a value
//! that passes here always fits the column. Lengths are counted in characters,
//! not bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a task title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a task description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Maximum length of a task category.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Maximum length of an owning user id.
pub const MAX_USER_ID_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Optional task priority. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// All valid priority strings.
const VALID_PRIORITY_STRINGS: &[&str] = &["low", "medium", "high"];

impl Priority {
    /// Return the priority as the lowercase string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::Validation(format!(
                "Invalid priority '{s}'. Must be one of: {}",
                VALID_PRIORITY_STRINGS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Reject `value` if it is longer than `max` characters.
fn validate_max_chars(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate a task title: required, not blank, at most [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    validate_max_chars("title", title, MAX_TITLE_LENGTH)
}

/// Validate an optional description against [`MAX_DESCRIPTION_LENGTH`].
pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    match description {
        Some(d) => validate_max_chars("description", d, MAX_DESCRIPTION_LENGTH),
        None => Ok(()),
    }
}

/// Validate an optional category against [`MAX_CATEGORY_LENGTH`].
pub fn validate_category(category: Option<&str>) -> Result<(), CoreError> {
    match category {
        Some(c) => validate_max_chars("category", c, MAX_CATEGORY_LENGTH),
        None => Ok(()),
    }
}

/// Validate the owning user id taken from the request path.
pub fn validate_user_id(user_id: &str) -> Result<(), CoreError> {
    if user_id.is_empty() {
        return Err(CoreError::Validation("user_id must not be empty".to_string()));
    }
    validate_max_chars("user_id", user_id, MAX_USER_ID_LENGTH)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn title_at_max_length_is_accepted() {
        let title = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn title_one_over_max_is_rejected() {
        let title = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert_matches!(validate_title(&title), Err(CoreError::Validation(_)));
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        // 200 two-byte characters is 400 bytes but still a valid title.
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_matches!(validate_title(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn description_bounds() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some(&"d".repeat(MAX_DESCRIPTION_LENGTH))).is_ok());
        assert_matches!(
            validate_description(Some(&"d".repeat(MAX_DESCRIPTION_LENGTH + 1))),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn category_bounds() {
        assert!(validate_category(Some("groceries")).is_ok());
        assert_matches!(
            validate_category(Some(&"c".repeat(MAX_CATEGORY_LENGTH + 1))),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn user_id_must_be_non_empty_and_bounded() {
        assert!(validate_user_id("u1").is_ok());
        assert_matches!(validate_user_id(""), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_user_id(&"u".repeat(MAX_USER_ID_LENGTH + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn priority_parses_known_values() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn priority_rejects_unknown_value() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("low, medium, high"));
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let parsed: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }
}
