//! Deserialization for PATCH fields that must tell "absent" apart from `null`.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct PatchThing {
//!     #[serde(default, deserialize_with = "taskmaster_core::nullable::deserialize")]
//!     note: Option<Option<String>>,
//! }
//! ```
//!
//! - field absent      -> `None` (keep the stored value)
//! - field is `null`   -> `Some(None)` (clear the stored value)
//! - field has a value -> `Some(Some(v))`

use serde::{Deserialize, Deserializer};

/// Wrap whatever is present in `Some`, including an explicit `null`.
///
/// Only called by serde when the key exists, so it must be combined with
/// `#[serde(default)]` for the absent case.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Note {
        #[serde(default, deserialize_with = "super::deserialize")]
        note: Option<Option<String>>,
    }

    #[test]
    fn absent_field_is_none() {
        let parsed: Note = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.note, None);
    }

    #[test]
    fn null_field_is_some_none() {
        let parsed: Note = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(parsed.note, Some(None));
    }

    #[test]
    fn present_field_is_some_some() {
        let parsed: Note = serde_json::from_str(r#"{"note": "hi"}"#).unwrap();
        assert_eq!(parsed.note, Some(Some("hi".to_string())));
    }
}
