//! Tracked entity attribute values.
//!
//! An [`Attribute`] pairs an attribute UID with the value captured for it. Enrollment payloads
//! carry a list of these so that attribute values can be set in the same request that enrolls
//! the tracked entity instance.

use crate::Dhis2Error;
use serde::{Deserialize, Serialize};

/// A single tracked entity attribute value.
///
/// Both fields are optional on the wire. A `None` field is left out of the serialised object
/// rather than written as `null`, and a missing key on input becomes `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// UID of the tracked entity attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    /// Captured value, always transmitted as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Attribute {
    /// Creates a fully populated attribute value.
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: Some(attribute.into()),
            value: Some(value.into()),
        }
    }

    /// Parses a `UID=value` pair.
    ///
    /// Only the first `=` separates the UID from the value, so values may themselves contain `=`.
    /// Surrounding whitespace on the UID is trimmed; the value is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Dhis2Error::InvalidInput`] if there is no `=` or the UID part is empty.
    pub fn parse_pair(input: &str) -> Result<Self, Dhis2Error> {
        let (attribute, value) = input.split_once('=').ok_or_else(|| {
            Dhis2Error::InvalidInput(format!("expected UID=value, got '{input}'"))
        })?;

        let attribute = attribute.trim();
        if attribute.is_empty() {
            return Err(Dhis2Error::InvalidInput(format!(
                "attribute UID is empty in '{input}'"
            )));
        }

        Ok(Self::new(attribute, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(attribute: &Attribute) -> u64 {
        let mut hasher = DefaultHasher::new();
        attribute.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_attributes_hash_equally() {
        let a = Attribute::new("w75KJ2mc4zz", "Joe");
        let b = Attribute::new("w75KJ2mc4zz", "Joe");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn missing_value_differs_from_empty_value() {
        let missing = Attribute {
            attribute: Some("w75KJ2mc4zz".into()),
            value: None,
        };
        let empty = Attribute::new("w75KJ2mc4zz", "");
        assert_ne!(missing, empty);
    }

    #[test]
    fn omits_missing_fields() {
        let attribute = Attribute {
            attribute: Some("w75KJ2mc4zz".into()),
            value: None,
        };

        let value = serde_json::to_value(&attribute).expect("serialise attribute");
        assert_eq!(value, json!({ "attribute": "w75KJ2mc4zz" }));
    }

    #[test]
    fn ignores_unknown_fields() {
        let input = r#"{"attribute":"w75KJ2mc4zz","value":"Joe","displayName":"First name","valueType":"TEXT"}"#;

        let attribute: Attribute = serde_json::from_str(input).expect("parse attribute");
        assert_eq!(attribute, Attribute::new("w75KJ2mc4zz", "Joe"));
    }

    #[test]
    fn parses_pair() {
        let attribute = Attribute::parse_pair(" zDhUuAYrxNC =Smith").expect("parse pair");
        assert_eq!(attribute.attribute.as_deref(), Some("zDhUuAYrxNC"));
        assert_eq!(attribute.value.as_deref(), Some("Smith"));
    }

    #[test]
    fn parse_pair_keeps_equals_in_value() {
        let attribute = Attribute::parse_pair("lZGmxYbs97q=a=b").expect("parse pair");
        assert_eq!(attribute.value.as_deref(), Some("a=b"));
    }

    #[test]
    fn parse_pair_rejects_missing_separator() {
        let err = Attribute::parse_pair("zDhUuAYrxNC").expect_err("should reject");
        match err {
            Dhis2Error::InvalidInput(msg) => assert!(msg.contains("UID=value")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn parse_pair_rejects_empty_uid() {
        let err = Attribute::parse_pair(" =Smith").expect_err("should reject");
        assert!(matches!(err, Dhis2Error::InvalidInput(_)));
    }
}
