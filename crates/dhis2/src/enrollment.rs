//! Enrollment wire models and JSON helpers.
//!
//! This module provides the field set shared by every enrollment payload and the JSON
//! boundary used to read and write any enrollment record.
//!
//! Responsibilities:
//! - Define [`EnrollmentBase`], the four fields common to all enrollment payloads
//! - Define [`EnrollmentRecord`], the hook through which concrete variants expose that field set
//! - Provide [`Enrollment`] parse/render helpers with path-aware error reporting
//!
//! Notes:
//! - Records are plain carriers. Nothing here checks that a tracked entity instance or program
//!   is present, the remote system rejects incomplete payloads on its own.
//! - `None` fields are dropped from the output, `followup` is always written.

use crate::{Attribute, Dhis2Error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::Hash;
use std::io::Read;

// ============================================================================
// Shared field set
// ============================================================================

/// Fields shared by every enrollment payload.
///
/// Concrete variants embed this struct with `#[serde(flatten)]`, so the fields appear at the top
/// level of the variant's JSON object and take part in the variant's derived equality and hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentBase {
    /// UID of the tracked entity instance being enrolled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_entity_instance: Option<String>,

    /// UID of the program the instance is enrolled into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Attribute values captured at enrollment time, in transmission order.
    ///
    /// `None` and `Some(vec![])` are distinct: the former omits the key, the latter sends `[]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,

    /// Marks the enrollment for later follow-up. An explicit `null` reads as `false`.
    #[serde(default, deserialize_with = "null_as_false")]
    pub followup: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

impl EnrollmentBase {
    /// Creates a record with every field unset and `followup` false.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a fully populated record.
    ///
    /// Values are stored as given. The attribute vector is moved in, not copied.
    pub fn new(
        tracked_entity_instance: Option<String>,
        program: Option<String>,
        attributes: Option<Vec<Attribute>>,
        followup: bool,
    ) -> Self {
        Self {
            tracked_entity_instance,
            program,
            attributes,
            followup,
        }
    }

    pub fn tracked_entity_instance(&self) -> Option<&str> {
        self.tracked_entity_instance.as_deref()
    }

    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub fn attributes(&self) -> Option<&[Attribute]> {
        self.attributes.as_deref()
    }

    /// Mutable access to the stored attribute vector, if one is set.
    pub fn attributes_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        self.attributes.as_mut()
    }
}

// ============================================================================
// Extension hook
// ============================================================================

/// A JSON enrollment payload built on [`EnrollmentBase`].
///
/// Implementors embed the base field set and derive equality, hashing and serde so that the
/// inherited fields and their own fields are handled together.
pub trait EnrollmentRecord: Serialize + DeserializeOwned + Clone + Eq + Hash {
    /// Human-readable name used in log and error messages.
    const KIND: &'static str;

    fn base(&self) -> &EnrollmentBase;

    fn base_mut(&mut self) -> &mut EnrollmentBase;
}

impl EnrollmentRecord for EnrollmentBase {
    const KIND: &'static str = "enrollment";

    fn base(&self) -> &EnrollmentBase {
        self
    }

    fn base_mut(&mut self) -> &mut EnrollmentBase {
        self
    }
}

// ============================================================================
// Public Enrollment operations
// ============================================================================

/// Enrollment JSON operations.
///
/// This is a zero-sized type used for namespacing enrollment-related operations.
/// All methods are associated functions.
pub struct Enrollment;

impl Enrollment {
    /// Parse an enrollment record from JSON text.
    ///
    /// Missing keys take the field's default (`None`, or `false` for `followup`) and unknown keys
    /// are ignored. This uses `serde_path_to_error` to surface the path (e.g.
    /// `attributes[0].value`) to a field whose JSON type does not match.
    ///
    /// Variants flatten the base field set, which hides the path from `serde_path_to_error`.
    /// When a variant fails without a path, the text is re-read as [`EnrollmentBase`] to locate
    /// the failing base field.
    ///
    /// # Errors
    ///
    /// Returns [`Dhis2Error::Translation`] if the text is not valid JSON or a field has an
    /// unexpected type, and [`Dhis2Error::InvalidJson`] if non-whitespace follows the object.
    pub fn parse<T: EnrollmentRecord>(json_text: &str) -> Result<T, Dhis2Error> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let record = match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = Some(err.path().to_string())
                    .filter(|p| !p.is_empty() && p != ".")
                    .or_else(|| base_error_path(json_text))
                    .unwrap_or_else(|| "<root>".to_string());
                let source = err.into_inner();
                return Err(Dhis2Error::Translation(format!(
                    "{} schema mismatch at {path}: {source}",
                    T::KIND
                )));
            }
        };
        deserializer.end()?;

        tracing::debug!(kind = T::KIND, "parsed enrollment record");
        Ok(record)
    }

    /// Read and parse an enrollment record from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`Dhis2Error::Io`] if reading fails, otherwise as [`Enrollment::parse`].
    pub fn parse_reader<T: EnrollmentRecord>(mut reader: impl Read) -> Result<T, Dhis2Error> {
        let mut json_text = String::new();
        reader.read_to_string(&mut json_text)?;
        Self::parse(&json_text)
    }

    /// Render an enrollment record as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Dhis2Error::Translation`] if serialisation fails.
    pub fn render<T: EnrollmentRecord>(record: &T) -> Result<String, Dhis2Error> {
        tracing::debug!(kind = T::KIND, "rendering enrollment record");
        serde_json::to_string(record)
            .map_err(|e| Dhis2Error::Translation(format!("Failed to serialise {}: {e}", T::KIND)))
    }

    /// Render an enrollment record as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Dhis2Error::Translation`] if serialisation fails.
    pub fn render_pretty<T: EnrollmentRecord>(record: &T) -> Result<String, Dhis2Error> {
        tracing::debug!(kind = T::KIND, "rendering enrollment record");
        serde_json::to_string_pretty(record)
            .map_err(|e| Dhis2Error::Translation(format!("Failed to serialise {}: {e}", T::KIND)))
    }

    /// Convert an enrollment record into a JSON value, e.g. to embed it in a larger request body.
    ///
    /// # Errors
    ///
    /// Returns [`Dhis2Error::Translation`] if serialisation fails.
    pub fn to_value<T: EnrollmentRecord>(record: &T) -> Result<serde_json::Value, Dhis2Error> {
        serde_json::to_value(record)
            .map_err(|e| Dhis2Error::Translation(format!("Failed to serialise {}: {e}", T::KIND)))
    }
}

/// Path of the base field that fails to deserialise, if the failure lies in one.
fn base_error_path(json_text: &str) -> Option<String> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);
    let err = serde_path_to_error::deserialize::<_, EnrollmentBase>(&mut deserializer).err()?;
    Some(err.path().to_string()).filter(|p| !p.is_empty() && p != ".")
}
