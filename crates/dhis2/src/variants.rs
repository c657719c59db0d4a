//! Concrete enrollment payloads.
//!
//! Each variant embeds [`EnrollmentBase`] and adds the fields one kind of request needs:
//! - [`EnrollmentRequest`]: enrolls a tracked entity instance for the first time
//! - [`EnrollmentUpdate`]: changes an enrollment the remote system already holds
//!
//! The embedded base is flattened, so on the wire a variant is a single JSON object holding both
//! the shared fields and its own.

use crate::{EnrollmentBase, EnrollmentRecord};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an enrollment as reported by DHIS2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    /// Enrollment is open and accepting events.
    Active,
    /// Enrollment has been completed.
    Completed,
    /// Enrollment was cancelled.
    Cancelled,
}

/// Payload for creating a new enrollment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    #[serde(flatten)]
    pub base: EnrollmentBase,

    /// UID of the organisation unit owning the enrollment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_unit: Option<String>,

    /// Enrollment date as sent to DHIS2 (`YYYY-MM-DD` or an ISO timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<String>,

    /// Incident date as sent to DHIS2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
}

impl EnrollmentRequest {
    pub fn new(base: EnrollmentBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }
}

impl EnrollmentRecord for EnrollmentRequest {
    const KIND: &'static str = "enrollment request";

    fn base(&self) -> &EnrollmentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EnrollmentBase {
        &mut self.base
    }
}

/// Payload for updating an existing enrollment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentUpdate {
    #[serde(flatten)]
    pub base: EnrollmentBase,

    /// UID of the enrollment being updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
}

impl EnrollmentUpdate {
    pub fn new(base: EnrollmentBase, enrollment: impl Into<String>) -> Self {
        Self {
            base,
            enrollment: Some(enrollment.into()),
            status: None,
        }
    }
}

impl EnrollmentRecord for EnrollmentUpdate {
    const KIND: &'static str = "enrollment update";

    fn base(&self) -> &EnrollmentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EnrollmentBase {
        &mut self.base
    }
}
