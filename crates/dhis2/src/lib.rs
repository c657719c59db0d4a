//! DHIS2 wire/boundary support for tracker enrollments.
//!
//! This crate provides **wire models** and **format helpers** for the JSON payloads exchanged
//! with a DHIS2 instance when enrolling tracked entity instances into programs:
//! - tracked entity attributes captured at enrollment time
//! - the shared enrollment field set and the concrete request/update variants built on it
//!
//! This crate focuses on:
//! - serialisation/deserialisation (null fields are omitted, unknown fields are ignored)
//! - structural equality and hashing of records
//!
//! It does NOT perform HTTP transport, authentication or identifier validation. Callers are
//! responsible for supplying well-formed UIDs before a record is sent.

pub mod attribute;
pub mod enrollment;
pub mod variants;

// Re-export facades
pub use enrollment::Enrollment;

// Re-export public wire types
pub use attribute::Attribute;
pub use enrollment::{EnrollmentBase, EnrollmentRecord};
pub use variants::{EnrollmentRequest, EnrollmentStatus, EnrollmentUpdate};

/// Errors returned by the `dhis2` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum Dhis2Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`Dhis2Error`].
pub type Dhis2Result<T> = Result<T, Dhis2Error>;
