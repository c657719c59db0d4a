//! Command handlers for the `dhis2` binary.
//!
//! Handlers return the text to print so they can be exercised without capturing stdout.

use anyhow::Context;
use chrono::NaiveDate;
use clap::ValueEnum;
use dhis2::{
    Attribute, Enrollment, EnrollmentBase, EnrollmentRecord, EnrollmentRequest, EnrollmentUpdate,
};
use std::fs::File;
use std::path::Path;

use crate::config::RunConfig;

/// Which enrollment payload a file holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    /// Shared fields only.
    Base,
    /// New enrollment request.
    #[default]
    Request,
    /// Update of an existing enrollment.
    Update,
}

/// Fields supplied to `build`.
#[derive(Clone, Debug, Default)]
pub struct BuildInput {
    pub tracked_entity_instance: Option<String>,
    pub program: String,
    pub org_unit: Option<String>,
    pub attributes: Vec<String>,
    pub followup: bool,
    pub enrollment_date: Option<String>,
    pub incident_date: Option<String>,
}

fn read_record<T: EnrollmentRecord>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let record = Enrollment::parse_reader(file)
        .with_context(|| format!("failed to read {} from {}", T::KIND, path.display()))?;
    Ok(record)
}

fn render_record<T: EnrollmentRecord>(record: &T, config: &RunConfig) -> anyhow::Result<String> {
    let rendered = if config.pretty_json() {
        Enrollment::render_pretty(record)?
    } else {
        Enrollment::render(record)?
    };
    Ok(rendered)
}

fn normalise_as<T: EnrollmentRecord>(path: &Path, config: &RunConfig) -> anyhow::Result<String> {
    let record: T = read_record(path)?;
    if record.base().program().is_none() {
        tracing::warn!(path = %path.display(), "{} has no program", T::KIND);
    }
    render_record(&record, config)
}

/// Re-render an enrollment file with null and unknown fields dropped.
pub fn normalise(path: &Path, kind: RecordKind, config: &RunConfig) -> anyhow::Result<String> {
    match kind {
        RecordKind::Base => normalise_as::<EnrollmentBase>(path, config),
        RecordKind::Request => normalise_as::<EnrollmentRequest>(path, config),
        RecordKind::Update => normalise_as::<EnrollmentUpdate>(path, config),
    }
}

/// Build a new enrollment request. `today` is used when no enrollment date is given.
pub fn build(input: BuildInput, today: NaiveDate, config: &RunConfig) -> anyhow::Result<String> {
    let attributes = input
        .attributes
        .iter()
        .map(|pair| Attribute::parse_pair(pair))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --attribute")?;
    let attributes = (!attributes.is_empty()).then_some(attributes);

    let base = EnrollmentBase::new(
        input.tracked_entity_instance,
        Some(input.program),
        attributes,
        input.followup,
    );

    let mut request = EnrollmentRequest::new(base);
    request.org_unit = input.org_unit;
    request.enrollment_date = Some(
        input
            .enrollment_date
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
    );
    request.incident_date = input.incident_date;

    tracing::info!(
        program = request.base.program().unwrap_or_default(),
        "built enrollment request"
    );
    render_record(&request, config)
}

fn compare_as<T: EnrollmentRecord>(left: &Path, right: &Path) -> anyhow::Result<bool> {
    let left: T = read_record(left)?;
    let right: T = read_record(right)?;
    Ok(left == right)
}

/// Whether two enrollment files hold equal records.
pub fn compare(left: &Path, right: &Path, kind: RecordKind) -> anyhow::Result<bool> {
    match kind {
        RecordKind::Base => compare_as::<EnrollmentBase>(left, right),
        RecordKind::Request => compare_as::<EnrollmentRequest>(left, right),
        RecordKind::Update => compare_as::<EnrollmentUpdate>(left, right),
    }
}
