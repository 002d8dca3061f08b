//! Opt-in preflight checks for batch input rows.
//!
//! The client never runs these on its own; uploads go out exactly as given.
//! Callers who want to catch problems before spending a round trip can run
//! [`validate_input_rows`] first and inspect the report.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::batch::{InputRow, MAX_BATCH_ROWS};

/// Options for validation behavior.
#[derive(Clone, Debug)]
pub struct ValidateOptions {
    /// Largest batch accepted without an error.
    pub max_rows: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            max_rows: MAX_BATCH_ROWS,
        }
    }
}

/// Validates a batch of input rows and returns every issue found.
///
/// Checks:
/// - batch size against `opts.max_rows`
/// - non-empty id and address on every row
/// - id uniqueness (warning only: the service answers duplicates, but the
///   results cannot be matched back to their inputs)
pub fn validate_input_rows(rows: &[InputRow], opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::default();

    if rows.len() > opts.max_rows {
        report.push(
            IssueCode::BatchTooLarge,
            IssueContext::Batch,
            format!("{} rows exceed the limit of {} per upload", rows.len(), opts.max_rows),
        );
    }

    let mut seen_ids: HashMap<&str, usize> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        let context = || IssueContext::Row {
            index,
            id: row.id.clone(),
        };

        if row.id.trim().is_empty() {
            report.push(IssueCode::EmptyId, context(), "empty row id");
        } else if let Some(first) = seen_ids.get(row.id.as_str()) {
            report.push(
                IssueCode::DuplicateId,
                context(),
                format!("id already used by row {first}"),
            );
        } else {
            seen_ids.insert(&row.id, index);
        }

        if row.address.trim().is_empty() {
            report.push(IssueCode::EmptyAddress, context(), "empty street address");
        }
    }

    report
}
