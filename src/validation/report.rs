//! Preflight findings for a batch of input rows.

use std::collections::BTreeSet;
use std::fmt;

/// Every problem found in a batch, in row order.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub(crate) fn push(
        &mut self,
        code: IssueCode,
        context: IssueContext,
        message: impl Into<String>,
    ) {
        self.issues.push(ValidationIssue {
            code,
            context,
            message: message.into(),
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }

    /// True when the service would take the batch as is.
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Positions of rows carrying at least one error, for dropping them
    /// before upload.
    pub fn rows_with_errors(&self) -> BTreeSet<usize> {
        self.errors()
            .filter_map(|i| match &i.context {
                IssueContext::Row { index, .. } => Some(*index),
                IssueContext::Batch => None,
            })
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "batch preflight: {} error(s), {} warning(s)",
            self.errors().count(),
            self.warnings().count()
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

/// One finding. Severity follows from the code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub context: IssueContext,
    pub message: String,
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity().as_str(),
            self.code.as_str(),
            self.context,
            self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Accepted by the service, but results may not map back to inputs.
    Warning,
    /// Rejected by the service, or answered with a useless result.
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// More rows than one upload may carry.
    BatchTooLarge,
    EmptyId,
    EmptyAddress,
    /// Output rows are keyed by id, so duplicates cannot be told apart.
    DuplicateId,
}

impl IssueCode {
    pub fn severity(self) -> Severity {
        match self {
            IssueCode::DuplicateId => Severity::Warning,
            IssueCode::BatchTooLarge | IssueCode::EmptyId | IssueCode::EmptyAddress => {
                Severity::Error
            }
        }
    }

    /// Stable identifier for logs and machine consumers.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::BatchTooLarge => "batch_too_large",
            IssueCode::EmptyId => "empty_id",
            IssueCode::EmptyAddress => "empty_address",
            IssueCode::DuplicateId => "duplicate_id",
        }
    }
}

/// Where a finding applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueContext {
    Batch,
    /// 0-based position in the submitted slice, and that row's id.
    Row { index: usize, id: String },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Batch => f.write_str("batch"),
            IssueContext::Row { index, id } => write!(f, "row {index} (id {id:?})"),
        }
    }
}
