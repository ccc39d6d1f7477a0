//! Persisted domain records.
//!
//! # Responsibility
//! - Define the completion-log and report rows kept by storage.
//! - Validate record invariants before any write.
//!
//! # Invariants
//! - Every record has a stable, non-nil `uuid`.
//! - Records are append-only; nothing here models update or delete.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cleaning_log;
pub mod report;

/// Record invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NilUuid,
    /// A required text field is empty or whitespace only.
    BlankField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "uuid must not be nil"),
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::BlankField(field))
    } else {
        Ok(())
    }
}
