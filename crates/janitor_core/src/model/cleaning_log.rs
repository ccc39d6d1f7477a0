//! Task completion log.
//!
//! # Invariants
//! - `task` is stored verbatim; it joins against catalog names exactly.
//! - Both evidence photos are present on every log.

use super::{require_text, ValidationError};
use crate::schedule::CivilDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type LogId = Uuid;

/// Outcome recorded for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Done,
}

impl LogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Done => "Selesai",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// One documented task completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningLog {
    pub uuid: LogId,
    pub date: CivilDate,
    pub task: String,
    /// Base64 JPEG taken before cleaning.
    pub photo_before: String,
    /// Base64 JPEG taken after cleaning.
    pub photo_after: String,
    /// Worker remarks or obstacles; may be empty.
    pub note: String,
    pub status: LogStatus,
}

impl CleaningLog {
    /// Creates a `Done` log with a fresh id.
    pub fn done(
        date: CivilDate,
        task: impl Into<String>,
        photo_before: impl Into<String>,
        photo_after: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            date,
            task: task.into(),
            photo_before: photo_before.into(),
            photo_after: photo_after.into(),
            note: note.into(),
            status: LogStatus::Done,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        require_text("task", &self.task)?;
        require_text("photo_before", &self.photo_before)?;
        require_text("photo_after", &self.photo_after)?;
        Ok(())
    }
}
