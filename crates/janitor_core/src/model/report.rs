//! Damage findings and supervisor complaints.
//!
//! Both share one table and are told apart by `ReportKind`.

use super::{require_text, ValidationError};
use crate::schedule::CivilDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ReportId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Damage or problem spotted by the worker.
    WorkerFinding,
    /// Instruction from the supervisor about a dirty area.
    SupervisorComplaint,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WorkerFinding => "worker_finding",
            Self::SupervisorComplaint => "supervisor_complaint",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WorkerFinding => "Temuan Pelaksana",
            Self::SupervisorComplaint => "Komplain Pengawas",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "worker_finding" => Some(Self::WorkerFinding),
            "supervisor_complaint" => Some(Self::SupervisorComplaint),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub uuid: ReportId,
    pub date: CivilDate,
    pub area: String,
    pub issue: String,
    /// Base64 JPEG, empty when no photo was attached.
    pub photo: String,
    pub kind: ReportKind,
}

impl Report {
    pub fn new(
        kind: ReportKind,
        date: CivilDate,
        area: impl Into<String>,
        issue: impl Into<String>,
        photo: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            date,
            area: area.into(),
            issue: issue.into(),
            photo: photo.into(),
            kind,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        require_text("area", &self.area)?;
        require_text("issue", &self.issue)?;
        Ok(())
    }

    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty()
    }
}
