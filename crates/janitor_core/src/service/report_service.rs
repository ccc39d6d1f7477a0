//! Damage findings from the worker and complaints from the supervisor.

use crate::auth::{AccessDenied, Role, Session};
use crate::model::report::{Report, ReportKind};
use crate::photo::{compress_photo, PhotoError};
use crate::repo::report_repo::{ReportQuery, ReportRepository};
use crate::repo::{RepoError, RepoResult};
use crate::schedule::CivilDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Complaints shown on the worker dashboard.
pub const RECENT_COMPLAINT_LIMIT: u32 = 5;

#[derive(Debug)]
pub enum ReportServiceError {
    Access(AccessDenied),
    Photo(PhotoError),
    Repo(RepoError),
}

impl Display for ReportServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access(err) => write!(f, "{err}"),
            Self::Photo(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReportServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::Photo(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<AccessDenied> for ReportServiceError {
    fn from(value: AccessDenied) -> Self {
        Self::Access(value)
    }
}

impl From<PhotoError> for ReportServiceError {
    fn from(value: PhotoError) -> Self {
        Self::Photo(value)
    }
}

impl From<RepoError> for ReportServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct ReportService<R: ReportRepository> {
    repo: R,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Files a worker finding; `photo` is optional raw image bytes.
    pub fn report_damage(
        &self,
        session: &Session,
        date: CivilDate,
        area: &str,
        issue: &str,
        photo: Option<&[u8]>,
    ) -> Result<Report, ReportServiceError> {
        session.require(Role::Worker, "report damage")?;
        let photo = match photo {
            Some(raw) => compress_photo(raw)?,
            None => String::new(),
        };
        self.store(Report::new(
            ReportKind::WorkerFinding,
            date,
            area.trim(),
            issue.trim(),
            photo,
        ))
    }

    /// Sends an instruction about a dirty area to the worker dashboard.
    pub fn send_complaint(
        &self,
        session: &Session,
        date: CivilDate,
        area: &str,
        instructions: &str,
    ) -> Result<Report, ReportServiceError> {
        session.require(Role::Supervisor, "send complaints")?;
        self.store(Report::new(
            ReportKind::SupervisorComplaint,
            date,
            area.trim(),
            instructions.trim(),
            "",
        ))
    }

    /// Newest complaints first, at most `limit`.
    pub fn recent_complaints(&self, limit: u32) -> RepoResult<Vec<Report>> {
        self.repo.list_reports(&ReportQuery {
            kind: Some(ReportKind::SupervisorComplaint),
            limit: Some(limit),
            newest_first: true,
        })
    }

    /// Every worker finding, oldest first.
    pub fn damage_reports(&self, session: &Session) -> Result<Vec<Report>, ReportServiceError> {
        session.require(Role::Supervisor, "review damage reports")?;
        Ok(self.repo.list_reports(&ReportQuery {
            kind: Some(ReportKind::WorkerFinding),
            limit: None,
            newest_first: false,
        })?)
    }

    fn store(&self, report: Report) -> Result<Report, ReportServiceError> {
        self.repo.append_report(&report)?;
        info!(
            "event=report_filed module=service status=ok report_id={} kind={} has_photo={}",
            report.uuid,
            report.kind.as_str(),
            report.has_photo()
        );
        Ok(report)
    }
}
