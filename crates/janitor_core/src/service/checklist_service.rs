//! Daily checklist: progress, task board and photo-backed completions.
//!
//! # Invariants
//! - Progress joins catalog names to logged names by exact string equality.
//! - A completion is stored only with both photos and an active task.
//! - The active task is cleared only after the log is persisted.
//!
//! # See also
//! - `photo::save_log_photos` to materialize the evidence `history` returns.

use crate::auth::{AccessDenied, Role, Session};
use crate::model::cleaning_log::CleaningLog;
use crate::photo::{compress_photo, PhotoError};
use crate::repo::log_repo::{CleaningLogRepository, LogFilter};
use crate::repo::{RepoError, RepoResult};
use crate::schedule::{CivilDate, TaskCatalog, Tier};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ChecklistError {
    Access(AccessDenied),
    /// No task was selected before submitting evidence.
    NoActiveTask,
    /// Before and after photos are both mandatory.
    MissingPhotos,
    Photo(PhotoError),
    Repo(RepoError),
}

impl Display for ChecklistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access(err) => write!(f, "{err}"),
            Self::NoActiveTask => write!(f, "select a task before submitting evidence"),
            Self::MissingPhotos => write!(f, "both before and after photos are required"),
            Self::Photo(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChecklistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::Photo(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NoActiveTask | Self::MissingPhotos => None,
        }
    }
}

impl From<AccessDenied> for ChecklistError {
    fn from(value: AccessDenied) -> Self {
        Self::Access(value)
    }
}

impl From<PhotoError> for ChecklistError {
    fn from(value: PhotoError) -> Self {
        Self::Photo(value)
    }
}

impl From<RepoError> for ChecklistError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Completed vs. scheduled task counts for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Completion ratio capped at 1.0; zero when nothing is scheduled.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.done as f64 / self.total as f64).min(1.0)
    }

    /// Whole percent, rounded down.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).floor() as u32
    }
}

/// One numbered row of the supervisor's task board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine {
    pub tier: Tier,
    /// 1-based position within the tier.
    pub position: usize,
    pub task: &'static str,
    pub done: bool,
}

/// Raw evidence for the session's active task.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub photo_before: Option<Vec<u8>>,
    pub photo_after: Option<Vec<u8>>,
    pub note: String,
}

pub struct ChecklistService<R: CleaningLogRepository> {
    repo: R,
}

impl<R: CleaningLogRepository> ChecklistService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Counts catalog tasks that have at least one log on `date`.
    pub fn progress(&self, date: CivilDate, catalog: &TaskCatalog) -> RepoResult<Progress> {
        let completed = self.repo.completed_tasks(date)?;
        // Why: a task re-submitted twice, or a log for a task no longer in the
        // catalog, must not push progress past the scheduled total.
        let done = catalog
            .iter()
            .filter(|(_, task)| completed.contains(*task))
            .count();
        Ok(Progress {
            done,
            total: catalog.total(),
        })
    }

    /// Lists every scheduled task with its completion state.
    pub fn task_board(
        &self,
        session: &Session,
        date: CivilDate,
        catalog: &TaskCatalog,
    ) -> Result<Vec<TaskLine>, ChecklistError> {
        session.require(Role::Supervisor, "view the task board")?;
        let completed = self.repo.completed_tasks(date)?;

        let mut lines = Vec::with_capacity(catalog.total());
        for tier in Tier::ALL {
            for (index, task) in catalog.tier(tier).iter().enumerate() {
                lines.push(TaskLine {
                    tier,
                    position: index + 1,
                    task: *task,
                    done: completed.contains(*task),
                });
            }
        }
        Ok(lines)
    }

    /// Stores evidence for the session's active task and clears it.
    ///
    /// # Errors
    /// - `Access` unless the session is a worker.
    /// - `NoActiveTask` when no task was selected.
    /// - `MissingPhotos` when either photo is absent or empty.
    /// - `Photo` when a photo cannot be decoded.
    pub fn submit_completion(
        &self,
        session: &mut Session,
        date: CivilDate,
        request: &CompletionRequest,
    ) -> Result<CleaningLog, ChecklistError> {
        session.require(Role::Worker, "submit task evidence")?;
        let task = session
            .active_task()
            .ok_or(ChecklistError::NoActiveTask)?
            .to_string();

        let (before, after) = match (&request.photo_before, &request.photo_after) {
            (Some(before), Some(after)) if !before.is_empty() && !after.is_empty() => {
                (before, after)
            }
            _ => return Err(ChecklistError::MissingPhotos),
        };

        let log = CleaningLog::done(
            date,
            task,
            compress_photo(before)?,
            compress_photo(after)?,
            request.note.clone(),
        );
        self.repo.append_log(&log)?;
        session.clear_active_task();

        info!(
            "event=task_completed module=service status=ok log_id={} date={}",
            log.uuid, log.date
        );
        Ok(log)
    }

    /// Logs recorded on `date`, oldest first.
    pub fn history(
        &self,
        session: &Session,
        date: CivilDate,
    ) -> Result<Vec<CleaningLog>, ChecklistError> {
        session.require(Role::Supervisor, "browse photo history")?;
        Ok(self.repo.list_logs(LogFilter::Day(date))?)
    }
}
