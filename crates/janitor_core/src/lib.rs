//! Core of the school janitorial dashboard.
//! Schedule rotation, evidence logs, reports and role rules live here;
//! front ends only render what this crate returns.

pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod photo;
pub mod repo;
pub mod schedule;
pub mod service;

pub use auth::{authenticate, AccessDenied, AuthError, Role, Session, SessionError};
pub use clock::SiteClock;
pub use config::{AccountConfig, AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::cleaning_log::{CleaningLog, LogStatus};
pub use model::report::{Report, ReportKind};
pub use model::ValidationError;
pub use repo::log_repo::{CleaningLogRepository, LogFilter, SqliteCleaningLogRepository};
pub use repo::report_repo::{ReportQuery, ReportRepository, SqliteReportRepository};
pub use repo::{RepoError, RepoResult};
pub use schedule::{compute_tasks, CivilDate, TaskCatalog, Tier};
pub use service::checklist_service::{
    ChecklistError, ChecklistService, CompletionRequest, Progress, TaskLine,
};
pub use service::export_service::{ExportError, ExportPeriod, ExportRow, ExportService};
pub use service::report_service::{ReportService, ReportServiceError, RECENT_COMPLAINT_LIMIT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
