//! Completion log storage.
//!
//! # Invariants
//! - Listing preserves insertion order.
//! - Task names round-trip byte for byte.

use super::{parse_date, parse_uuid, RepoError, RepoResult};
use crate::model::cleaning_log::{CleaningLog, LogStatus};
use crate::schedule::CivilDate;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashSet;

const LOG_SELECT_SQL: &str = "SELECT
    uuid,
    log_date,
    task,
    photo_before,
    photo_after,
    note,
    status
FROM cleaning_logs";

/// Which logs to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    Day(CivilDate),
    /// Every day of the month `date` falls in.
    Month(CivilDate),
}

pub trait CleaningLogRepository {
    fn append_log(&self, log: &CleaningLog) -> RepoResult<()>;
    fn list_logs(&self, filter: LogFilter) -> RepoResult<Vec<CleaningLog>>;
    /// Distinct task names logged on `date`.
    fn completed_tasks(&self, date: CivilDate) -> RepoResult<HashSet<String>>;
}

pub struct SqliteCleaningLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCleaningLogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CleaningLogRepository for SqliteCleaningLogRepository<'_> {
    fn append_log(&self, log: &CleaningLog) -> RepoResult<()> {
        log.validate()?;

        self.conn.execute(
            "INSERT INTO cleaning_logs (
                uuid,
                log_date,
                task,
                photo_before,
                photo_after,
                note,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                log.uuid.to_string(),
                log.date.to_string(),
                log.task.as_str(),
                log.photo_before.as_str(),
                log.photo_after.as_str(),
                log.note.as_str(),
                log.status.as_str(),
            ],
        )?;

        debug!(
            "event=log_append module=repo status=ok log_id={} date={}",
            log.uuid, log.date
        );
        Ok(())
    }

    fn list_logs(&self, filter: LogFilter) -> RepoResult<Vec<CleaningLog>> {
        let mut sql = LOG_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();

        match filter {
            LogFilter::All => {}
            LogFilter::Day(date) => {
                sql.push_str(" WHERE log_date = ?");
                bind_values.push(Value::Text(date.to_string()));
            }
            LogFilter::Month(date) => {
                sql.push_str(" WHERE log_date LIKE ?");
                bind_values.push(Value::Text(format!("{}-%", date.month_key())));
            }
        }
        sql.push_str(" ORDER BY rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(parse_log_row(row)?);
        }
        Ok(logs)
    }

    fn completed_tasks(&self, date: CivilDate) -> RepoResult<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT task FROM cleaning_logs WHERE log_date = ?1;")?;
        let tasks = stmt
            .query_map([date.to_string()], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(tasks)
    }
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<CleaningLog> {
    let uuid_text: String = row.get("uuid")?;
    let date_text: String = row.get("log_date")?;
    let status_text: String = row.get("status")?;
    let status = LogStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in cleaning_logs.status"
        ))
    })?;

    let log = CleaningLog {
        uuid: parse_uuid("cleaning_logs.uuid", &uuid_text)?,
        date: parse_date("cleaning_logs.log_date", &date_text)?,
        task: row.get("task")?,
        photo_before: row.get("photo_before")?,
        photo_after: row.get("photo_after")?,
        note: row.get("note")?,
        status,
    };
    log.validate()?;
    Ok(log)
}
