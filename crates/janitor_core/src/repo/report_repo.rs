//! Report storage for damage findings and complaints.

use super::{parse_date, parse_uuid, RepoError, RepoResult};
use crate::model::report::{Report, ReportKind};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const REPORT_SELECT_SQL: &str = "SELECT
    uuid,
    report_date,
    area,
    issue,
    photo,
    kind
FROM cleaning_reports";

/// Report listing options. Results follow insertion order unless
/// `newest_first` is set; `limit` applies after ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportQuery {
    pub kind: Option<ReportKind>,
    pub limit: Option<u32>,
    pub newest_first: bool,
}

pub trait ReportRepository {
    fn append_report(&self, report: &Report) -> RepoResult<()>;
    fn list_reports(&self, query: &ReportQuery) -> RepoResult<Vec<Report>>;
}

pub struct SqliteReportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn append_report(&self, report: &Report) -> RepoResult<()> {
        report.validate()?;

        self.conn.execute(
            "INSERT INTO cleaning_reports (
                uuid,
                report_date,
                area,
                issue,
                photo,
                kind
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                report.uuid.to_string(),
                report.date.to_string(),
                report.area.as_str(),
                report.issue.as_str(),
                report.photo.as_str(),
                report.kind.as_str(),
            ],
        )?;

        debug!(
            "event=report_append module=repo status=ok report_id={} kind={}",
            report.uuid,
            report.kind.as_str()
        );
        Ok(())
    }

    fn list_reports(&self, query: &ReportQuery) -> RepoResult<Vec<Report>> {
        let mut sql = REPORT_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(kind) = query.kind {
            sql.push_str(" WHERE kind = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }
        sql.push_str(if query.newest_first {
            " ORDER BY rowid DESC"
        } else {
            " ORDER BY rowid ASC"
        });
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut reports = Vec::new();
        while let Some(row) = rows.next()? {
            reports.push(parse_report_row(row)?);
        }
        Ok(reports)
    }
}

fn parse_report_row(row: &Row<'_>) -> RepoResult<Report> {
    let uuid_text: String = row.get("uuid")?;
    let date_text: String = row.get("report_date")?;
    let kind_text: String = row.get("kind")?;
    let kind = ReportKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid kind `{kind_text}` in cleaning_reports.kind"
        ))
    })?;

    let report = Report {
        uuid: parse_uuid("cleaning_reports.uuid", &uuid_text)?,
        date: parse_date("cleaning_reports.report_date", &date_text)?,
        area: row.get("area")?,
        issue: row.get("issue")?,
        photo: row.get("photo")?,
        kind,
    };
    report.validate()?;
    Ok(report)
}
