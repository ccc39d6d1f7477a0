//! Supervisor export of completion logs as CSV.
//!
//! Photo columns are dropped so the file stays small enough to mail around.

use crate::auth::{AccessDenied, Role, Session};
use crate::repo::log_repo::{CleaningLogRepository, LogFilter};
use crate::repo::RepoError;
use crate::schedule::CivilDate;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::str::FromStr;

const CSV_HEADER: [&str; 4] = ["tanggal", "tugas", "keterangan", "status"];

#[derive(Debug)]
pub enum ExportError {
    Access(AccessDenied),
    Repo(RepoError),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "export write failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<AccessDenied> for ExportError {
    fn from(value: AccessDenied) -> Self {
        Self::Access(value)
    }
}

impl From<RepoError> for ExportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Time window of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPeriod {
    All,
    Today,
    ThisMonth,
}

impl ExportPeriod {
    /// Fragment used in the download file name.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Semua_Data",
            Self::Today => "Harian",
            Self::ThisMonth => "Bulanan",
        }
    }

    fn filter(self, today: CivilDate) -> LogFilter {
        match self {
            Self::All => LogFilter::All,
            Self::Today => LogFilter::Day(today),
            Self::ThisMonth => LogFilter::Month(today),
        }
    }
}

impl FromStr for ExportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" | "day" => Ok(Self::Today),
            "month" | "this_month" => Ok(Self::ThisMonth),
            other => Err(format!(
                "unknown export period `{other}`; expected all|today|month"
            )),
        }
    }
}

/// One exported log row, photos excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub date: CivilDate,
    pub task: String,
    pub note: String,
    pub status: &'static str,
}

pub struct ExportService<R: CleaningLogRepository> {
    repo: R,
}

impl<R: CleaningLogRepository> ExportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Rows for `period`, relative to the site's `today`.
    pub fn export_rows(
        &self,
        session: &Session,
        period: ExportPeriod,
        today: CivilDate,
    ) -> Result<Vec<ExportRow>, ExportError> {
        session.require(Role::Supervisor, "export work logs")?;
        let rows: Vec<ExportRow> = self
            .repo
            .list_logs(period.filter(today))?
            .into_iter()
            .map(|log| ExportRow {
                date: log.date,
                task: log.task,
                note: log.note,
                status: log.status.label(),
            })
            .collect();

        info!(
            "event=export module=service status=ok period={} rows={}",
            period.label(),
            rows.len()
        );
        Ok(rows)
    }
}

/// `Laporan_Kebersihan_<period>.csv`.
pub fn file_name(period: ExportPeriod) -> String {
    format!("Laporan_Kebersihan_{}.csv", period.label())
}

/// Writes `rows` as RFC 4180 CSV with a header line.
pub fn write_csv<W: Write>(rows: &[ExportRow], mut writer: W) -> Result<(), ExportError> {
    write_record(&mut writer, CSV_HEADER)?;
    for row in rows {
        let date = row.date.to_string();
        write_record(
            &mut writer,
            [date.as_str(), row.task.as_str(), row.note.as_str(), row.status],
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, fields: [&str; 4]) -> std::io::Result<()> {
    let line = fields.map(csv_field).join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")
}

// Leading characters that spreadsheet tools evaluate as a formula.
const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

fn csv_field(value: &str) -> String {
    let value = if value.starts_with(FORMULA_TRIGGERS) {
        format!("'{value}")
    } else {
        value.to_string()
    };
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{csv_field, file_name, ExportPeriod};

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("Sapu Halaman Sekolah"), "Sapu Halaman Sekolah");
        assert_eq!(
            csv_field("Lap Kaca/Pintu: TU, Perpus"),
            "\"Lap Kaca/Pintu: TU, Perpus\""
        );
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(csv_field("=HYPERLINK(\"x\")"), "\"'=HYPERLINK(\"\"x\"\")\"");
        assert_eq!(csv_field("+62 811"), "'+62 811");
        assert_eq!(csv_field("-"), "'-");
        assert_eq!(csv_field("@rak"), "'@rak");
        assert_eq!(csv_field("2026-10-16"), "2026-10-16");
    }

    #[test]
    fn period_parses_and_names_file() {
        assert_eq!("Month".parse::<ExportPeriod>().unwrap(), ExportPeriod::ThisMonth);
        assert!("weekly".parse::<ExportPeriod>().is_err());
        assert_eq!(file_name(ExportPeriod::All), "Laporan_Kebersihan_Semua_Data.csv");
    }
}
