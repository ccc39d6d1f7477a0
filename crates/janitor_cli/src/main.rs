//! `janitor` command-line front end.
//!
//! # Responsibility
//! - Expose worker and supervisor dashboard actions as subcommands.
//! - Load config, start logging and open storage before any command runs.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use janitor_core::db::open_db;
use janitor_core::photo::{save_log_photos, to_data_uri};
use janitor_core::service::export_service::{file_name, write_csv};
use janitor_core::{
    authenticate, compute_tasks, init_logging, AppConfig, ChecklistService, CivilDate,
    CompletionRequest, ExportPeriod, ExportService, Progress, ReportService, Session, SiteClock,
    SqliteCleaningLogRepository, SqliteReportRepository, Tier, RECENT_COMPLAINT_LIMIT,
};
use log::info;
use rusqlite::Connection;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// School cleaning schedule and evidence log.
#[derive(Parser)]
#[command(name = "janitor", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Login {
    #[arg(short, long)]
    user: String,
    #[arg(short, long)]
    password: String,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tasks due on a date (default: today).
    Tasks {
        #[arg(long)]
        date: Option<CivilDate>,
    },
    /// Show completed vs. scheduled tasks.
    Progress {
        #[command(flatten)]
        login: Login,
        #[arg(long)]
        date: Option<CivilDate>,
    },
    /// Supervisor view of today's tasks with their status.
    Board {
        #[command(flatten)]
        login: Login,
    },
    /// Record before/after photos for one of today's tasks.
    Complete {
        #[command(flatten)]
        login: Login,
        #[arg(long)]
        task: String,
        #[arg(long)]
        before: PathBuf,
        #[arg(long)]
        after: PathBuf,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Report damage found while cleaning.
    ReportDamage {
        #[command(flatten)]
        login: Login,
        #[arg(long)]
        area: String,
        #[arg(long)]
        issue: String,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Send an instruction about a dirty area.
    Complain {
        #[command(flatten)]
        login: Login,
        #[arg(long)]
        area: String,
        #[arg(long)]
        instructions: String,
    },
    /// Latest supervisor complaints.
    Complaints {
        #[command(flatten)]
        login: Login,
    },
    /// Damage reports filed by the worker.
    DamageReports {
        #[command(flatten)]
        login: Login,
    },
    /// Completed tasks logged on a date, with their photo evidence.
    History {
        #[command(flatten)]
        login: Login,
        #[arg(long)]
        date: Option<CivilDate>,
        /// Write each log's before/after JPEGs into this directory.
        #[arg(long)]
        photos_dir: Option<PathBuf>,
        /// Print the photos as `data:` URIs.
        #[arg(long)]
        inline: bool,
    },
    /// Export logs as CSV.
    Export {
        #[command(flatten)]
        login: Login,
        #[arg(long, default_value = "all")]
        period: ExportPeriod,
        /// Output file; defaults to the standard report name.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a default config file.
    InitConfig {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

struct App {
    config: AppConfig,
    clock: SiteClock,
    conn: Connection,
}

impl App {
    fn start(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => {
                let path = AppConfig::default_config_path();
                if path.exists() {
                    AppConfig::from_file(&path)
                        .with_context(|| format!("loading config {}", path.display()))?
                } else {
                    AppConfig::default()
                }
            }
        };

        let log_dir = config.log_dir.to_string_lossy().into_owned();
        init_logging(&config.log_level, &log_dir).map_err(anyhow::Error::msg)?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let conn = open_db(&config.database_path)
            .with_context(|| format!("opening {}", config.database_path.display()))?;
        let clock = SiteClock::from_config(&config)?;

        Ok(Self {
            config,
            clock,
            conn,
        })
    }

    fn login(&self, login: &Login) -> Result<Session> {
        Ok(authenticate(
            &self.config.accounts,
            &login.user,
            &login.password,
        )?)
    }

    fn checklist(&self) -> ChecklistService<SqliteCleaningLogRepository<'_>> {
        ChecklistService::new(SqliteCleaningLogRepository::new(&self.conn))
    }

    fn reports(&self) -> ReportService<SqliteReportRepository<'_>> {
        ReportService::new(SqliteReportRepository::new(&self.conn))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::InitConfig { path } = &cli.command {
        let path = path
            .clone()
            .or_else(|| cli.config.clone())
            .unwrap_or_else(AppConfig::default_config_path);
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        AppConfig::default().save_to_file(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let app = App::start(cli.config.as_deref())?;
    println!("{}", app.clock.banner(app.clock.now()));
    run(&app, cli.command)
}

fn run(app: &App, command: Command) -> Result<()> {
    let today = app.clock.today();

    match command {
        Command::Tasks { date } => {
            let date = date.unwrap_or(today);
            println!("Jadwal: {date}");
            let catalog = compute_tasks(date);
            for tier in Tier::ALL {
                println!("[{}]", tier.label());
                for task in catalog.tier(tier) {
                    println!("  - {task}");
                }
            }
        }
        Command::Progress { login, date } => {
            app.login(&login)?;
            let date = date.unwrap_or(today);
            let progress = app.checklist().progress(date, &compute_tasks(date))?;
            print_progress(date, &progress);
        }
        Command::Board { login } => {
            let session = app.login(&login)?;
            let catalog = compute_tasks(today);
            let board = app.checklist().task_board(&session, today, &catalog)?;
            let mut current = None;
            for line in board {
                if current != Some(line.tier) {
                    println!("[{}]", line.tier.label());
                    current = Some(line.tier);
                }
                let icon = if line.done { "done" } else { "pending" };
                println!("  {}. {} ({icon})", line.position, line.task);
            }
        }
        Command::Complete {
            login,
            task,
            before,
            after,
            note,
        } => {
            let mut session = app.login(&login)?;
            let catalog = compute_tasks(today);
            session.select_task(&catalog, &task)?;
            let request = CompletionRequest {
                photo_before: Some(read_photo(&before)?),
                photo_after: Some(read_photo(&after)?),
                note,
            };
            let log = app
                .checklist()
                .submit_completion(&mut session, today, &request)?;
            info!("event=cli_complete module=cli status=ok log_id={}", log.uuid);
            println!("saved: {} ({})", log.task, log.status.label());
        }
        Command::ReportDamage {
            login,
            area,
            issue,
            photo,
        } => {
            let session = app.login(&login)?;
            let photo = photo.as_deref().map(read_photo).transpose()?;
            let report =
                app.reports()
                    .report_damage(&session, today, &area, &issue, photo.as_deref())?;
            println!("report sent: {} ({})", report.area, report.kind.label());
        }
        Command::Complain {
            login,
            area,
            instructions,
        } => {
            let session = app.login(&login)?;
            let report = app
                .reports()
                .send_complaint(&session, today, &area, &instructions)?;
            println!("complaint sent: {}", report.area);
        }
        Command::Complaints { login } => {
            app.login(&login)?;
            let complaints = app.reports().recent_complaints(RECENT_COMPLAINT_LIMIT)?;
            if complaints.is_empty() {
                println!("no complaints yet");
            }
            for complaint in complaints {
                println!(
                    "{} | {}: {}",
                    complaint.date, complaint.area, complaint.issue
                );
            }
        }
        Command::DamageReports { login } => {
            let session = app.login(&login)?;
            let reports = app.reports().damage_reports(&session)?;
            if reports.is_empty() {
                println!("no damage reports");
            }
            for report in reports {
                let photo = if report.has_photo() { " [photo]" } else { "" };
                println!("{} | {}: {}{photo}", report.date, report.area, report.issue);
            }
        }
        Command::History {
            login,
            date,
            photos_dir,
            inline,
        } => {
            let session = app.login(&login)?;
            let date = date.unwrap_or(today);
            let logs = app.checklist().history(&session, date)?;
            if logs.is_empty() {
                println!("no activity on {date}");
            }
            for log in logs {
                println!("{} | {}", log.task, log.status.label());
                if !log.note.is_empty() {
                    println!("    note: {}", log.note);
                }
                if inline {
                    let sides = [("before", &log.photo_before), ("after", &log.photo_after)];
                    for (side, encoded) in sides {
                        if let Some(uri) = to_data_uri(encoded) {
                            println!("    {side}: {uri}");
                        }
                    }
                }
                if let Some(dir) = &photos_dir {
                    for path in save_log_photos(&log, dir)
                        .with_context(|| format!("writing photos to {}", dir.display()))?
                    {
                        println!("    photo: {}", path.display());
                    }
                }
            }
        }
        Command::Export { login, period, out } => {
            let session = app.login(&login)?;
            let service = ExportService::new(SqliteCleaningLogRepository::new(&app.conn));
            let rows = service.export_rows(&session, period, today)?;
            let out = out.unwrap_or_else(|| PathBuf::from(file_name(period)));
            let file =
                File::create(&out).with_context(|| format!("creating {}", out.display()))?;
            write_csv(&rows, BufWriter::new(file))?;
            println!("exported {} rows to {}", rows.len(), out.display());
        }
        Command::InitConfig { .. } => bail!("init-config does not need a running app"),
    }
    Ok(())
}

fn print_progress(date: CivilDate, progress: &Progress) {
    println!(
        "{date}: {} / {} tasks ({}%)",
        progress.done,
        progress.total,
        progress.percent()
    );
}

fn read_photo(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading photo {}", path.display()))
}
