use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbImage};
use janitor_core::db::open_db_in_memory;
use janitor_core::photo::{save_log_photos, to_data_uri};
use janitor_core::{
    compute_tasks, ChecklistError, ChecklistService, CivilDate, CleaningLog,
    CleaningLogRepository, CompletionRequest, Progress, Role, Session,
    SqliteCleaningLogRepository, Tier,
};
use std::io::Cursor;

fn today() -> CivilDate {
    CivilDate::try_new(2026, 10, 16).unwrap()
}

fn camera_shot(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, image::Rgb([40, 160, 90]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn evidence(note: &str) -> CompletionRequest {
    CompletionRequest {
        photo_before: Some(camera_shot(800, 600)),
        photo_after: Some(camera_shot(800, 600)),
        note: note.to_string(),
    }
}

fn worker() -> Session {
    Session::new("hanto", Role::Worker)
}

fn supervisor() -> Session {
    Session::new("pengawas", Role::Supervisor)
}

#[test]
fn progress_starts_at_zero_for_full_catalog() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let catalog = compute_tasks(today());

    let progress = service.progress(today(), &catalog).unwrap();
    assert_eq!(progress, Progress { done: 0, total: 8 });
    assert_eq!(progress.percent(), 0);
}

#[test]
fn submitting_evidence_stores_compressed_photos_and_clears_selection() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let catalog = compute_tasks(today());
    let mut session = worker();

    session.select_task(&catalog, "Sapu Halaman Sekolah").unwrap();
    let log = service
        .submit_completion(&mut session, today(), &evidence("Daun banyak"))
        .unwrap();

    assert_eq!(session.active_task(), None);
    assert_eq!(log.task, "Sapu Halaman Sekolah");
    assert_eq!(log.note, "Daun banyak");

    let jpeg = B64.decode(&log.photo_after).unwrap();
    let image = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((image.width(), image.height()), (500, 375));

    let progress = service.progress(today(), &catalog).unwrap();
    assert_eq!(progress.done, 1);
    assert_eq!(progress.percent(), 12);
}

#[test]
fn submission_without_both_photos_is_rejected_and_keeps_selection() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let catalog = compute_tasks(today());
    let mut session = worker();
    session.select_task(&catalog, "Buang Sampah Kelas").unwrap();

    let request = CompletionRequest {
        photo_before: Some(camera_shot(10, 10)),
        photo_after: None,
        note: String::new(),
    };
    let err = service
        .submit_completion(&mut session, today(), &request)
        .unwrap_err();
    assert!(matches!(err, ChecklistError::MissingPhotos));
    assert_eq!(session.active_task(), Some("Buang Sampah Kelas"));

    let request = CompletionRequest {
        photo_before: Some(Vec::new()),
        photo_after: Some(camera_shot(10, 10)),
        note: String::new(),
    };
    assert!(matches!(
        service.submit_completion(&mut session, today(), &request),
        Err(ChecklistError::MissingPhotos)
    ));
}

#[test]
fn submission_requires_a_selected_task() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let mut session = worker();

    let err = service
        .submit_completion(&mut session, today(), &evidence(""))
        .unwrap_err();
    assert!(matches!(err, ChecklistError::NoActiveTask));
}

#[test]
fn supervisor_cannot_submit_evidence() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let mut session = supervisor();

    let err = service
        .submit_completion(&mut session, today(), &evidence(""))
        .unwrap_err();
    assert!(matches!(err, ChecklistError::Access(_)));
}

#[test]
fn progress_ignores_duplicates_and_unscheduled_logs() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCleaningLogRepository::new(&conn);
    for task in [
        "Sapu Halaman Sekolah",
        "Sapu Halaman Sekolah",
        "Kuras Kolam Ikan Depan & Belakang",
        "SAPU HALAMAN SEKOLAH",
    ] {
        repo.append_log(&CleaningLog::done(today(), task, "b", "a", ""))
            .unwrap();
    }

    // October is cycle 5, so pond draining is scheduled today.
    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let progress = service.progress(today(), &compute_tasks(today())).unwrap();
    assert_eq!(progress.done, 2);

    // In February the pond log no longer matches anything.
    let february = CivilDate::try_new(2026, 2, 10).unwrap();
    let progress = service.progress(today(), &compute_tasks(february)).unwrap();
    assert_eq!(progress.done, 1);
}

#[test]
fn progress_ratio_caps_and_handles_empty_totals() {
    assert_eq!(Progress { done: 0, total: 0 }.ratio(), 0.0);
    assert_eq!(Progress { done: 9, total: 8 }.ratio(), 1.0);
    assert_eq!(Progress { done: 2, total: 3 }.percent(), 66);
}

#[test]
fn task_board_numbers_tasks_per_tier_and_marks_done() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCleaningLogRepository::new(&conn);
    repo.append_log(&CleaningLog::done(
        today(),
        "Kuras Toren / Tandon Air",
        "b",
        "a",
        "",
    ))
    .unwrap();

    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let catalog = compute_tasks(today());
    let board = service.task_board(&supervisor(), today(), &catalog).unwrap();

    assert_eq!(board.len(), catalog.total());
    assert_eq!(board[0].tier, Tier::Daily);
    assert_eq!(board[0].position, 1);
    assert_eq!(board[4].position, 5);
    assert_eq!(board[5].tier, Tier::Weekly);
    assert_eq!(board[5].position, 1);

    let yearly = board.last().unwrap();
    assert_eq!(yearly.tier, Tier::Yearly);
    assert!(yearly.done);
    assert_eq!(board.iter().filter(|line| line.done).count(), 1);
}

#[test]
fn history_is_supervisor_only_and_scoped_to_the_day() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCleaningLogRepository::new(&conn);
    let yesterday = CivilDate::try_new(2026, 10, 15).unwrap();
    repo.append_log(&CleaningLog::done(today(), "Rapikan Taman", "b", "a", ""))
        .unwrap();
    repo.append_log(&CleaningLog::done(yesterday, "Rapikan Taman", "b", "a", ""))
        .unwrap();

    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    assert_eq!(service.history(&supervisor(), today()).unwrap().len(), 1);
    assert!(matches!(
        service.history(&worker(), today()),
        Err(ChecklistError::Access(_))
    ));
}

#[test]
fn history_evidence_reads_back_as_jpeg_files() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteCleaningLogRepository::new(&conn));
    let catalog = compute_tasks(today());
    let mut session = worker();
    session.select_task(&catalog, "Sapu Halaman Sekolah").unwrap();
    let stored = service
        .submit_completion(&mut session, today(), &evidence("bersih"))
        .unwrap();

    let logs = service.history(&supervisor(), today()).unwrap();
    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert!(to_data_uri(&log.photo_before)
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));

    let dir = tempfile::tempdir().unwrap();
    let written = save_log_photos(log, dir.path()).unwrap();
    assert_eq!(
        written,
        vec![
            dir.path().join(format!("{}_before.jpg", stored.uuid)),
            dir.path().join(format!("{}_after.jpg", stored.uuid)),
        ]
    );
    for path in &written {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let photo = image::load_from_memory(&bytes).unwrap();
        assert_eq!((photo.width(), photo.height()), (500, 375));
    }
}

#[test]
fn saving_photos_skips_empty_columns() {
    let log = CleaningLog::done(today(), "Rapikan Taman", "", "", "");
    let dir = tempfile::tempdir().unwrap();
    assert!(save_log_photos(&log, dir.path()).unwrap().is_empty());
}
