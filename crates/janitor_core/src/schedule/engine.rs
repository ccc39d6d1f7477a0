//! Schedule rotation tables and the catalog computation.
//!
//! # Invariants
//! - Both rotation tables have exactly five entries, one per index 1-5.
//! - Week 5 deliberately repeats the week 4 list; short fifth weeks share
//!   the last full rotation.
//! - Out-of-range days or months never panic; their catalog is unspecified.

use super::catalog::TaskCatalog;
use super::date::CivilDate;

const DAILY_TASKS: &[&str] = &[
    "Sapu/Pel Kantor TU & Guru",
    "Cuci Gelas & Alat Minum",
    "Sapu Halaman Sekolah",
    "Buang Sampah Kelas",
    "Kamar Mandi Siswa & Guru",
];

const YEARLY_TASKS: &[&str] = &["Kuras Toren / Tandon Air"];

const WEEKLY_FRONT_OFFICE: &[&str] = &["Lap Kaca/Pintu: TU, Perpus, PPDB, Security"];
const WEEKLY_LABS: &[&str] = &["Lap Kaca: Lab Komputer, Lab Biologi"];
const WEEKLY_UPPER_GRADES: &[&str] = &["Lap Kaca/Pintu: Kelas XI, XII"];
const WEEKLY_GRADE_TEN: &[&str] = &["Lap Kaca/Pintu: Kelas X, UKS, IPM"];

/// Indexed by `week_index - 1`.
// Why: days 29-31 form a partial fifth week; the school repeats the grade-ten
// round rather than starting a new one it could not finish before month end.
const WEEKLY_ROTATION: [&[&str]; 5] = [
    WEEKLY_FRONT_OFFICE,
    WEEKLY_LABS,
    WEEKLY_UPPER_GRADES,
    WEEKLY_GRADE_TEN,
    WEEKLY_GRADE_TEN,
];

/// Indexed by `month_cycle - 1`.
const MONTHLY_ROTATION: [&[&str]; 5] = [
    &["Plafon/Laba-laba: TU, Perpus, PPDB, Gerbang, Security"],
    &[
        "Plafon: Lab Komp & Bio",
        "Cabut Rumput Liar",
        "Rapikan Taman",
    ],
    &["Plafon: Kelas XI & XII"],
    &["Plafon: Kelas X, UKS, IPM"],
    &["Kuras Kolam Ikan Depan & Belakang"],
];

/// 1-based 7-day bucket of the day of month: days 1-7 give 1, 29-31 give 5.
pub fn week_index(day: u32) -> u32 {
    day.saturating_sub(1) / 7 + 1
}

/// 1-based position of the month in the repeating five-month rotation.
pub fn month_cycle(month: u32) -> u32 {
    month.saturating_sub(1) % 5 + 1
}

/// Computes every task due on `date`.
///
/// Total over valid calendar dates and free of side effects; callers may
/// invoke it from any thread.
pub fn compute_tasks(date: CivilDate) -> TaskCatalog {
    TaskCatalog {
        daily: DAILY_TASKS,
        weekly: rotation_entry(&WEEKLY_ROTATION, week_index(date.day)),
        monthly: rotation_entry(&MONTHLY_ROTATION, month_cycle(date.month)),
        yearly: YEARLY_TASKS,
    }
}

// Indices past the table reuse its last entry.
fn rotation_entry(table: &[&'static [&'static str]; 5], index: u32) -> &'static [&'static str] {
    let slot = (index.max(1) as usize - 1).min(table.len() - 1);
    table[slot]
}

#[cfg(test)]
mod tests {
    use super::{month_cycle, rotation_entry, week_index, MONTHLY_ROTATION, WEEKLY_ROTATION};

    #[test]
    fn week_index_buckets_by_seven_days() {
        assert_eq!(week_index(1), 1);
        assert_eq!(week_index(7), 1);
        assert_eq!(week_index(8), 2);
        assert_eq!(week_index(21), 3);
        assert_eq!(week_index(22), 4);
        assert_eq!(week_index(29), 5);
        assert_eq!(week_index(31), 5);
    }

    #[test]
    fn month_cycle_wraps_every_five_months() {
        assert_eq!(month_cycle(1), 1);
        assert_eq!(month_cycle(5), 5);
        assert_eq!(month_cycle(6), 1);
        assert_eq!(month_cycle(10), 5);
        assert_eq!(month_cycle(12), 2);
    }

    #[test]
    fn rotation_tables_have_no_empty_entries() {
        assert!(WEEKLY_ROTATION.iter().all(|entry| !entry.is_empty()));
        assert!(MONTHLY_ROTATION.iter().all(|entry| !entry.is_empty()));
    }

    #[test]
    fn out_of_range_indices_do_not_panic() {
        assert_eq!(week_index(0), 1);
        assert_eq!(month_cycle(0), 1);
        assert_eq!(rotation_entry(&WEEKLY_ROTATION, 0), WEEKLY_ROTATION[0]);
        assert_eq!(rotation_entry(&WEEKLY_ROTATION, 9), WEEKLY_ROTATION[4]);
    }
}
