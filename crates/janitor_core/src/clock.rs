//! Site-local wall clock.
//!
//! The school runs on a fixed UTC offset, so "today" for schedules and logs
//! is resolved here instead of from the host timezone.

use crate::config::{AppConfig, ConfigError};
use crate::schedule::CivilDate;
use chrono::{DateTime, FixedOffset, Utc};

const SECONDS_PER_HOUR: i32 = 3600;

/// Clock pinned to the site's fixed offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteClock {
    offset: FixedOffset,
    label: String,
}

impl SiteClock {
    /// Builds a clock for `utc_offset_hours`, labelled e.g. `WIB`.
    pub fn new(utc_offset_hours: i32, label: impl Into<String>) -> Result<Self, ConfigError> {
        let offset = utc_offset_hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::Invalid(format!("unsupported utc offset {utc_offset_hours}h"))
            })?;
        Ok(Self {
            offset,
            label: label.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::new(config.utc_offset_hours, config.timezone_label.clone())
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// Civil date at the site right now.
    pub fn today(&self) -> CivilDate {
        self.date_of(Utc::now())
    }

    /// Converts any instant to the site's civil date.
    pub fn date_of(&self, instant: DateTime<Utc>) -> CivilDate {
        CivilDate::from(instant.with_timezone(&self.offset).date_naive())
    }

    /// Dashboard header line, e.g. `Friday, 16 October 2026 | 14:05 WIB`.
    pub fn banner(&self, at: DateTime<FixedOffset>) -> String {
        format!("{} {}", at.format("%A, %d %B %Y | %H:%M"), self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::SiteClock;
    use crate::schedule::CivilDate;
    use chrono::{TimeZone, Utc};

    #[test]
    fn date_of_uses_site_offset_not_utc() {
        let clock = SiteClock::new(7, "WIB").unwrap();
        // 18:30 UTC on the 31st is already the 1st in UTC+7.
        let instant = Utc.with_ymd_and_hms(2026, 1, 31, 18, 30, 0).unwrap();
        assert_eq!(
            clock.date_of(instant),
            CivilDate::try_new(2026, 2, 1).unwrap()
        );
    }

    #[test]
    fn banner_formats_weekday_date_time_and_label() {
        let clock = SiteClock::new(7, "WIB").unwrap();
        let at = Utc
            .with_ymd_and_hms(2026, 10, 16, 7, 5, 0)
            .unwrap()
            .with_timezone(&clock.offset);
        assert_eq!(clock.banner(at), "Friday, 16 October 2026 | 14:05 WIB");
    }

    #[test]
    fn today_matches_date_of_now() {
        let clock = SiteClock::new(7, "WIB").unwrap();
        let before = clock.date_of(Utc::now());
        let today = clock.today();
        let after = clock.date_of(Utc::now());
        assert!(today == before || today == after);
    }

    #[test]
    fn new_rejects_offsets_chrono_cannot_represent() {
        assert!(SiteClock::new(30, "X").is_err());
    }
}
