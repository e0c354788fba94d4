use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Timezone used to derive business dates. GastoSmart serves Colombian users.
pub const DEFAULT_BUSINESS_TZ: Tz = chrono_tz::America::Bogota;

/// Wall-clock time of a UTC instant in the given timezone, without offset.
pub fn business_time_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// Source of "now" for date defaults and future-date validation.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in the business timezone, without offset.
    fn now(&self) -> NaiveDateTime;

    /// Current business date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system time, reported in America/Bogota.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        business_time_from_utc(Utc::now(), DEFAULT_BUSINESS_TZ)
    }
}

/// Clock pinned to a fixed instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(date: NaiveDate) -> Self {
        FixedClock(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the given month, or `None` for an invalid year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some((next - first).num_days() as u32)
}

/// The `count` month starts ending with the month of `end`, oldest first.
pub fn trailing_month_starts(end: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let last = month_start(end);
    (0..count)
        .rev()
        .filter_map(|offset| last.checked_sub_months(Months::new(offset)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_month_starts_crosses_year_boundary() {
        let months = trailing_month_starts(date(2025, 2, 17), 4);
        assert_eq!(
            months,
            vec![date(2024, 11, 1), date(2024, 12, 1), date(2025, 1, 1), date(2025, 2, 1)]
        );
    }

    #[test]
    fn test_trailing_month_starts_zero_is_empty() {
        assert!(trailing_month_starts(date(2025, 2, 17), 0).is_empty());
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn test_business_date_uses_bogota_offset() {
        // 03:00 UTC is still the previous evening in Bogota (UTC-5).
        let instant = date(2025, 3, 10)
            .and_hms_opt(3, 0, 0)
            .unwrap()
            .and_utc();
        let local = business_time_from_utc(instant, DEFAULT_BUSINESS_TZ);
        assert_eq!(local.date(), date(2025, 3, 9));
        assert_eq!(local.time().format("%H:%M").to_string(), "22:00");
    }

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::at(date(2025, 6, 1));
        assert_eq!(clock.today(), date(2025, 6, 1));
    }
}
