//! Time Interval Value Object
//!
//! The `?interval=` filter on donation and campaign listings: records
//! created in the current calendar week (ISO, Monday start) or month.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Weekly,
    Monthly,
}

impl TimeInterval {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// The [start, end) window containing `now`
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = now.date_naive();

        let (start, end) = match self {
            Self::Weekly => {
                let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (start, start + Duration::days(7))
            }
            Self::Monthly => {
                let start = today.with_day(1).unwrap_or(today);
                let end = next_month_start(start);
                (start, end)
            }
        };

        (at_midnight(start), at_midnight(end))
    }
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn next_month_start(month_start: NaiveDate) -> NaiveDate {
    let (year, month) = (month_start.year(), month_start.month());
    let candidate = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // Day 1 of a valid month always exists
    candidate.unwrap_or(month_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_code() {
        assert_eq!(TimeInterval::from_code("weekly"), Some(TimeInterval::Weekly));
        assert_eq!(
            TimeInterval::from_code("monthly"),
            Some(TimeInterval::Monthly)
        );
        assert_eq!(TimeInterval::from_code("daily"), None);
    }

    #[test]
    fn test_weekly_window() {
        // 2024-05-15 is a Wednesday
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 13, 30, 0).unwrap();
        let (start, end) = TimeInterval::Weekly.window(now);

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 13, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_monthly_window() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 13, 30, 0).unwrap();
        let (start, end) = TimeInterval::Monthly.window(now);

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_monthly_window_december() {
        let now = Utc.with_ymd_and_hms(2024, 12, 20, 8, 0, 0).unwrap();
        let (start, end) = TimeInterval::Monthly.window(now);

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }
}
