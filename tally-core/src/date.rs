use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use typed_builder::TypedBuilder;

/// A fixed offset from UTC written as `[+-]HHMM`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Zone {
    minutes: i16,
}

impl Zone {
    pub const MAX_HOURS: u8 = 23;

    /// `None` if the hours or minutes are out of range.
    pub fn new(negative: bool, hours: u8, minutes: u8) -> Option<Self> {
        if hours > Self::MAX_HOURS || minutes > 59 {
            return None;
        }
        let total = i16::from(hours) * 60 + i16::from(minutes);
        Some(Zone {
            minutes: if negative { -total } else { total },
        })
    }

    pub fn utc() -> Self {
        Zone::default()
    }

    /// Offset from UTC in minutes.
    pub fn minutes(self) -> i16 {
        self.minutes
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.abs();
        write!(f, "{}{:02}{:02}", sign, abs / 60, abs % 60)
    }
}

/// A calendar date with an optional time of day and an optional zone.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, TypedBuilder)]
pub struct DateTime {
    pub date: NaiveDate,
    #[builder(default)]
    pub time: Option<NaiveTime>,
    #[builder(default)]
    pub zone: Option<Zone>,
}

impl From<NaiveDate> for DateTime {
    fn from(date: NaiveDate) -> Self {
        DateTime {
            date,
            time: None,
            zone: None,
        }
    }
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a time as `HH:MM`, or `HH:MM:SS` when the seconds are not zero.
pub fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(self.date))?;
        if let Some(time) = self.time {
            write!(f, " {}", format_time(time))?;
        }
        if let Some(zone) = self.zone {
            write!(f, " {}", zone)?;
        }
        Ok(())
    }
}

#[test]
fn test_zone_display() {
    assert_eq!(Zone::new(false, 1, 0).unwrap().to_string(), "+0100");
    assert_eq!(Zone::new(true, 5, 30).unwrap().to_string(), "-0530");
    assert_eq!(Zone::new(true, 0, 0).unwrap().to_string(), "+0000");
    assert!(Zone::new(false, 24, 0).is_none());
    assert!(Zone::new(false, 1, 60).is_none());
}

#[test]
fn test_date_time_display() {
    let dt = DateTime::builder()
        .date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        .time(NaiveTime::from_hms_opt(9, 5, 0))
        .zone(Zone::new(false, 1, 0))
        .build();
    assert_eq!(dt.to_string(), "2024-02-29 09:05 +0100");
    let dt = DateTime::builder()
        .date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .time(NaiveTime::from_hms_opt(23, 59, 7))
        .build();
    assert_eq!(dt.to_string(), "2024-01-01 23:59:07");
}
