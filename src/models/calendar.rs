//! Tournament days, timeslots and time windows.
//!
//! # Time Model
//! A [`TournamentDay`] offers whole-hour opening times. [`Timeslot`]s are
//! absolute points in time on a given court. Interval arithmetic is done in
//! minutes since the Unix epoch through [`TimeWindow`].
//!
//! A day whose `end_hour` is smaller than its `start_hour` wraps past
//! midnight into the next calendar date; its slots still belong to the
//! day they started on.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, ScheduleError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A time interval [start, end) in minutes.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (minutes, inclusive).
    pub start: i64,
    /// Interval end (minutes, exclusive).
    pub end: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Duration of this window (minutes).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether a minute falls within this window.
    #[inline]
    pub fn contains(&self, minute: i64) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Whether two windows overlap: either start lies inside the other.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contains(other.start) || other.contains(self.start)
    }
}

/// One day of play with its opening hours.
///
/// Validated at construction: the date must parse as `YYYY-MM-DD` and both
/// hours must be within `[0, 23]`. Nothing is clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTournamentDay", into = "RawTournamentDay")]
pub struct TournamentDay {
    date: NaiveDate,
    start_hour: u32,
    end_hour: u32,
}

impl TournamentDay {
    /// Parses a `YYYY-MM-DD` date and validates the hour range.
    pub fn new(date: &str, start_hour: u32, end_hour: u32) -> Result<Self> {
        let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
            ScheduleError::InvalidDate {
                value: date.to_string(),
            }
        })?;
        Self::from_date(parsed, start_hour, end_hour)
    }

    /// Validates the hour range for an already parsed date.
    pub fn from_date(date: NaiveDate, start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour > 23 {
            return Err(ScheduleError::InvalidHour {
                field: "start_hour",
                hour: start_hour,
            });
        }
        if end_hour > 23 {
            return Err(ScheduleError::InvalidHour {
                field: "end_hour",
                hour: end_hour,
            });
        }
        Ok(Self {
            date,
            start_hour,
            end_hour,
        })
    }

    /// Calendar date of the day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// First offered hour.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Last offered hour (inclusive).
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Whether the day runs past midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.end_hour < self.start_hour
    }

    /// Offered start times from `start_hour` to `end_hour` inclusive,
    /// stepping by `interval_minutes`.
    ///
    /// Returns an empty list for a zero interval.
    pub fn time_points(&self, interval_minutes: u32) -> Vec<NaiveDateTime> {
        if interval_minutes == 0 {
            return Vec::new();
        }

        let midnight = self.date.and_time(NaiveTime::MIN);
        let start = midnight + Duration::hours(i64::from(self.start_hour));
        let mut end = midnight + Duration::hours(i64::from(self.end_hour));
        if self.wraps_midnight() {
            end += Duration::days(1);
        }

        let step = Duration::minutes(i64::from(interval_minutes));
        let mut points = Vec::new();
        let mut current = start;
        while current <= end {
            points.push(current);
            current += step;
        }
        points
    }
}

/// Serialized form of a [`TournamentDay`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTournamentDay {
    date: String,
    start_hour: u32,
    end_hour: u32,
}

impl TryFrom<RawTournamentDay> for TournamentDay {
    type Error = ScheduleError;

    fn try_from(raw: RawTournamentDay) -> Result<Self> {
        Self::new(&raw.date, raw.start_hour, raw.end_hour)
    }
}

impl From<TournamentDay> for RawTournamentDay {
    fn from(day: TournamentDay) -> Self {
        Self {
            date: day.date.format(DATE_FORMAT).to_string(),
            start_hour: day.start_hour,
            end_hour: day.end_hour,
        }
    }
}

/// A court at an absolute point in time.
///
/// Two timeslots are equal iff they share court and time. Ordering is by
/// time, then court. The owning date does not take part in either, so a
/// slot past midnight of a wrapping day sits with the next day's slots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timeslot {
    /// Court index (0-based).
    pub court: u32,
    /// Date of the tournament day offering this slot.
    pub date: NaiveDate,
    /// Absolute start time.
    pub slot: NaiveDateTime,
}

impl Timeslot {
    /// Creates a new timeslot.
    pub fn new(court: u32, date: NaiveDate, slot: NaiveDateTime) -> Self {
        Self { court, date, slot }
    }

    /// Start time in minutes since the Unix epoch.
    #[inline]
    pub fn minutes(&self) -> i64 {
        self.slot.and_utc().timestamp().div_euclid(60)
    }

    /// Interval occupied by a match of `duration_minutes` starting here.
    pub fn window(&self, duration_minutes: u32) -> TimeWindow {
        let start = self.minutes();
        TimeWindow::new(start, start + i64::from(duration_minutes))
    }

    /// Absolute gap between two slots, in minutes.
    pub fn gap_minutes(&self, other: &Self) -> i64 {
        (self.minutes() - other.minutes()).abs()
    }
}

impl PartialEq for Timeslot {
    fn eq(&self, other: &Self) -> bool {
        self.court == other.court && self.slot == other.slot
    }
}

impl Eq for Timeslot {}

impl Hash for Timeslot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.court.hash(state);
        self.slot.hash(state);
    }
}

impl PartialOrd for Timeslot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timeslot {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.slot, self.court).cmp(&(other.slot, other.court))
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "court {} @ {}", self.court, self.slot.format("%Y-%m-%d %H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(100, 160);
        assert_eq!(w.duration(), 60);
        assert!(w.contains(100));
        assert!(w.contains(159));
        assert!(!w.contains(160)); // exclusive end
        assert!(!w.contains(50));
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::new(0, 60);
        let b = TimeWindow::new(30, 90);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeWindow::new(60, 120); // touching but not overlapping
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_day_validation() {
        assert!(TournamentDay::new("2024-05-04", 9, 20).is_ok());
        assert!(matches!(
            TournamentDay::new("2024-13-40", 9, 20),
            Err(ScheduleError::InvalidDate { .. })
        ));
        assert!(matches!(
            TournamentDay::new("not a date", 9, 20),
            Err(ScheduleError::InvalidDate { .. })
        ));
        assert!(matches!(
            TournamentDay::new("2024-05-04", 24, 20),
            Err(ScheduleError::InvalidHour { field: "start_hour", hour: 24 })
        ));
        assert!(matches!(
            TournamentDay::new("2024-05-04", 9, 30),
            Err(ScheduleError::InvalidHour { field: "end_hour", hour: 30 })
        ));
    }

    #[test]
    fn test_time_points_inclusive() {
        let day = TournamentDay::new("2024-05-04", 9, 12).unwrap();
        let points = day.time_points(60);
        assert_eq!(
            points,
            vec![
                at("2024-05-04", 9, 0),
                at("2024-05-04", 10, 0),
                at("2024-05-04", 11, 0),
                at("2024-05-04", 12, 0),
            ]
        );
        assert_eq!(day.time_points(90).len(), 3); // 9:00, 10:30, 12:00
    }

    #[test]
    fn test_time_points_single_hour() {
        let day = TournamentDay::new("2024-05-04", 9, 9).unwrap();
        assert_eq!(day.time_points(60), vec![at("2024-05-04", 9, 0)]);
        assert!(day.time_points(0).is_empty());
    }

    #[test]
    fn test_time_points_wrap_midnight() {
        let day = TournamentDay::new("2024-05-04", 22, 1).unwrap();
        assert!(day.wraps_midnight());
        let points = day.time_points(60);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], at("2024-05-04", 22, 0));
        assert_eq!(points[3], at("2024-05-05", 1, 0));
    }

    #[test]
    fn test_timeslot_equality_and_order() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        let a = Timeslot::new(0, date, at("2024-05-04", 9, 0));
        let b = Timeslot::new(1, date, at("2024-05-04", 9, 0));
        let c = Timeslot::new(0, date, at("2024-05-04", 10, 0));
        assert_ne!(a, b);
        assert_eq!(a, Timeslot::new(0, date, at("2024-05-04", 9, 0)));
        assert!(a < b);
        assert!(b < c);
        assert_eq!(c.gap_minutes(&a), 60);
        assert_eq!(a.window(60).duration(), 60);
    }

    #[test]
    fn test_timeslot_order_ignores_owning_date() {
        let sat = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        let sun = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        // 01:00 on Sunday, offered by Saturday's wrapping day and by Sunday
        let late = Timeslot::new(0, sat, at("2024-05-05", 1, 0));
        let early = Timeslot::new(0, sun, at("2024-05-05", 1, 0));
        let midnight = Timeslot::new(1, sun, at("2024-05-05", 0, 0));

        assert_eq!(late, early);
        assert_eq!(late.cmp(&early), Ordering::Equal);
        assert!(midnight < late);
        assert!(midnight < early);

        let mut slots = vec![late, midnight, early];
        slots.sort();
        assert_eq!(slots[0], midnight);
        assert!(slots.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_day_serde_validates() {
        #[derive(Deserialize)]
        struct Wrapper {
            day: TournamentDay,
        }

        let ok: Wrapper =
            toml::from_str("day = { date = \"2024-05-04\", start_hour = 9, end_hour = 20 }")
                .unwrap();
        assert_eq!(ok.day.start_hour(), 9);

        let bad: std::result::Result<Wrapper, _> =
            toml::from_str("day = { date = \"2024-05-04\", start_hour = 25, end_hour = 20 }");
        assert!(bad.is_err());
    }
}
