//! Tournament-wide settings.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Timeslot, TournamentDay};
use crate::error::{Result, ScheduleError};

/// Tournament-wide configuration.
///
/// `match_time` is both the duration of a match and the spacing between
/// offered start times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    /// Duration of a match (minutes).
    pub match_time: u32,
    /// Minimum rest between a player's matches (minutes).
    #[serde(default)]
    pub break_time: u32,
    /// Number of courts available.
    pub courts: u32,
    /// Days of play, in order.
    #[serde(default)]
    pub tournament_days: Vec<TournamentDay>,
    /// Keep each category's matches on one day. Carried for callers; not
    /// interpreted by the solver.
    #[serde(default)]
    pub single_day_matches: bool,
}

impl Setting {
    /// Creates validated settings.
    pub fn new(
        match_time: u32,
        break_time: u32,
        courts: u32,
        tournament_days: Vec<TournamentDay>,
    ) -> Result<Self> {
        let setting = Self {
            match_time,
            break_time,
            courts,
            tournament_days,
            single_day_matches: false,
        };
        setting.validate()?;
        Ok(setting)
    }

    /// Sets the single-day flag.
    pub fn with_single_day_matches(mut self, single_day: bool) -> Self {
        self.single_day_matches = single_day;
        self
    }

    /// Checks values that would make timeslot generation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.match_time == 0 {
            return Err(ScheduleError::InvalidSetting(
                "match_time must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Minimum distance between the starts of two matches of one player
    /// (minutes).
    #[inline]
    pub fn rest_minutes(&self) -> i64 {
        i64::from(self.match_time) + i64::from(self.break_time)
    }

    /// Every offered timeslot: for each day, each time point, each court,
    /// sorted by time then court whatever order the days are listed in.
    ///
    /// A (court, time) pair offered by two overlapping days appears once,
    /// owned by the first day listed.
    pub fn timeslots(&self) -> Vec<Timeslot> {
        let mut seen = HashSet::new();
        let mut slots = Vec::new();
        for day in &self.tournament_days {
            for point in day.time_points(self.match_time) {
                for court in 0..self.courts {
                    let slot = Timeslot::new(court, day.date(), point);
                    if seen.insert(slot) {
                        slots.push(slot);
                    }
                }
            }
        }
        slots.sort();
        slots
    }
}
