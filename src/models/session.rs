//! Weekly meeting sessions and the pairwise conflict test.
//!
//! # Concepts
//!
//! - [`Weekday`]: Day of the teaching week
//! - [`DaySet`]: The set of weekdays a session meets on
//! - [`Session`]: One recurring weekly meeting of a section
//!
//! Conflict semantics are half-open: two sessions conflict only when they
//! share an active weekday and their time ranges genuinely overlap, so a
//! session ending at 10:00 never conflicts with one starting at 10:00.
//! Sessions missing day or time data are treated as non-conflicting.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::blockout::Blockout;

// ================================
// Weekday
// ================================

/// Day of the teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Lowercase three-letter label, as used in serialized day sets.
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ================================
// Day Set
// ================================

/// The set of weekdays a session meets on.
///
/// Serializes as an object of per-day flags (`{"mon":true,"tue":false,...}`),
/// matching the shape of ingested timetable rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySet {
    pub mon: bool,
    pub tue: bool,
    pub wed: bool,
    pub thu: bool,
    pub fri: bool,
    pub sat: bool,
    pub sun: bool,
}

impl DaySet {
    /// Creates an empty day set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing a single day.
    pub fn single(day: Weekday) -> Self {
        let mut set = Self::new();
        set.insert(day);
        set
    }

    /// Creates a set from a list of days.
    pub fn of(days: &[Weekday]) -> Self {
        let mut set = Self::new();
        for day in days {
            set.insert(*day);
        }
        set
    }

    /// Adds a day to the set.
    pub fn insert(&mut self, day: Weekday) {
        *self.flag_mut(day) = true;
    }

    /// Adds a day, builder style.
    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    /// Whether the set contains `day`.
    pub fn contains(&self, day: Weekday) -> bool {
        match day {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }

    /// Whether the two sets share at least one day.
    pub fn intersects(&self, other: &DaySet) -> bool {
        Weekday::ALL
            .iter()
            .any(|d| self.contains(*d) && other.contains(*d))
    }

    /// Whether no day is set.
    pub fn is_empty(&self) -> bool {
        !Weekday::ALL.iter().any(|d| self.contains(*d))
    }

    /// Number of active days.
    pub fn len(&self) -> usize {
        Weekday::ALL.iter().filter(|d| self.contains(**d)).count()
    }

    /// Iterates the active days, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.iter().copied().filter(|d| self.contains(*d))
    }

    fn flag_mut(&mut self, day: Weekday) -> &mut bool {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }
}

// ================================
// Session
// ================================

/// One recurring weekly meeting of a section.
///
/// Times and dates are optional: source timetables contain rows with no
/// published meeting time (project courses, reading groups). Such sessions
/// never conflict with anything and carry no calendar placement.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use term_planner::models::{DaySet, Session, Weekday};
///
/// let lecture = Session::new("2025-26 Sem 1")
///     .with_days(DaySet::single(Weekday::Mon))
///     .with_time_range(
///         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///     );
/// let tutorial = Session::new("2025-26 Sem 1")
///     .with_days(DaySet::single(Weekday::Mon))
///     .with_time_range(
///         NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
///     );
///
/// // Back-to-back meetings do not conflict.
/// assert!(!lecture.conflicts_with(&tutorial));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Term label this session belongs to.
    pub term: String,
    /// Weekdays the session meets on.
    pub days: DaySet,
    /// Start time of day, if published.
    pub start_time: Option<NaiveTime>,
    /// End time of day, if published.
    pub end_time: Option<NaiveTime>,
    /// First calendar date of the meeting pattern, if published.
    pub start_date: Option<NaiveDate>,
    /// Last calendar date of the meeting pattern, if published.
    pub end_date: Option<NaiveDate>,
    /// Room or campus location, free text.
    pub venue: String,
}

impl Session {
    /// Creates a session with no meeting data for the given term.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            days: DaySet::new(),
            start_time: None,
            end_time: None,
            start_date: None,
            end_date: None,
            venue: String::new(),
        }
    }

    /// Sets the active weekdays.
    pub fn with_days(mut self, days: DaySet) -> Self {
        self.days = days;
        self
    }

    /// Sets the time-of-day range.
    pub fn with_time_range(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Sets the calendar date range.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sets the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Whether the session has enough data to take part in conflict checks:
    /// at least one active day and both times present.
    pub fn has_meeting_times(&self) -> bool {
        !self.days.is_empty() && self.start_time.is_some() && self.end_time.is_some()
    }

    /// Pairwise conflict test.
    ///
    /// Two sessions conflict when they share an active weekday and their
    /// time ranges overlap. The comparison is half-open, so an exact
    /// boundary touch (`self` ends exactly when `other` starts) is not a
    /// conflict. A session without usable day/time data conflicts with
    /// nothing.
    pub fn conflicts_with(&self, other: &Session) -> bool {
        if !self.has_meeting_times() || !other.has_meeting_times() {
            log::debug!("session missing day/time data, treated as non-conflicting");
            return false;
        }
        if !self.days.intersects(&other.days) {
            return false;
        }
        // has_meeting_times guarantees all four are present
        let (Some(a_start), Some(a_end)) = (self.start_time, self.end_time) else {
            return false;
        };
        let (Some(b_start), Some(b_end)) = (other.start_time, other.end_time) else {
            return false;
        };
        a_start < b_end && b_start < a_end
    }

    /// Whether the session overlaps a blocked-out window on its day.
    ///
    /// Uses the same half-open overlap test as [`conflicts_with`](Self::conflicts_with).
    pub fn overlaps_blockout(&self, blockout: &Blockout) -> bool {
        if !self.has_meeting_times() {
            return false;
        }
        if !self.days.contains(blockout.day) {
            return false;
        }
        let (Some(start), Some(end)) = (self.start_time, self.end_time) else {
            return false;
        };
        start < blockout.end_time && blockout.start_time < end
    }
}
