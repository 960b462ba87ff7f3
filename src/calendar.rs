//! Teaching-week calendar support.
//!
//! Maps a composed plan onto calendar weeks so a renderer can show "week 3
//! of the term" style views. Weeks are Sunday-aligned 7-day windows,
//! numbered from 1 starting at the Sunday on or before the plan's first
//! dated session. All of this is plain data derivation; nothing here
//! renders.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{CoursePlan, Session};

/// Inclusive calendar date span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    /// First day of the span.
    pub start: NaiveDate,
    /// Last day of the span, inclusive.
    pub end: NaiveDate,
}

/// One teaching week: a Sunday-to-Saturday window with a 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// Week number, starting at 1.
    pub number: u32,
    /// The window's Sunday.
    pub start: NaiveDate,
    /// The window's Saturday.
    pub end: NaiveDate,
}

/// The span from the earliest dated session start to the latest dated
/// session end across the whole plan. `None` when no session carries both
/// dates.
pub fn plan_date_range(plan: &CoursePlan) -> Option<DateSpan> {
    let mut span: Option<DateSpan> = None;
    for entry in &plan.entries {
        for session in &entry.sessions {
            let (Some(start), Some(end)) = (session.start_date, session.end_date) else {
                continue;
            };
            span = Some(match span {
                None => DateSpan { start, end },
                Some(s) => DateSpan {
                    start: s.start.min(start),
                    end: s.end.max(end),
                },
            });
        }
    }
    span
}

/// Consecutive week windows covering the span.
///
/// The first window is aligned to the Sunday on or before `span.start`;
/// windows continue until one covers `span.end`.
pub fn week_windows(span: &DateSpan) -> Vec<WeekWindow> {
    if span.end < span.start {
        return Vec::new();
    }
    let offset = span.start.weekday().num_days_from_sunday() as u64;
    let Some(first_sunday) = span.start.checked_sub_days(Days::new(offset)) else {
        return Vec::new();
    };

    let mut windows = Vec::new();
    let mut start = first_sunday;
    let mut number = 1;
    while start <= span.end {
        let Some(end) = start.checked_add_days(Days::new(6)) else {
            break;
        };
        windows.push(WeekWindow { number, start, end });
        let Some(next) = start.checked_add_days(Days::new(7)) else {
            break;
        };
        start = next;
        number += 1;
    }
    windows
}

/// Whether the session's date range intersects the week, inclusively.
///
/// A session without both dates is in no week.
pub fn session_in_week(session: &Session, week: &WeekWindow) -> bool {
    let (Some(start), Some(end)) = (session.start_date, session.end_date) else {
        return false;
    };
    start <= week.end && end >= week.start
}
