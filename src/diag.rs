//! Planner diagnostics.
//!
//! The engine never fails on degraded input; it reports what it skipped
//! or why a search was cut short as [`PlannerEvent`]s through an explicit
//! [`DiagnosticsSink`] owned by the caller. Hosts that do not care pass a
//! [`NullSink`]; [`LogSink`] forwards everything to the `log` facade; a
//! plain `Vec<PlannerEvent>` is a sink too, which tests lean on.

use serde::{Deserialize, Serialize};

/// One diagnostic finding during planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannerEvent {
    /// A selection matched no active term with its accepted sections.
    /// The course is excluded from capacity accounting and the final
    /// completeness filter will leave the result empty.
    CourseUnmatched { course_code: String },
    /// A course had no accepted section in one term's offering and was
    /// dropped from that term's candidate list.
    CourseSkippedForTerm { course_code: String, term: String },
    /// Year-long and term-fixed courses alone exceed the term cap.
    TermOverCapacity {
        term: String,
        fixed: usize,
        year_long: usize,
        cap: usize,
    },
    /// More flexible courses than open slots across both terms.
    FlexibleOverflow { flexible: usize, open_slots: usize },
}

impl std::fmt::Display for PlannerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerEvent::CourseUnmatched { course_code } => write!(
                f,
                "course {course_code} matches no active term with its accepted sections"
            ),
            PlannerEvent::CourseSkippedForTerm { course_code, term } => write!(
                f,
                "course {course_code} has no accepted section in {term}, dropped from that term"
            ),
            PlannerEvent::TermOverCapacity {
                term,
                fixed,
                year_long,
                cap,
            } => write!(
                f,
                "term {term} over capacity: {fixed} fixed + {year_long} year-long exceeds cap {cap}"
            ),
            PlannerEvent::FlexibleOverflow {
                flexible,
                open_slots,
            } => write!(
                f,
                "{flexible} flexible courses cannot fit into {open_slots} open slots"
            ),
        }
    }
}

/// Receiver for planner diagnostics.
pub trait DiagnosticsSink {
    /// Records one event.
    fn record(&mut self, event: PlannerEvent);
}

/// Discards every event.
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&mut self, _event: PlannerEvent) {}
}

/// Forwards events to the `log` facade.
///
/// Unmatched courses log at error level, everything else at warn.
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn record(&mut self, event: PlannerEvent) {
        match &event {
            PlannerEvent::CourseUnmatched { .. } => log::error!("{event}"),
            _ => log::warn!("{event}"),
        }
    }
}

impl DiagnosticsSink for Vec<PlannerEvent> {
    fn record(&mut self, event: PlannerEvent) {
        self.push(event);
    }
}
