//! Composed plans: the planner's output.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::session::Session;

/// One scheduled course-section within one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Course code.
    pub course_code: String,
    /// Course title, for display.
    pub course_title: String,
    /// Term the entry is scheduled in.
    pub term: String,
    /// Chosen section id.
    pub section_id: String,
    /// The chosen section's sessions, term-tagged.
    pub sessions: Vec<Session>,
}

/// A complete conflict-free plan across the active terms.
///
/// Entries are ordered first-term before second-term, each term in
/// enumeration order. A year-long course appears once per term, with the
/// same section id in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePlan {
    /// Scheduled entries.
    pub entries: Vec<PlanEntry>,
}

impl CoursePlan {
    /// Creates a plan from its entries.
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    /// Whether the plan holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries across all terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries scheduled in the given term.
    pub fn entries_in_term<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a PlanEntry> {
        self.entries.iter().filter(move |e| e.term == term)
    }

    /// Number of courses scheduled in the given term.
    pub fn count_in_term(&self, term: &str) -> usize {
        self.entries_in_term(term).count()
    }

    /// Number of distinct course codes in the plan.
    pub fn distinct_course_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.course_code.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Looks up the entry for a course in a term.
    pub fn entry(&self, course_code: &str, term: &str) -> Option<&PlanEntry> {
        self.entries
            .iter()
            .find(|e| e.course_code == course_code && e.term == term)
    }

    /// Per-term load summary against the active terms.
    pub fn summary(&self, first_term: &str, second_term: Option<&str>) -> PlanSummary {
        PlanSummary {
            first_term_courses: self.count_in_term(first_term),
            second_term_courses: second_term.map_or(0, |t| self.count_in_term(t)),
            distinct_courses: self.distinct_course_count(),
        }
    }
}

/// Per-term load of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Courses scheduled in the first active term.
    pub first_term_courses: usize,
    /// Courses scheduled in the second active term (0 when absent).
    pub second_term_courses: usize,
    /// Distinct course codes across the plan.
    pub distinct_courses: usize,
}
