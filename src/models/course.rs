//! Course offerings and the aggregated course listing.
//!
//! A [`CourseOffering`] is a course as offered in one concrete term, with
//! its enrollable sections. A [`CourseListing`] is the per-code aggregate
//! across terms, the thing a selection UI presents. Courses whose code
//! ends in `FY` run the full year: enrolment is a single decision and the
//! same section id must be attended in both terms.

use serde::{Deserialize, Serialize};

use super::section::Section;

/// Whether a course code denotes a year-long (full-year) course.
pub fn is_year_long_code(code: &str) -> bool {
    code.trim().ends_with("FY")
}

/// A course as offered within a single term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    /// Course code ("COMP1117").
    pub code: String,
    /// Course title as published.
    pub title: String,
    /// Offering department.
    pub department: String,
    /// Term this offering belongs to.
    pub term: String,
    /// Sections in first-appearance order.
    pub sections: Vec<Section>,
}

impl CourseOffering {
    /// Creates an offering with no sections.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        department: impl Into<String>,
        term: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            department: department.into(),
            term: term.into(),
            sections: Vec::new(),
        }
    }

    /// Adds a section, builder style.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Looks up a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Whether a section with the given id exists.
    pub fn has_section(&self, id: &str) -> bool {
        self.section(id).is_some()
    }

    /// Whether this offering belongs to a year-long course.
    pub fn is_year_long(&self) -> bool {
        is_year_long_code(&self.code)
    }

    /// Total session count across all sections.
    pub fn session_count(&self) -> usize {
        self.sections.iter().map(|s| s.sessions.len()).sum()
    }
}

/// Per-code aggregate of a course across every term it is offered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseListing {
    /// Course code.
    pub code: String,
    /// Title from the first record seen.
    pub title: String,
    /// Department from the first record seen.
    pub department: String,
    /// Terms the course is offered in, in catalog order.
    pub terms: Vec<String>,
    /// Union of section ids across terms, in first-appearance order.
    pub section_ids: Vec<String>,
}

impl CourseListing {
    /// Whether the course runs the full year.
    pub fn is_year_long(&self) -> bool {
        is_year_long_code(&self.code)
    }

    /// Number of distinct section ids across terms.
    pub fn section_count(&self) -> usize {
        self.section_ids.len()
    }

    /// Whether the course is offered in the given term.
    pub fn offered_in(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }
}
