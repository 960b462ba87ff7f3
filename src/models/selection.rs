//! Course selections: what the student wants planned.

use serde::{Deserialize, Serialize};

use super::course::{is_year_long_code, CourseListing};

/// One selected course with the set of acceptable sections.
///
/// "Any section is fine" is resolved when the selection is built (see
/// [`Selection::any_of`]), so by the time planning starts every selection
/// carries an explicit list of acceptable section ids. The set acts as a
/// filter over each offering's section list; the offering's own order
/// drives the enumeration order of the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected course code.
    pub course_code: String,
    /// Acceptable section ids, in preference order. Must be non-empty.
    pub section_ids: Vec<String>,
    /// Terms the course is offered in, from the catalog listing.
    pub terms_offered: Vec<String>,
}

impl Selection {
    /// Creates an empty selection for a course code.
    pub fn new(course_code: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            section_ids: Vec::new(),
            terms_offered: Vec::new(),
        }
    }

    /// Selects a course accepting every section it offers.
    pub fn any_of(listing: &CourseListing) -> Self {
        Self {
            course_code: listing.code.clone(),
            section_ids: listing.section_ids.clone(),
            terms_offered: listing.terms.clone(),
        }
    }

    /// Adds an acceptable section id, builder style.
    pub fn with_section(mut self, id: impl Into<String>) -> Self {
        self.section_ids.push(id.into());
        self
    }

    /// Adds several acceptable section ids.
    pub fn with_sections<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.section_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Adds a term the course is offered in.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.terms_offered.push(term.into());
        self
    }

    /// Whether the given section id is acceptable.
    pub fn accepts(&self, section_id: &str) -> bool {
        self.section_ids.iter().any(|id| id == section_id)
    }

    /// Whether the selected course is year-long.
    pub fn is_year_long(&self) -> bool {
        is_year_long_code(&self.course_code)
    }
}
