//! Input validation for planning requests.
//!
//! Checks structural integrity of selections and blockouts against a
//! built catalog before planning. Detects:
//! - Duplicate course selections
//! - Selections with no acceptable sections
//! - References to unknown courses or sections
//! - Courses with no acceptable section in any active term
//! - Inverted blockout windows
//!
//! Validation is advisory: the planner tolerates all of these inputs
//! (they degrade to warnings and empty results), but callers that want
//! to surface problems before searching can run this first.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::models::{Blockout, Selection};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The same course code is selected twice.
    DuplicateSelection,
    /// A selection lists no acceptable sections.
    EmptySectionSet,
    /// A selected course does not exist in the catalog.
    UnknownCourse,
    /// An accepted section id exists in no term of the course.
    UnknownSection,
    /// No accepted section exists in any active term.
    NoAvailableTerm,
    /// A blockout window ends at or before its start.
    InvalidBlockout,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates selections and blockouts against the catalog.
///
/// Checks:
/// 1. No course code selected more than once
/// 2. Every selection accepts at least one section
/// 3. Every selected course exists in the catalog
/// 4. Every accepted section id exists somewhere in the course
/// 5. Every selection has an accepted section in at least one active term
/// 6. Every blockout window starts before it ends
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_selections(
    catalog: &Catalog,
    selections: &[Selection],
    blockouts: &[Blockout],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for selection in selections {
        if !seen.insert(selection.course_code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSelection,
                format!("Course '{}' is selected twice", selection.course_code),
            ));
        }

        if selection.section_ids.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySectionSet,
                format!(
                    "Selection for '{}' accepts no sections",
                    selection.course_code
                ),
            ));
            continue;
        }

        let Some(listing) = catalog.listing(&selection.course_code) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!("Course '{}' is not in the catalog", selection.course_code),
            ));
            continue;
        };

        for id in &selection.section_ids {
            if !listing.section_ids.iter().any(|s| s == id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSection,
                    format!(
                        "Course '{}' has no section '{}' in any term",
                        selection.course_code, id
                    ),
                ));
            }
        }

        let available_in_active_term = catalog.active_terms().is_some_and(|active| {
            [Some(active.first()), active.second()]
                .into_iter()
                .flatten()
                .any(|term| {
                    catalog
                        .offering(&selection.course_code, term)
                        .is_some_and(|offering| {
                            selection.section_ids.iter().any(|id| offering.has_section(id))
                        })
                })
        });
        if !available_in_active_term {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoAvailableTerm,
                format!(
                    "Course '{}' has no accepted section in an active term",
                    selection.course_code
                ),
            ));
        }
    }

    for blockout in blockouts {
        if blockout.start_time >= blockout.end_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBlockout,
                format!(
                    "Blockout '{}' on {} ends at or before its start",
                    blockout.label, blockout.day
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
