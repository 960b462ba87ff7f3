//! Course-planning domain models.
//!
//! Core data types for two-term timetable planning: the offered catalog
//! side (courses, sections, sessions) and the student side (selections,
//! blockouts, capacity, composed plans).
//!
//! # At a glance
//!
//! | Type | Role |
//! |------|------|
//! | [`Session`] | One recurring weekly meeting |
//! | [`Section`] | Enrollable unit bundling its sessions |
//! | [`CourseOffering`] | A course within one term |
//! | [`CourseListing`] | Per-code aggregate across terms |
//! | [`Selection`] | Chosen course + acceptable sections |
//! | [`Blockout`] | Time window to keep free |
//! | [`TermCapacity`] | Per-term course cap |
//! | [`CoursePlan`] | Conflict-free result across both terms |

mod blockout;
mod capacity;
mod course;
mod plan;
mod section;
mod selection;
mod session;

pub use blockout::{Blockout, TermScope, TermSlot};
pub use capacity::{CapacityConfig, CapacityError, TermCapacity};
pub use course::{is_year_long_code, CourseListing, CourseOffering};
pub use plan::{CoursePlan, PlanEntry, PlanSummary};
pub use section::Section;
pub use selection::Selection;
pub use session::{DaySet, Session, Weekday};
