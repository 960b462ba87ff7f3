//! Two-term course planning engine.
//!
//! Takes a university's published timetable and a student's course
//! selections, and enumerates every conflict-free way to schedule those
//! courses across the two active terms of a teaching year, ranked by how
//! evenly the load splits between the terms.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Session`, `Section`, `CourseOffering`,
//!   `Selection`, `Blockout`, `TermCapacity`, `CoursePlan`
//! - **`ingest`**: Reads the published `.xlsx` timetable into raw records
//! - **`catalog`**: Filters and groups records into the year's catalog,
//!   derives the active terms, synthesizes year-long second-term offerings
//! - **`validation`**: Pre-flight integrity checks over selections and
//!   blockouts (duplicates, unknown codes, impossible windows)
//! - **`planner`**: The search itself — capacity accounting, flexible-course
//!   distribution, per-term assignment, cross-term joining and ranking
//! - **`diag`**: Planner events and sinks for observing why plans vanish
//! - **`storage`**: Fingerprint-stamped persistence of a selection cart
//! - **`calendar`**: Week-window derivation for calendar-style rendering
//!
//! # Pipeline
//!
//! `ingest::load_workbook` produces `SessionRecord`s; `Catalog::build`
//! turns them into offerings and listings; `validation::validate_selections`
//! reports input problems early; `planner::Planner::plan` enumerates and
//! ranks the plans. `storage` keeps a student's cart across sessions and
//! `calendar` maps finished plans onto teaching weeks. Every stage is
//! synchronous and deterministic: the same inputs always yield the same
//! plans in the same order.

pub mod calendar;
pub mod catalog;
pub mod diag;
pub mod ingest;
pub mod models;
pub mod planner;
pub mod storage;
pub mod validation;
