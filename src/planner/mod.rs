//! Exhaustive two-term plan enumeration.
//!
//! # Algorithm
//!
//! 1. Classify each selection: year-long (occupies both terms), fixed to
//!    one term, or flexible (acceptable sections exist in both).
//! 2. Check term capacity, then enumerate every admissible split of the
//!    flexible courses across the two terms.
//! 3. For each split, enumerate conflict-free section assignments per
//!    term, pruning on session conflicts and blockout overlaps.
//! 4. Join the per-term assignments, enforce year-long continuity and
//!    completeness, and rank the survivors by term balance.
//!
//! The search is deterministic: selection order, section order within a
//! selection, and the first-term-before-second-term branch order fully
//! determine the output order, and ranking sorts stably.

mod assignment;
mod capacity;
mod compose;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::diag::{DiagnosticsSink, NullSink, PlannerEvent};
use crate::models::{Blockout, CoursePlan, Selection, TermCapacity};

/// How to treat a course with no accepted section in one term's offering.
///
/// This situation arises when the accepted-section set differs between
/// the two terms, or when a year-long course lacks the chosen section in
/// its second-term offering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingSectionPolicy {
    /// Drop the course from that term's candidates and keep searching.
    /// The completeness filter then decides whether anything survives.
    #[default]
    SkipCourse,
    /// Fail the request with [`PlanError::SectionUnavailable`].
    Strict,
}

/// Hard planning failure.
///
/// Infeasibility is never an error: capacity overruns, conflicts, and
/// unmatched courses all yield an empty outcome with diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A course had no accepted section in a term it must occupy, and
    /// the planner runs under [`MissingSectionPolicy::Strict`].
    #[error("course {course_code} has no accepted section in {term}")]
    SectionUnavailable { course_code: String, term: String },
}

/// Search effort counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Admissible flexible-course splits reached.
    pub distributions: u64,
    /// Completed per-term section assignments.
    pub term_combinations: u64,
    /// Branches cut on a session conflict.
    pub conflict_prunes: u64,
    /// Branches cut on a blockout overlap.
    pub blockout_prunes: u64,
    /// Cross-term joins rejected on year-long section mismatch.
    pub continuity_rejections: u64,
    /// Joined plans discarded for not covering every selected course.
    pub incomplete_plans: u64,
    /// Plans surviving all filters.
    pub plans: u64,
}

/// Planning result: ranked plans plus search statistics.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    /// Surviving plans, best balanced first.
    pub plans: Vec<CoursePlan>,
    /// Search effort counters.
    pub stats: SearchStats,
}

impl PlanOutcome {
    /// Whether no plan survived.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Two-term course planner.
///
/// Pure and synchronous: the same catalog, selections, and blockouts
/// always produce the same ranked plans.
///
/// # Examples
///
/// ```
/// use term_planner::catalog::{Catalog, SessionRecord};
/// use term_planner::models::{DaySet, Selection, Weekday};
/// use term_planner::planner::Planner;
///
/// let records = vec![
///     SessionRecord::new("COMP1117", "2025-26 Sem 1")
///         .with_section("L1")
///         .with_days(DaySet::single(Weekday::Mon))
///         .with_times("09:00", "10:00"),
///     SessionRecord::new("MATH1013", "2025-26 Sem 2")
///         .with_section("L1")
///         .with_days(DaySet::single(Weekday::Tue))
///         .with_times("09:00", "10:00"),
/// ];
/// let catalog = Catalog::build(&records);
/// let selections = vec![
///     Selection::any_of(catalog.listing("COMP1117").unwrap()),
///     Selection::any_of(catalog.listing("MATH1013").unwrap()),
/// ];
///
/// let outcome = Planner::new().plan(&catalog, &selections, &[]).unwrap();
/// assert_eq!(outcome.plans.len(), 1);
/// assert_eq!(outcome.plans[0].entries.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    capacity: TermCapacity,
    missing_section_policy: MissingSectionPolicy,
}

impl Planner {
    /// Creates a planner with the standard capacity and skip policy.
    pub fn new() -> Self {
        Self {
            capacity: TermCapacity::standard(),
            missing_section_policy: MissingSectionPolicy::default(),
        }
    }

    /// Sets the per-term course cap.
    pub fn with_capacity(mut self, capacity: TermCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the missing-section policy.
    pub fn with_missing_section_policy(mut self, policy: MissingSectionPolicy) -> Self {
        self.missing_section_policy = policy;
        self
    }

    /// Plans, discarding diagnostics.
    pub fn plan(
        &self,
        catalog: &Catalog,
        selections: &[Selection],
        blockouts: &[Blockout],
    ) -> Result<PlanOutcome, PlanError> {
        let mut sink = NullSink;
        self.plan_with_diagnostics(catalog, selections, blockouts, &mut sink)
    }

    /// Plans, streaming diagnostics into the given sink.
    ///
    /// # Algorithm
    /// 1. Classify selections against the active terms.
    /// 2. Compute open slots per term; bail out early (empty outcome,
    ///    diagnostic recorded) when fixed load alone exceeds a cap or the
    ///    flexible courses cannot fit the open slots.
    /// 3. Enumerate distributions, assignments, and joins.
    pub fn plan_with_diagnostics(
        &self,
        catalog: &Catalog,
        selections: &[Selection],
        blockouts: &[Blockout],
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<PlanOutcome, PlanError> {
        let mut stats = SearchStats::default();

        if selections.is_empty() {
            return Ok(PlanOutcome::default());
        }
        let Some(active) = catalog.active_terms() else {
            for selection in selections {
                sink.record(PlannerEvent::CourseUnmatched {
                    course_code: selection.course_code.clone(),
                });
            }
            return Ok(PlanOutcome::default());
        };

        let classified = capacity::classify(catalog, selections, active, sink);
        let cap = self.capacity.max_per_term();
        let year_long = classified.year_long.len();

        let Some(slots_first) = cap.checked_sub(classified.first_only.len() + year_long) else {
            sink.record(PlannerEvent::TermOverCapacity {
                term: active.first().to_string(),
                fixed: classified.first_only.len(),
                year_long,
                cap,
            });
            return Ok(PlanOutcome {
                plans: Vec::new(),
                stats,
            });
        };
        let slots_second = match active.second() {
            Some(second) => {
                match cap.checked_sub(classified.second_only.len() + year_long) {
                    Some(slots) => slots,
                    None => {
                        sink.record(PlannerEvent::TermOverCapacity {
                            term: second.to_string(),
                            fixed: classified.second_only.len(),
                            year_long,
                            cap,
                        });
                        return Ok(PlanOutcome {
                            plans: Vec::new(),
                            stats,
                        });
                    }
                }
            }
            None => 0,
        };
        if classified.flexible.len() > slots_first + slots_second {
            sink.record(PlannerEvent::FlexibleOverflow {
                flexible: classified.flexible.len(),
                open_slots: slots_first + slots_second,
            });
            return Ok(PlanOutcome {
                plans: Vec::new(),
                stats,
            });
        }

        let distributions = capacity::enumerate_distributions(
            &classified.flexible,
            slots_first,
            slots_second,
            &mut stats,
        );

        let expected_codes: BTreeSet<&str> = selections
            .iter()
            .map(|s| s.course_code.as_str())
            .collect();
        let composer = compose::Composer {
            catalog,
            active,
            classified,
            blockouts,
            expected_codes,
            policy: self.missing_section_policy,
        };
        let plans = composer.compose(&distributions, &mut stats, sink)?;
        stats.plans = plans.len() as u64;

        log::debug!(
            "planned {} selections: {} plans from {} distributions, {} term combinations",
            selections.len(),
            stats.plans,
            stats.distributions,
            stats.term_combinations
        );

        Ok(PlanOutcome { plans, stats })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}
