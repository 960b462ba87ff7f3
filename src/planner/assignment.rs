//! Conflict-free section assignment within one term.
//!
//! Works on borrowed catalog data: a [`TermCourse`] carries the sections
//! the owner would accept, resolved against the term's offering, and the
//! enumeration walks them depth-first, pruning a branch the moment a
//! section clashes with an already-chosen one or with a blockout.
//! Pruning at push time visits exactly the leaves a full cartesian
//! product plus leaf filtering would keep, in the same order.

use crate::catalog::Catalog;
use crate::diag::{DiagnosticsSink, PlannerEvent};
use crate::models::{Blockout, Section, Selection};

use super::{MissingSectionPolicy, PlanError, SearchStats};

/// A course prepared for one term: accepted sections resolved against
/// the term's offering, offering order preserved within the accepted set.
#[derive(Debug)]
pub(super) struct TermCourse<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub sections: Vec<&'a Section>,
}

/// One chosen section inside a term combination.
#[derive(Debug, Clone, Copy)]
pub(super) struct ChosenSection<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub section: &'a Section,
}

/// Resolves each course's accepted sections against one term's offering.
///
/// A course with no accepted section in this term is dropped or fails the
/// whole request, per the policy.
pub(super) fn prepare_term_courses<'a>(
    catalog: &'a Catalog,
    term: &str,
    courses: &[&'a Selection],
    policy: MissingSectionPolicy,
    sink: &mut dyn DiagnosticsSink,
) -> Result<Vec<TermCourse<'a>>, PlanError> {
    let mut prepared = Vec::with_capacity(courses.len());
    for selection in courses {
        let Some(offering) = catalog.offering(&selection.course_code, term) else {
            handle_missing(selection, term, policy, sink)?;
            continue;
        };
        let sections: Vec<&Section> = offering
            .sections
            .iter()
            .filter(|section| selection.accepts(&section.id))
            .collect();
        if sections.is_empty() {
            handle_missing(selection, term, policy, sink)?;
            continue;
        }
        prepared.push(TermCourse {
            code: &selection.course_code,
            title: &offering.title,
            sections,
        });
    }
    Ok(prepared)
}

fn handle_missing(
    selection: &Selection,
    term: &str,
    policy: MissingSectionPolicy,
    sink: &mut dyn DiagnosticsSink,
) -> Result<(), PlanError> {
    match policy {
        MissingSectionPolicy::SkipCourse => {
            log::warn!(
                "course {} has no accepted section in {}, skipping for that term",
                selection.course_code,
                term
            );
            sink.record(PlannerEvent::CourseSkippedForTerm {
                course_code: selection.course_code.clone(),
                term: term.to_string(),
            });
            Ok(())
        }
        MissingSectionPolicy::Strict => Err(PlanError::SectionUnavailable {
            course_code: selection.course_code.clone(),
            term: term.to_string(),
        }),
    }
}

/// Enumerates every conflict-free section combination for one term.
///
/// With no courses this yields the single empty combination, which keeps
/// the cross-term join meaningful for a term nothing was placed in.
pub(super) fn enumerate_term_combinations<'a>(
    courses: &[TermCourse<'a>],
    blockouts: &[&Blockout],
    stats: &mut SearchStats,
) -> Vec<Vec<ChosenSection<'a>>> {
    let mut combinations = Vec::new();
    let mut chosen = Vec::with_capacity(courses.len());
    extend(courses, 0, blockouts, &mut chosen, &mut combinations, stats);
    combinations
}

fn extend<'a>(
    courses: &[TermCourse<'a>],
    index: usize,
    blockouts: &[&Blockout],
    chosen: &mut Vec<ChosenSection<'a>>,
    out: &mut Vec<Vec<ChosenSection<'a>>>,
    stats: &mut SearchStats,
) {
    if index == courses.len() {
        stats.term_combinations += 1;
        out.push(chosen.clone());
        return;
    }
    let course = &courses[index];
    for &section in &course.sections {
        if chosen
            .iter()
            .any(|c| c.section.conflicts_with(section))
        {
            stats.conflict_prunes += 1;
            continue;
        }
        if blockouts.iter().any(|b| section.overlaps_blockout(b)) {
            stats.blockout_prunes += 1;
            continue;
        }
        chosen.push(ChosenSection {
            code: course.code,
            title: course.title,
            section,
        });
        extend(courses, index + 1, blockouts, chosen, out, stats);
        chosen.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SessionRecord;
    use crate::diag::NullSink;
    use crate::models::{DaySet, TermScope, Weekday};
    use chrono::NaiveTime;

    const SEM1: &str = "2025-26 Sem 1";

    fn meeting(code: &str, section: &str, day: Weekday, start: &str, end: &str) -> SessionRecord {
        SessionRecord::new(code, SEM1)
            .with_section(section)
            .with_days(DaySet::single(day))
            .with_times(start, end)
    }

    fn select_any(catalog: &Catalog, code: &str) -> Selection {
        Selection::any_of(catalog.listing(code).expect("course in catalog"))
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_no_courses_yield_single_empty_combination() {
        let mut stats = SearchStats::default();
        let combos = enumerate_term_combinations(&[], &[], &mut stats);
        assert_eq!(combos.len(), 1);
        assert!(combos[0].is_empty());
        assert_eq!(stats.term_combinations, 1);
    }

    #[test]
    fn test_conflicting_branches_are_pruned() {
        let catalog = Catalog::build(&[
            meeting("COMP1117", "L1", Weekday::Mon, "09:00", "10:00"),
            meeting("COMP1117", "L2", Weekday::Mon, "10:00", "11:00"),
            meeting("MATH1013", "L1", Weekday::Mon, "09:30", "10:00"),
        ]);
        let selections = vec![
            select_any(&catalog, "COMP1117"),
            select_any(&catalog, "MATH1013"),
        ];
        let refs: Vec<&Selection> = selections.iter().collect();

        let mut sink = NullSink;
        let mut stats = SearchStats::default();
        let courses = prepare_term_courses(
            &catalog,
            SEM1,
            &refs,
            MissingSectionPolicy::SkipCourse,
            &mut sink,
        )
        .unwrap();
        let combos = enumerate_term_combinations(&courses, &[], &mut stats);

        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0][0].section.id, "L2");
        assert_eq!(combos[0][1].code, "MATH1013");
        assert_eq!(stats.conflict_prunes, 1);
        assert_eq!(stats.term_combinations, 1);
    }

    #[test]
    fn test_blockout_prunes_overlapping_section() {
        let catalog = Catalog::build(&[
            meeting("SOCI1001", "T1", Weekday::Fri, "12:30", "13:30"),
            meeting("SOCI1001", "T2", Weekday::Mon, "09:00", "10:00"),
        ]);
        let selections = vec![select_any(&catalog, "SOCI1001")];
        let refs: Vec<&Selection> = selections.iter().collect();
        let lunch = Blockout::new(Weekday::Fri, t(12, 0), t(13, 0), "lunch", TermScope::Both);
        let blockouts = [&lunch];

        let mut sink = NullSink;
        let mut stats = SearchStats::default();
        let courses = prepare_term_courses(
            &catalog,
            SEM1,
            &refs,
            MissingSectionPolicy::SkipCourse,
            &mut sink,
        )
        .unwrap();
        let combos = enumerate_term_combinations(&courses, &blockouts, &mut stats);

        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0][0].section.id, "T2");
        assert_eq!(stats.blockout_prunes, 1);
    }

    #[test]
    fn test_missing_section_skips_or_errors() {
        let catalog = Catalog::build(&[meeting("COMP1117", "L1", Weekday::Mon, "09:00", "10:00")]);
        let selection = Selection::new("COMP1117")
            .with_section("L9")
            .with_term(SEM1);
        let refs = [&selection];

        let mut events = Vec::new();
        let courses = prepare_term_courses(
            &catalog,
            SEM1,
            &refs,
            MissingSectionPolicy::SkipCourse,
            &mut events,
        )
        .unwrap();
        assert!(courses.is_empty());
        assert_eq!(
            events,
            vec![PlannerEvent::CourseSkippedForTerm {
                course_code: "COMP1117".to_string(),
                term: SEM1.to_string(),
            }]
        );

        let mut sink = NullSink;
        let err = prepare_term_courses(
            &catalog,
            SEM1,
            &refs,
            MissingSectionPolicy::Strict,
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::SectionUnavailable { .. }));
    }

    #[test]
    fn test_section_order_follows_offering() {
        let catalog = Catalog::build(&[
            meeting("COMP1117", "L2", Weekday::Mon, "10:00", "11:00"),
            meeting("COMP1117", "L1", Weekday::Tue, "09:00", "10:00"),
        ]);
        // accepted set listed in the opposite order
        let selection = Selection::new("COMP1117")
            .with_sections(["L1", "L2"])
            .with_term(SEM1);
        let refs = [&selection];

        let mut sink = NullSink;
        let courses = prepare_term_courses(
            &catalog,
            SEM1,
            &refs,
            MissingSectionPolicy::SkipCourse,
            &mut sink,
        )
        .unwrap();
        let ids: Vec<&str> = courses[0].sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["L2", "L1"]);
    }
}
