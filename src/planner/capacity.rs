//! Selection classification and flexible-course distribution.
//!
//! Classification decides which term(s) each selection can legally occupy;
//! distribution then enumerates every way to split the flexible courses
//! across the two terms without exceeding the open slots of either.

use crate::catalog::{ActiveTerms, Catalog};
use crate::diag::{DiagnosticsSink, PlannerEvent};
use crate::models::{Selection, TermSlot};

use super::SearchStats;

/// Selections bucketed by the terms they can occupy.
///
/// Year-long courses occupy a slot in both terms. A course lands in
/// `flexible` only when an accepted section actually exists in both active
/// terms' offerings; offered-but-unacceptable terms do not count.
#[derive(Debug)]
pub(super) struct ClassifiedSelections<'a> {
    pub year_long: Vec<&'a Selection>,
    pub first_only: Vec<&'a Selection>,
    pub second_only: Vec<&'a Selection>,
    pub flexible: Vec<&'a Selection>,
}

pub(super) fn classify<'a>(
    catalog: &Catalog,
    selections: &'a [Selection],
    active: &ActiveTerms,
    sink: &mut dyn DiagnosticsSink,
) -> ClassifiedSelections<'a> {
    let mut classified = ClassifiedSelections {
        year_long: Vec::new(),
        first_only: Vec::new(),
        second_only: Vec::new(),
        flexible: Vec::new(),
    };

    for selection in selections {
        if selection.is_year_long() {
            classified.year_long.push(selection);
            continue;
        }

        let mut in_first = false;
        let mut in_second = false;
        for term in &selection.terms_offered {
            match active.slot_of(term) {
                Some(TermSlot::First) => {
                    in_first = in_first || has_accepted_section(catalog, selection, term);
                }
                Some(TermSlot::Second) => {
                    in_second = in_second || has_accepted_section(catalog, selection, term);
                }
                None => {}
            }
        }

        match (in_first, in_second) {
            (true, true) => classified.flexible.push(selection),
            (true, false) => classified.first_only.push(selection),
            (false, true) => classified.second_only.push(selection),
            (false, false) => {
                log::warn!(
                    "course {} matches no active term, excluded from search",
                    selection.course_code
                );
                sink.record(PlannerEvent::CourseUnmatched {
                    course_code: selection.course_code.clone(),
                });
            }
        }
    }

    classified
}

fn has_accepted_section(catalog: &Catalog, selection: &Selection, term: &str) -> bool {
    catalog
        .offering(&selection.course_code, term)
        .is_some_and(|offering| {
            selection
                .section_ids
                .iter()
                .any(|id| offering.has_section(id))
        })
}

/// One split of the flexible courses across the active terms.
#[derive(Debug)]
pub(super) struct Distribution<'a> {
    pub first: Vec<&'a Selection>,
    pub second: Vec<&'a Selection>,
}

/// Enumerates every admissible split, first-term branch before second.
///
/// Slot limits prune during the walk, so a split never exceeds either
/// term's open slots. With no flexible courses this yields the single
/// empty split.
pub(super) fn enumerate_distributions<'a>(
    flexible: &[&'a Selection],
    slots_first: usize,
    slots_second: usize,
    stats: &mut SearchStats,
) -> Vec<Distribution<'a>> {
    let mut out = Vec::new();
    let mut first = Vec::new();
    let mut second = Vec::new();
    split(
        flexible,
        0,
        slots_first,
        slots_second,
        &mut first,
        &mut second,
        &mut out,
        stats,
    );
    out
}

#[allow(clippy::too_many_arguments)]
fn split<'a>(
    flexible: &[&'a Selection],
    index: usize,
    slots_first: usize,
    slots_second: usize,
    first: &mut Vec<&'a Selection>,
    second: &mut Vec<&'a Selection>,
    out: &mut Vec<Distribution<'a>>,
    stats: &mut SearchStats,
) {
    if index == flexible.len() {
        stats.distributions += 1;
        out.push(Distribution {
            first: first.clone(),
            second: second.clone(),
        });
        return;
    }
    let course = flexible[index];
    if first.len() < slots_first {
        first.push(course);
        split(
            flexible,
            index + 1,
            slots_first,
            slots_second,
            first,
            second,
            out,
            stats,
        );
        first.pop();
    }
    if second.len() < slots_second {
        second.push(course);
        split(
            flexible,
            index + 1,
            slots_first,
            slots_second,
            first,
            second,
            out,
            stats,
        );
        second.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SessionRecord;
    use crate::diag::NullSink;
    use crate::models::{DaySet, Weekday};

    const SEM1: &str = "2025-26 Sem 1";
    const SEM2: &str = "2025-26 Sem 2";

    fn record(code: &str, term: &str, section: &str) -> SessionRecord {
        SessionRecord::new(code, term)
            .with_section(section)
            .with_days(DaySet::single(Weekday::Mon))
            .with_times("09:00", "10:00")
    }

    fn select_any(catalog: &Catalog, code: &str) -> Selection {
        Selection::any_of(catalog.listing(code).expect("course in catalog"))
    }

    #[test]
    fn test_classification_buckets() {
        let catalog = Catalog::build(&[
            record("BIOC2600FY", SEM1, "L1"),
            record("COMP1117", SEM1, "L1"),
            record("MATH1013", SEM2, "L1"),
            record("CHEM1042", SEM1, "L1"),
            record("CHEM1042", SEM2, "L1"),
        ]);
        let selections = vec![
            select_any(&catalog, "BIOC2600FY"),
            select_any(&catalog, "COMP1117"),
            select_any(&catalog, "MATH1013"),
            select_any(&catalog, "CHEM1042"),
        ];
        let active = catalog.active_terms().unwrap();

        let mut sink = NullSink;
        let classified = classify(&catalog, &selections, active, &mut sink);
        assert_eq!(classified.year_long.len(), 1);
        assert_eq!(classified.first_only.len(), 1);
        assert_eq!(classified.second_only.len(), 1);
        assert_eq!(classified.flexible.len(), 1);
        assert_eq!(classified.flexible[0].course_code, "CHEM1042");
    }

    #[test]
    fn test_flexibility_requires_accepted_section_in_both_terms() {
        // CHEM1042 runs in both terms, but only the L1 section is accepted
        // and L1 exists solely in term 1.
        let catalog = Catalog::build(&[
            record("CHEM1042", SEM1, "L1"),
            record("CHEM1042", SEM2, "L2"),
        ]);
        let selections = vec![Selection::new("CHEM1042")
            .with_section("L1")
            .with_term(SEM1)
            .with_term(SEM2)];
        let active = catalog.active_terms().unwrap();

        let mut sink = NullSink;
        let classified = classify(&catalog, &selections, active, &mut sink);
        assert!(classified.flexible.is_empty());
        assert_eq!(classified.first_only.len(), 1);
    }

    #[test]
    fn test_unmatched_selection_is_reported_and_excluded() {
        let catalog = Catalog::build(&[record("COMP1117", SEM1, "L1")]);
        let selections = vec![Selection::new("GHOST1000").with_section("L1")];
        let active = catalog.active_terms().unwrap();

        let mut events = Vec::new();
        let classified = classify(&catalog, &selections, active, &mut events);
        assert!(classified.first_only.is_empty());
        assert!(classified.flexible.is_empty());
        assert_eq!(
            events,
            vec![PlannerEvent::CourseUnmatched {
                course_code: "GHOST1000".to_string()
            }]
        );
    }

    #[test]
    fn test_distributions_respect_slot_limits() {
        let a = Selection::new("AAAA1000");
        let b = Selection::new("BBBB1000");
        let flexible = vec![&a, &b];

        let mut stats = SearchStats::default();
        let splits = enumerate_distributions(&flexible, 1, 1, &mut stats);
        assert_eq!(splits.len(), 2);
        assert_eq!(stats.distributions, 2);

        // first branch explores the first term first
        assert_eq!(splits[0].first[0].course_code, "AAAA1000");
        assert_eq!(splits[0].second[0].course_code, "BBBB1000");
        assert_eq!(splits[1].first[0].course_code, "BBBB1000");
        assert_eq!(splits[1].second[0].course_code, "AAAA1000");
    }

    #[test]
    fn test_distributions_exhaust_when_slots_allow() {
        let a = Selection::new("AAAA1000");
        let b = Selection::new("BBBB1000");
        let flexible = vec![&a, &b];

        let mut stats = SearchStats::default();
        let splits = enumerate_distributions(&flexible, 2, 2, &mut stats);
        assert_eq!(splits.len(), 4);

        let singles = enumerate_distributions(&flexible, 2, 0, &mut stats);
        assert_eq!(singles.len(), 1);
        assert_eq!(singles[0].first.len(), 2);
        assert!(singles[0].second.is_empty());
    }

    #[test]
    fn test_no_flexible_courses_yield_one_empty_split() {
        let mut stats = SearchStats::default();
        let splits = enumerate_distributions(&[], 6, 6, &mut stats);
        assert_eq!(splits.len(), 1);
        assert!(splits[0].first.is_empty());
        assert!(splits[0].second.is_empty());
    }
}
