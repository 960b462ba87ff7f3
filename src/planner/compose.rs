//! Cross-term join, continuity and completeness filters, balance ranking.

use std::collections::BTreeSet;

use crate::catalog::{ActiveTerms, Catalog};
use crate::diag::DiagnosticsSink;
use crate::models::{Blockout, CoursePlan, PlanEntry, TermSlot};

use super::assignment::{enumerate_term_combinations, prepare_term_courses, ChosenSection};
use super::capacity::{ClassifiedSelections, Distribution};
use super::{MissingSectionPolicy, PlanError, SearchStats};

/// Joins per-term assignments into ranked whole-year plans.
pub(super) struct Composer<'a> {
    pub catalog: &'a Catalog,
    pub active: &'a ActiveTerms,
    pub classified: ClassifiedSelections<'a>,
    pub blockouts: &'a [Blockout],
    /// Every originally selected course code; completeness compares
    /// against this, so skipped and unmatched courses still count.
    pub expected_codes: BTreeSet<&'a str>,
    pub policy: MissingSectionPolicy,
}

impl<'a> Composer<'a> {
    /// Runs the per-term searches for every distribution and joins them.
    ///
    /// Per-term course order is year-long, then term-fixed, then the
    /// distribution's flexible courses. The join iterates first-term
    /// combinations in the outer loop, so output order follows the
    /// first term's enumeration, and the final stable sort keeps that
    /// order among equally balanced plans.
    pub fn compose(
        &self,
        distributions: &[Distribution<'a>],
        stats: &mut SearchStats,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<Vec<CoursePlan>, PlanError> {
        let first_term = self.active.first();
        let second_term = self.active.second();
        let first_blockouts: Vec<&Blockout> = self
            .blockouts
            .iter()
            .filter(|b| b.scope.applies_to(TermSlot::First))
            .collect();
        let second_blockouts: Vec<&Blockout> = self
            .blockouts
            .iter()
            .filter(|b| b.scope.applies_to(TermSlot::Second))
            .collect();

        let mut plans = Vec::new();
        for distribution in distributions {
            let mut first_courses = Vec::new();
            first_courses.extend(&self.classified.year_long);
            first_courses.extend(&self.classified.first_only);
            first_courses.extend(&distribution.first);
            let prepared = prepare_term_courses(
                self.catalog,
                first_term,
                &first_courses,
                self.policy,
                sink,
            )?;
            let first_combos = enumerate_term_combinations(&prepared, &first_blockouts, stats);

            let second_combos = match second_term {
                Some(term) => {
                    let mut second_courses = Vec::new();
                    second_courses.extend(&self.classified.year_long);
                    second_courses.extend(&self.classified.second_only);
                    second_courses.extend(&distribution.second);
                    let prepared = prepare_term_courses(
                        self.catalog,
                        term,
                        &second_courses,
                        self.policy,
                        sink,
                    )?;
                    enumerate_term_combinations(&prepared, &second_blockouts, stats)
                }
                None => vec![Vec::new()],
            };

            for first_choice in &first_combos {
                for second_choice in &second_combos {
                    if !self.year_long_continuity_holds(first_choice, second_choice) {
                        stats.continuity_rejections += 1;
                        continue;
                    }
                    let plan =
                        self.build_plan(first_term, second_term, first_choice, second_choice);
                    if !self.is_complete(&plan) {
                        stats.incomplete_plans += 1;
                        continue;
                    }
                    plans.push(plan);
                }
            }
        }

        rank_by_balance(&mut plans, first_term, second_term);
        Ok(plans)
    }

    /// A year-long course chosen in both terms must keep one section id.
    fn year_long_continuity_holds(
        &self,
        first: &[ChosenSection],
        second: &[ChosenSection],
    ) -> bool {
        for selection in &self.classified.year_long {
            let code = selection.course_code.as_str();
            let in_first = first.iter().find(|c| c.code == code);
            let in_second = second.iter().find(|c| c.code == code);
            if let (Some(a), Some(b)) = (in_first, in_second) {
                if a.section.id != b.section.id {
                    return false;
                }
            }
        }
        true
    }

    fn build_plan(
        &self,
        first_term: &str,
        second_term: Option<&str>,
        first: &[ChosenSection],
        second: &[ChosenSection],
    ) -> CoursePlan {
        let mut entries = Vec::with_capacity(first.len() + second.len());
        for chosen in first {
            entries.push(entry_for(chosen, first_term));
        }
        if let Some(term) = second_term {
            for chosen in second {
                entries.push(entry_for(chosen, term));
            }
        }
        CoursePlan::new(entries)
    }

    /// Complete = covers every selected code, and every year-long course
    /// holds an entry in each active term.
    fn is_complete(&self, plan: &CoursePlan) -> bool {
        let codes: BTreeSet<&str> = plan
            .entries
            .iter()
            .map(|e| e.course_code.as_str())
            .collect();
        if codes != self.expected_codes {
            return false;
        }
        if let Some(second_term) = self.active.second() {
            for selection in &self.classified.year_long {
                let code = selection.course_code.as_str();
                if plan.entry(code, self.active.first()).is_none()
                    || plan.entry(code, second_term).is_none()
                {
                    return false;
                }
            }
        }
        true
    }
}

fn entry_for(chosen: &ChosenSection, term: &str) -> PlanEntry {
    PlanEntry {
        course_code: chosen.code.to_string(),
        course_title: chosen.title.to_string(),
        term: term.to_string(),
        section_id: chosen.section.id.clone(),
        sessions: chosen.section.sessions.clone(),
    }
}

/// Ascending variance of per-term course counts; stable, so ties keep
/// generation order.
fn rank_by_balance(plans: &mut [CoursePlan], first_term: &str, second_term: Option<&str>) {
    plans.sort_by(|a, b| {
        let va = balance_variance(a, first_term, second_term);
        let vb = balance_variance(b, first_term, second_term);
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Population variance of the per-term course counts, over every active
/// term. A term with no entries counts zero, so a lopsided plan scores
/// worse than a balanced one.
pub(super) fn balance_variance(
    plan: &CoursePlan,
    first_term: &str,
    second_term: Option<&str>,
) -> f64 {
    let mut counts = vec![plan.count_in_term(first_term) as f64];
    if let Some(term) = second_term {
        counts.push(plan.count_in_term(term) as f64);
    }
    let mean = counts.iter().sum::<f64>() / counts.len() as f64;
    counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / counts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, term: &str) -> PlanEntry {
        PlanEntry {
            course_code: code.to_string(),
            course_title: format!("{code} title"),
            term: term.to_string(),
            section_id: "L1".to_string(),
            sessions: Vec::new(),
        }
    }

    fn plan_with_counts(first: usize, second: usize) -> CoursePlan {
        let mut entries = Vec::new();
        for i in 0..first {
            entries.push(entry(&format!("AAAA100{i}"), "Sem 1"));
        }
        for i in 0..second {
            entries.push(entry(&format!("BBBB100{i}"), "Sem 2"));
        }
        CoursePlan::new(entries)
    }

    #[test]
    fn test_balance_variance_counts_empty_terms() {
        let balanced = plan_with_counts(3, 3);
        assert_eq!(balance_variance(&balanced, "Sem 1", Some("Sem 2")), 0.0);

        let uneven = plan_with_counts(4, 2);
        assert_eq!(balance_variance(&uneven, "Sem 1", Some("Sem 2")), 1.0);

        // everything in one term is maximally unbalanced, not variance zero
        let lopsided = plan_with_counts(2, 0);
        assert_eq!(balance_variance(&lopsided, "Sem 1", Some("Sem 2")), 1.0);
    }

    #[test]
    fn test_balance_variance_single_term_is_zero() {
        let plan = plan_with_counts(4, 0);
        assert_eq!(balance_variance(&plan, "Sem 1", None), 0.0);
    }

    #[test]
    fn test_ranking_is_stable_for_ties() {
        let lopsided_a = plan_with_counts(2, 0);
        let balanced = plan_with_counts(1, 1);
        let lopsided_b = plan_with_counts(0, 2);
        let mut plans = vec![lopsided_a.clone(), balanced.clone(), lopsided_b.clone()];

        rank_by_balance(&mut plans, "Sem 1", Some("Sem 2"));
        assert_eq!(plans[0], balanced);
        assert_eq!(plans[1], lopsided_a);
        assert_eq!(plans[2], lopsided_b);
    }
}
