//! Catalog construction from raw timetable rows.
//!
//! The university publishes one spreadsheet row per (course, section,
//! weekly meeting pattern). [`Catalog::build`] turns those rows into the
//! planner's view of a teaching year:
//!
//! - keeps undergraduate careers only and drops summer terms
//! - groups rows into per-term [`CourseOffering`]s and their sections
//! - derives the two active terms (lexical order of the distinct labels)
//! - synthesizes second-term offerings for year-long courses published
//!   under the first term only
//! - aggregates a per-code [`CourseListing`] index for selection UIs
//!
//! Times and dates arrive as strings in whatever shape the export used;
//! unparseable values degrade to `None` with a warning rather than
//! failing the build.

use std::collections::HashMap;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{CourseListing, CourseOffering, DaySet, Section, Session, TermSlot};

// ================================
// Raw Record
// ================================

/// One ingested timetable row, fields still raw.
///
/// Ingestion (or a test) fills this in; [`Catalog::build`] does the
/// filtering and parsing. Records serialize deterministically, which the
/// dataset fingerprint in [`crate::storage`] relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Academic career code ("UG", "TPG", ...).
    pub career: String,
    /// Term label ("2025-26 Sem 1").
    pub term: String,
    /// Course code. Rows without one are dropped at build.
    pub course_code: String,
    /// Section id within the course.
    pub section_id: String,
    /// Course title.
    pub course_title: String,
    /// Offering department.
    pub department: String,
    /// Active weekdays of the meeting pattern.
    pub days: DaySet,
    /// Raw start time of day.
    pub start_time: String,
    /// Raw end time of day.
    pub end_time: String,
    /// Raw first meeting date.
    pub start_date: String,
    /// Raw last meeting date.
    pub end_date: String,
    /// Venue, free text.
    pub venue: String,
}

impl SessionRecord {
    /// Creates an undergraduate record with the given code and term.
    pub fn new(course_code: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            career: "UG".to_string(),
            term: term.into(),
            course_code: course_code.into(),
            section_id: String::new(),
            course_title: String::new(),
            department: String::new(),
            days: DaySet::new(),
            start_time: String::new(),
            end_time: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            venue: String::new(),
        }
    }

    /// Sets the career code.
    pub fn with_career(mut self, career: impl Into<String>) -> Self {
        self.career = career.into();
        self
    }

    /// Sets the section id.
    pub fn with_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = section_id.into();
        self
    }

    /// Sets the course title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.course_title = title.into();
        self
    }

    /// Sets the offering department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the active weekdays.
    pub fn with_days(mut self, days: DaySet) -> Self {
        self.days = days;
        self
    }

    /// Sets the raw time-of-day range.
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    /// Sets the raw date range.
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    /// Sets the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }
}

// ================================
// Filters and Parsing
// ================================

const UNDERGRADUATE_CAREERS: [&str; 3] = ["UG", "UGME", "UGDE"];

fn is_undergraduate(career: &str) -> bool {
    UNDERGRADUATE_CAREERS.contains(&career.trim())
}

fn is_summer_term(term: &str) -> bool {
    let term = term.to_lowercase();
    term.contains("summer") || term.contains("sum sem")
}

/// Accepts `HH:MM`, `HH:MM:SS`, or a spreadsheet serial (fraction of a day).
fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(raw, format) {
            return Some(time);
        }
    }
    if let Ok(fraction) = raw.parse::<f64>() {
        if (0.0..1.0).contains(&fraction) {
            let seconds = (fraction * 86_400.0).round() as u32;
            return NaiveTime::from_num_seconds_from_midnight_opt(seconds % 86_400, 0);
        }
    }
    None
}

/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, or a spreadsheet serial
/// (days since 1899-12-30).
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    if let Ok(serial) = raw.parse::<i64>() {
        if serial > 0 {
            return NaiveDate::from_ymd_opt(1899, 12, 30)
                .and_then(|epoch| epoch.checked_add_days(Days::new(serial as u64)));
        }
    }
    None
}

fn session_from_record(record: &SessionRecord) -> Session {
    let mut start_time = parse_time_of_day(&record.start_time);
    let mut end_time = parse_time_of_day(&record.end_time);
    if !record.start_time.trim().is_empty() && start_time.is_none() {
        log::warn!(
            "unparseable start time '{}' for {} {}",
            record.start_time,
            record.course_code,
            record.section_id
        );
    }
    if !record.end_time.trim().is_empty() && end_time.is_none() {
        log::warn!(
            "unparseable end time '{}' for {} {}",
            record.end_time,
            record.course_code,
            record.section_id
        );
    }
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if start >= end {
            log::warn!(
                "inverted time range {}..{} for {} {}, dropping times",
                start,
                end,
                record.course_code,
                record.section_id
            );
            start_time = None;
            end_time = None;
        }
    }

    Session {
        term: record.term.clone(),
        days: record.days,
        start_time,
        end_time,
        start_date: parse_calendar_date(&record.start_date),
        end_date: parse_calendar_date(&record.end_date),
        venue: record.venue.clone(),
    }
}

// ================================
// Active Terms
// ================================

/// The year's active terms, lexical order, at most two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTerms {
    first: String,
    second: Option<String>,
}

impl ActiveTerms {
    /// Creates an active-term pair.
    pub fn new(first: impl Into<String>, second: Option<String>) -> Self {
        Self {
            first: first.into(),
            second,
        }
    }

    /// First active term label.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Second active term label, absent in a single-term year.
    pub fn second(&self) -> Option<&str> {
        self.second.as_deref()
    }

    /// Which slot a term label occupies, if any.
    pub fn slot_of(&self, term: &str) -> Option<TermSlot> {
        if term == self.first {
            Some(TermSlot::First)
        } else if self.second.as_deref() == Some(term) {
            Some(TermSlot::Second)
        } else {
            None
        }
    }

    /// Term label for a slot.
    pub fn label(&self, slot: TermSlot) -> Option<&str> {
        match slot {
            TermSlot::First => Some(&self.first),
            TermSlot::Second => self.second.as_deref(),
        }
    }
}

// ================================
// Catalog
// ================================

/// The planner's view of one teaching year.
///
/// # Examples
///
/// ```
/// use term_planner::catalog::{Catalog, SessionRecord};
///
/// let records = vec![
///     SessionRecord::new("COMP1117", "2025-26 Sem 1").with_section("L1"),
///     SessionRecord::new("COMP1117", "2025-26 Sem 2").with_section("L2"),
/// ];
/// let catalog = Catalog::build(&records);
///
/// assert_eq!(catalog.terms(), ["2025-26 Sem 1", "2025-26 Sem 2"]);
/// assert!(catalog.offering("COMP1117", "2025-26 Sem 1").is_some());
/// assert_eq!(catalog.courses().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offerings: Vec<CourseOffering>,
    index: HashMap<(String, String), usize>,
    terms: Vec<String>,
    active: Option<ActiveTerms>,
    courses: Vec<CourseListing>,
}

impl Catalog {
    /// Builds a catalog from raw rows.
    ///
    /// Keeps undergraduate careers, drops summer terms, silently drops
    /// rows without a course code, groups the rest by (course, term),
    /// then synthesizes second-term offerings for year-long courses that
    /// the source publishes under the first term only. Existing
    /// second-term data is never overwritten.
    pub fn build(records: &[SessionRecord]) -> Catalog {
        let retained: Vec<&SessionRecord> = records
            .iter()
            .filter(|r| {
                !r.course_code.is_empty()
                    && is_undergraduate(&r.career)
                    && !is_summer_term(&r.term)
            })
            .collect();

        let mut terms: Vec<String> = Vec::new();
        for record in &retained {
            if !record.term.is_empty() && !terms.contains(&record.term) {
                terms.push(record.term.clone());
            }
        }
        terms.sort();

        let active = terms
            .first()
            .map(|first| ActiveTerms::new(first.clone(), terms.get(1).cloned()));

        let mut offerings: Vec<CourseOffering> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();
        for record in &retained {
            let key = (record.course_code.clone(), record.term.clone());
            let offering_idx = match index.get(&key) {
                Some(idx) => *idx,
                None => {
                    offerings.push(CourseOffering::new(
                        record.course_code.as_str(),
                        record.course_title.as_str(),
                        record.department.as_str(),
                        record.term.as_str(),
                    ));
                    index.insert(key, offerings.len() - 1);
                    offerings.len() - 1
                }
            };
            let offering = &mut offerings[offering_idx];
            let section_idx = match offering
                .sections
                .iter()
                .position(|s| s.id == record.section_id)
            {
                Some(idx) => idx,
                None => {
                    offering.sections.push(Section::new(record.section_id.as_str()));
                    offering.sections.len() - 1
                }
            };
            offering.sections[section_idx].push_session(session_from_record(record));
        }

        if let Some(second) = active.as_ref().and_then(|a| a.second().map(str::to_string)) {
            let first = active
                .as_ref()
                .map(|a| a.first().to_string())
                .unwrap_or_default();
            let mut synthesized: Vec<CourseOffering> = Vec::new();
            for offering in &offerings {
                if !offering.is_year_long() || offering.term != first {
                    continue;
                }
                if index.contains_key(&(offering.code.clone(), second.clone())) {
                    continue;
                }
                let mut copy = offering.clone();
                copy.term = second.clone();
                for section in &mut copy.sections {
                    for session in &mut section.sessions {
                        session.term = second.clone();
                    }
                }
                synthesized.push(copy);
            }
            for offering in synthesized {
                index.insert((offering.code.clone(), offering.term.clone()), offerings.len());
                offerings.push(offering);
            }
        }

        let mut courses: Vec<CourseListing> = Vec::new();
        let mut listing_index: HashMap<String, usize> = HashMap::new();
        for offering in &offerings {
            let listing_idx = match listing_index.get(offering.code.as_str()) {
                Some(idx) => *idx,
                None => {
                    courses.push(CourseListing {
                        code: offering.code.clone(),
                        title: offering.title.clone(),
                        department: offering.department.clone(),
                        terms: Vec::new(),
                        section_ids: Vec::new(),
                    });
                    listing_index.insert(offering.code.clone(), courses.len() - 1);
                    courses.len() - 1
                }
            };
            let listing = &mut courses[listing_idx];
            if !listing.terms.contains(&offering.term) {
                listing.terms.push(offering.term.clone());
            }
            for section in &offering.sections {
                if !listing.section_ids.contains(&section.id) {
                    listing.section_ids.push(section.id.clone());
                }
            }
        }
        courses.sort_by(|a, b| a.code.cmp(&b.code));

        Catalog {
            offerings,
            index,
            terms,
            active,
            courses,
        }
    }

    /// Looks up a course offering by code and term.
    pub fn offering(&self, code: &str, term: &str) -> Option<&CourseOffering> {
        self.index
            .get(&(code.to_string(), term.to_string()))
            .map(|idx| &self.offerings[*idx])
    }

    /// All offerings, native ones first, synthesized year-long copies last.
    pub fn offerings(&self) -> &[CourseOffering] {
        &self.offerings
    }

    /// Distinct retained term labels, lexically sorted. The first two are
    /// the active pair; later terms stay queryable but are never planned.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The at-most-two active terms the planner works over.
    pub fn active_terms(&self) -> Option<&ActiveTerms> {
        self.active.as_ref()
    }

    /// Unique course listings, sorted by code.
    pub fn courses(&self) -> &[CourseListing] {
        &self.courses
    }

    /// Looks up the aggregate listing for a course code.
    pub fn listing(&self, code: &str) -> Option<&CourseListing> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Number of distinct courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog holds no offerings.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}
