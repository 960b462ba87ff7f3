//! Course sections: an enrollable unit and its weekly sessions.

use serde::{Deserialize, Serialize};

use super::blockout::Blockout;
use super::session::Session;

/// One enrollable section of a course within a term.
///
/// A section bundles every weekly session a student in it attends
/// (lecture plus its fixed tutorial slot, for example). Choosing a
/// section means attending all of its sessions, so conflict tests run
/// across the full cross product of two sections' session lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier as published ("L1", "2A").
    pub id: String,
    /// Weekly sessions, in timetable order.
    pub sessions: Vec<Session>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sessions: Vec::new(),
        }
    }

    /// Adds a session, builder style.
    pub fn with_session(mut self, session: Session) -> Self {
        self.sessions.push(session);
        self
    }

    /// Adds a session.
    pub fn push_session(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Whether any session of `self` conflicts with any session of `other`.
    pub fn conflicts_with(&self, other: &Section) -> bool {
        self.sessions
            .iter()
            .any(|a| other.sessions.iter().any(|b| a.conflicts_with(b)))
    }

    /// Whether any session of the section overlaps the blockout window.
    pub fn overlaps_blockout(&self, blockout: &Blockout) -> bool {
        self.sessions.iter().any(|s| s.overlaps_blockout(blockout))
    }
}

#[cfg(test)]
mod tests {
    use super::super::blockout::TermScope;
    use super::super::session::{DaySet, Weekday};
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn session(day: Weekday, start: NaiveTime, end: NaiveTime) -> Session {
        Session::new("2025-26 Sem 1")
            .with_days(DaySet::single(day))
            .with_time_range(start, end)
    }

    #[test]
    fn test_single_session_sections_conflict() {
        let a = Section::new("L1").with_session(session(Weekday::Mon, t(9, 0), t(10, 0)));
        let b = Section::new("L2").with_session(session(Weekday::Mon, t(9, 30), t(10, 30)));
        let c = Section::new("L3").with_session(session(Weekday::Tue, t(9, 0), t(10, 0)));

        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn test_conflict_through_any_session_pair() {
        // Lecture is clear, but the tutorial collides.
        let a = Section::new("L1")
            .with_session(session(Weekday::Mon, t(9, 0), t(10, 0)))
            .with_session(session(Weekday::Thu, t(14, 0), t(15, 0)));
        let b = Section::new("L1")
            .with_session(session(Weekday::Wed, t(9, 0), t(10, 0)))
            .with_session(session(Weekday::Thu, t(14, 30), t(15, 30)));

        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn test_section_blockout_overlap() {
        let section = Section::new("T2")
            .with_session(session(Weekday::Mon, t(9, 0), t(10, 0)))
            .with_session(session(Weekday::Fri, t(12, 30), t(13, 30)));
        let lunch = Blockout::new(
            Weekday::Fri,
            t(12, 0),
            t(13, 0),
            "lunch",
            TermScope::Both,
        );

        assert!(section.overlaps_blockout(&lunch));

        let clear = Section::new("T1").with_session(session(Weekday::Mon, t(9, 0), t(10, 0)));
        assert!(!clear.overlaps_blockout(&lunch));
    }
}
