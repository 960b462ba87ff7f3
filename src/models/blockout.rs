//! User-declared blocked-out time windows.
//!
//! A blockout is a weekly window (day + time range) the owner refuses to
//! have classes in. Each blockout is scoped to the first active term, the
//! second, or both; the scope defaults to both when absent, so carts saved
//! before scoping existed still load.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::session::Weekday;

/// Position of a term within the active pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSlot {
    First,
    Second,
}

/// Which of the two active terms a blockout applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermScope {
    /// First active term only.
    Term1,
    /// Second active term only.
    Term2,
    /// Both active terms.
    #[default]
    Both,
}

impl TermScope {
    /// Whether the scope covers the given slot of the active pair.
    pub fn applies_to(&self, slot: TermSlot) -> bool {
        matches!(
            (self, slot),
            (TermScope::Both, _)
                | (TermScope::Term1, TermSlot::First)
                | (TermScope::Term2, TermSlot::Second)
        )
    }
}

/// A weekly window no scheduled session may overlap.
///
/// The time range is half-open, like session times: a session ending
/// exactly when the blockout starts is acceptable. `start_time` is
/// expected to precede `end_time`; [`crate::validation`] reports windows
/// that violate this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockout {
    /// Day of the week the window recurs on.
    pub day: Weekday,
    /// Start of the window.
    pub start_time: NaiveTime,
    /// End of the window.
    pub end_time: NaiveTime,
    /// Display label ("lunch", "part-time job").
    pub label: String,
    /// Terms the window applies to. Defaults to both.
    #[serde(default)]
    pub scope: TermScope,
}

impl Blockout {
    /// Creates a blockout.
    pub fn new(
        day: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        label: impl Into<String>,
        scope: TermScope,
    ) -> Self {
        Self {
            day,
            start_time,
            end_time,
            label: label.into(),
            scope,
        }
    }

    /// Creates a blockout covering both terms.
    pub fn weekly(
        day: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        label: impl Into<String>,
    ) -> Self {
        Self::new(day, start_time, end_time, label, TermScope::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_applies_to_slots() {
        assert!(TermScope::Both.applies_to(TermSlot::First));
        assert!(TermScope::Both.applies_to(TermSlot::Second));
        assert!(TermScope::Term1.applies_to(TermSlot::First));
        assert!(!TermScope::Term1.applies_to(TermSlot::Second));
        assert!(TermScope::Term2.applies_to(TermSlot::Second));
        assert!(!TermScope::Term2.applies_to(TermSlot::First));
    }

    #[test]
    fn test_missing_scope_deserializes_as_both() {
        let json = r#"{
            "day": "fri",
            "start_time": "12:00:00",
            "end_time": "13:00:00",
            "label": "lunch"
        }"#;
        let blockout: Blockout = serde_json::from_str(json).unwrap();
        assert_eq!(blockout.scope, TermScope::Both);
        assert_eq!(blockout.day, Weekday::Fri);
    }

    #[test]
    fn test_scope_round_trips() {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let blockout = Blockout::new(Weekday::Wed, t(9), t(11), "clinic", TermScope::Term2);
        let json = serde_json::to_string(&blockout).unwrap();
        let back: Blockout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blockout);
    }
}
