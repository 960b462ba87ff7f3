//! Per-term course caps and the overload policy.
//!
//! The standard load is six courses per term. Students with overload
//! approval may raise the cap, but only within the approvable band of
//! seven to eleven courses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected course-cap request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error(
        "overload cap must be between {min} and {max} courses per term, got {requested}",
        min = TermCapacity::OVERLOAD_MIN,
        max = TermCapacity::OVERLOAD_MAX
    )]
    OutOfRange { requested: usize },
}

/// Validated per-term course cap.
///
/// # Examples
///
/// ```
/// use term_planner::models::TermCapacity;
///
/// assert_eq!(TermCapacity::standard().max_per_term(), 6);
/// assert_eq!(TermCapacity::overload(8).unwrap().max_per_term(), 8);
/// assert!(TermCapacity::overload(12).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCapacity {
    max_per_term: usize,
}

impl TermCapacity {
    /// Standard load without overload approval.
    pub const STANDARD: usize = 6;
    /// Smallest cap an overload approval can grant.
    pub const OVERLOAD_MIN: usize = 7;
    /// Largest cap an overload approval can grant.
    pub const OVERLOAD_MAX: usize = 11;

    /// The standard six-course cap.
    pub fn standard() -> Self {
        Self {
            max_per_term: Self::STANDARD,
        }
    }

    /// An overload cap, validated against the approvable band.
    pub fn overload(max_per_term: usize) -> Result<Self, CapacityError> {
        if (Self::OVERLOAD_MIN..=Self::OVERLOAD_MAX).contains(&max_per_term) {
            Ok(Self { max_per_term })
        } else {
            Err(CapacityError::OutOfRange {
                requested: max_per_term,
            })
        }
    }

    /// Maximum number of courses a single term may hold.
    pub fn max_per_term(&self) -> usize {
        self.max_per_term
    }
}

impl Default for TermCapacity {
    fn default() -> Self {
        Self::standard()
    }
}

/// Capacity settings as stored and exchanged.
///
/// `max_per_term` is only honored while `overload_enabled` is set;
/// disabling overload always resolves to the standard cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Whether overload approval is in effect.
    pub overload_enabled: bool,
    /// Requested cap while overloaded. Defaults to the minimum overload.
    pub max_per_term: Option<usize>,
}

impl CapacityConfig {
    /// Resolves the settings into a validated cap.
    pub fn resolve(&self) -> Result<TermCapacity, CapacityError> {
        if !self.overload_enabled {
            return Ok(TermCapacity::standard());
        }
        let requested = self.max_per_term.unwrap_or(TermCapacity::OVERLOAD_MIN);
        TermCapacity::overload(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overload_band() {
        assert!(TermCapacity::overload(7).is_ok());
        assert!(TermCapacity::overload(11).is_ok());
        assert_eq!(
            TermCapacity::overload(6),
            Err(CapacityError::OutOfRange { requested: 6 })
        );
        assert!(TermCapacity::overload(12).is_err());
        assert!(TermCapacity::overload(0).is_err());
    }

    #[test]
    fn test_config_resolution() {
        let disabled = CapacityConfig {
            overload_enabled: false,
            max_per_term: Some(11),
        };
        assert_eq!(disabled.resolve(), Ok(TermCapacity::standard()));

        let enabled = CapacityConfig {
            overload_enabled: true,
            max_per_term: Some(9),
        };
        assert_eq!(enabled.resolve().map(|c| c.max_per_term()), Ok(9));

        let enabled_default = CapacityConfig {
            overload_enabled: true,
            max_per_term: None,
        };
        assert_eq!(
            enabled_default.resolve().map(|c| c.max_per_term()),
            Ok(TermCapacity::OVERLOAD_MIN)
        );

        let out_of_band = CapacityConfig {
            overload_enabled: true,
            max_per_term: Some(13),
        };
        assert!(out_of_band.resolve().is_err());
    }
}
