//! Half-life units and conversion to days.
//!
//! Days are the canonical time unit of the simulator. Every half-life is
//! normalized with [`to_days`] before it reaches the decay evaluator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_YEAR, HOURS_PER_DAY, MINUTES_PER_DAY};
use crate::error::UnitError;

/// Unit a half-life is expressed in.
///
/// # Examples
///
/// ```
/// use bateman_core::units::TimeUnit;
/// let unit: TimeUnit = "Hours".parse().unwrap();
/// assert_eq!(unit, TimeUnit::Hours);
/// assert_eq!(unit.to_days(48.0), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Years,
}

impl TimeUnit {
    /// All units, in the order they are offered to users.
    pub const ALL: [TimeUnit; 4] = [Self::Minutes, Self::Hours, Self::Days, Self::Years];

    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Years => "years",
        }
    }

    /// Convert `value` expressed in this unit into days.
    pub fn to_days(&self, value: f64) -> f64 {
        match self {
            Self::Minutes => value / MINUTES_PER_DAY,
            Self::Hours => value / HOURS_PER_DAY,
            Self::Days => value,
            Self::Years => value * DAYS_PER_YEAR,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minutes" => Ok(Self::Minutes),
            "hours" => Ok(Self::Hours),
            "days" => Ok(Self::Days),
            "years" => Ok(Self::Years),
            _ => Err(UnitError::UnrecognizedUnit(s.to_string())),
        }
    }
}

/// Convert a half-life `value` given in `unit` into days.
///
/// `unit` is matched case-insensitively against `minutes`, `hours`, `days`
/// and `years`. Anything else fails with [`UnitError::UnrecognizedUnit`].
///
/// # Examples
///
/// ```
/// use bateman_core::units::to_days;
/// assert_eq!(to_days(1440.0, "minutes").unwrap(), 1.0);
/// assert!(to_days(1.0, "weeks").is_err());
/// ```
pub fn to_days(value: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(unit.parse::<TimeUnit>()?.to_days(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn minutes_in_a_day() {
        assert_eq!(to_days(1440.0, "minutes").unwrap(), to_days(1.0, "days").unwrap());
    }

    #[test]
    fn hours_in_a_day() {
        assert_eq!(to_days(24.0, "hours").unwrap(), to_days(1.0, "days").unwrap());
    }

    #[test]
    fn one_year_is_365_days() {
        assert_eq!(to_days(1.0, "years").unwrap(), to_days(365.0, "days").unwrap());
    }

    #[test]
    fn days_unchanged() {
        assert_eq!(to_days(3.8, "days").unwrap(), 3.8);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(to_days(2.0, "YEARS").unwrap(), 730.0);
        assert_eq!(to_days(2.0, "Days").unwrap(), 2.0);
        assert_eq!(to_days(48.0, "hOuRs").unwrap(), 2.0);
    }

    #[test]
    fn rejects_unknown_units() {
        for bad in ["", "minute", "secs", "weeks", "dayz", " days"] {
            assert_eq!(
                to_days(1.0, bad),
                Err(UnitError::UnrecognizedUnit(bad.to_string())),
                "unit {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.to_string().parse::<TimeUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&TimeUnit::Minutes).unwrap();
        assert_eq!(json, "\"minutes\"");
    }

    proptest! {
        #[test]
        fn conversion_is_linear(
            value in 1e-6f64..1e9,
            k in 1e-3f64..1e3,
            idx in 0usize..4,
        ) {
            let unit = TimeUnit::ALL[idx];
            let scaled = unit.to_days(value * k);
            let expected = unit.to_days(value) * k;
            prop_assert!(
                (scaled - expected).abs() <= 1e-12 * expected.abs(),
                "{} {}: {} != {}", value, unit, scaled, expected
            );
        }

        #[test]
        fn conversion_preserves_positivity(value in 1e-9f64..1e12, idx in 0usize..4) {
            prop_assert!(TimeUnit::ALL[idx].to_days(value) > 0.0);
        }
    }
}
