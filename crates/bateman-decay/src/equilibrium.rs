//! Equilibrium classification from half-lives.
//!
//! A display heuristic only; it plays no part in the numerical evaluation.

use bateman_core::constants::SECULAR_HALF_LIFE_RATIO;
use bateman_core::types::EquilibriumClass;

/// Classify a chain from its half-lives (any common unit).
///
/// - Secular: the parent outlives both descendants by more than 100×.
/// - Transient: the parent outlives both descendants.
/// - User-defined: anything else.
pub fn equilibrium_type(t1: f64, t2: f64, t3: f64) -> EquilibriumClass {
    if t1 > SECULAR_HALF_LIFE_RATIO * t2 && t1 > SECULAR_HALF_LIFE_RATIO * t3 {
        EquilibriumClass::Secular
    } else if t1 > t2 && t1 > t3 {
        EquilibriumClass::Transient
    } else {
        EquilibriumClass::UserDefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ra226_is_secular() {
        assert_eq!(
            equilibrium_type(1600.0 * 365.0, 3.8, 3.1 / 1440.0),
            EquilibriumClass::Secular
        );
    }

    #[test]
    fn mo99_pair_is_transient() {
        // 66 h parent, 6 h daughter: longer-lived but not by 100x.
        assert_eq!(
            equilibrium_type(66.0 / 24.0, 6.0 / 24.0, 0.1),
            EquilibriumClass::Transient
        );
    }

    #[test]
    fn long_lived_granddaughter_is_user_defined() {
        // Tc-99 outlives Mo-99, which is why the preset carries its own tag.
        assert_eq!(
            equilibrium_type(66.0 / 24.0, 6.0 / 24.0, 2.1e5 * 365.0),
            EquilibriumClass::UserDefined
        );
    }

    #[test]
    fn shorter_parent_is_user_defined() {
        assert_eq!(equilibrium_type(1.0, 10.0, 0.1), EquilibriumClass::UserDefined);
    }

    #[test]
    fn ratio_boundary_is_exclusive() {
        assert_eq!(equilibrium_type(100.0, 1.0, 0.5), EquilibriumClass::Transient);
        assert_eq!(equilibrium_type(100.1, 1.0, 0.5), EquilibriumClass::Secular);
    }

    #[test]
    fn equal_half_lives_are_user_defined() {
        assert_eq!(equilibrium_type(2.0, 2.0, 1.0), EquilibriumClass::UserDefined);
    }

    proptest! {
        #[test]
        fn scale_invariant(
            t1 in 1e-3f64..1e6,
            t2 in 1e-3f64..1e6,
            t3 in 1e-3f64..1e6,
        ) {
            // Classes only depend on ratios, so a unit change must not alter them.
            let days = equilibrium_type(t1, t2, t3);
            let minutes = equilibrium_type(t1 * 1024.0, t2 * 1024.0, t3 * 1024.0);
            prop_assert_eq!(days, minutes);
        }

        #[test]
        fn secular_implies_parent_longest(
            t1 in 1e-3f64..1e9,
            t2 in 1e-3f64..1e6,
            t3 in 1e-3f64..1e6,
        ) {
            if equilibrium_type(t1, t2, t3) != EquilibriumClass::UserDefined {
                prop_assert!(t1 > t2 && t1 > t3);
            }
        }
    }
}
