//! Preset three-member decay series.
//!
//! The table is static data: each entry carries its nuclides, the stable end
//! product and an equilibrium class assigned by hand. The class is never
//! re-derived from the half-lives.

use serde::Serialize;

use crate::constants::PRESET_INITIAL_ACTIVITY;
use crate::error::ParameterError;
use crate::types::{ChainMember, DecayParameters, EquilibriumClass, Nuclide};
use crate::units::TimeUnit::{Days, Hours, Minutes, Years};

/// A named parent → daughter → granddaughter → stable series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecaySeries {
    /// Display name, e.g. `Example 1: Ra-226 (Secular)`.
    pub name: &'static str,
    /// Short lookup key, e.g. `ra-226`.
    pub key: &'static str,
    pub parent: Nuclide,
    pub daughter: Nuclide,
    pub granddaughter: Nuclide,
    /// Symbol of the stable end product.
    pub stable: &'static str,
    pub equilibrium: EquilibriumClass,
}

impl DecaySeries {
    pub fn nuclide(&self, member: ChainMember) -> &Nuclide {
        match member {
            ChainMember::Parent => &self.parent,
            ChainMember::Daughter => &self.daughter,
            ChainMember::Granddaughter => &self.granddaughter,
        }
    }

    /// Evaluation inputs: unit initial activity and half-lives in days.
    pub fn parameters(&self) -> Result<DecayParameters, ParameterError> {
        DecayParameters::new(
            PRESET_INITIAL_ACTIVITY,
            self.parent.half_life.to_days(),
            self.daughter.half_life.to_days(),
            self.granddaughter.half_life.to_days(),
        )
    }
}

/// All preset series, in menu order.
pub static PRESETS: [DecaySeries; 6] = [
    DecaySeries {
        name: "Example 1: Ra-226 (Secular)",
        key: "ra-226",
        parent: Nuclide::new("Ra-226", 1600.0, Years),
        daughter: Nuclide::new("Rn-222", 3.8, Days),
        granddaughter: Nuclide::new("Po-218", 3.1, Minutes),
        stable: "Pb-206",
        equilibrium: EquilibriumClass::Secular,
    },
    DecaySeries {
        name: "Example 2: Th-232 (Secular)",
        key: "th-232",
        parent: Nuclide::new("Th-232", 1.4e10, Years).written("14000000000.0"),
        daughter: Nuclide::new("Ra-228", 5.75, Years),
        granddaughter: Nuclide::new("Ac-228", 6.15, Hours),
        stable: "Pb-208",
        equilibrium: EquilibriumClass::Secular,
    },
    DecaySeries {
        name: "Example 3: U-238 (Secular)",
        key: "u-238",
        parent: Nuclide::new("U-238", 4.5e9, Years).written("4500000000.0"),
        daughter: Nuclide::new("Th-234", 24.0, Days),
        granddaughter: Nuclide::new("Pa-234", 6.7, Hours),
        stable: "Pb-206",
        equilibrium: EquilibriumClass::Secular,
    },
    DecaySeries {
        name: "Example 4: Mo-99 (Transient)",
        key: "mo-99",
        parent: Nuclide::new("Mo-99", 66.0, Hours),
        daughter: Nuclide::new("Tc-99m", 6.0, Hours),
        granddaughter: Nuclide::new("Tc-99", 2.1e5, Years).written("210000.0"),
        stable: "Ru-99",
        equilibrium: EquilibriumClass::Transient,
    },
    DecaySeries {
        name: "Example 5: Ce-144 (Transient)",
        key: "ce-144",
        parent: Nuclide::new("Ce-144", 284.9, Days),
        daughter: Nuclide::new("Pr-144", 17.3, Minutes),
        granddaughter: Nuclide::new("Pr-144m", 7.2, Minutes),
        stable: "Nd-144",
        equilibrium: EquilibriumClass::Transient,
    },
    DecaySeries {
        name: "Example 6: Cs-137 (Transient)",
        key: "cs-137",
        parent: Nuclide::new("Cs-137", 30.05, Years),
        daughter: Nuclide::new("Ba-137m", 2.55, Minutes),
        granddaughter: Nuclide::new("Ba-137m*", 2.55, Minutes),
        stable: "Ba-137",
        equilibrium: EquilibriumClass::Transient,
    },
];

/// Look up a preset by exact display name or by key (case-insensitive).
pub fn find_preset(query: &str) -> Option<&'static DecaySeries> {
    PRESETS
        .iter()
        .find(|s| s.name == query || s.key.eq_ignore_ascii_case(query))
}
