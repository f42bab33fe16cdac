use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Unit convention shared by every force and energy in a run.
///
/// Lengths, masses and times follow the convention too: nm/u/ps for
/// `KjMolNm`, Å/u/(Å u^½ kcal^-½ mol^½) for `KcalMolAngstrom`, and
/// dimensionless values for `Reduced`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    KjMolNm,
    KcalMolAngstrom,
    Reduced,
}

impl UnitSystem {
    /// Boltzmann constant in energy units per kelvin
    pub fn boltzmann(&self) -> f64 {
        match self {
            UnitSystem::KjMolNm => 0.008_314_462_618,
            UnitSystem::KcalMolAngstrom => 0.001_987_204_259,
            UnitSystem::Reduced => 1.0,
        }
    }
    /// Prefactor of the Coulomb energy for charges in units of e
    pub fn coulomb_constant(&self) -> f64 {
        match self {
            UnitSystem::KjMolNm => 138.935_457_8,
            UnitSystem::KcalMolAngstrom => 332.063_713,
            UnitSystem::Reduced => 1.0,
        }
    }
    pub fn energy_unit(&self) -> &'static str {
        match self {
            UnitSystem::KjMolNm => "kJ mol^-1",
            UnitSystem::KcalMolAngstrom => "kcal mol^-1",
            UnitSystem::Reduced => "epsilon",
        }
    }
    pub fn force_unit(&self) -> &'static str {
        match self {
            UnitSystem::KjMolNm => "kJ mol^-1 nm^-1",
            UnitSystem::KcalMolAngstrom => "kcal mol^-1 A^-1",
            UnitSystem::Reduced => "epsilon sigma^-1",
        }
    }
}

impl Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.force_unit().fmt(f)
    }
}
