use super::{Cutoff, PairwiseInteraction};
use crate::{particle::Particle, units::UnitSystem};

/// Electrostatics between point charges, `V(r) = k qi qj / r`.
///
/// The prefactor `k` comes from the unit convention, which the interaction
/// declares so it can be checked against the system.
#[derive(Clone, Debug)]
pub struct Coulomb {
    units: UnitSystem,
    prefactor: f64,
    cutoff: Cutoff,
    special_weight: f64,
    neighbor_restricted: bool,
}
impl Coulomb {
    pub fn new(units: UnitSystem, cutoff: Cutoff) -> Self {
        Self {
            units,
            prefactor: units.coulomb_constant(),
            cutoff,
            special_weight: 1.0,
            neighbor_restricted: true,
        }
    }
    pub fn with_special_weight(mut self, weight: f64) -> Self {
        self.special_weight = weight;
        self
    }
    /// Evaluate over every pair instead of the neighbor list
    pub fn all_pairs(mut self) -> Self {
        self.neighbor_restricted = false;
        self
    }
}

impl PairwiseInteraction for Coulomb {
    fn cutoff(&self) -> &Cutoff {
        &self.cutoff
    }
    fn special_weight(&self) -> f64 {
        self.special_weight
    }
    fn neighbor_restricted(&self) -> bool {
        self.neighbor_restricted
    }
    fn units(&self) -> Option<UnitSystem> {
        Some(self.units)
    }
    fn raw_force_divr(&self, r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        let qq = pi.charge * pj.charge;
        if qq == 0.0 {
            return 0.0;
        }
        self.prefactor * qq * invr2 / r2.sqrt()
    }
    fn raw_potential(&self, r2: f64, _invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        let qq = pi.charge * pj.charge;
        if qq == 0.0 {
            return 0.0;
        }
        self.prefactor * qq / r2.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::testing::check_derivative;
    use approx::assert_relative_eq;

    #[test]
    fn like_charges_repel() {
        let p = Particle::new(1.0).with_charge(1.0);
        let q = Particle::new(1.0).with_charge(-1.0);
        let coulomb = Coulomb::new(UnitSystem::Reduced, Cutoff::None);
        assert!(coulomb.force_divr(1.0, &p, &p, false) > 0.0);
        assert!(coulomb.force_divr(1.0, &p, &q, false) < 0.0);
        assert_relative_eq!(coulomb.potential(4.0, &p, &q, false), -0.5);
        check_derivative(&coulomb, &p, &q, &[0.5, 1.0, 2.0]);
    }

    #[test]
    fn declares_its_units() {
        let coulomb = Coulomb::new(UnitSystem::KcalMolAngstrom, Cutoff::distance(10.0));
        assert_eq!(coulomb.units(), Some(UnitSystem::KcalMolAngstrom));
        assert!(!coulomb.clone().all_pairs().neighbor_restricted());
    }
}
