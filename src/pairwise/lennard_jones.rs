use super::{mix, Cutoff, PairwiseInteraction};
use crate::particle::Particle;

/// Lennard-Jones 12-6 potential with Lorentz-Berthelot mixing.
///
/// `V(r) = 4 eps ((sig/r)^12 - (sig/r)^6)`. Pairs with a zero mixed size or
/// well depth do not interact.
#[derive(Clone, Debug)]
pub struct LennardJones {
    cutoff: Cutoff,
    special_weight: f64,
}
impl LennardJones {
    pub fn new(cutoff: Cutoff) -> Self {
        Self {
            cutoff,
            special_weight: 1.0,
        }
    }
    pub fn with_special_weight(mut self, weight: f64) -> Self {
        self.special_weight = weight;
        self
    }
}

impl PairwiseInteraction for LennardJones {
    fn cutoff(&self) -> &Cutoff {
        &self.cutoff
    }
    fn special_weight(&self) -> f64 {
        self.special_weight
    }
    fn raw_force_divr(&self, _r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        let (sigma, epsilon) = mix(pi, pj);
        if sigma == 0.0 || epsilon == 0.0 {
            return 0.0;
        }
        let s2 = sigma * sigma * invr2;
        let s6 = s2 * s2 * s2;
        24.0 * epsilon * invr2 * (2.0 * s6 * s6 - s6)
    }
    fn raw_potential(&self, _r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        let (sigma, epsilon) = mix(pi, pj);
        if sigma == 0.0 || epsilon == 0.0 {
            return 0.0;
        }
        let s2 = sigma * sigma * invr2;
        let s6 = s2 * s2 * s2;
        4.0 * epsilon * (s6 * s6 - s6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::testing::check_derivative;
    use approx::assert_relative_eq;

    #[test]
    fn minimum_at_two_to_the_sixth() {
        let p = Particle::new(1.0).with_lj(1.0, 1.0);
        let lj = LennardJones::new(Cutoff::None);
        let rmin2 = 2f64.powf(1.0 / 3.0);
        assert_relative_eq!(lj.potential(rmin2, &p, &p, false), -1.0, epsilon = 1e-12);
        assert!(lj.force_divr(rmin2, &p, &p, false).abs() < 1e-12);
        assert_eq!(lj.potential(1.0, &p, &p, false), 0.0);
    }

    #[test]
    fn mixing_rules_apply() {
        let a = Particle::new(1.0).with_lj(0.2, 4.0);
        let b = Particle::new(1.0).with_lj(0.4, 1.0);
        let mixed = Particle::new(1.0).with_lj(0.3, 2.0);
        let lj = LennardJones::new(Cutoff::None);
        assert_relative_eq!(
            lj.potential(0.1, &a, &b, false),
            lj.potential(0.1, &mixed, &mixed, false),
            max_relative = 1e-12
        );
    }

    #[test]
    fn zero_parameters_do_not_interact() {
        let a = Particle::new(1.0).with_lj(0.3, 0.0);
        let b = Particle::new(1.0).with_lj(0.3, 1.0);
        let lj = LennardJones::new(Cutoff::None);
        assert_eq!(lj.force_divr(1e-6, &a, &b, false), 0.0);
        assert_eq!(lj.potential(1e-6, &a, &b, false), 0.0);
    }

    #[test]
    fn force_is_minus_gradient() {
        let p = Particle::new(1.0).with_lj(0.34, 0.99);
        let lj = LennardJones::new(Cutoff::None);
        check_derivative(&lj, &p, &p, &[0.3, 0.38, 0.5, 0.9]);
    }
}
