use super::{mix, Cutoff, PairwiseInteraction};
use crate::particle::Particle;

/// Purely repulsive `V(r) = 4 eps (sig/r)^12`, mixed like Lennard-Jones
#[derive(Clone, Debug)]
pub struct SoftSphere {
    cutoff: Cutoff,
    special_weight: f64,
}
impl SoftSphere {
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

impl PairwiseInteraction for SoftSphere {
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
        48.0 * epsilon * s6 * s6 * invr2
    }
    fn raw_potential(&self, _r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        let (sigma, epsilon) = mix(pi, pj);
        if sigma == 0.0 || epsilon == 0.0 {
            return 0.0;
        }
        let s2 = sigma * sigma * invr2;
        let s6 = s2 * s2 * s2;
        4.0 * epsilon * s6 * s6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::testing::check_derivative;

    #[test]
    fn always_repulsive() {
        let p = Particle::new(1.0).with_lj(1.0, 1.0);
        let soft = SoftSphere::new(Cutoff::None);
        for r in [0.8, 1.0, 1.5, 3.0] {
            assert!(soft.force_divr(r * r, &p, &p, false) > 0.0);
            assert!(soft.potential(r * r, &p, &p, false) > 0.0);
        }
        check_derivative(&soft, &p, &p, &[0.9, 1.2, 2.0]);
    }
}
