use super::{Cutoff, PairwiseInteraction};
use crate::particle::Particle;

/// Newtonian gravity, `V(r) = -G mi mj / r`, evaluated over all pairs
#[derive(Clone, Debug)]
pub struct Gravity {
    g: f64,
    cutoff: Cutoff,
}
impl Gravity {
    pub fn new(g: f64) -> Self {
        Self {
            g,
            cutoff: Cutoff::None,
        }
    }
    pub fn with_cutoff(mut self, cutoff: Cutoff) -> Self {
        self.cutoff = cutoff;
        self
    }
}

impl PairwiseInteraction for Gravity {
    fn cutoff(&self) -> &Cutoff {
        &self.cutoff
    }
    fn neighbor_restricted(&self) -> bool {
        false
    }
    fn raw_force_divr(&self, r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        -self.g * pi.mass * pj.mass * invr2 / r2.sqrt()
    }
    fn raw_potential(&self, r2: f64, _invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        -self.g * pi.mass * pj.mass / r2.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::{force, testing::check_derivative};

    #[test]
    fn attracts_every_pair() {
        let a = Particle::new(2.0);
        let b = Particle::new(5.0);
        let gravity = Gravity::new(1.0);
        assert!(!gravity.neighbor_restricted());
        let f = force(&gravity, &[0.0, 2.0, 0.0], &a, &b, false);
        assert!(f[1] > 0.0);
        check_derivative(&gravity, &a, &b, &[0.5, 1.0, 3.0]);
    }
}
