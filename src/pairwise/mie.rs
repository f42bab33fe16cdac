use super::{mix, Cutoff, PairwiseInteraction};
use crate::particle::Particle;

/// Mie `n-m` potential, the generalization of Lennard-Jones to arbitrary
/// exponents.
///
/// `V(r) = C eps ((sig/r)^n - (sig/r)^m)` with
/// `C = n / (n - m) * (n / m)^(m / (n - m))`, so the well depth is `eps`.
#[derive(Clone, Debug)]
pub struct Mie {
    n: f64,
    m: f64,
    prefactor: f64,
    cutoff: Cutoff,
    special_weight: f64,
}
impl Mie {
    pub fn new(n: f64, m: f64, cutoff: Cutoff) -> Self {
        assert!(
            n > m && m > 0.0,
            "Mie exponents should satisfy n > m > 0, found n = {}, m = {}",
            n,
            m
        );
        let prefactor = n / (n - m) * (n / m).powf(m / (n - m));
        Self {
            n,
            m,
            prefactor,
            cutoff,
            special_weight: 1.0,
        }
    }
    pub fn with_special_weight(mut self, weight: f64) -> Self {
        self.special_weight = weight;
        self
    }
    pub fn exponents(&self) -> (f64, f64) {
        (self.n, self.m)
    }

    fn powers(&self, invr2: f64, sigma: f64) -> (f64, f64) {
        let s2 = sigma * sigma * invr2;
        (s2.powf(0.5 * self.n), s2.powf(0.5 * self.m))
    }
}

impl PairwiseInteraction for Mie {
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
        let (sn, sm) = self.powers(invr2, sigma);
        self.prefactor * epsilon * invr2 * (self.n * sn - self.m * sm)
    }
    fn raw_potential(&self, _r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64 {
        let (sigma, epsilon) = mix(pi, pj);
        if sigma == 0.0 || epsilon == 0.0 {
            return 0.0;
        }
        let (sn, sm) = self.powers(invr2, sigma);
        self.prefactor * epsilon * (sn - sm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::{testing::check_derivative, LennardJones};
    use approx::assert_relative_eq;

    #[test]
    fn twelve_six_is_lennard_jones() {
        let p = Particle::new(1.0).with_lj(0.34, 0.99);
        let mie = Mie::new(12.0, 6.0, Cutoff::None);
        let lj = LennardJones::new(Cutoff::None);
        for r in [0.32, 0.4, 0.7] {
            let r2: f64 = r * r;
            assert_relative_eq!(
                mie.potential(r2, &p, &p, false),
                lj.potential(r2, &p, &p, false),
                max_relative = 1e-10
            );
            assert_relative_eq!(
                mie.force_divr(r2, &p, &p, false),
                lj.force_divr(r2, &p, &p, false),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn force_is_minus_gradient() {
        let p = Particle::new(1.0).with_lj(1.0, 1.0);
        check_derivative(&Mie::new(9.0, 3.0, Cutoff::None), &p, &p, &[0.9, 1.1, 1.6]);
    }
}
