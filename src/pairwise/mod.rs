pub mod coulomb;
pub mod cutoff;
pub mod gravity;
pub mod lennard_jones;
pub mod mie;
pub mod soft_sphere;

pub use coulomb::Coulomb;
pub use cutoff::Cutoff;
pub use gravity::Gravity;
pub use lennard_jones::LennardJones;
pub use mie::Mie;
pub use soft_sphere::SoftSphere;

use crate::{
    particle::Particle,
    units::UnitSystem,
    utils::{self, Vector},
};

/// Trait for general pairwise interactions.
///
/// Implementors provide the untruncated potential through
/// [`raw_potential`](PairwiseInteraction::raw_potential) and
/// [`raw_force_divr`](PairwiseInteraction::raw_force_divr); the owned
/// [`Cutoff`] turns them into the truncated values used during a run. Both
/// take the squared distance and its inverse so implementors can avoid square
/// roots.
pub trait PairwiseInteraction: Send + Sync {
    /// Truncation scheme applied to the raw potential
    fn cutoff(&self) -> &Cutoff;

    /// `-dV/dr / r` of the untruncated potential; positive is repulsive
    fn raw_force_divr(&self, r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64;

    /// Untruncated potential energy
    fn raw_potential(&self, r2: f64, invr2: f64, pi: &Particle, pj: &Particle) -> f64;

    /// Whether the interaction is evaluated only over neighbor-list pairs.
    /// All-pairs interactions see every pair `i < j`, eligible or not.
    fn neighbor_restricted(&self) -> bool {
        true
    }

    /// Unit convention the interaction's parameters are expressed in, if any
    fn units(&self) -> Option<UnitSystem> {
        None
    }

    /// Scale applied to pairs flagged special in the neighbor list
    fn special_weight(&self) -> f64 {
        1.0
    }

    fn force_divr(&self, r2: f64, pi: &Particle, pj: &Particle, special: bool) -> f64 {
        let fdr = self
            .cutoff()
            .force_divr(r2, |r2, invr2| self.raw_force_divr(r2, invr2, pi, pj));
        if special {
            fdr * self.special_weight()
        } else {
            fdr
        }
    }

    fn potential(&self, r2: f64, pi: &Particle, pj: &Particle, special: bool) -> f64 {
        let e = self
            .cutoff()
            .potential(r2, |r2, invr2| self.raw_potential(r2, invr2, pi, pj), |r2, invr2| {
                self.raw_force_divr(r2, invr2, pi, pj)
            });
        if special {
            e * self.special_weight()
        } else {
            e
        }
    }
}

/// Force on particle `i` from particle `j`, where `dr` is the minimum-image
/// vector from `i` to `j`.
///
/// Swapping the particles negates `dr` and therefore the force.
pub fn force<const D: usize, I: PairwiseInteraction + ?Sized>(
    interaction: &I,
    dr: &Vector<D>,
    pi: &Particle,
    pj: &Particle,
    special: bool,
) -> Vector<D> {
    let fdr = interaction.force_divr(utils::norm_squared(dr), pi, pj, special);
    utils::scale(dr, -fdr)
}

pub fn potential_energy<const D: usize, I: PairwiseInteraction + ?Sized>(
    interaction: &I,
    dr: &Vector<D>,
    pi: &Particle,
    pj: &Particle,
    special: bool,
) -> f64 {
    interaction.potential(utils::norm_squared(dr), pi, pj, special)
}

/// Lorentz-Berthelot combination of size and well depth
pub(crate) fn mix(pi: &Particle, pj: &Particle) -> (f64, f64) {
    (
        0.5 * (pi.sigma + pj.sigma),
        (pi.epsilon * pj.epsilon).sqrt(),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use approx::assert_relative_eq;

    #[test]
    fn action_equals_reaction() {
        let container = Container::new([3.0, 3.0, 3.0]);
        let pi = Particle::new(1.0).with_lj(0.3, 1.0).with_charge(0.5);
        let pj = Particle::new(2.0).with_lj(0.35, 0.5).with_charge(-1.0);
        let xi = [0.1, 2.9, 1.4];
        let xj = [2.8, 0.2, 1.1];
        let interactions: Vec<Box<dyn PairwiseInteraction>> = vec![
            Box::new(LennardJones::new(Cutoff::shifted_force(1.0))),
            Box::new(SoftSphere::new(Cutoff::distance(1.0))),
            Box::new(Coulomb::new(UnitSystem::KjMolNm, Cutoff::None)),
            Box::new(Gravity::new(1.0)),
        ];
        for interaction in interactions.iter() {
            let fij = force(
                interaction.as_ref(),
                &container.vector(&xi, &xj),
                &pi,
                &pj,
                false,
            );
            let fji = force(
                interaction.as_ref(),
                &container.vector(&xj, &xi),
                &pj,
                &pi,
                false,
            );
            for k in 0..3 {
                assert_relative_eq!(fij[k], -fji[k], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn repulsion_pushes_particles_apart() {
        let p = Particle::new(1.0).with_lj(1.0, 1.0);
        let lj = LennardJones::new(Cutoff::None);
        let f = force(&lj, &[0.9, 0.0], &p, &p, false);
        assert!(f[0] < 0.0);
        assert_eq!(f[1], 0.0);
    }

    #[test]
    fn special_pairs_are_scaled() {
        let p = Particle::new(1.0).with_lj(1.0, 1.0);
        let lj = LennardJones::new(Cutoff::None).with_special_weight(0.5);
        let full = lj.potential(1.44, &p, &p, false);
        let scaled = lj.potential(1.44, &p, &p, true);
        assert_relative_eq!(scaled, 0.5 * full);
    }
}
