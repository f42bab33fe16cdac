/// Truncation of a raw pairwise potential at a finite radius.
///
/// Distances are stored squared. The shifted schemes evaluate the raw
/// potential at the cutoff on every call with the same arguments used for the
/// separation itself, so `E(rc)` (and `F(rc)` for the shifted force) is zero
/// exactly rather than to rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cutoff {
    /// Raw potential everywhere
    None,
    /// Raw potential below the radius, zero above
    Distance { sqdist: f64 },
    /// Potential shifted so it vanishes at the radius
    ShiftedPotential { sqdist: f64 },
    /// Force shifted so it vanishes at the radius, potential made consistent
    ShiftedForce { sqdist: f64 },
}
impl Cutoff {
    pub fn distance(radius: f64) -> Self {
        Cutoff::Distance {
            sqdist: checked_square(radius),
        }
    }
    pub fn shifted_potential(radius: f64) -> Self {
        Cutoff::ShiftedPotential {
            sqdist: checked_square(radius),
        }
    }
    pub fn shifted_force(radius: f64) -> Self {
        Cutoff::ShiftedForce {
            sqdist: checked_square(radius),
        }
    }

    pub fn radius(&self) -> Option<f64> {
        self.sqdist().map(f64::sqrt)
    }
    pub fn sqdist(&self) -> Option<f64> {
        match *self {
            Cutoff::None => None,
            Cutoff::Distance { sqdist }
            | Cutoff::ShiftedPotential { sqdist }
            | Cutoff::ShiftedForce { sqdist } => Some(sqdist),
        }
    }

    /// Truncated `-dV/dr / r` given the raw one as `raw(r2, 1/r2)`
    pub fn force_divr(&self, r2: f64, raw: impl Fn(f64, f64) -> f64) -> f64 {
        match *self {
            Cutoff::None => raw(r2, 1.0 / r2),
            Cutoff::Distance { sqdist } | Cutoff::ShiftedPotential { sqdist } => {
                if r2 > sqdist {
                    0.0
                } else {
                    raw(r2, 1.0 / r2)
                }
            }
            Cutoff::ShiftedForce { sqdist } => {
                if r2 > sqdist {
                    return 0.0;
                }
                let rc = sqdist.sqrt();
                let r = r2.sqrt();
                // (f(r) - f(rc)) / r with f = fdr * r
                raw(r2, 1.0 / r2) - raw(sqdist, 1.0 / sqdist) * rc / r
            }
        }
    }

    /// Truncated potential given the raw potential and raw `-dV/dr / r`
    pub fn potential(
        &self,
        r2: f64,
        raw: impl Fn(f64, f64) -> f64,
        raw_force_divr: impl Fn(f64, f64) -> f64,
    ) -> f64 {
        match *self {
            Cutoff::None => raw(r2, 1.0 / r2),
            Cutoff::Distance { sqdist } => {
                if r2 > sqdist {
                    0.0
                } else {
                    raw(r2, 1.0 / r2)
                }
            }
            Cutoff::ShiftedPotential { sqdist } => {
                if r2 > sqdist {
                    0.0
                } else {
                    raw(r2, 1.0 / r2) - raw(sqdist, 1.0 / sqdist)
                }
            }
            Cutoff::ShiftedForce { sqdist } => {
                if r2 > sqdist {
                    return 0.0;
                }
                let rc = sqdist.sqrt();
                let r = r2.sqrt();
                let force_rc = raw_force_divr(sqdist, 1.0 / sqdist) * rc;
                raw(r2, 1.0 / r2) - raw(sqdist, 1.0 / sqdist) + (r - rc) * force_rc
            }
        }
    }
}

fn checked_square(radius: f64) -> f64 {
    assert!(
        radius > 0.0 && radius.is_finite(),
        "Cutoff radius should be positive and finite, found {}",
        radius
    );
    radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pairwise::{Coulomb, LennardJones, Mie, PairwiseInteraction, SoftSphere},
        particle::Particle,
        units::UnitSystem,
    };

    fn interactions(cutoff: Cutoff) -> Vec<Box<dyn PairwiseInteraction>> {
        vec![
            Box::new(LennardJones::new(cutoff)),
            Box::new(SoftSphere::new(cutoff)),
            Box::new(Mie::new(10.0, 5.0, cutoff)),
            Box::new(Coulomb::new(UnitSystem::KjMolNm, cutoff)),
        ]
    }

    #[test]
    fn shifted_schemes_vanish_at_the_radius() {
        let p = Particle::new(1.0).with_lj(0.34, 0.99).with_charge(0.4);
        for rc in [0.7, 0.9, 1.2345, 2.5] {
            let sq = rc * rc;
            for interaction in interactions(Cutoff::shifted_potential(rc)) {
                assert_eq!(interaction.potential(sq, &p, &p, false), 0.0);
            }
            for interaction in interactions(Cutoff::shifted_force(rc)) {
                assert_eq!(interaction.potential(sq, &p, &p, false), 0.0);
                assert_eq!(interaction.force_divr(sq, &p, &p, false), 0.0);
            }
        }
    }

    #[test]
    fn shifted_force_cutoff_stays_consistent() {
        let p = Particle::new(1.0).with_lj(1.0, 1.0);
        let lj = LennardJones::new(Cutoff::shifted_force(2.5));
        crate::pairwise::testing::check_derivative(&lj, &p, &p, &[0.95, 1.1, 1.8, 2.4]);
        let soft = SoftSphere::new(Cutoff::shifted_force(2.5));
        assert_eq!(soft.force_divr(6.25, &p, &p, false), 0.0);
    }

    #[test]
    fn nothing_beyond_the_radius() {
        let p = Particle::new(1.0).with_lj(1.0, 1.0);
        for cutoff in [
            Cutoff::distance(2.0),
            Cutoff::shifted_potential(2.0),
            Cutoff::shifted_force(2.0),
        ] {
            let lj = LennardJones::new(cutoff);
            assert_eq!(lj.potential(4.01, &p, &p, false), 0.0);
            assert_eq!(lj.force_divr(4.01, &p, &p, false), 0.0);
        }
        let raw = LennardJones::new(Cutoff::None);
        assert!(raw.potential(4.01, &p, &p, false) < 0.0);
    }

    #[test]
    #[should_panic]
    fn negative_radius_panics() {
        Cutoff::distance(-1.0);
    }
}
