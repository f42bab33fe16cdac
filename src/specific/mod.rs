pub mod harmonic_angle;
pub mod harmonic_bond;
pub mod list;
pub mod torsion;

pub use harmonic_angle::HarmonicAngle;
pub use harmonic_bond::HarmonicBond;
pub use list::{InteractionList, SpecificInteractions};
pub use torsion::{PeriodicTorsion, TorsionTerm};

use crate::{container::Container, units::UnitSystem, utils::Vector};

/// Trait for interactions between a fixed tuple of `N` particles.
///
/// Forces are returned in tuple order and sum to zero.
pub trait SpecificInteraction<const D: usize, const N: usize>: Send + Sync {
    fn forces(&self, coords: &[Vector<D>; N], container: &Container<D>) -> [Vector<D>; N];

    fn potential_energy(&self, coords: &[Vector<D>; N], container: &Container<D>) -> f64;

    /// Unit convention the parameters are expressed in, if any
    fn units(&self) -> Option<UnitSystem> {
        None
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Forces sum to zero and match a central difference of the energy
    pub fn check_forces<const D: usize, const N: usize, S: SpecificInteraction<D, N>>(
        interaction: &S,
        coords: &[Vector<D>; N],
        container: &Container<D>,
    ) {
        let forces = interaction.forces(coords, container);
        for k in 0..D {
            let net: f64 = forces.iter().map(|f| f[k]).sum();
            assert_abs_diff_eq!(net, 0.0, epsilon = 1e-9);
        }
        let h = 1e-6;
        for a in 0..N {
            for k in 0..D {
                let mut up = *coords;
                up[a][k] += h;
                let mut down = *coords;
                down[a][k] -= h;
                let numeric = -(interaction.potential_energy(&up, container)
                    - interaction.potential_energy(&down, container))
                    / (2.0 * h);
                assert_abs_diff_eq!(forces[a][k], numeric, epsilon = 1e-5);
            }
        }
    }
}
