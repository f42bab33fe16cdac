use crate::{atoms::Atoms, units::UnitSystem};

use super::kinetic_energy;

/// Instantaneous kinetic temperature `2 KE / (D N k_B)`
pub fn temperature<const D: usize, X>(atoms: &Atoms<D, X>, units: UnitSystem) -> f64 {
    let dof = (D * atoms.num_particles()) as f64;
    if dof == 0.0 {
        return 0.0;
    }
    2.0 * kinetic_energy(atoms) / (dof * units.boltzmann())
}
