use crate::{atoms::Atoms, utils};

/// `sum 1/2 m v^2` over every particle
pub fn kinetic_energy<const D: usize, X>(atoms: &Atoms<D, X>) -> f64 {
    0.5 * atoms
        .velocities
        .iter()
        .enumerate()
        .map(|(i, v)| atoms.mass(i) * utils::norm_squared(v))
        .sum::<f64>()
}
