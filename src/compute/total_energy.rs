use crate::{neighbor::NeighborList, system::System, Error};

use super::{kinetic_energy, potential_energy};

pub fn total_energy<const D: usize, X>(
    system: &System<D, X>,
    neighbors: &NeighborList,
    parallel: bool,
) -> Result<f64, Error> {
    Ok(potential_energy(system, neighbors, parallel)? + kinetic_energy(&system.atoms))
}
