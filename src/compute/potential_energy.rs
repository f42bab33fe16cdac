use crate::{neighbor::NeighborList, system::System, Error};

pub fn potential_energy<const D: usize, X>(
    system: &System<D, X>,
    neighbors: &NeighborList,
    parallel: bool,
) -> Result<f64, Error> {
    system.potential_energy(neighbors, parallel)
}
