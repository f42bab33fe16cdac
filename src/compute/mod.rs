mod avg_vsq;
mod kinetic_energy;
mod potential_energy;
mod temperature;
mod total_energy;

pub use avg_vsq::avg_vsq;
pub use kinetic_energy::kinetic_energy;
pub use potential_energy::potential_energy;
pub use temperature::temperature;
pub use total_energy::total_energy;

use serde::{Deserialize, Serialize};

use crate::{neighbor::NeighborList, system::System, Error};

/// Scalar properties of a system that loggers can report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compute {
    KineticEnergy,
    PotentialEnergy,
    TotalEnergy,
    Temperature,
    AvgVsq,
}
impl Compute {
    pub fn name(&self) -> &'static str {
        match self {
            Compute::KineticEnergy => "KE",
            Compute::PotentialEnergy => "PE",
            Compute::TotalEnergy => "E",
            Compute::Temperature => "T",
            Compute::AvgVsq => "vsq",
        }
    }
    pub fn compute<const D: usize, X>(
        &self,
        system: &System<D, X>,
        neighbors: &NeighborList,
        parallel: bool,
    ) -> Result<f64, Error> {
        Ok(match self {
            Compute::KineticEnergy => kinetic_energy(&system.atoms),
            Compute::PotentialEnergy => potential_energy(system, neighbors, parallel)?,
            Compute::TotalEnergy => total_energy(system, neighbors, parallel)?,
            Compute::Temperature => temperature(&system.atoms, system.units()),
            Compute::AvgVsq => avg_vsq(&system.atoms),
        })
    }
}
