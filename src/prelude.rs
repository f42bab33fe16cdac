pub use crate::atoms::Atoms;
pub use crate::compute::Compute;
pub use crate::config::RunConfig;
pub use crate::container::Container;
pub use crate::coupling::{
    AndersenThermostat, BerendsenThermostat, Coupling, NoCoupling, RescaleThermostat,
};
pub use crate::error::Error;
pub use crate::integrators::{Integrator, Leapfrog, Simulator, StormerVerlet, VelocityVerlet};
pub use crate::lattice::{Cubic, Lattice};
pub use crate::neighbor::{
    CellListNeighborFinder, DistanceNeighborFinder, EligibilityMatrix, NeighborFinder,
    NeighborList, NoNeighborFinder, TreeNeighborFinder, UpdateSettings,
};
pub use crate::output::{Logger, ThermoOutput};
pub use crate::pairwise::{Coulomb, Cutoff, Gravity, LennardJones, Mie, PairwiseInteraction, SoftSphere};
pub use crate::particle::Particle;
pub use crate::specific::{
    HarmonicAngle, HarmonicBond, InteractionList, PeriodicTorsion, SpecificInteraction,
};
pub use crate::system::{System, SystemBuilder};
pub use crate::units::UnitSystem;
