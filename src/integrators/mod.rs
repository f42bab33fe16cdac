mod leapfrog;
mod simulator;
mod stormer;
mod verlet;

pub use leapfrog::Leapfrog;
pub use simulator::Simulator;
pub use stormer::StormerVerlet;
pub use verlet::VelocityVerlet;

use crate::{system::System, utils::Vector, Error};

/// Simulation integrator.
///
/// `advance` moves the system forward by one timestep. On entry `forces`
/// holds the forces at the current positions; on exit it holds the forces at
/// the new, wrapped positions.
pub trait Integrator {
    fn timestep(&self) -> f64;

    /// Called before a run that starts after `step` completed steps. A run
    /// from step zero begins a new trajectory.
    fn begin(&mut self, _step: usize) {}

    fn advance<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        forces: &mut Vec<Vector<D>>,
        parallel: bool,
    ) -> Result<(), Error>;
}

/// Integrator chosen at runtime, e.g. from a configuration file
#[derive(Clone, Debug)]
pub enum AnyIntegrator {
    VelocityVerlet(VelocityVerlet),
    StormerVerlet(StormerVerlet),
    Leapfrog(Leapfrog),
}
impl Integrator for AnyIntegrator {
    fn timestep(&self) -> f64 {
        match self {
            AnyIntegrator::VelocityVerlet(i) => i.timestep(),
            AnyIntegrator::StormerVerlet(i) => i.timestep(),
            AnyIntegrator::Leapfrog(i) => i.timestep(),
        }
    }
    fn begin(&mut self, step: usize) {
        match self {
            AnyIntegrator::VelocityVerlet(i) => i.begin(step),
            AnyIntegrator::StormerVerlet(i) => i.begin(step),
            AnyIntegrator::Leapfrog(i) => i.begin(step),
        }
    }
    fn advance<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        forces: &mut Vec<Vector<D>>,
        parallel: bool,
    ) -> Result<(), Error> {
        match self {
            AnyIntegrator::VelocityVerlet(i) => i.advance(system, forces, parallel),
            AnyIntegrator::StormerVerlet(i) => i.advance(system, forces, parallel),
            AnyIntegrator::Leapfrog(i) => i.advance(system, forces, parallel),
        }
    }
}

pub(crate) fn assert_timestep(timestep: f64) {
    assert!(
        timestep > 0.0 && timestep.is_finite(),
        "Timestep should be positive, found {}",
        timestep
    );
}
