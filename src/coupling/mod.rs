//! Per-step coupling of the system to an external bath.
//!
//! A [`Coupling`] is applied once after every integration step. Any cadence
//! is decided by the implementation itself.

mod andersen;
mod berendsen;
mod rescale;

pub use andersen::AndersenThermostat;
pub use berendsen::BerendsenThermostat;
pub use rescale::RescaleThermostat;

use crate::{system::System, Error};

pub trait Coupling {
    /// May change velocities and the container extents
    fn apply<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        timestep: f64,
        step: usize,
    ) -> Result<(), Error>;
}

/// Leaves the system alone
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCoupling;
impl Coupling for NoCoupling {
    fn apply<const D: usize, X>(
        &mut self,
        _system: &mut System<D, X>,
        _timestep: f64,
        _step: usize,
    ) -> Result<(), Error> {
        Ok(())
    }
}

/// Coupling chosen at runtime
#[derive(Clone, Debug)]
pub enum AnyCoupling {
    None(NoCoupling),
    Andersen(AndersenThermostat),
    Rescale(RescaleThermostat),
    Berendsen(BerendsenThermostat),
}
impl Default for AnyCoupling {
    fn default() -> Self {
        AnyCoupling::None(NoCoupling)
    }
}
impl Coupling for AnyCoupling {
    fn apply<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        timestep: f64,
        step: usize,
    ) -> Result<(), Error> {
        match self {
            AnyCoupling::None(c) => c.apply(system, timestep, step),
            AnyCoupling::Andersen(c) => c.apply(system, timestep, step),
            AnyCoupling::Rescale(c) => c.apply(system, timestep, step),
            AnyCoupling::Berendsen(c) => c.apply(system, timestep, step),
        }
    }
}

fn scale_velocities<const D: usize, X>(system: &mut System<D, X>, factor: f64) {
    for v in system.atoms.velocities.iter_mut() {
        for vk in v.iter_mut() {
            *vk *= factor;
        }
    }
}

fn assert_temperature(temperature: f64) {
    assert!(
        temperature >= 0.0 && temperature.is_finite(),
        "Target temperature should be non-negative, found {}",
        temperature
    );
}
