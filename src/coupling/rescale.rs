use super::{assert_temperature, scale_velocities, Coupling};
use crate::{compute::temperature, system::System, Error};

/// Velocity rescaling to the exact target temperature every `every` steps
#[derive(Clone, Debug)]
pub struct RescaleThermostat {
    temperature: f64,
    every: usize,
}

impl RescaleThermostat {
    pub fn new(temperature: f64, every: usize) -> Self {
        assert_temperature(temperature);
        assert!(every > 0, "Rescale interval should be positive");
        Self { temperature, every }
    }
}

impl Coupling for RescaleThermostat {
    fn apply<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        _timestep: f64,
        step: usize,
    ) -> Result<(), Error> {
        if step % self.every != 0 {
            return Ok(());
        }
        let current = temperature(&system.atoms, system.units());
        if current == 0.0 {
            return Ok(());
        }
        scale_velocities(system, (self.temperature / current).sqrt());
        Ok(())
    }
}
