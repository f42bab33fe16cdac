use std::any::Any;

use super::Logger;
use crate::{
    compute, neighbor::NeighborList, system::System, utils::Vector, Error,
};

/// Records the instantaneous temperature every `every` steps
#[derive(Clone, Debug, Default)]
pub struct TemperatureLogger {
    every: usize,
    values: Vec<f64>,
}
impl TemperatureLogger {
    pub fn new(every: usize) -> Self {
        assert!(every > 0, "Logger cadence should be positive");
        Self {
            every,
            values: Vec::new(),
        }
    }
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
impl<const D: usize, X: 'static> Logger<D, X> for TemperatureLogger {
    fn log(&mut self, system: &System<D, X>, _: &NeighborList, step: usize) -> Result<(), Error> {
        if step % self.every == 0 {
            self.values
                .push(compute::temperature(&system.atoms, system.units()));
        }
        Ok(())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Records total energy (kinetic plus potential) every `every` steps
#[derive(Clone, Debug, Default)]
pub struct EnergyLogger {
    every: usize,
    parallel: bool,
    values: Vec<f64>,
}
impl EnergyLogger {
    pub fn new(every: usize) -> Self {
        assert!(every > 0, "Logger cadence should be positive");
        Self {
            every,
            parallel: false,
            values: Vec::new(),
        }
    }
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
impl<const D: usize, X: 'static> Logger<D, X> for EnergyLogger {
    fn log(
        &mut self,
        system: &System<D, X>,
        neighbors: &NeighborList,
        step: usize,
    ) -> Result<(), Error> {
        if step % self.every == 0 {
            let energy = compute::total_energy(system, neighbors, self.parallel)?;
            self.values.push(energy);
        }
        Ok(())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

macro_rules! snapshot_logger {
    ($(#[$doc:meta])* $name:ident, $field:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name<const D: usize> {
            every: usize,
            snapshots: Vec<Vec<Vector<D>>>,
        }
        impl<const D: usize> $name<D> {
            pub fn new(every: usize) -> Self {
                assert!(every > 0, "Logger cadence should be positive");
                Self {
                    every,
                    snapshots: Vec::new(),
                }
            }
            pub fn snapshots(&self) -> &[Vec<Vector<D>>] {
                &self.snapshots
            }
        }
        impl<const D: usize, X: 'static> Logger<D, X> for $name<D> {
            fn log(
                &mut self,
                system: &System<D, X>,
                _: &NeighborList,
                step: usize,
            ) -> Result<(), Error> {
                if step % self.every == 0 {
                    self.snapshots.push(system.atoms.$field.clone());
                }
                Ok(())
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

snapshot_logger!(
    /// Records wrapped coordinates every `every` steps
    CoordinateLogger,
    positions
);
snapshot_logger!(
    /// Records velocities every `every` steps
    VelocityLogger,
    velocities
);
