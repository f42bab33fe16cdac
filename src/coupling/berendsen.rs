use super::{assert_temperature, scale_velocities, Coupling};
use crate::{compute::temperature, system::System, Error};

/// Weak-coupling thermostat relaxing the temperature towards the target with
/// time constant `coupling_time`
#[derive(Clone, Debug)]
pub struct BerendsenThermostat {
    temperature: f64,
    coupling_time: f64,
}

impl BerendsenThermostat {
    pub fn new(temperature: f64, coupling_time: f64) -> Self {
        assert_temperature(temperature);
        assert!(
            coupling_time > 0.0,
            "Coupling time should be positive, found {}",
            coupling_time
        );
        Self {
            temperature,
            coupling_time,
        }
    }
}

impl Coupling for BerendsenThermostat {
    fn apply<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        timestep: f64,
        _step: usize,
    ) -> Result<(), Error> {
        let current = temperature(&system.atoms, system.units());
        if current == 0.0 {
            return Ok(());
        }
        let ratio = 1.0 + timestep / self.coupling_time * (self.temperature / current - 1.0);
        // a timestep longer than the coupling time can overshoot below zero
        scale_velocities(system, ratio.max(0.0).sqrt());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{atoms::Atoms, container::Container, particle::Particle, system::SystemBuilder, units::UnitSystem};
    use approx::assert_relative_eq;

    #[test]
    fn relaxes_towards_target() {
        let atoms = Atoms::<2>::new(
            vec![Particle::new(1.0); 2],
            vec![[0.0; 2], [1.0; 2]],
            vec![[1.0, 1.0], [-1.0, -1.0]],
        )
        .unwrap();
        let mut system = SystemBuilder::new(atoms, Container::cubic(4.0))
            .units(UnitSystem::Reduced)
            .build()
            .unwrap();
        // T = 2 KE / (D N) = 2 * 2 / 4 = 1
        assert_relative_eq!(temperature(&system.atoms, system.units()), 1.0);
        let mut thermostat = BerendsenThermostat::new(2.0, 0.1);
        thermostat.apply(&mut system, 0.01, 1).unwrap();
        // T' = T (1 + 0.1 (2 - 1))
        assert_relative_eq!(
            temperature(&system.atoms, system.units()),
            1.1,
            max_relative = 1e-12
        );
        // coupling time equal to the timestep reaches the target at once
        let mut thermostat = BerendsenThermostat::new(2.0, 0.01);
        thermostat.apply(&mut system, 0.01, 2).unwrap();
        assert_relative_eq!(
            temperature(&system.atoms, system.units()),
            2.0,
            max_relative = 1e-12
        );
    }
}
