use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use super::{assert_temperature, Coupling};
use crate::{system::System, Error};

/// Stochastic collisions with a heat bath.
///
/// Every step, each particle has its velocity redrawn from the
/// Maxwell-Boltzmann distribution at the target temperature with probability
/// `timestep / coupling_time`.
#[derive(Clone, Debug)]
pub struct AndersenThermostat {
    temperature: f64,
    coupling_time: f64,
    rng: StdRng,
}

impl AndersenThermostat {
    pub fn new(temperature: f64, coupling_time: f64, seed: u64) -> Self {
        assert_temperature(temperature);
        assert!(
            coupling_time > 0.0,
            "Coupling time should be positive, found {}",
            coupling_time
        );
        Self {
            temperature,
            coupling_time,
            rng: StdRng::seed_from_u64(seed),
        }
    }
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Coupling for AndersenThermostat {
    fn apply<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        timestep: f64,
        _step: usize,
    ) -> Result<(), Error> {
        let probability = (timestep / self.coupling_time).min(1.0);
        let kt = system.units().boltzmann() * self.temperature;
        let atoms = &mut system.atoms;
        for i in 0..atoms.num_particles() {
            if self.rng.gen::<f64>() >= probability {
                continue;
            }
            let sigma = (kt / atoms.mass(i)).sqrt();
            for vk in atoms.velocities[i].iter_mut() {
                let z: f64 = StandardNormal.sample(&mut self.rng);
                *vk = sigma * z;
            }
        }
        Ok(())
    }
}
