use super::{assert_timestep, Integrator};
use crate::{system::System, utils::Vector, Error};

/// Position-only Störmer-Verlet, `x(t+dt) = 2x(t) - x(t-dt) + a dt^2`.
///
/// The previous position is carried as the displacement of the last step,
/// stored in the velocities as `(x(t) - x(t-dt)) / dt`. Logged velocities are
/// therefore the central difference over the preceding half step. The first
/// step is started from the initial velocities with a Taylor step.
#[derive(Clone, Debug)]
pub struct StormerVerlet {
    timestep: f64,
    in_place: bool,
    started: bool,
}
impl StormerVerlet {
    pub fn new(timestep: f64) -> Self {
        assert_timestep(timestep);
        Self {
            timestep,
            in_place: true,
            started: false,
        }
    }
    pub fn functional(mut self) -> Self {
        self.in_place = false;
        self
    }
}

impl Integrator for StormerVerlet {
    fn timestep(&self) -> f64 {
        self.timestep
    }
    fn begin(&mut self, step: usize) {
        if step == 0 {
            self.started = false;
        }
    }
    fn advance<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        forces: &mut Vec<Vector<D>>,
        parallel: bool,
    ) -> Result<(), Error> {
        let dt = self.timestep;
        let accel_factor = if self.started { dt * dt } else { 0.5 * dt * dt };
        let container = &system.container;
        let atoms = &mut system.atoms;
        for i in 0..atoms.num_particles() {
            let inv_mass = 1.0 / atoms.particles()[i].mass;
            let x = atoms.positions[i];
            let mut next = x;
            for k in 0..D {
                // x + (x - x_prev) + a dt^2
                next[k] += atoms.velocities[i][k] * dt + forces[i][k] * inv_mass * accel_factor;
            }
            for k in 0..D {
                atoms.velocities[i][k] = (next[k] - x[k]) / dt;
            }
            atoms.positions[i] = container.wrap(&next);
        }
        self.started = true;
        system.current_forces(forces, self.in_place, parallel)
    }
}
