use super::{assert_timestep, Integrator};
use crate::{system::System, utils::Vector, Error};

/// Kick-drift leapfrog with velocities stored at half steps
#[derive(Clone, Debug)]
pub struct Leapfrog {
    timestep: f64,
    in_place: bool,
    started: bool,
}
impl Leapfrog {
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

impl Integrator for Leapfrog {
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
        // initial velocities are on-step; shift them to the half step
        let kick = if self.started { dt } else { 0.5 * dt };
        let container = &system.container;
        let atoms = &mut system.atoms;
        for i in 0..atoms.num_particles() {
            let scale = kick / atoms.particles()[i].mass;
            let v = &mut atoms.velocities[i];
            for k in 0..D {
                v[k] += scale * forces[i][k];
            }
            let v = *v;
            let x = &mut atoms.positions[i];
            for k in 0..D {
                x[k] += dt * v[k];
            }
            *x = container.wrap(x);
        }
        self.started = true;
        system.current_forces(forces, self.in_place, parallel)
    }
}
