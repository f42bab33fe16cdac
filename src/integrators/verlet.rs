use super::{assert_timestep, Integrator};
use crate::{system::System, utils::Vector, Error};

/// Velocity-verlet integrator
#[derive(Clone, Debug)]
pub struct VelocityVerlet {
    timestep: f64,
    in_place: bool,
}

impl VelocityVerlet {
    pub fn new(timestep: f64) -> Self {
        assert_timestep(timestep);
        Self {
            timestep,
            in_place: true,
        }
    }
    /// Allocate a fresh force buffer every step instead of reusing one
    pub fn functional(mut self) -> Self {
        self.in_place = false;
        self
    }
    pub fn in_place(&self) -> bool {
        self.in_place
    }

    /// Steps the velocities of the system by half a timestep
    fn increment_velocity_halfstep<const D: usize, X>(
        &self,
        system: &mut System<D, X>,
        forces: &[Vector<D>],
    ) {
        let half_ts = 0.5 * self.timestep;
        let atoms = &mut system.atoms;
        for (i, f) in forces.iter().enumerate() {
            let scale = half_ts / atoms.mass(i);
            let v = &mut atoms.velocities[i];
            for k in 0..D {
                v[k] += scale * f[k];
            }
        }
    }
    /// Steps the positions of the system forward and wraps them into the box
    fn increment_positions<const D: usize, X>(&self, system: &mut System<D, X>) {
        let ts = self.timestep;
        let container = &system.container;
        for (x, v) in system
            .atoms
            .positions
            .iter_mut()
            .zip(system.atoms.velocities.iter())
        {
            for k in 0..D {
                x[k] += ts * v[k];
            }
            *x = container.wrap(x);
        }
    }
}

impl Integrator for VelocityVerlet {
    fn timestep(&self) -> f64 {
        self.timestep
    }
    fn advance<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        forces: &mut Vec<Vector<D>>,
        parallel: bool,
    ) -> Result<(), Error> {
        self.increment_velocity_halfstep(system, forces);
        self.increment_positions(system);
        system.current_forces(forces, self.in_place, parallel)?;
        self.increment_velocity_halfstep(system, forces);
        Ok(())
    }
}
