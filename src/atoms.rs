use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{particle::Particle, utils::Vector, Error};

/// Particle properties during simulation, not including forces.
///
/// `aux` holds per-particle state that only step operations may change; it is
/// indexed identically to `particles`.
#[derive(Clone, Debug)]
pub struct Atoms<const D: usize, X = ()> {
    particles: Vec<Particle>,
    pub positions: Vec<Vector<D>>,
    pub velocities: Vec<Vector<D>>,
    pub aux: Vec<X>,
}
impl<const D: usize, X: Default + Clone> Atoms<D, X> {
    pub fn new(
        particles: Vec<Particle>,
        positions: Vec<Vector<D>>,
        velocities: Vec<Vector<D>>,
    ) -> Result<Self, Error> {
        let aux = vec![X::default(); particles.len()];
        Self::with_aux(particles, positions, velocities, aux)
    }
    /// Atoms at rest
    pub fn at_rest(particles: Vec<Particle>, positions: Vec<Vector<D>>) -> Result<Self, Error> {
        let velocities = vec![[0.0; D]; positions.len()];
        Self::new(particles, positions, velocities)
    }
    pub fn empty() -> Self {
        Self {
            particles: Vec::new(),
            positions: Vec::new(),
            velocities: Vec::new(),
            aux: Vec::new(),
        }
    }
    /// Append copies of one particle at the given coordinates, at rest
    pub fn add_particles(&mut self, particle: Particle, coords: Vec<Vector<D>>) {
        let num = coords.len();
        self.particles.reserve(num);
        self.velocities.reserve(num);
        self.aux.reserve(num);
        for coord in coords {
            self.particles.push(particle);
            self.positions.push(coord);
            self.velocities.push([0.0; D]);
            self.aux.push(X::default());
        }
    }
}
impl<const D: usize, X> Atoms<D, X> {
    pub fn with_aux(
        particles: Vec<Particle>,
        positions: Vec<Vector<D>>,
        velocities: Vec<Vector<D>>,
        aux: Vec<X>,
    ) -> Result<Self, Error> {
        let atoms = Self {
            particles,
            positions,
            velocities,
            aux,
        };
        atoms.check_lengths()?;
        Ok(atoms)
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
    pub fn mass(&self, idx: usize) -> f64 {
        self.particles[idx].mass
    }

    /// Read-only particle data alongside the mutable auxiliary state
    pub(crate) fn split_aux(
        &mut self,
    ) -> (&[Particle], &[Vector<D>], &[Vector<D>], &mut [X]) {
        (
            &self.particles,
            &self.positions,
            &self.velocities,
            &mut self.aux,
        )
    }

    /// Every per-particle array has one entry per particle
    pub fn check_lengths(&self) -> Result<(), Error> {
        let particles = self.particles.len();
        let lengths = [
            ("positions", self.positions.len()),
            ("velocities", self.velocities.len()),
            ("auxiliary data", self.aux.len()),
        ];
        for (what, len) in lengths {
            if len != particles {
                return Err(Error::LengthMismatch {
                    what,
                    particles,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Draw velocities from the Maxwell-Boltzmann distribution at `temperature`.
    ///
    /// `boltzmann` is the Boltzmann constant in the run's unit convention.
    pub fn random_velocities<R: Rng + ?Sized>(
        &mut self,
        temperature: f64,
        boltzmann: f64,
        rng: &mut R,
    ) -> Result<(), Error> {
        let dist = Normal::new(0.0, (boltzmann * temperature).sqrt()).map_err(|_| {
            Error::InvalidParameter(format!(
                "temperature should be non-negative, found {}",
                temperature
            ))
        })?;
        for (v, p) in self.velocities.iter_mut().zip(self.particles.iter()) {
            let inv_sqrt_m = 1.0 / p.mass.sqrt();
            for vk in v.iter_mut() {
                *vk = dist.sample(rng) * inv_sqrt_m;
            }
        }
        Ok(())
    }

    /// Subtract the mass-weighted mean velocity from every particle
    pub fn remove_centre_of_mass_motion(&mut self) {
        let mut momentum = [0.0; D];
        let mut total_mass = 0.0;
        for (v, p) in self.velocities.iter().zip(self.particles.iter()) {
            for k in 0..D {
                momentum[k] += p.mass * v[k];
            }
            total_mass += p.mass;
        }
        if total_mass == 0.0 {
            return;
        }
        for v in self.velocities.iter_mut() {
            for k in 0..D {
                v[k] -= momentum[k] / total_mass;
            }
        }
    }
}
