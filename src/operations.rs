use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    container::Container, neighbor::NeighborList, particle::Particle, utils::Vector, Error,
};

/// What a step operation may see and change.
///
/// Only the auxiliary per-particle state is writable.
pub struct StepContext<'a, const D: usize, X> {
    pub particles: &'a [Particle],
    pub positions: &'a [Vector<D>],
    pub velocities: &'a [Vector<D>],
    pub container: &'a Container<D>,
    pub neighbors: &'a NeighborList,
    pub aux: &'a mut [X],
}

/// State change applied once per step, after coupling and outside the force
/// evaluation
pub trait StepOperation<const D: usize, X>: Send {
    fn apply(&mut self, context: StepContext<'_, D, X>, step: usize) -> Result<(), Error>;
}

impl<const D: usize, X, F> StepOperation<D, X> for F
where
    F: FnMut(StepContext<'_, D, X>, usize) -> Result<(), Error> + Send,
{
    fn apply(&mut self, context: StepContext<'_, D, X>, step: usize) -> Result<(), Error> {
        self(context, step)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Susceptible,
    Infected,
    Recovered,
}

/// Contact-driven spread of a status between particles.
///
/// Each step, every susceptible particle within `radius` of an infected
/// neighbor becomes infected with probability `infection` per contact, and
/// every particle infected before the step recovers with probability
/// `recovery`. Contacts are taken from the neighbor list.
#[derive(Clone, Debug)]
pub struct Contagion {
    sqdist: f64,
    infection: f64,
    recovery: f64,
    rng: StdRng,
}
impl Contagion {
    pub fn new(radius: f64, infection: f64, recovery: f64, seed: u64) -> Self {
        assert!(radius > 0.0, "Contact radius should be positive");
        assert!(
            (0.0..=1.0).contains(&infection) && (0.0..=1.0).contains(&recovery),
            "Probabilities should be within [0, 1]"
        );
        Self {
            sqdist: radius * radius,
            infection,
            recovery,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<const D: usize> StepOperation<D, Status> for Contagion {
    fn apply(&mut self, context: StepContext<'_, D, Status>, _step: usize) -> Result<(), Error> {
        let status = &*context.aux;
        let mut infected = Vec::new();
        for pair in context.neighbors.iter() {
            let (source, target) = match (status[pair.i], status[pair.j]) {
                (Status::Infected, Status::Susceptible) => (pair.i, pair.j),
                (Status::Susceptible, Status::Infected) => (pair.j, pair.i),
                _ => continue,
            };
            let r2 = context
                .container
                .distance_squared(&context.positions[source], &context.positions[target]);
            if r2 <= self.sqdist && self.rng.gen::<f64>() < self.infection {
                infected.push(target);
            }
        }
        let mut recovered = Vec::new();
        for (i, s) in status.iter().enumerate() {
            if *s == Status::Infected && self.rng.gen::<f64>() < self.recovery {
                recovered.push(i);
            }
        }
        for i in infected {
            context.aux[i] = Status::Infected;
        }
        for i in recovered {
            context.aux[i] = Status::Recovered;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbor::{EligibilityMatrix, NeighborPair};

    #[test]
    fn spreads_only_within_contact_radius() {
        let container = Container::cubic(10.0);
        let particles = vec![Particle::new(1.0); 3];
        let positions = vec![[1.0, 1.0], [1.5, 1.0], [4.0, 1.0]];
        let velocities = vec![[0.0; 2]; 3];
        let neighbors = NeighborList::new(EligibilityMatrix::all(3).eligible_pairs());
        let mut aux = vec![Status::Infected, Status::Susceptible, Status::Susceptible];
        let mut contagion = Contagion::new(1.0, 1.0, 0.0, 7);
        contagion
            .apply(
                StepContext {
                    particles: &particles,
                    positions: &positions,
                    velocities: &velocities,
                    container: &container,
                    neighbors: &neighbors,
                    aux: &mut aux,
                },
                1,
            )
            .unwrap();
        assert_eq!(aux, vec![Status::Infected, Status::Infected, Status::Susceptible]);
    }

    #[test]
    fn newly_infected_do_not_recover_in_the_same_step() {
        let container = Container::cubic(10.0);
        let particles = vec![Particle::new(1.0); 2];
        let positions = vec![[1.0, 1.0], [1.5, 1.0]];
        let velocities = vec![[0.0; 2]; 2];
        let neighbors = NeighborList::new(vec![NeighborPair::new(0, 1, false)]);
        let mut aux = vec![Status::Infected, Status::Susceptible];
        let mut contagion = Contagion::new(1.0, 1.0, 1.0, 7);
        contagion
            .apply(
                StepContext {
                    particles: &particles,
                    positions: &positions,
                    velocities: &velocities,
                    container: &container,
                    neighbors: &neighbors,
                    aux: &mut aux,
                },
                1,
            )
            .unwrap();
        assert_eq!(aux, vec![Status::Recovered, Status::Infected]);
    }
}
