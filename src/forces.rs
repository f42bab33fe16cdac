use rayon::prelude::*;

use crate::{
    container::Container,
    neighbor::NeighborList,
    pairwise::{self, PairwiseInteraction},
    particle::Particle,
    specific::SpecificInteractions,
    utils::{self, KeyedVec, Vector},
    Error,
};

pub type PairwiseInteractions = KeyedVec<String, Box<dyn PairwiseInteraction>>;
pub type SpecificInteractionLists<const D: usize> =
    KeyedVec<String, Box<dyn SpecificInteractions<D>>>;

/// Borrowed view of everything that contributes to forces and energies
pub struct ForceField<'a, const D: usize> {
    pub particles: &'a [Particle],
    pub positions: &'a [Vector<D>],
    pub container: &'a Container<D>,
    pub general: &'a PairwiseInteractions,
    pub specific: &'a SpecificInteractionLists<D>,
}
impl<'a, const D: usize> ForceField<'a, D> {
    /// Add every contribution into `forces`, interaction by interaction in
    /// insertion order
    pub fn accumulate(
        &self,
        neighbors: &NeighborList,
        forces: &mut [Vector<D>],
        parallel: bool,
    ) -> Result<(), Error> {
        let n = self.positions.len();
        for (name, interaction) in self.general.iter() {
            let partial = if interaction.neighbor_restricted() {
                let pairs = neighbors.pairs();
                reduce_forces(n, pairs.len(), parallel, |idx, buf| {
                    let pair = &pairs[idx];
                    self.pair_force(interaction.as_ref(), pair.i, pair.j, pair.special, buf)
                })
            } else {
                reduce_forces(n, n, parallel, |i, buf| {
                    for j in i + 1..n {
                        self.pair_force(interaction.as_ref(), i, j, false, buf)?;
                    }
                    Ok(())
                })
            };
            add_into(forces, &partial.map_err(|e| e.in_interaction(name))?);
        }
        for (name, list) in self.specific.iter() {
            let partial = reduce_forces(n, list.len(), parallel, |idx, buf| {
                list.add_forces(idx, self.positions, self.container, buf)
            });
            add_into(forces, &partial.map_err(|e| e.in_interaction(name))?);
        }
        Ok(())
    }

    /// Total potential energy of every interaction
    pub fn potential_energy(&self, neighbors: &NeighborList, parallel: bool) -> Result<f64, Error> {
        let n = self.positions.len();
        let mut total = 0.0;
        for (name, interaction) in self.general.iter() {
            let energy = if interaction.neighbor_restricted() {
                let pairs = neighbors.pairs();
                reduce_energy(pairs.len(), parallel, |idx| {
                    let pair = &pairs[idx];
                    self.pair_energy(interaction.as_ref(), pair.i, pair.j, pair.special)
                })
            } else {
                reduce_energy(n, parallel, |i| {
                    let mut energy = 0.0;
                    for j in i + 1..n {
                        energy += self.pair_energy(interaction.as_ref(), i, j, false)?;
                    }
                    Ok(energy)
                })
            };
            total += energy.map_err(|e| e.in_interaction(name))?;
        }
        for (name, list) in self.specific.iter() {
            let energy = reduce_energy(list.len(), parallel, |idx| {
                list.energy(idx, self.positions, self.container)
            });
            total += energy.map_err(|e| e.in_interaction(name))?;
        }
        Ok(total)
    }

    fn pair_force(
        &self,
        interaction: &dyn PairwiseInteraction,
        i: usize,
        j: usize,
        special: bool,
        forces: &mut [Vector<D>],
    ) -> Result<(), Error> {
        let dr = self.container.vector(&self.positions[i], &self.positions[j]);
        let f = pairwise::force(interaction, &dr, &self.particles[i], &self.particles[j], special);
        if !utils::is_finite(&f) {
            return Err(Error::instability(vec![i, j]));
        }
        utils::add_assign(&mut forces[i], &f);
        utils::sub_assign(&mut forces[j], &f);
        Ok(())
    }

    fn pair_energy(
        &self,
        interaction: &dyn PairwiseInteraction,
        i: usize,
        j: usize,
        special: bool,
    ) -> Result<f64, Error> {
        let dr = self.container.vector(&self.positions[i], &self.positions[j]);
        let energy = pairwise::potential_energy(
            interaction,
            &dr,
            &self.particles[i],
            &self.particles[j],
            special,
        );
        if !energy.is_finite() {
            return Err(Error::instability(vec![i, j]));
        }
        Ok(energy)
    }
}

/// Run `contribute` for every item, each writing into a per-thread buffer of
/// `num_particles` forces, and sum the buffers
pub fn reduce_forces<const D: usize, F>(
    num_particles: usize,
    num_items: usize,
    parallel: bool,
    contribute: F,
) -> Result<Vec<Vector<D>>, Error>
where
    F: Fn(usize, &mut [Vector<D>]) -> Result<(), Error> + Send + Sync,
{
    if !parallel {
        let mut forces = vec![[0.0; D]; num_particles];
        for idx in 0..num_items {
            contribute(idx, &mut forces)?;
        }
        return Ok(forces);
    }
    (0..num_items)
        .into_par_iter()
        .try_fold(
            || vec![[0.0; D]; num_particles],
            |mut forces, idx| {
                contribute(idx, &mut forces)?;
                Ok(forces)
            },
        )
        .try_reduce(
            || vec![[0.0; D]; num_particles],
            |mut a, b| {
                add_into(&mut a, &b);
                Ok(a)
            },
        )
}

fn reduce_energy<F>(num_items: usize, parallel: bool, contribute: F) -> Result<f64, Error>
where
    F: Fn(usize) -> Result<f64, Error> + Send + Sync,
{
    if parallel {
        (0..num_items)
            .into_par_iter()
            .map(contribute)
            .try_reduce(|| 0.0, |a, b| Ok(a + b))
    } else {
        (0..num_items).map(contribute).sum()
    }
}

fn add_into<const D: usize>(forces: &mut [Vector<D>], partial: &[Vector<D>]) {
    for (f, p) in forces.iter_mut().zip(partial.iter()) {
        utils::add_assign(f, p);
    }
}
