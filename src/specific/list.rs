use super::SpecificInteraction;
use crate::{
    container::Container,
    units::UnitSystem,
    utils::{self, Vector},
    Error,
};

/// Index tuples paired with the parameters of the interaction acting on each
#[derive(Clone, Debug)]
pub struct InteractionList<const N: usize, I> {
    tuples: Vec<[usize; N]>,
    interactions: Vec<I>,
}
impl<const N: usize, I> InteractionList<N, I> {
    pub fn new() -> Self {
        Self {
            tuples: Vec::new(),
            interactions: Vec::new(),
        }
    }
    pub fn from_parts(tuples: Vec<[usize; N]>, interactions: Vec<I>) -> Result<Self, Error> {
        if tuples.len() != interactions.len() {
            return Err(Error::LengthMismatch {
                what: "interaction parameters",
                particles: tuples.len(),
                len: interactions.len(),
            });
        }
        Ok(Self {
            tuples,
            interactions,
        })
    }
    /// The same parameters for every tuple
    pub fn uniform(tuples: Vec<[usize; N]>, interaction: I) -> Self
    where
        I: Clone,
    {
        let interactions = vec![interaction; tuples.len()];
        Self {
            tuples,
            interactions,
        }
    }
    pub fn push(&mut self, tuple: [usize; N], interaction: I) {
        self.tuples.push(tuple);
        self.interactions.push(interaction);
    }
    pub fn tuples(&self) -> &[[usize; N]] {
        &self.tuples
    }
    pub fn interactions(&self) -> &[I] {
        &self.interactions
    }
}
impl<const N: usize, I> Default for InteractionList<N, I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of an interaction list, evaluated one tuple at a time
pub trait SpecificInteractions<const D: usize>: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest particle index referenced by any tuple
    fn max_index(&self) -> Option<usize>;

    /// The first declared unit convention differing from `expected`
    fn mismatched_units(&self, expected: UnitSystem) -> Option<UnitSystem>;

    /// Add the forces of tuple `idx` into `forces`
    fn add_forces(
        &self,
        idx: usize,
        positions: &[Vector<D>],
        container: &Container<D>,
        forces: &mut [Vector<D>],
    ) -> Result<(), Error>;

    fn energy(
        &self,
        idx: usize,
        positions: &[Vector<D>],
        container: &Container<D>,
    ) -> Result<f64, Error>;
}

impl<const D: usize, const N: usize, I> SpecificInteractions<D> for InteractionList<N, I>
where
    I: SpecificInteraction<D, N>,
{
    fn len(&self) -> usize {
        self.tuples.len()
    }
    fn max_index(&self) -> Option<usize> {
        self.tuples.iter().flatten().max().copied()
    }
    fn mismatched_units(&self, expected: UnitSystem) -> Option<UnitSystem> {
        self.interactions
            .iter()
            .filter_map(|i| i.units())
            .find(|&u| u != expected)
    }
    fn add_forces(
        &self,
        idx: usize,
        positions: &[Vector<D>],
        container: &Container<D>,
        forces: &mut [Vector<D>],
    ) -> Result<(), Error> {
        let tuple = &self.tuples[idx];
        let coords = tuple.map(|i| positions[i]);
        let tuple_forces = self.interactions[idx].forces(&coords, container);
        if !tuple_forces.iter().all(utils::is_finite) {
            return Err(Error::instability(tuple.to_vec()));
        }
        for (&i, f) in tuple.iter().zip(tuple_forces.iter()) {
            utils::add_assign(&mut forces[i], f);
        }
        Ok(())
    }
    fn energy(
        &self,
        idx: usize,
        positions: &[Vector<D>],
        container: &Container<D>,
    ) -> Result<f64, Error> {
        let tuple = &self.tuples[idx];
        let coords = tuple.map(|i| positions[i]);
        let energy = self.interactions[idx].potential_energy(&coords, container);
        if !energy.is_finite() {
            return Err(Error::instability(tuple.to_vec()));
        }
        Ok(energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specific::HarmonicBond;

    #[test]
    fn accumulates_per_particle() {
        let container = Container::cubic(10.0);
        let positions = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        let bonds = InteractionList::uniform(vec![[0, 1], [1, 2]], HarmonicBond::new(2.0, 0.5));
        let list: &dyn SpecificInteractions<2> = &bonds;
        assert_eq!(list.len(), 2);
        assert_eq!(list.max_index(), Some(2));

        let mut forces = vec![[0.0; 2]; 3];
        for idx in 0..list.len() {
            list.add_forces(idx, &positions, &container, &mut forces).unwrap();
        }
        assert_eq!(forces, vec![[1.0, 0.0], [-1.0, 1.0], [0.0, -1.0]]);
    }

    #[test]
    fn coincident_particles_are_unstable() {
        let container = Container::cubic(10.0);
        let positions = vec![[1.0, 1.0], [1.0, 1.0]];
        let bonds = InteractionList::uniform(vec![[0, 1]], HarmonicBond::new(2.0, 0.5));
        let mut forces = vec![[0.0; 2]; 2];
        let err = SpecificInteractions::<2>::add_forces(&bonds, 0, &positions, &container, &mut forces)
            .unwrap_err();
        assert!(matches!(err, Error::NumericalInstability { ref particles, .. } if particles == &[0, 1]));
    }

    #[test]
    fn parameter_count_must_match() {
        let err = InteractionList::from_parts(vec![[0, 1]], Vec::<HarmonicBond>::new()).unwrap_err();
        assert!(err.is_configuration());
    }
}
