use std::mem;

use crate::{
    atoms::Atoms,
    container::Container,
    forces::{ForceField, PairwiseInteractions, SpecificInteractionLists},
    neighbor::{EligibilityMatrix, NeighborFinder, NeighborList, NoNeighborFinder},
    operations::{StepContext, StepOperation},
    output::Logger,
    pairwise::PairwiseInteraction,
    specific::SpecificInteractions,
    units::UnitSystem,
    utils::{KeyedVec, Vector},
    Error,
};

type Loggers<const D: usize, X> = KeyedVec<String, Box<dyn Logger<D, X>>>;
type Operations<const D: usize, X> = KeyedVec<String, Box<dyn StepOperation<D, X>>>;

/// Full simulation state: particles, interactions, box, neighbor search and
/// the observers attached to a run
pub struct System<const D: usize, X = ()> {
    pub atoms: Atoms<D, X>,
    pub container: Container<D>,
    units: UnitSystem,
    general: PairwiseInteractions,
    specific: SpecificInteractionLists<D>,
    eligibility: EligibilityMatrix,
    neighbor_finder: Box<dyn NeighborFinder<D>>,
    loggers: Loggers<D, X>,
    operations: Operations<D, X>,
    neighbors: Option<NeighborList>,
    step: usize,
}

impl<const D: usize, X> System<D, X> {
    // Getters
    pub fn units(&self) -> UnitSystem {
        self.units
    }
    pub fn num_particles(&self) -> usize {
        self.atoms.num_particles()
    }
    /// Number of completed steps
    pub fn step(&self) -> usize {
        self.step
    }
    pub fn general_interactions(&self) -> &PairwiseInteractions {
        &self.general
    }
    pub fn specific_interactions(&self) -> &SpecificInteractionLists<D> {
        &self.specific
    }
    pub fn eligibility(&self) -> &EligibilityMatrix {
        &self.eligibility
    }
    pub fn neighbor_finder(&self) -> &dyn NeighborFinder<D> {
        self.neighbor_finder.as_ref()
    }
    /// The list from the last refresh, if any
    pub fn neighbors(&self) -> Option<&NeighborList> {
        self.neighbors.as_ref()
    }
    /// A registered logger, downcast to its concrete type
    pub fn logger<T: 'static>(&self, name: &str) -> Option<&T> {
        self.loggers
            .get(&name.to_string())
            .and_then(|l| l.as_any().downcast_ref::<T>())
    }

    pub(crate) fn set_step(&mut self, step: usize) {
        self.step = step;
    }

    fn force_field(&self) -> ForceField<'_, D> {
        ForceField {
            particles: self.atoms.particles(),
            positions: &self.atoms.positions,
            container: &self.container,
            general: &self.general,
            specific: &self.specific,
        }
    }

    // Forces and energies

    /// Per-particle forces in a new buffer
    pub fn forces(&self, neighbors: &NeighborList, parallel: bool) -> Result<Vec<Vector<D>>, Error> {
        let mut forces = Vec::with_capacity(self.num_particles());
        self.forces_into(neighbors, &mut forces, parallel)?;
        Ok(forces)
    }

    /// Per-particle forces written into an existing buffer, resized to fit
    pub fn forces_into(
        &self,
        neighbors: &NeighborList,
        forces: &mut Vec<Vector<D>>,
        parallel: bool,
    ) -> Result<(), Error> {
        forces.clear();
        forces.resize(self.num_particles(), [0.0; D]);
        self.force_field().accumulate(neighbors, forces, parallel)
    }

    pub fn potential_energy(&self, neighbors: &NeighborList, parallel: bool) -> Result<f64, Error> {
        self.force_field().potential_energy(neighbors, parallel)
    }

    /// Forces over the current neighbor list, either functional or in place
    pub(crate) fn current_forces(
        &self,
        forces: &mut Vec<Vector<D>>,
        in_place: bool,
        parallel: bool,
    ) -> Result<(), Error> {
        let empty = NeighborList::default();
        let neighbors = self.neighbors.as_ref().unwrap_or(&empty);
        if in_place {
            self.forces_into(neighbors, forces, parallel)
        } else {
            *forces = self.forces(neighbors, parallel)?;
            Ok(())
        }
    }

    // Per-step hooks

    /// Rebuild the neighbor list if none exists or the cadence is due
    pub fn refresh_neighbors(&mut self, step: usize, parallel: bool) -> Result<(), Error> {
        if !self
            .neighbor_finder
            .needs_update(self.neighbors.as_ref(), step)
        {
            return Ok(());
        }
        let list = self.neighbor_finder.build(
            &self.atoms.positions,
            &self.container,
            &self.eligibility,
            parallel,
        );
        let within = self
            .neighbor_finder
            .cutoff()
            .map(|rc| (self.atoms.positions.as_slice(), &self.container, rc * rc));
        list.validate(&self.eligibility, within)?;
        log::debug!("Rebuilt neighbor list at step {}: {} pairs", step, list.len());
        self.neighbors = Some(list);
        Ok(())
    }

    /// Give every logger read-only access to the current state
    pub fn run_loggers(&mut self, step: usize) -> Result<(), Error> {
        let mut loggers = mem::take(&mut self.loggers);
        let empty = NeighborList::default();
        let result = {
            let neighbors = self.neighbors.as_ref().unwrap_or(&empty);
            loggers
                .iter_mut()
                .try_for_each(|(_, logger)| logger.log(self, neighbors, step))
        };
        self.loggers = loggers;
        result
    }

    /// Let every step operation update the auxiliary particle state
    pub fn run_operations(&mut self, step: usize) -> Result<(), Error> {
        if self.operations.is_empty() {
            return Ok(());
        }
        let empty = NeighborList::default();
        let neighbors = self.neighbors.as_ref().unwrap_or(&empty);
        let (particles, positions, velocities, aux) = self.atoms.split_aux();
        for (_, operation) in self.operations.iter_mut() {
            operation.apply(
                StepContext {
                    particles,
                    positions,
                    velocities,
                    container: &self.container,
                    neighbors,
                    aux: &mut *aux,
                },
                step,
            )?;
        }
        Ok(())
    }
}

/// Assembles a [`System`] from in-memory data and checks it for consistency
pub struct SystemBuilder<const D: usize, X = ()> {
    atoms: Atoms<D, X>,
    container: Container<D>,
    units: UnitSystem,
    general: PairwiseInteractions,
    specific: SpecificInteractionLists<D>,
    eligibility: Option<EligibilityMatrix>,
    neighbor_finder: Option<Box<dyn NeighborFinder<D>>>,
    loggers: Loggers<D, X>,
    operations: Operations<D, X>,
    error: Option<Error>,
}
impl<const D: usize, X> SystemBuilder<D, X> {
    pub fn new(atoms: Atoms<D, X>, container: Container<D>) -> Self {
        Self {
            atoms,
            container,
            units: UnitSystem::default(),
            general: KeyedVec::new(),
            specific: KeyedVec::new(),
            eligibility: None,
            neighbor_finder: None,
            loggers: KeyedVec::new(),
            operations: KeyedVec::new(),
            error: None,
        }
    }
    pub fn units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }
    pub fn general(mut self, name: &str, interaction: impl PairwiseInteraction + 'static) -> Self {
        let result = self.general.add(name, Box::new(interaction));
        self.keep_first_error(result);
        self
    }
    pub fn specific(mut self, name: &str, list: impl SpecificInteractions<D> + 'static) -> Self {
        let result = self.specific.add(name, Box::new(list));
        self.keep_first_error(result);
        self
    }
    pub fn eligibility(mut self, eligibility: EligibilityMatrix) -> Self {
        self.eligibility = Some(eligibility);
        self
    }
    pub fn neighbor_finder(mut self, finder: Box<dyn NeighborFinder<D>>) -> Self {
        self.neighbor_finder = Some(finder);
        self
    }
    pub fn logger(mut self, name: &str, logger: impl Logger<D, X> + 'static) -> Self {
        let result = self.loggers.add(name, Box::new(logger));
        self.keep_first_error(result);
        self
    }
    pub fn operation(mut self, name: &str, operation: impl StepOperation<D, X> + 'static) -> Self {
        let result = self.operations.add(name, Box::new(operation));
        self.keep_first_error(result);
        self
    }

    fn keep_first_error(&mut self, result: Result<(), Error>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    pub fn build(self) -> Result<System<D, X>, Error> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.atoms.check_lengths()?;
        let n = self.atoms.num_particles();

        if let Some(p) = self.atoms.particles().iter().find(|p| p.mass <= 0.0 || !p.mass.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "particle masses should be positive, found {}",
                p.mass
            )));
        }

        let eligibility = self
            .eligibility
            .unwrap_or_else(|| EligibilityMatrix::all(n));
        if eligibility.num_particles() != n {
            return Err(Error::LengthMismatch {
                what: "eligibility matrix",
                particles: n,
                len: eligibility.num_particles(),
            });
        }

        for (name, interaction) in self.general.iter() {
            if let Some(found) = interaction.units().filter(|&u| u != self.units) {
                return Err(Error::UnitMismatch {
                    interaction: name.clone(),
                    expected: self.units,
                    found,
                });
            }
        }
        for (name, list) in self.specific.iter() {
            if let Some(found) = list.mismatched_units(self.units) {
                return Err(Error::UnitMismatch {
                    interaction: name.clone(),
                    expected: self.units,
                    found,
                });
            }
            if let Some(index) = list.max_index().filter(|&i| i >= n) {
                return Err(Error::IndexOutOfRange {
                    interaction: name.clone(),
                    index,
                    particles: n,
                });
            }
        }

        let neighbor_finder = self
            .neighbor_finder
            .unwrap_or_else(|| Box::new(NoNeighborFinder::new()));

        let max_cutoff = self
            .general
            .values()
            .filter_map(|i| i.cutoff().radius())
            .chain(neighbor_finder.cutoff())
            .fold(0.0, f64::max);
        if self.container.min_extent() < 2.0 * max_cutoff {
            log::warn!(
                "Smallest box length {} is less than twice the largest cutoff {}; \
                 minimum-image distances may be wrong",
                self.container.min_extent(),
                max_cutoff
            );
        }

        Ok(System {
            atoms: self.atoms,
            container: self.container,
            units: self.units,
            general: self.general,
            specific: self.specific,
            eligibility,
            neighbor_finder,
            loggers: self.loggers,
            operations: self.operations,
            neighbors: None,
            step: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        neighbor::{DistanceNeighborFinder, UpdateSettings},
        output::TemperatureLogger,
        pairwise::{Coulomb, Cutoff, LennardJones},
        particle::Particle,
        specific::{HarmonicBond, InteractionList},
    };

    fn atoms() -> Atoms<3> {
        let particles = vec![Particle::new(1.0).with_lj(0.3, 1.0); 3];
        Atoms::at_rest(particles, vec![[0.5; 3], [1.0; 3], [1.5; 3]]).unwrap()
    }

    #[test]
    fn rejects_unit_mismatch() {
        let err = SystemBuilder::new(atoms(), Container::cubic(3.0))
            .units(UnitSystem::KjMolNm)
            .general(
                "coulomb",
                Coulomb::new(UnitSystem::KcalMolAngstrom, Cutoff::distance(1.0)),
            )
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnitMismatch { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn rejects_duplicate_names_and_bad_indices() {
        let err = SystemBuilder::new(atoms(), Container::cubic(3.0))
            .general("lj", LennardJones::new(Cutoff::None))
            .general("lj", LennardJones::new(Cutoff::None))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::DuplicateName(_)));

        let err = SystemBuilder::new(atoms(), Container::cubic(3.0))
            .specific(
                "bonds",
                InteractionList::uniform(vec![[0, 3]], HarmonicBond::new(1.0, 0.1)),
            )
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, .. }));
    }

    #[test]
    fn rejects_wrong_eligibility_size() {
        let err = SystemBuilder::new(atoms(), Container::cubic(3.0))
            .eligibility(EligibilityMatrix::all(4))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::LengthMismatch { what: "eligibility matrix", .. }));
    }

    #[test]
    fn functional_and_in_place_forces_agree() {
        let mut system = SystemBuilder::new(atoms(), Container::cubic(3.0))
            .general("lj", LennardJones::new(Cutoff::shifted_potential(1.2)))
            .specific(
                "bonds",
                InteractionList::uniform(vec![[0, 2]], HarmonicBond::new(10.0, 0.5)),
            )
            .neighbor_finder(Box::new(DistanceNeighborFinder::new(
                1.2,
                UpdateSettings::default(),
            )))
            .build()
            .unwrap();
        system.refresh_neighbors(0, false).unwrap();
        let neighbors = system.neighbors().unwrap().clone();
        assert_eq!(neighbors.len(), 2);

        let functional = system.forces(&neighbors, false).unwrap();
        let mut in_place = vec![[1.0; 3]; 7];
        system.forces_into(&neighbors, &mut in_place, false).unwrap();
        assert_eq!(functional, in_place);
    }

    #[test]
    fn loggers_are_found_by_name() {
        let mut system = SystemBuilder::new(atoms(), Container::cubic(3.0))
            .logger("temperature", TemperatureLogger::new(1))
            .build()
            .unwrap();
        system.run_loggers(0).unwrap();
        let logger = system.logger::<TemperatureLogger>("temperature").unwrap();
        assert_eq!(logger.values(), &[0.0]);
        assert!(system.logger::<TemperatureLogger>("missing").is_none());
    }
}
