pub mod brute_force;
pub mod eligibility;
pub mod grid;
pub mod kd_tree;
pub mod neighbor_list;
pub mod neighbor_update_settings;

pub use brute_force::{DistanceNeighborFinder, NoNeighborFinder};
pub use eligibility::EligibilityMatrix;
pub use grid::CellListNeighborFinder;
pub use kd_tree::TreeNeighborFinder;
pub use neighbor_list::{NeighborList, NeighborPair};
pub use neighbor_update_settings::UpdateSettings;

use rayon::prelude::*;

use crate::{container::Container, utils::Vector};

/// Trait for strategies producing the list of interacting pairs.
///
/// Every strategy returns the same list for the same input: eligible pairs
/// `i < j` within the cutoff, sorted by `(i, j)`.
pub trait NeighborFinder<const D: usize>: Send + Sync {
    fn update_settings(&self) -> &UpdateSettings;

    /// Search radius, or `None` when every eligible pair is listed
    fn cutoff(&self) -> Option<f64>;

    /// Build a list from scratch
    fn build(
        &self,
        positions: &[Vector<D>],
        container: &Container<D>,
        eligibility: &EligibilityMatrix,
        parallel: bool,
    ) -> NeighborList;

    /// Whether a list should be (re)built at `step`
    fn needs_update(&self, current: Option<&NeighborList>, step: usize) -> bool {
        current.is_none() || self.update_settings().should_update_neighbors(step)
    }

    /// Rebuild on cadence, otherwise hand back the current list unchanged
    fn find(
        &self,
        current: Option<NeighborList>,
        positions: &[Vector<D>],
        container: &Container<D>,
        eligibility: &EligibilityMatrix,
        step: usize,
        parallel: bool,
    ) -> NeighborList {
        match current {
            Some(list) if !self.needs_update(Some(&list), step) => list,
            _ => self.build(positions, container, eligibility, parallel),
        }
    }
}

/// Concatenate per-particle rows in particle order
pub(crate) fn collect_rows<F>(num_particles: usize, parallel: bool, row: F) -> NeighborList
where
    F: Fn(usize) -> Vec<NeighborPair> + Send + Sync,
{
    let rows: Vec<Vec<NeighborPair>> = if parallel {
        (0..num_particles).into_par_iter().map(&row).collect()
    } else {
        (0..num_particles).map(&row).collect()
    };
    NeighborList::new(rows.concat())
}
