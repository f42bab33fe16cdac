use super::{collect_rows, EligibilityMatrix, NeighborFinder, NeighborList, UpdateSettings};
use crate::{container::Container, utils::Vector};

/// Lists every eligible pair regardless of distance
#[derive(Clone, Debug, Default)]
pub struct NoNeighborFinder {
    settings: UpdateSettings,
}
impl NoNeighborFinder {
    pub fn new() -> Self {
        Self::default()
    }
}
impl<const D: usize> NeighborFinder<D> for NoNeighborFinder {
    fn update_settings(&self) -> &UpdateSettings {
        &self.settings
    }
    fn cutoff(&self) -> Option<f64> {
        None
    }
    fn needs_update(&self, current: Option<&NeighborList>, _step: usize) -> bool {
        // the list depends only on the eligibility matrix
        current.is_none()
    }
    fn build(
        &self,
        _positions: &[Vector<D>],
        _container: &Container<D>,
        eligibility: &EligibilityMatrix,
        _parallel: bool,
    ) -> NeighborList {
        NeighborList::new(eligibility.eligible_pairs())
    }
}

/// Tests the minimum-image distance of every eligible pair
#[derive(Clone, Debug)]
pub struct DistanceNeighborFinder {
    cutoff: f64,
    settings: UpdateSettings,
}
impl DistanceNeighborFinder {
    pub fn new(cutoff: f64, settings: UpdateSettings) -> Self {
        assert!(
            cutoff > 0.0,
            "Neighbor cutoff should be positive, found {}",
            cutoff
        );
        Self { cutoff, settings }
    }
}
impl<const D: usize> NeighborFinder<D> for DistanceNeighborFinder {
    fn update_settings(&self) -> &UpdateSettings {
        &self.settings
    }
    fn cutoff(&self) -> Option<f64> {
        Some(self.cutoff)
    }
    fn build(
        &self,
        positions: &[Vector<D>],
        container: &Container<D>,
        eligibility: &EligibilityMatrix,
        parallel: bool,
    ) -> NeighborList {
        brute_force(positions, container, eligibility, self.cutoff, parallel)
    }
}

pub(crate) fn brute_force<const D: usize>(
    positions: &[Vector<D>],
    container: &Container<D>,
    eligibility: &EligibilityMatrix,
    cutoff: f64,
    parallel: bool,
) -> NeighborList {
    let sqdist = cutoff * cutoff;
    collect_rows(positions.len(), parallel, |i| {
        eligibility
            .row(i)
            .filter(|pair| container.distance_squared(&positions[i], &positions[pair.j]) <= sqdist)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_finder_lists_every_pair() {
        let container = Container::cubic(10.0);
        let positions = vec![[0.0; 3], [1.0; 3], [2.0; 3], [3.0; 3], [9.0; 3]];
        let eligibility = EligibilityMatrix::all(5);
        let list = NeighborFinder::<3>::build(
            &NoNeighborFinder::new(),
            &positions,
            &container,
            &eligibility,
            false,
        );
        assert_eq!(list.len(), 10);
        assert!(list.iter().all(|p| p.i < p.j));
    }

    #[test]
    fn distance_finder_uses_minimum_image() {
        let container = Container::cubic(10.0);
        let positions = vec![[0.5, 5.0], [9.5, 5.0], [5.0, 5.0]];
        let eligibility = EligibilityMatrix::all(3);
        let finder = DistanceNeighborFinder::new(1.5, UpdateSettings::default());
        let list = finder.build(&positions, &container, &eligibility, true);
        assert_eq!(list.pairs().len(), 1);
        assert_eq!((list.pairs()[0].i, list.pairs()[0].j), (0, 1));
    }

    #[test]
    fn off_cadence_steps_reuse_the_list() {
        let container = Container::cubic(10.0);
        let eligibility = EligibilityMatrix::all(2);
        let finder = DistanceNeighborFinder::new(1.5, UpdateSettings::new(5));
        let near = vec![[0.0, 0.0], [1.0, 0.0]];
        let far = vec![[0.0, 0.0], [4.0, 0.0]];
        let list = finder.find(None, &near, &container, &eligibility, 3, false);
        assert_eq!(list.len(), 1);
        let list = finder.find(Some(list), &far, &container, &eligibility, 4, false);
        assert_eq!(list.len(), 1);
        let list = finder.find(Some(list), &far, &container, &eligibility, 5, false);
        assert!(list.is_empty());
    }
}
