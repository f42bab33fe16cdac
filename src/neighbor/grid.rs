use super::{
    brute_force::brute_force, collect_rows, EligibilityMatrix, NeighborFinder, NeighborList,
    NeighborPair, UpdateSettings,
};
use crate::{
    container::Container,
    utils::{self, CellIndex, Vector},
};

/// Periodic grid of cells at least one cutoff wide
#[derive(Debug)]
pub struct Grid<const D: usize> {
    index: CellIndex<D>,
    cell_size: [f64; D],
}
impl<const D: usize> Grid<D> {
    /// `None` when some dimension holds fewer than three cells, where the
    /// adjacent cells would overlap
    pub fn new(container: &Container<D>, cutoff: f64) -> Option<Self> {
        let mut num_cells = [0; D];
        let mut cell_size = [0.0; D];
        for k in 0..D {
            let l = container.extents()[k];
            let n = (l / cutoff).floor() as usize;
            if n < 3 {
                return None;
            }
            num_cells[k] = n;
            cell_size[k] = l / n as f64;
        }
        Some(Self {
            index: CellIndex::new(num_cells),
            cell_size,
        })
    }
    pub fn total_num_cells(&self) -> usize {
        self.index.total()
    }
    pub fn num_cells(&self) -> [usize; D] {
        self.index.bounds()
    }
    /// Multi-index of the cell holding a wrapped coordinate
    pub fn cell_of(&self, coord: &Vector<D>) -> [usize; D] {
        let bounds = self.index.bounds();
        let mut cell = [0; D];
        for k in 0..D {
            let c = (coord[k] / self.cell_size[k]).floor() as usize;
            cell[k] = c.min(bounds[k] - 1);
        }
        cell
    }
    pub fn linear(&self, cell: &[usize; D]) -> usize {
        self.index.linear(cell)
    }
}

/// Buckets particles into a periodic grid and searches only adjacent cells.
///
/// Falls back to the brute-force search when the box is too small for a
/// grid of at least three cells per dimension.
#[derive(Clone, Debug)]
pub struct CellListNeighborFinder {
    cutoff: f64,
    settings: UpdateSettings,
}
impl CellListNeighborFinder {
    pub fn new(cutoff: f64, settings: UpdateSettings) -> Self {
        assert!(
            cutoff > 0.0,
            "Neighbor cutoff should be positive, found {}",
            cutoff
        );
        Self { cutoff, settings }
    }
}

impl<const D: usize> NeighborFinder<D> for CellListNeighborFinder {
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
        let grid = match Grid::new(container, self.cutoff) {
            Some(grid) => grid,
            None => {
                return brute_force(positions, container, eligibility, self.cutoff, parallel)
            }
        };

        let cells: Vec<[usize; D]> = positions
            .iter()
            .map(|x| grid.cell_of(&container.wrap(x)))
            .collect();
        let keys: Vec<usize> = cells.iter().map(|c| grid.linear(c)).collect();
        let total = grid.total_num_cells();
        let order = utils::get_sort_indices(&keys, total);
        let starts = utils::bucket_starts(&keys, total);
        let offsets = utils::adjacent_offsets::<D>();
        let sqdist = self.cutoff * self.cutoff;

        collect_rows(positions.len(), parallel, |i| {
            let mut row = Vec::new();
            for offset in offsets.iter() {
                let cell = grid.index.shifted(&cells[i], offset);
                for &j in &order[starts[cell]..starts[cell + 1]] {
                    if j <= i || !eligibility.is_eligible(i, j) {
                        continue;
                    }
                    if container.distance_squared(&positions[i], &positions[j]) <= sqdist {
                        row.push(NeighborPair::new(i, j, eligibility.is_special(i, j)));
                    }
                }
            }
            row.sort_unstable();
            row
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_needs_three_cells() {
        assert!(Grid::new(&Container::<3>::cubic(2.9), 1.0).is_none());
        let grid = Grid::new(&Container::new([3.5, 7.0]), 1.0).unwrap();
        assert_eq!(grid.num_cells(), [3, 7]);
        assert_eq!(grid.cell_of(&[3.49, 0.2]), [2, 0]);
    }

    #[test]
    fn finds_pairs_across_the_boundary() {
        let container = Container::cubic(5.0);
        let positions = vec![[0.1, 2.5, 2.5], [4.9, 2.5, 2.5], [2.5, 2.5, 2.5]];
        let finder = CellListNeighborFinder::new(1.0, UpdateSettings::default());
        let list = finder.build(&positions, &container, &EligibilityMatrix::all(3), false);
        assert_eq!(list.pairs(), &[NeighborPair::new(0, 1, false)]);
    }

    #[test]
    fn small_box_falls_back_to_brute_force() {
        let container = Container::cubic(2.0);
        let positions = vec![[0.1, 0.1], [1.9, 1.9], [1.0, 1.0]];
        let finder = CellListNeighborFinder::new(0.9, UpdateSettings::default());
        let list = finder.build(&positions, &container, &EligibilityMatrix::all(3), false);
        assert_eq!(list.pairs(), &[NeighborPair::new(0, 1, false)]);
    }
}
