use crate::{container::Container, utils::Vector, utils::CellIndex};

use super::Lattice;

/// Simple cubic (square in 2D) lattice with one site per cell
#[derive(Debug)]
pub struct Cubic {
    a: f64,
}
impl Cubic {
    pub fn new(a: f64) -> Self {
        let s = Self { a };
        s.assert_positive();
        s
    }
    /// Lattice whose site density is `rho` in `D` dimensions
    pub fn from_density<const D: usize>(rho: f64) -> Self {
        let s = Self {
            a: rho.powf(-1.0 / D as f64),
        };
        s.assert_positive();
        s
    }
    pub fn constant(&self) -> f64 {
        self.a
    }
    fn assert_positive(&self) {
        assert!(
            self.a > 0.0 && self.a.is_finite(),
            "Lattice constant should be positive, found {}",
            self.a
        );
    }
}
impl<const D: usize> Lattice<D> for Cubic {
    fn cell_lengths(&self) -> [f64; D] {
        [self.a; D]
    }
    fn coords_within(&self, container: &Container<D>) -> Vec<Vector<D>> {
        let mut nlattice = [0; D];
        for (n, &l) in nlattice.iter_mut().zip(container.extents().iter()) {
            // sites sitting exactly on the upper face are periodic images
            *n = ((l / self.a) - 1e-9).ceil().max(0.0) as usize;
        }
        if nlattice.iter().any(|&n| n == 0) {
            return Vec::new();
        }
        let index = CellIndex::new(nlattice);
        (0..index.total())
            .map(|idx| {
                let site = index.multi(idx);
                let mut coord = [0.0; D];
                for k in 0..D {
                    coord[k] = self.a * site[k] as f64;
                }
                coord
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fills_box_at_density() {
        let lattice = Cubic::from_density::<3>(0.125);
        assert_relative_eq!(lattice.constant(), 2.0, epsilon = 1e-12);
        let container = Container::<3>::cubic(8.0);
        let coords = lattice.coords_within(&container);
        assert_eq!(coords.len(), 64);
        assert!(coords.iter().all(|c| container.contains(c)));
    }

    #[test]
    fn partial_cells_still_get_sites() {
        let container = Container::new([2.5, 1.0]);
        let coords = Cubic::new(1.0).coords_within(&container);
        assert_eq!(coords.len(), 3);
        assert_eq!(coords[2], [2.0, 0.0]);
    }
}
