mod cubic;

pub use cubic::Cubic;

use crate::{container::Container, utils::Vector};

/// A periodic arrangement of lattice sites used to place initial coordinates
pub trait Lattice<const D: usize> {
    /// Every lattice site inside the container, starting from the origin
    fn coords_within(&self, container: &Container<D>) -> Vec<Vector<D>>;
    fn cell_lengths(&self) -> [f64; D];
}
