/// Vector math and periodic geometry
pub mod computations;
pub mod indices;
pub mod keyed_vec;
/// Sorting algorithms
pub mod sort;

pub use computations::*;
pub use indices::{adjacent_offsets, CellIndex};
pub use keyed_vec::KeyedVec;
pub use sort::*;
