use super::EligibilityMatrix;
use crate::{container::Container, utils::Vector, Error};

/// One interacting pair; `special` marks pairs in a 1-4 relationship
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NeighborPair {
    pub i: usize,
    pub j: usize,
    pub special: bool,
}
impl NeighborPair {
    pub fn new(i: usize, j: usize, special: bool) -> Self {
        Self { i, j, special }
    }
}

/// Pairs `i < j` sorted by `(i, j)` without duplicates
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighborList {
    pairs: Vec<NeighborPair>,
}
impl NeighborList {
    pub fn new(pairs: Vec<NeighborPair>) -> Self {
        Self { pairs }
    }
    pub fn pairs(&self) -> &[NeighborPair] {
        &self.pairs
    }
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, NeighborPair> {
        self.pairs.iter()
    }

    /// Check the ordering, eligibility and (optionally) distance invariants.
    ///
    /// Violations are bugs in the finder that produced the list.
    pub fn validate<const D: usize>(
        &self,
        eligibility: &EligibilityMatrix,
        within: Option<(&[Vector<D>], &Container<D>, f64)>,
    ) -> Result<(), Error> {
        let n = eligibility.num_particles();
        let mut previous: Option<(usize, usize)> = None;
        for pair in self.pairs.iter() {
            if pair.i >= pair.j || pair.j >= n {
                return Err(Error::NeighborListInvariant(format!(
                    "malformed pair ({}, {}) for {} particles",
                    pair.i, pair.j, n
                )));
            }
            if let Some(prev) = previous {
                if prev >= (pair.i, pair.j) {
                    return Err(Error::NeighborListInvariant(format!(
                        "pair ({}, {}) is duplicated or out of order",
                        pair.i, pair.j
                    )));
                }
            }
            previous = Some((pair.i, pair.j));
            if !eligibility.is_eligible(pair.i, pair.j) {
                return Err(Error::NeighborListInvariant(format!(
                    "pair ({}, {}) is excluded",
                    pair.i, pair.j
                )));
            }
            if pair.special != eligibility.is_special(pair.i, pair.j) {
                return Err(Error::NeighborListInvariant(format!(
                    "pair ({}, {}) has the wrong special flag",
                    pair.i, pair.j
                )));
            }
            if let Some((positions, container, sqdist)) = within {
                if container.distance_squared(&positions[pair.i], &positions[pair.j]) > sqdist {
                    return Err(Error::NeighborListInvariant(format!(
                        "pair ({}, {}) is beyond the cutoff",
                        pair.i, pair.j
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a NeighborList {
    type Item = &'a NeighborPair;
    type IntoIter = std::slice::Iter<'a, NeighborPair>;
    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
