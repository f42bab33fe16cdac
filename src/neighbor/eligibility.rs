use std::collections::VecDeque;

use super::NeighborPair;
use crate::Error;

/// Symmetric table of which pairs may interact through neighbor-restricted
/// interactions, with a second table of pairs flagged special.
///
/// Only the strict upper triangle is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct EligibilityMatrix {
    num_particles: usize,
    eligible: Vec<bool>,
    special: Vec<bool>,
}
impl EligibilityMatrix {
    /// Every distinct pair eligible, none special
    pub fn all(num_particles: usize) -> Self {
        let len = num_particles * num_particles.saturating_sub(1) / 2;
        Self {
            num_particles,
            eligible: vec![true; len],
            special: vec![false; len],
        }
    }

    /// Exclude bonded (1-2) and angle (1-3) pairs and mark dihedral (1-4)
    /// pairs special, following the bond graph
    pub fn from_bonds(num_particles: usize, bonds: &[[usize; 2]]) -> Result<Self, Error> {
        let mut adjacency = vec![Vec::new(); num_particles];
        for &[a, b] in bonds {
            for index in [a, b] {
                if index >= num_particles {
                    return Err(Error::IndexOutOfRange {
                        interaction: "bond graph".to_string(),
                        index,
                        particles: num_particles,
                    });
                }
            }
            if a != b {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }

        let mut matrix = Self::all(num_particles);
        let mut depth = vec![usize::MAX; num_particles];
        let mut queue = VecDeque::new();
        for start in 0..num_particles {
            let mut visited = vec![start];
            depth[start] = 0;
            queue.push_back(start);
            while let Some(current) = queue.pop_front() {
                if depth[current] == 3 {
                    continue;
                }
                for &next in adjacency[current].iter() {
                    if depth[next] == usize::MAX {
                        depth[next] = depth[current] + 1;
                        visited.push(next);
                        queue.push_back(next);
                    }
                }
            }
            for &other in visited.iter() {
                if other > start {
                    match depth[other] {
                        1 | 2 => matrix.exclude(start, other),
                        3 => matrix.set_special(start, other, true),
                        _ => {}
                    }
                }
                depth[other] = usize::MAX;
            }
        }
        Ok(matrix)
    }

    pub fn num_particles(&self) -> usize {
        self.num_particles
    }
    pub fn is_eligible(&self, i: usize, j: usize) -> bool {
        match self.idx(i, j) {
            Some(idx) => self.eligible[idx],
            None => false,
        }
    }
    pub fn is_special(&self, i: usize, j: usize) -> bool {
        match self.idx(i, j) {
            Some(idx) => self.special[idx],
            None => false,
        }
    }
    pub fn exclude(&mut self, i: usize, j: usize) {
        let idx = self.checked_idx(i, j);
        self.eligible[idx] = false;
        self.special[idx] = false;
    }
    pub fn set_special(&mut self, i: usize, j: usize, special: bool) {
        let idx = self.checked_idx(i, j);
        self.special[idx] = special;
    }
    pub fn num_eligible(&self) -> usize {
        self.eligible.iter().filter(|&&e| e).count()
    }

    /// Every eligible pair, sorted by `(i, j)`
    pub fn eligible_pairs(&self) -> Vec<NeighborPair> {
        let mut pairs = Vec::with_capacity(self.num_eligible());
        for i in 0..self.num_particles {
            pairs.extend(self.row(i));
        }
        pairs
    }
    /// Eligible partners `j > i` of particle `i`
    pub fn row(&self, i: usize) -> impl Iterator<Item = NeighborPair> + '_ {
        (i + 1..self.num_particles).filter_map(move |j| {
            let idx = self.packed(i, j);
            self.eligible[idx].then(|| NeighborPair::new(i, j, self.special[idx]))
        })
    }

    fn idx(&self, i: usize, j: usize) -> Option<usize> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if i == j || j >= self.num_particles {
            return None;
        }
        Some(self.packed(i, j))
    }
    fn checked_idx(&self, i: usize, j: usize) -> usize {
        match self.idx(i, j) {
            Some(idx) => idx,
            None => panic!(
                "Pair ({}, {}) is not a distinct pair of {} particles",
                i, j, self.num_particles
            ),
        }
    }
    fn packed(&self, i: usize, j: usize) -> usize {
        i * self.num_particles - i * (i + 1) / 2 + (j - i - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_storage_is_symmetric() {
        let mut matrix = EligibilityMatrix::all(5);
        assert_eq!(matrix.num_eligible(), 10);
        matrix.exclude(3, 1);
        assert!(!matrix.is_eligible(1, 3));
        assert!(!matrix.is_eligible(3, 1));
        assert!(!matrix.is_eligible(2, 2));
        matrix.set_special(4, 0, true);
        assert!(matrix.is_special(0, 4));
        assert_eq!(matrix.eligible_pairs().len(), 9);
    }

    #[test]
    fn bond_graph_exclusions() {
        // chain 0-1-2-3-4
        let bonds = [[0, 1], [1, 2], [2, 3], [3, 4]];
        let matrix = EligibilityMatrix::from_bonds(5, &bonds).unwrap();
        assert!(!matrix.is_eligible(0, 1));
        assert!(!matrix.is_eligible(0, 2));
        assert!(matrix.is_eligible(0, 3));
        assert!(matrix.is_special(0, 3));
        assert!(matrix.is_special(1, 4));
        assert!(matrix.is_eligible(0, 4));
        assert!(!matrix.is_special(0, 4));
    }

    #[test]
    fn ring_uses_shortest_path() {
        // in a four-membered ring every pair is within two bonds
        let bonds = [[0, 1], [1, 2], [2, 3], [3, 0]];
        let matrix = EligibilityMatrix::from_bonds(4, &bonds).unwrap();
        assert_eq!(matrix.num_eligible(), 0);
    }

    #[test]
    fn bond_index_out_of_range() {
        let err = EligibilityMatrix::from_bonds(2, &[[0, 2]]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 2, .. }));
    }
}
