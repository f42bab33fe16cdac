use super::{collect_rows, EligibilityMatrix, NeighborFinder, NeighborList, NeighborPair, UpdateSettings};
use crate::{container::Container, utils::Vector};

const LEAF_SIZE: usize = 8;

#[derive(Debug)]
enum Node {
    Leaf {
        start: usize,
        end: usize,
    },
    Split {
        dim: usize,
        value: f64,
        left: usize,
        right: usize,
    },
}

/// Static k-d tree over a set of points
#[derive(Debug)]
pub struct KdTree<const D: usize> {
    points: Vec<Vector<D>>,
    order: Vec<usize>,
    nodes: Vec<Node>,
}
impl<const D: usize> KdTree<D> {
    pub fn new(points: Vec<Vector<D>>) -> Self {
        let mut tree = Self {
            order: (0..points.len()).collect(),
            points,
            nodes: Vec::new(),
        };
        if !tree.points.is_empty() {
            tree.split(0, tree.points.len());
        }
        tree
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn split(&mut self, start: usize, end: usize) -> usize {
        let id = self.nodes.len();
        if end - start <= LEAF_SIZE {
            self.nodes.push(Node::Leaf { start, end });
            return id;
        }
        let dim = self.widest_dimension(start, end);
        let mid = (end - start) / 2;
        let points = &self.points;
        self.order[start..end]
            .select_nth_unstable_by(mid, |&a, &b| points[a][dim].total_cmp(&points[b][dim]));
        let value = self.points[self.order[start + mid]][dim];

        // placeholder until the children exist
        self.nodes.push(Node::Leaf { start, end });
        let left = self.split(start, start + mid);
        let right = self.split(start + mid, end);
        self.nodes[id] = Node::Split {
            dim,
            value,
            left,
            right,
        };
        id
    }
    fn widest_dimension(&self, start: usize, end: usize) -> usize {
        let mut lo = [f64::INFINITY; D];
        let mut hi = [f64::NEG_INFINITY; D];
        for &idx in &self.order[start..end] {
            for k in 0..D {
                lo[k] = lo[k].min(self.points[idx][k]);
                hi[k] = hi[k].max(self.points[idx][k]);
            }
        }
        (0..D)
            .max_by(|&a, &b| (hi[a] - lo[a]).total_cmp(&(hi[b] - lo[b])))
            .unwrap_or(0)
    }

    /// Indices of every point within `radius` of `query` (Euclidean)
    pub fn within(&self, query: &Vector<D>, radius: f64, out: &mut Vec<usize>) {
        if self.nodes.is_empty() {
            return;
        }
        let sqradius = radius * radius;
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { start, end } => {
                    for &idx in &self.order[start..end] {
                        let p = &self.points[idx];
                        let d2: f64 = (0..D).map(|k| (p[k] - query[k]).powi(2)).sum();
                        if d2 <= sqradius {
                            out.push(idx);
                        }
                    }
                }
                Node::Split {
                    dim,
                    value,
                    left,
                    right,
                } => {
                    if query[dim] - radius <= value {
                        stack.push(left);
                    }
                    if query[dim] + radius >= value {
                        stack.push(right);
                    }
                }
            }
        }
    }
}

/// Queries a k-d tree of the wrapped positions, including the periodic
/// images of particles near the faces of the box
#[derive(Clone, Debug)]
pub struct TreeNeighborFinder {
    cutoff: f64,
    settings: UpdateSettings,
}
impl TreeNeighborFinder {
    pub fn new(cutoff: f64, settings: UpdateSettings) -> Self {
        assert!(
            cutoff > 0.0,
            "Neighbor cutoff should be positive, found {}",
            cutoff
        );
        Self { cutoff, settings }
    }
}

/// Every combination of translations by one box length that brings `x`
/// within `cutoff` of the opposite face, including the identity
fn image_shifts<const D: usize>(x: &Vector<D>, extents: &[f64; D], cutoff: f64) -> Vec<Vector<D>> {
    let mut shifts = vec![[0.0; D]];
    for k in 0..D {
        let l = extents[k];
        let base_len = shifts.len();
        for shift in [l, -l] {
            let near_face = if shift > 0.0 {
                x[k] < cutoff
            } else {
                x[k] > l - cutoff
            };
            if !near_face {
                continue;
            }
            for b in 0..base_len {
                let mut s = shifts[b];
                s[k] = shift;
                shifts.push(s);
            }
        }
    }
    shifts
}

impl<const D: usize> NeighborFinder<D> for TreeNeighborFinder {
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
        let wrapped: Vec<Vector<D>> = positions.iter().map(|x| container.wrap(x)).collect();
        let tree = KdTree::new(wrapped);
        let sqdist = self.cutoff * self.cutoff;
        // candidates are filtered with the exact minimum-image distance
        let radius = self.cutoff * (1.0 + 1e-9);

        collect_rows(positions.len(), parallel, |i| {
            let mut candidates = Vec::new();
            for shift in image_shifts(&tree.points[i], container.extents(), self.cutoff) {
                let mut query = tree.points[i];
                for k in 0..D {
                    query[k] += shift[k];
                }
                tree.within(&query, radius, &mut candidates);
            }
            candidates.sort_unstable();
            candidates.dedup();
            candidates
                .into_iter()
                .filter(|&j| {
                    j > i
                        && eligibility.is_eligible(i, j)
                        && container.distance_squared(&positions[i], &positions[j]) <= sqdist
                })
                .map(|j| NeighborPair::new(i, j, eligibility.is_special(i, j)))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn tree_query_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(5);
        let points: Vec<[f64; 3]> = (0..300).map(|_| [rng.gen(), rng.gen(), rng.gen()]).collect();
        let tree = KdTree::new(points.clone());
        assert_eq!(tree.len(), 300);
        let query = [0.4, 0.5, 0.6];
        let mut found = Vec::new();
        tree.within(&query, 0.2, &mut found);
        found.sort_unstable();
        let expected: Vec<usize> = (0..300)
            .filter(|&i| {
                let d2: f64 = (0..3).map(|k| (points[i][k] - query[k]).powi(2)).sum();
                d2 <= 0.2 * 0.2
            })
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn image_shifts_near_corner() {
        let shifts = image_shifts(&[0.1, 4.95], &[5.0, 5.0], 1.0);
        assert_eq!(shifts.len(), 4);
        assert!(shifts.contains(&[5.0, -5.0]));
        // a cutoff past half the box needs both directions
        assert_eq!(image_shifts(&[2.5], &[5.0], 3.0), vec![[0.0], [5.0], [-5.0]]);
    }

    #[test]
    fn finds_pairs_through_the_corner() {
        let container = Container::cubic(4.0);
        let positions = vec![[0.05, 0.05, 0.05], [3.95, 3.95, 3.95], [2.0, 2.0, 2.0]];
        let finder = TreeNeighborFinder::new(0.5, UpdateSettings::default());
        let list = finder.build(&positions, &container, &EligibilityMatrix::all(3), false);
        assert_eq!(list.pairs(), &[NeighborPair::new(0, 1, false)]);
    }
}
