use super::SpecificInteraction;
use crate::{
    container::Container,
    utils::{self, Vector},
};

/// `V(r) = k/2 (r - r0)^2` between two particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarmonicBond {
    pub k: f64,
    pub r0: f64,
}
impl HarmonicBond {
    pub fn new(k: f64, r0: f64) -> Self {
        assert!(r0 >= 0.0, "Bond length should be non-negative, found {}", r0);
        Self { k, r0 }
    }
}

impl<const D: usize> SpecificInteraction<D, 2> for HarmonicBond {
    fn forces(&self, coords: &[Vector<D>; 2], container: &Container<D>) -> [Vector<D>; 2] {
        let dr = container.vector(&coords[0], &coords[1]);
        let r = utils::norm(&dr);
        let f0 = utils::scale(&dr, self.k * (r - self.r0) / r);
        [f0, utils::scale(&f0, -1.0)]
    }
    fn potential_energy(&self, coords: &[Vector<D>; 2], container: &Container<D>) -> f64 {
        let r = container.distance_squared(&coords[0], &coords[1]).sqrt();
        0.5 * self.k * (r - self.r0) * (r - self.r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specific::testing::check_forces;
    use approx::assert_relative_eq;

    #[test]
    fn stretched_bond_pulls_together() {
        let container = Container::cubic(2.0);
        let bond = HarmonicBond::new(1000.0, 0.1);
        let coords = [[0.0, 0.0, 0.0], [0.15, 0.0, 0.0]];
        let f = bond.forces(&coords, &container);
        assert_relative_eq!(f[0][0], 50.0, epsilon = 1e-9);
        assert_relative_eq!(f[1][0], -50.0, epsilon = 1e-9);
        assert_relative_eq!(bond.potential_energy(&coords, &container), 1.25, epsilon = 1e-12);
    }

    #[test]
    fn bond_across_the_boundary() {
        let container = Container::cubic(2.0);
        let bond = HarmonicBond::new(250.0, 0.2);
        check_forces(&bond, &[[1.95, 0.1, 0.3], [0.1, 1.9, 0.35]], &container);
    }
}
