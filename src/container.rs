use rand::Rng;

use crate::{
    utils::{self, Vector},
    Error,
};

/// Periodic simulation box with its lower corner at the origin.
///
/// Interactions assume every extent is at least twice the largest cutoff;
/// the minimum-image convention is exact only under that condition.
#[derive(Clone, Debug, PartialEq)]
pub struct Container<const D: usize> {
    extents: [f64; D],
}
impl<const D: usize> Container<D> {
    // Creation

    /// Create a fully periodic container from its side lengths
    pub fn new(extents: [f64; D]) -> Self {
        assert!(
            extents.iter().all(|&l| l > 0.0 && l.is_finite()),
            "Box extents should be positive and finite, found {:?}",
            extents
        );
        Self { extents }
    }
    /// Create a cube-shaped container
    pub fn cubic(length: f64) -> Self {
        Self::new([length; D])
    }
    /// Create a container from a runtime-sized list of extents
    pub fn from_slice(extents: &[f64]) -> Result<Self, Error> {
        let extents: [f64; D] = extents.try_into().map_err(|_| Error::DimensionMismatch {
            expected: D,
            found: extents.len(),
        })?;
        if !extents.iter().all(|&l| l > 0.0 && l.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "box extents should be positive and finite, found {:?}",
                extents
            )));
        }
        Ok(Self { extents })
    }

    // Getters
    pub fn extents(&self) -> &[f64; D] {
        &self.extents
    }
    pub fn volume(&self) -> f64 {
        self.extents.iter().product()
    }
    pub fn min_extent(&self) -> f64 {
        self.extents.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    // Setters
    pub fn set_extents(&mut self, extents: [f64; D]) {
        assert!(
            extents.iter().all(|&l| l > 0.0 && l.is_finite()),
            "Box extents should be positive and finite, found {:?}",
            extents
        );
        self.extents = extents;
    }

    // Geometry

    /// Minimum-image vector from `a` to `b`
    pub fn vector(&self, a: &Vector<D>, b: &Vector<D>) -> Vector<D> {
        utils::vector(a, b, &self.extents)
    }
    /// Minimum-image distance squared between `a` and `b`
    pub fn distance_squared(&self, a: &Vector<D>, b: &Vector<D>) -> f64 {
        utils::norm_squared(&self.vector(a, b))
    }
    /// Position mapped back into the box
    pub fn wrap(&self, coord: &Vector<D>) -> Vector<D> {
        utils::wrap_coords(coord, &self.extents)
    }
    pub fn contains(&self, coord: &Vector<D>) -> bool {
        coord
            .iter()
            .zip(self.extents.iter())
            .all(|(&x, &l)| (0.0..l).contains(&x))
    }
    /// Uniformly distributed coordinates inside the box
    pub fn random_coords<R: Rng + ?Sized>(&self, num: usize, rng: &mut R) -> Vec<Vector<D>> {
        (0..num)
            .map(|_| {
                let mut coord = [0.0; D];
                for (x, &l) in coord.iter_mut().zip(self.extents.iter()) {
                    *x = rng.gen::<f64>() * l;
                }
                coord
            })
            .collect()
    }
}
