/// Row-major mapping between multi-dimensional cell coordinates and a
/// linear cell index
#[derive(Clone, Copy, Debug)]
pub struct CellIndex<const D: usize> {
    bounds: [usize; D],
}
impl<const D: usize> CellIndex<D> {
    pub fn new(bounds: [usize; D]) -> Self {
        assert!(
            bounds.iter().all(|&n| n > 0),
            "Cell bounds should be positive, found {:?}",
            bounds
        );
        Self { bounds }
    }
    pub fn bounds(&self) -> [usize; D] {
        self.bounds
    }
    pub fn total(&self) -> usize {
        self.bounds.iter().product()
    }
    pub fn linear(&self, indices: &[usize; D]) -> usize {
        let mut idx = 0;
        for k in 0..D {
            assert!(
                indices[k] < self.bounds[k],
                "Cell index {:?} out of bounds {:?}",
                indices,
                self.bounds
            );
            idx = idx * self.bounds[k] + indices[k];
        }
        idx
    }
    pub fn multi(&self, mut idx: usize) -> [usize; D] {
        let mut out = [0; D];
        for k in (0..D).rev() {
            out[k] = idx % self.bounds[k];
            idx /= self.bounds[k];
        }
        out
    }
    /// Linear index of the cell displaced by `offset`, wrapping periodically
    pub fn shifted(&self, indices: &[usize; D], offset: &[i64; D]) -> usize {
        let mut shifted = [0; D];
        for k in 0..D {
            let n = self.bounds[k] as i64;
            shifted[k] = (indices[k] as i64 + offset[k]).rem_euclid(n) as usize;
        }
        self.linear(&shifted)
    }
}

/// All offsets in `{-1, 0, 1}^D`
pub fn adjacent_offsets<const D: usize>() -> Vec<[i64; D]> {
    let count = 3usize.pow(D as u32);
    (0..count)
        .map(|mut n| {
            let mut offset = [0; D];
            for o in offset.iter_mut() {
                *o = (n % 3) as i64 - 1;
                n /= 3;
            }
            offset
        })
        .collect()
}
