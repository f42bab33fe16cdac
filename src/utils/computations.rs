use num_traits::Float;

/// Fixed-dimension coordinate, velocity or force vector
pub type Vector<const D: usize> = [f64; D];

/// Minimum-image vector pointing from `a` to `b` in a periodic box.
///
/// Each component is reduced into `[-L/2, L/2)` for box extent `L`.
///
/// ```rust
/// use moldyn::utils::vector;
///
/// let v = vector(&[0.5, 9.5], &[9.5, 0.5], &[10.0, 10.0]);
/// assert_eq!(v, [-1.0, 1.0]);
/// ```
pub fn vector<F: Float, const D: usize>(a: &[F; D], b: &[F; D], extents: &[F; D]) -> [F; D] {
    let half = F::from(0.5).unwrap_or_else(|| F::one() / (F::one() + F::one()));
    let mut out = [F::zero(); D];
    for k in 0..D {
        let l = extents[k];
        let d = b[k] - a[k];
        let mut x = d - l * (d / l + half).floor();
        // rounding in the floor argument can leave x one period off
        if x >= half * l {
            x = x - l;
        } else if x < -half * l {
            x = x + l;
        }
        out[k] = x;
    }
    out
}

/// Maps a coordinate back into `[0, L)` along every dimension
pub fn wrap_coords<F: Float, const D: usize>(coord: &[F; D], extents: &[F; D]) -> [F; D] {
    let mut out = [F::zero(); D];
    for k in 0..D {
        let l = extents[k];
        let mut x = coord[k] - l * (coord[k] / l).floor();
        if x >= l {
            x = x - l;
        }
        if x < F::zero() {
            x = F::zero();
        }
        out[k] = x;
    }
    out
}

pub fn dot<F: Float, const D: usize>(a: &[F; D], b: &[F; D]) -> F {
    a.iter()
        .zip(b.iter())
        .fold(F::zero(), |acc, (&x, &y)| acc + x * y)
}

pub fn norm_squared<F: Float, const D: usize>(a: &[F; D]) -> F {
    dot(a, a)
}

pub fn norm<F: Float, const D: usize>(a: &[F; D]) -> F {
    norm_squared(a).sqrt()
}

pub fn scale<F: Float, const D: usize>(a: &[F; D], s: F) -> [F; D] {
    let mut out = *a;
    out.iter_mut().for_each(|x| *x = *x * s);
    out
}

pub fn add<F: Float, const D: usize>(a: &[F; D], b: &[F; D]) -> [F; D] {
    let mut out = *a;
    out.iter_mut().zip(b.iter()).for_each(|(x, &y)| *x = *x + y);
    out
}

pub fn sub<F: Float, const D: usize>(a: &[F; D], b: &[F; D]) -> [F; D] {
    let mut out = *a;
    out.iter_mut().zip(b.iter()).for_each(|(x, &y)| *x = *x - y);
    out
}

pub fn add_assign<F: Float, const D: usize>(a: &mut [F; D], b: &[F; D]) {
    a.iter_mut().zip(b.iter()).for_each(|(x, &y)| *x = *x + y);
}

pub fn sub_assign<F: Float, const D: usize>(a: &mut [F; D], b: &[F; D]) {
    a.iter_mut().zip(b.iter()).for_each(|(x, &y)| *x = *x - y);
}

pub fn cross<F: Float>(a: &[F; 3], b: &[F; 3]) -> [F; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn is_finite<F: Float, const D: usize>(a: &[F; D]) -> bool {
    a.iter().all(|x| x.is_finite())
}
