use super::SpecificInteraction;
use crate::{
    container::Container,
    utils::{self, Vector},
};

/// `V(theta) = k/2 (theta - theta0)^2` for the angle at the middle particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarmonicAngle {
    pub k: f64,
    /// Equilibrium angle in radians
    pub theta0: f64,
}
impl HarmonicAngle {
    pub fn new(k: f64, theta0: f64) -> Self {
        assert!(
            (0.0..=std::f64::consts::PI).contains(&theta0),
            "Equilibrium angle should be within [0, pi], found {}",
            theta0
        );
        Self { k, theta0 }
    }

    fn geometry<const D: usize>(
        coords: &[Vector<D>; 3],
        container: &Container<D>,
    ) -> (Vector<D>, Vector<D>, f64) {
        let u = container.vector(&coords[1], &coords[0]);
        let v = container.vector(&coords[1], &coords[2]);
        let cos = utils::dot(&u, &v) / (utils::norm(&u) * utils::norm(&v));
        (u, v, cos.clamp(-1.0, 1.0))
    }
}

impl<const D: usize> SpecificInteraction<D, 3> for HarmonicAngle {
    fn forces(&self, coords: &[Vector<D>; 3], container: &Container<D>) -> [Vector<D>; 3] {
        let (u, v, cos) = Self::geometry(coords, container);
        let theta = cos.acos();
        let dvdtheta = self.k * (theta - self.theta0);
        if dvdtheta == 0.0 {
            return [[0.0; D]; 3];
        }
        let sin = (1.0 - cos * cos).sqrt();
        let nu2 = utils::norm_squared(&u);
        let nv2 = utils::norm_squared(&v);
        let inv_uv = 1.0 / (nu2 * nv2).sqrt();
        let pre = dvdtheta / sin;

        let mut fa = [0.0; D];
        let mut fc = [0.0; D];
        for k in 0..D {
            fa[k] = pre * (v[k] * inv_uv - cos * u[k] / nu2);
            fc[k] = pre * (u[k] * inv_uv - cos * v[k] / nv2);
        }
        let fb = utils::scale(&utils::add(&fa, &fc), -1.0);
        [fa, fb, fc]
    }
    fn potential_energy(&self, coords: &[Vector<D>; 3], container: &Container<D>) -> f64 {
        let (_, _, cos) = Self::geometry(coords, container);
        let dtheta = cos.acos() - self.theta0;
        0.5 * self.k * dtheta * dtheta
    }
}
