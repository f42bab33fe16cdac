use super::SpecificInteraction;
use crate::{
    container::Container,
    utils::{self, Vector},
};

/// One Fourier term `k (1 + cos(n phi - phase))`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorsionTerm {
    pub periodicity: u32,
    pub phase: f64,
    pub k: f64,
}

/// Periodic proper dihedral over four particles `i-j-k-l`
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodicTorsion {
    terms: Vec<TorsionTerm>,
}
impl PeriodicTorsion {
    pub fn new(terms: Vec<TorsionTerm>) -> Self {
        assert!(!terms.is_empty(), "Torsion should have at least one term");
        Self { terms }
    }
    pub fn single(periodicity: u32, phase: f64, k: f64) -> Self {
        Self::new(vec![TorsionTerm {
            periodicity,
            phase,
            k,
        }])
    }
    pub fn terms(&self) -> &[TorsionTerm] {
        &self.terms
    }

    fn energy_at(&self, phi: f64) -> f64 {
        self.terms
            .iter()
            .map(|t| t.k * (1.0 + (t.periodicity as f64 * phi - t.phase).cos()))
            .sum()
    }
    fn derivative_at(&self, phi: f64) -> f64 {
        self.terms
            .iter()
            .map(|t| {
                let n = t.periodicity as f64;
                -t.k * n * (n * phi - t.phase).sin()
            })
            .sum()
    }
}

struct Dihedral {
    r_ij: Vector<3>,
    r_kj: Vector<3>,
    r_kl: Vector<3>,
    m: Vector<3>,
    n: Vector<3>,
    phi: f64,
}
impl Dihedral {
    fn new(coords: &[Vector<3>; 4], container: &Container<3>) -> Self {
        let r_ij = container.vector(&coords[1], &coords[0]);
        let r_kj = container.vector(&coords[1], &coords[2]);
        let r_kl = container.vector(&coords[3], &coords[2]);
        let m = utils::cross(&r_ij, &r_kj);
        let n = utils::cross(&r_kj, &r_kl);
        let cos = (utils::dot(&m, &n) / (utils::norm(&m) * utils::norm(&n))).clamp(-1.0, 1.0);
        let sign = if utils::dot(&r_ij, &n) < 0.0 { -1.0 } else { 1.0 };
        Self {
            r_ij,
            r_kj,
            r_kl,
            m,
            n,
            phi: sign * cos.acos(),
        }
    }
}

impl SpecificInteraction<3, 4> for PeriodicTorsion {
    fn forces(&self, coords: &[Vector<3>; 4], container: &Container<3>) -> [Vector<3>; 4] {
        let d = Dihedral::new(coords, container);
        let ddphi = self.derivative_at(d.phi);

        let nrkj2 = utils::norm_squared(&d.r_kj);
        let nrkj = nrkj2.sqrt();
        let f_i = utils::scale(&d.m, -ddphi * nrkj / utils::norm_squared(&d.m));
        let f_l = utils::scale(&d.n, ddphi * nrkj / utils::norm_squared(&d.n));

        let p = utils::dot(&d.r_ij, &d.r_kj) / nrkj2;
        let q = utils::dot(&d.r_kl, &d.r_kj) / nrkj2;
        let svec = utils::sub(&utils::scale(&f_i, p), &utils::scale(&f_l, q));

        let f_j = utils::sub(&svec, &f_i);
        let f_k = utils::scale(&utils::add(&f_l, &svec), -1.0);
        [f_i, f_j, f_k, f_l]
    }
    fn potential_energy(&self, coords: &[Vector<3>; 4], container: &Container<3>) -> f64 {
        self.energy_at(Dihedral::new(coords, container).phi)
    }
}
