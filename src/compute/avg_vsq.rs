use crate::{atoms::Atoms, utils};

/// Mean squared speed, zero for an empty system
pub fn avg_vsq<const D: usize, X>(atoms: &Atoms<D, X>) -> f64 {
    let n = atoms.num_particles();
    if n == 0 {
        return 0.0;
    }
    atoms.velocities.iter().map(utils::norm_squared).sum::<f64>() / n as f64
}
