use serde::{Deserialize, Serialize};

/// Per-particle physical parameters, fixed for the whole run
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub mass: f64,
    #[serde(default)]
    pub charge: f64,
    /// Lennard-Jones size
    #[serde(default)]
    pub sigma: f64,
    /// Lennard-Jones well depth
    #[serde(default)]
    pub epsilon: f64,
}
impl Particle {
    pub fn new(mass: f64) -> Self {
        assert!(mass > 0.0, "Mass should be positive, found {}", mass);
        Self {
            mass,
            charge: 0.0,
            sigma: 0.0,
            epsilon: 0.0,
        }
    }
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }
    pub fn with_lj(mut self, sigma: f64, epsilon: f64) -> Self {
        self.sigma = sigma;
        self.epsilon = epsilon;
        self
    }
}
