//! Run settings read from YAML.
//!
//! ```
//! use moldyn::config::RunConfig;
//!
//! let config = RunConfig::from_yaml(
//!     r#"
//! units: reduced
//! n_steps: 100
//! box: [10.0, 10.0, 10.0]
//! integrator:
//!   kind: velocity_verlet
//!   timestep: 0.005
//! coupling:
//!   kind: berendsen
//!   temperature: 1.2
//!   coupling_time: 0.5
//! neighbor_finder:
//!   kind: cell_list
//!   cutoff: 2.5
//!   every: 10
//! "#,
//! )
//! .unwrap();
//! assert_eq!(config.container::<3>().unwrap().volume(), 1000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    container::Container,
    coupling::{AndersenThermostat, AnyCoupling, BerendsenThermostat, NoCoupling, RescaleThermostat},
    integrators::{AnyIntegrator, Leapfrog, Simulator, StormerVerlet, VelocityVerlet},
    neighbor::{
        CellListNeighborFinder, DistanceNeighborFinder, NeighborFinder, NoNeighborFinder,
        TreeNeighborFinder, UpdateSettings,
    },
    units::UnitSystem,
    Error,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub units: UnitSystem,
    pub n_steps: usize,
    #[serde(default)]
    pub parallel: bool,
    /// Box extents, one per dimension
    #[serde(rename = "box")]
    pub extents: Vec<f64>,
    pub integrator: IntegratorConfig,
    #[serde(default)]
    pub coupling: CouplingConfig,
    #[serde(default)]
    pub neighbor_finder: NeighborFinderConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    VelocityVerlet,
    StormerVerlet,
    Leapfrog,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegratorConfig {
    pub kind: IntegratorKind,
    pub timestep: f64,
    /// Reuse one force buffer across steps
    #[serde(default = "in_place_default")]
    pub in_place: bool,
}

fn in_place_default() -> bool {
    true
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CouplingConfig {
    #[default]
    None,
    Andersen {
        temperature: f64,
        coupling_time: f64,
        #[serde(default)]
        seed: u64,
    },
    Rescale {
        temperature: f64,
        #[serde(default = "every_default")]
        every: usize,
    },
    Berendsen {
        temperature: f64,
        coupling_time: f64,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeighborFinderConfig {
    /// Every eligible pair, built once
    #[default]
    None,
    BruteForce {
        cutoff: f64,
        #[serde(default = "every_default")]
        every: usize,
    },
    CellList {
        cutoff: f64,
        #[serde(default = "every_default")]
        every: usize,
    },
    KdTree {
        cutoff: f64,
        #[serde(default = "every_default")]
        every: usize,
    },
}

fn every_default() -> usize {
    1
}

impl RunConfig {
    /// Parse and validate a configuration
    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every value the constructors would reject
    pub fn validate(&self) -> Result<(), Error> {
        positive("integrator timestep", self.integrator.timestep)?;
        match self.coupling {
            CouplingConfig::None => {}
            CouplingConfig::Andersen {
                temperature,
                coupling_time,
                ..
            }
            | CouplingConfig::Berendsen {
                temperature,
                coupling_time,
            } => {
                non_negative("coupling temperature", temperature)?;
                positive("coupling time", coupling_time)?;
            }
            CouplingConfig::Rescale { temperature, every } => {
                non_negative("coupling temperature", temperature)?;
                nonzero("rescale interval", every)?;
            }
        }
        match self.neighbor_finder {
            NeighborFinderConfig::None => {}
            NeighborFinderConfig::BruteForce { cutoff, every }
            | NeighborFinderConfig::CellList { cutoff, every }
            | NeighborFinderConfig::KdTree { cutoff, every } => {
                positive("neighbor cutoff", cutoff)?;
                nonzero("neighbor update interval", every)?;
            }
        }
        Ok(())
    }

    pub fn integrator(&self) -> AnyIntegrator {
        let IntegratorConfig {
            kind,
            timestep,
            in_place,
        } = self.integrator;
        match (kind, in_place) {
            (IntegratorKind::VelocityVerlet, true) => {
                AnyIntegrator::VelocityVerlet(VelocityVerlet::new(timestep))
            }
            (IntegratorKind::VelocityVerlet, false) => {
                AnyIntegrator::VelocityVerlet(VelocityVerlet::new(timestep).functional())
            }
            (IntegratorKind::StormerVerlet, true) => {
                AnyIntegrator::StormerVerlet(StormerVerlet::new(timestep))
            }
            (IntegratorKind::StormerVerlet, false) => {
                AnyIntegrator::StormerVerlet(StormerVerlet::new(timestep).functional())
            }
            (IntegratorKind::Leapfrog, true) => AnyIntegrator::Leapfrog(Leapfrog::new(timestep)),
            (IntegratorKind::Leapfrog, false) => {
                AnyIntegrator::Leapfrog(Leapfrog::new(timestep).functional())
            }
        }
    }

    pub fn coupling(&self) -> AnyCoupling {
        match self.coupling {
            CouplingConfig::None => AnyCoupling::None(NoCoupling),
            CouplingConfig::Andersen {
                temperature,
                coupling_time,
                seed,
            } => AnyCoupling::Andersen(AndersenThermostat::new(temperature, coupling_time, seed)),
            CouplingConfig::Rescale { temperature, every } => {
                AnyCoupling::Rescale(RescaleThermostat::new(temperature, every))
            }
            CouplingConfig::Berendsen {
                temperature,
                coupling_time,
            } => AnyCoupling::Berendsen(BerendsenThermostat::new(temperature, coupling_time)),
        }
    }

    pub fn simulator(&self) -> Simulator<AnyIntegrator, AnyCoupling> {
        Simulator::with_coupling(self.integrator(), self.coupling())
    }

    pub fn neighbor_finder<const D: usize>(&self) -> Box<dyn NeighborFinder<D>> {
        match self.neighbor_finder {
            NeighborFinderConfig::None => Box::new(NoNeighborFinder::new()),
            NeighborFinderConfig::BruteForce { cutoff, every } => Box::new(
                DistanceNeighborFinder::new(cutoff, UpdateSettings::new(every)),
            ),
            NeighborFinderConfig::CellList { cutoff, every } => Box::new(
                CellListNeighborFinder::new(cutoff, UpdateSettings::new(every)),
            ),
            NeighborFinderConfig::KdTree { cutoff, every } => {
                Box::new(TreeNeighborFinder::new(cutoff, UpdateSettings::new(every)))
            }
        }
    }

    pub fn container<const D: usize>(&self) -> Result<Container<D>, Error> {
        Container::from_slice(&self.extents)
    }
}

fn positive(what: &str, value: f64) -> Result<(), Error> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{} should be positive, found {}",
            what, value
        )))
    }
}
fn non_negative(what: &str, value: f64) -> Result<(), Error> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{} should be non-negative, found {}",
            what, value
        )))
    }
}
fn nonzero(what: &str, value: usize) -> Result<(), Error> {
    if value == 0 {
        return Err(Error::InvalidParameter(format!("{} should be nonzero", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
n_steps: 10
box: [3.0, 4.0]
integrator:
  kind: stormer_verlet
  timestep: 0.001
";

    #[test]
    fn defaults_fill_missing_sections() {
        let config = RunConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.units, UnitSystem::KjMolNm);
        assert!(!config.parallel);
        assert!(config.integrator.in_place);
        assert_eq!(config.coupling, CouplingConfig::None);
        assert_eq!(config.neighbor_finder, NeighborFinderConfig::None);
        assert!(matches!(config.integrator(), AnyIntegrator::StormerVerlet(_)));
    }

    #[test]
    fn round_trips_through_yaml() {
        let mut config = RunConfig::from_yaml(MINIMAL).unwrap();
        config.coupling = CouplingConfig::Andersen {
            temperature: 300.0,
            coupling_time: 0.1,
            seed: 9,
        };
        config.neighbor_finder = NeighborFinderConfig::KdTree {
            cutoff: 1.2,
            every: 5,
        };
        let text = config.to_yaml().unwrap();
        assert_eq!(RunConfig::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn box_must_match_dimension() {
        let config = RunConfig::from_yaml(MINIMAL).unwrap();
        assert!(config.container::<2>().is_ok());
        let err = config.container::<3>().unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        let text = MINIMAL.replace("0.001", "-0.001");
        let err = RunConfig::from_yaml(&text).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.is_configuration());

        let err = RunConfig::from_yaml("n_steps: ten").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
