mod loggers;

pub use loggers::{CoordinateLogger, EnergyLogger, TemperatureLogger, VelocityLogger};

use std::{any::Any, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{compute::Compute, neighbor::NeighborList, system::System, Error};

/// Observer invoked once per step before the state is advanced.
///
/// Loggers only see the system through a shared reference, so they cannot
/// change the trajectory.
pub trait Logger<const D: usize, X>: Send {
    fn log(
        &mut self,
        system: &System<D, X>,
        neighbors: &NeighborList,
        step: usize,
    ) -> Result<(), Error>;

    /// Support for downcasting through [`System::logger`]
    fn as_any(&self) -> &dyn Any;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSpec {
    Step,
    Compute(Compute),
}
impl Display for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputSpec::Step => "step",
            OutputSpec::Compute(c) => c.name(),
        };
        String::from(s).fmt(f)
    }
}

/// Thermodynamic output written through the `log` facade at `info` level
#[derive(Clone, Debug)]
pub struct ThermoOutput {
    pub every: usize,
    pub values: Vec<OutputSpec>,
    parallel: bool,
    header_written: bool,
    last_row: Vec<f64>,
}
impl ThermoOutput {
    pub fn new(every: usize, values: Vec<OutputSpec>) -> Self {
        assert!(every > 0, "Output cadence should be positive");
        Self {
            every,
            values,
            parallel: false,
            header_written: false,
            last_row: Vec::new(),
        }
    }
    /// Step, temperature and the energies
    pub fn standard(every: usize) -> Self {
        Self::new(
            every,
            vec![
                OutputSpec::Step,
                OutputSpec::Compute(Compute::Temperature),
                OutputSpec::Compute(Compute::KineticEnergy),
                OutputSpec::Compute(Compute::PotentialEnergy),
                OutputSpec::Compute(Compute::TotalEnergy),
            ],
        )
    }
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
    pub fn header(&self) -> String {
        self.values
            .iter()
            .map(|v| format!("{:>14}", v))
            .collect::<Vec<_>>()
            .join(" ")
    }
    /// Values from the most recent output step
    pub fn last_row(&self) -> &[f64] {
        &self.last_row
    }
}

impl<const D: usize, X: 'static> Logger<D, X> for ThermoOutput {
    fn log(
        &mut self,
        system: &System<D, X>,
        neighbors: &NeighborList,
        step: usize,
    ) -> Result<(), Error> {
        if step % self.every != 0 {
            return Ok(());
        }
        if !self.header_written {
            log::info!("{}", self.header());
            self.header_written = true;
        }
        let mut row = Vec::with_capacity(self.values.len());
        let mut line = Vec::with_capacity(self.values.len());
        for spec in self.values.iter() {
            match spec {
                OutputSpec::Step => {
                    row.push(step as f64);
                    line.push(format!("{:>14}", step));
                }
                OutputSpec::Compute(c) => {
                    let value = c.compute(system, neighbors, self.parallel)?;
                    row.push(value);
                    line.push(format!("{:>14.6e}", value));
                }
            }
        }
        log::info!("{}", line.join(" "));
        self.last_row = row;
        Ok(())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_each_column() {
        let thermo = ThermoOutput::standard(10);
        let header = thermo.header();
        let names: Vec<&str> = header.split_whitespace().collect();
        assert_eq!(names, ["step", "T", "KE", "PE", "E"]);
    }

    #[test]
    fn output_spec_from_yaml() {
        let specs: Vec<OutputSpec> =
            serde_yaml::from_str("[step, !compute temperature, !compute total_energy]").unwrap();
        assert_eq!(
            specs,
            vec![
                OutputSpec::Step,
                OutputSpec::Compute(Compute::Temperature),
                OutputSpec::Compute(Compute::TotalEnergy)
            ]
        );
    }
}
