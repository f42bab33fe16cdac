use thiserror::Error;

use crate::units::UnitSystem;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("unit mismatch in `{interaction}`: declared {found}, system uses {expected}")]
    UnitMismatch {
        interaction: String,
        expected: UnitSystem,
        found: UnitSystem,
    },
    #[error("length mismatch: {particles} particles but {what} has length {len}")]
    LengthMismatch {
        what: &'static str,
        particles: usize,
        len: usize,
    },
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("index {index} in `{interaction}` is out of range for {particles} particles")]
    IndexOutOfRange {
        interaction: String,
        index: usize,
        particles: usize,
    },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("name `{0}` is already in use")]
    DuplicateName(String),
    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("{}", describe_instability(.step, .interaction, .particles))]
    NumericalInstability {
        step: Option<usize>,
        interaction: String,
        particles: Vec<usize>,
    },
    #[error("neighbor list invariant violated: {0}")]
    NeighborListInvariant(String),
}

impl Error {
    pub(crate) fn instability(particles: Vec<usize>) -> Self {
        Error::NumericalInstability {
            step: None,
            interaction: String::new(),
            particles,
        }
    }

    /// Configuration problems detected while assembling a system or run
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnitMismatch { .. }
                | Error::LengthMismatch { .. }
                | Error::DimensionMismatch { .. }
                | Error::IndexOutOfRange { .. }
                | Error::InvalidParameter(_)
                | Error::DuplicateName(_)
                | Error::Config(_)
        )
    }

    /// Non-finite forces or energies produced during a run
    pub fn is_numerical(&self) -> bool {
        matches!(self, Error::NumericalInstability { .. })
    }

    /// The step at which a numerical error occurred, if known
    pub fn step(&self) -> Option<usize> {
        match self {
            Error::NumericalInstability { step, .. } => *step,
            _ => None,
        }
    }

    pub(crate) fn at_step(mut self, at: usize) -> Self {
        if let Error::NumericalInstability { step, .. } = &mut self {
            step.get_or_insert(at);
        }
        self
    }

    pub(crate) fn in_interaction(mut self, name: &str) -> Self {
        if let Error::NumericalInstability { interaction, .. } = &mut self {
            if interaction.is_empty() {
                interaction.push_str(name);
            }
        }
        self
    }
}

fn describe_instability(step: &Option<usize>, interaction: &str, particles: &[usize]) -> String {
    let mut message = String::from("numerical instability");
    if !interaction.is_empty() {
        message.push_str(&format!(" in `{}`", interaction));
    }
    message.push_str(&format!(" for particles {:?}", particles));
    if let Some(step) = step {
        message.push_str(&format!(" at step {}", step));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instability_context_is_filled_once() {
        let err = Error::instability(vec![3, 7])
            .in_interaction("lj")
            .in_interaction("coulomb")
            .at_step(12)
            .at_step(13);
        assert!(err.is_numerical());
        assert!(!err.is_configuration());
        assert_eq!(err.step(), Some(12));
        assert_eq!(
            err.to_string(),
            "numerical instability in `lj` for particles [3, 7] at step 12"
        );
    }

    #[test]
    fn configuration_errors_are_classified() {
        let err = Error::LengthMismatch {
            what: "velocities",
            particles: 4,
            len: 3,
        };
        assert!(err.is_configuration());
        assert_eq!(err.step(), None);
    }
}
