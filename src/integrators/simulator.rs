use std::sync::atomic::{AtomicBool, Ordering};

use super::Integrator;
use crate::{
    coupling::{Coupling, NoCoupling},
    neighbor::NeighborList,
    system::System,
    utils::Vector,
    Error,
};

/// Drives a [`System`] through a number of steps.
///
/// Steps are numbered from one; step `k` takes the state after `k - 1` steps
/// to the state after `k`. Loggers see the state before each step is taken,
/// labelled with the number of completed steps.
#[derive(Clone, Debug)]
pub struct Simulator<I: Integrator, C: Coupling = NoCoupling> {
    pub integrator: I,
    pub coupling: C,
}

impl<I: Integrator> Simulator<I, NoCoupling> {
    pub fn new(integrator: I) -> Self {
        Self {
            integrator,
            coupling: NoCoupling,
        }
    }
}

impl<I: Integrator, C: Coupling> Simulator<I, C> {
    pub fn with_coupling(integrator: I, coupling: C) -> Self {
        Self {
            integrator,
            coupling,
        }
    }

    /// Run `n_steps` steps, returning the number completed
    pub fn run<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        n_steps: usize,
        parallel: bool,
    ) -> Result<usize, Error> {
        self.run_cancellable(system, n_steps, parallel, &AtomicBool::new(false))
    }

    /// Run up to `n_steps` steps, stopping early once `cancel` is set.
    ///
    /// The flag is checked before each step, so a step in progress always
    /// completes.
    pub fn run_cancellable<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        n_steps: usize,
        parallel: bool,
        cancel: &AtomicBool,
    ) -> Result<usize, Error> {
        system.atoms.check_lengths()?;
        let start = system.step();
        self.integrator.begin(start);
        log::info!(
            "Running {} steps from step {} with {} particles",
            n_steps,
            start,
            system.num_particles()
        );

        system
            .refresh_neighbors(start, parallel)
            .map_err(|e| e.at_step(start))?;
        let empty = NeighborList::default();
        let mut forces = system
            .forces(system.neighbors().unwrap_or(&empty), parallel)
            .map_err(|e| e.at_step(start))?;

        let mut completed = 0;
        for step in start + 1..=start + n_steps {
            if cancel.load(Ordering::Relaxed) {
                log::info!("Run cancelled before step {}", step);
                break;
            }
            log::trace!("Step {}", step);
            self.step(system, &mut forces, step, parallel)
                .map_err(|e| e.at_step(step))?;
            system.set_step(step);
            completed += 1;
        }
        log::info!("Finished run at step {}", system.step());
        Ok(completed)
    }

    fn step<const D: usize, X>(
        &mut self,
        system: &mut System<D, X>,
        forces: &mut Vec<Vector<D>>,
        step: usize,
        parallel: bool,
    ) -> Result<(), Error> {
        system.run_loggers(step - 1)?;
        self.integrator.advance(system, forces, parallel)?;
        self.coupling.apply(system, self.integrator.timestep(), step)?;
        system.run_operations(step)?;
        system.refresh_neighbors(step, parallel)
    }
}
