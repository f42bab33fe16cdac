//! Particle dynamics engine: pairwise and multi-body interactions in a
//! periodic box, neighbor search, and time integration with optional
//! thermostat coupling.
//!
//! ```
//! use moldyn::prelude::*;
//!
//! let container = Container::<3>::cubic(6.0);
//! let sites = Cubic::new(1.5).coords_within(&container);
//! let particles = vec![Particle::new(1.0).with_lj(1.0, 1.0); sites.len()];
//! let atoms = Atoms::<3>::at_rest(particles, sites).unwrap();
//! let mut system = SystemBuilder::new(atoms, container)
//!     .units(UnitSystem::Reduced)
//!     .general("lj", LennardJones::new(Cutoff::shifted_force(2.5)))
//!     .neighbor_finder(Box::new(CellListNeighborFinder::new(2.8, UpdateSettings::new(5))))
//!     .build()
//!     .unwrap();
//! let mut simulator = Simulator::new(VelocityVerlet::new(0.005));
//! assert_eq!(simulator.run(&mut system, 10, false).unwrap(), 10);
//! assert_eq!(system.step(), 10);
//! ```

pub mod atoms;
pub mod compute;
pub mod config;
pub mod container;
pub mod coupling;
pub mod error;
pub mod forces;
pub mod integrators;
pub mod lattice;
pub mod neighbor;
pub mod operations;
pub mod output;
pub mod pairwise;
pub mod particle;
pub mod prelude;
pub mod specific;
pub mod system;
pub mod units;
pub mod utils;

pub use atoms::Atoms;
pub use container::Container;
pub use error::Error;
pub use particle::Particle;
pub use system::{System, SystemBuilder};
pub use units::UnitSystem;
