use moldyn::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

const CONFIG: &str = "
units: reduced
n_steps: 250
parallel: true
box: [10.0, 10.0, 10.0]
integrator:
  kind: velocity_verlet
  timestep: 0.005
coupling:
  kind: berendsen
  temperature: 3.0
  coupling_time: 0.5
neighbor_finder:
  kind: cell_list
  cutoff: 2.8
  every: 10
";

const THERMO_EVERY: usize = 50;

fn main() -> Result<(), Error> {
    let config = RunConfig::from_yaml(CONFIG)?;

    let container = config.container::<3>()?;
    // spacing divides the box so the lattice stays regular across the boundary
    let lattice = Cubic::new(1.25);
    let coords = lattice.coords_within(&container);

    let mut atoms = Atoms::<3>::empty();
    atoms.add_particles(Particle::new(1.0).with_lj(1.0, 1.0), coords);
    let mut rng = StdRng::seed_from_u64(2024);
    atoms.random_velocities(3.0, config.units.boltzmann(), &mut rng)?;
    atoms.remove_centre_of_mass_motion();

    let mut system = SystemBuilder::new(atoms, container)
        .units(config.units)
        .general("lj", LennardJones::new(Cutoff::shifted_potential(2.5)))
        .neighbor_finder(config.neighbor_finder::<3>())
        .logger("thermo", ThermoOutput::standard(THERMO_EVERY).with_parallel(config.parallel))
        .build()?;

    println!("Start: {} particles", system.num_particles());
    let mut simulator = config.simulator();
    let mut completed = 0;
    while completed < config.n_steps {
        // each chunk logs one thermo row, for the state it starts from
        let chunk = THERMO_EVERY.min(config.n_steps - completed);
        completed += simulator.run(&mut system, chunk, config.parallel)?;
        if let Some(thermo) = system.logger::<ThermoOutput>("thermo") {
            if completed == chunk {
                println!("{}", thermo.header());
            }
            println!("{:?}", thermo.last_row());
        }
    }
    println!("Finished {} steps", completed);
    Ok(())
}
