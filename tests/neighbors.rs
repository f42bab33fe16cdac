use moldyn::neighbor::{
    CellListNeighborFinder, DistanceNeighborFinder, EligibilityMatrix, NeighborFinder,
    NeighborList, NoNeighborFinder, TreeNeighborFinder, UpdateSettings,
};
use moldyn::utils::Vector;
use moldyn::Container;
use rand::{rngs::StdRng, SeedableRng};

fn finders<const D: usize>(cutoff: f64) -> Vec<(&'static str, Box<dyn NeighborFinder<D>>)> {
    let settings = UpdateSettings::new(1);
    let distance: Box<dyn NeighborFinder<D>> =
        Box::new(DistanceNeighborFinder::new(cutoff, settings));
    let cells: Box<dyn NeighborFinder<D>> = Box::new(CellListNeighborFinder::new(cutoff, settings));
    let tree: Box<dyn NeighborFinder<D>> = Box::new(TreeNeighborFinder::new(cutoff, settings));
    vec![("distance", distance), ("cell list", cells), ("kd tree", tree)]
}

fn chain_eligibility(num_particles: usize) -> EligibilityMatrix {
    let bonds: Vec<[usize; 2]> = (0..num_particles / 2).map(|i| [i, i + 1]).collect();
    EligibilityMatrix::from_bonds(num_particles, &bonds).unwrap()
}

fn check_agreement<const D: usize>(container: Container<D>, num: usize, cutoff: f64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let positions: Vec<Vector<D>> = container.random_coords(num, &mut rng);
    let eligibility = chain_eligibility(num);
    let mut reference: Option<NeighborList> = None;
    for (name, finder) in finders::<D>(cutoff) {
        for parallel in [false, true] {
            let list = finder.build(&positions, &container, &eligibility, parallel);
            list.validate(&eligibility, Some((positions.as_slice(), &container, cutoff * cutoff)))
                .unwrap();
            match &reference {
                None => reference = Some(list),
                Some(expected) => assert_eq!(
                    &list, expected,
                    "{} (parallel: {}) disagrees",
                    name, parallel
                ),
            }
        }
    }
    assert!(!reference.unwrap().is_empty());
}

#[test]
fn strategies_agree_in_three_dimensions() {
    check_agreement(Container::new([10.0, 9.0, 11.0]), 400, 2.0, 1);
}

#[test]
fn strategies_agree_in_two_dimensions() {
    check_agreement(Container::new([12.0, 8.0]), 300, 1.5, 2);
}

#[test]
fn small_boxes_fall_back_to_a_full_search() {
    // fewer than three cells per side
    check_agreement(Container::<3>::cubic(5.0), 60, 2.0, 3);
}

#[test]
fn bonded_pairs_are_never_listed() {
    let container = Container::<3>::cubic(6.0);
    let mut rng = StdRng::seed_from_u64(4);
    let positions = container.random_coords(120, &mut rng);
    let eligibility = chain_eligibility(120);
    for (_, finder) in finders::<3>(6.0) {
        let list = finder.build(&positions, &container, &eligibility, true);
        assert_eq!(list.len(), eligibility.num_eligible());
        for pair in &list {
            assert!(pair.i < pair.j);
            assert!(eligibility.is_eligible(pair.i, pair.j));
            assert_eq!(pair.special, eligibility.is_special(pair.i, pair.j));
        }
    }
}

#[test]
fn no_op_finder_lists_every_pair() {
    let container = Container::<3>::cubic(3.0);
    let positions = vec![[0.5; 3]; 5];
    let list = NeighborFinder::<3>::build(
        &NoNeighborFinder::new(),
        &positions,
        &container,
        &EligibilityMatrix::all(5),
        false,
    );
    assert_eq!(list.len(), 5 * 4 / 2);
    assert!(list.iter().all(|p| p.i < p.j));
}

#[test]
fn lists_are_reused_between_updates() {
    let container = Container::<2>::cubic(10.0);
    let eligibility = EligibilityMatrix::all(2);
    let finder: &dyn NeighborFinder<2> = &DistanceNeighborFinder::new(1.0, UpdateSettings::new(4));
    let near = vec![[1.0, 1.0], [1.5, 1.0]];
    let far = vec![[1.0, 1.0], [5.0, 1.0]];

    let list = finder.find(None, &near, &container, &eligibility, 1, false);
    assert_eq!(list.len(), 1);
    // off cadence the stale list is kept
    let list = finder.find(Some(list), &far, &container, &eligibility, 3, false);
    assert_eq!(list.len(), 1);
    let list = finder.find(Some(list), &far, &container, &eligibility, 4, false);
    assert!(list.is_empty());
}
