use test_case::test_case;

use transalg::AlgebraConfig;
use transalg::AlgebraError;
use transalg::LocalAlgebra;
use transalg::TransformationAlgebra;
use transalg_cayley::GenerationMethod;
use transalg_utilities::Budget;
use transalg_world::Action;
use transalg_world::World;
use transalg_worlds::Gridworld2D;
use transalg_worlds::Gridworld2DWalls;
use transalg_worlds::GridPosition;
use transalg_worlds::UndefinedActionStrategy;
use transalg_worlds::Wall;

fn analysed_local(name: &str, world: &impl World<State = GridPosition>) -> LocalAlgebra<GridPosition> {
    let mut algebra =
        TransformationAlgebra::generate_local(name, world, (0, 0), &AlgebraConfig::default()).unwrap();
    algebra.generate_cayley_table_actions().unwrap();
    algebra.check_properties().unwrap();
    algebra
}

#[test]
fn test_two_by_two_is_a_commutative_group() {
    let _ = env_logger::builder().is_test(true).try_init();

    let world = Gridworld2D::new((2, 2)).unwrap();
    let algebra = analysed_local("2x2", &world);

    assert_eq!(algebra.len(), 4);

    let properties = algebra.properties().unwrap();
    assert!(properties.associativity().unwrap().is_associative);
    assert_eq!(properties.identity().unwrap().identity, Some(Action::from("1")));
    assert!(properties.inverse().unwrap().is_inverse_algebra);
    assert!(properties.commutativity().unwrap().is_commutative);
}

#[test_case(GenerationMethod::StatesCayley ; "states cayley")]
#[test_case(GenerationMethod::ActionFunction ; "action function")]
fn test_table_is_closed(method: GenerationMethod) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut config = AlgebraConfig::default();
    config.discovery.method = method;

    let world = Gridworld2D::new((3, 2)).unwrap();
    let mut algebra = TransformationAlgebra::generate_local("3x2", &world, (1, 1), &config).unwrap();
    let table = algebra.generate_cayley_table_actions().unwrap();

    assert_eq!(table.len(), 6);
    for left in table.labels() {
        for right in table.labels() {
            assert!(table.index_of(table.compose(left, right).unwrap()).is_some());
        }
    }
}

#[test]
fn test_masked_wall_is_not_invertible() {
    let _ = env_logger::builder().is_test(true).try_init();

    let grid = Gridworld2D::new((2, 2)).unwrap();
    let world = Gridworld2DWalls::new(grid, [Wall::east_of((0, 0))], UndefinedActionStrategy::Masked).unwrap();
    let algebra = analysed_local("2x2 masked wall", &world);

    let inverse = algebra.properties().unwrap().inverse().unwrap();
    assert!(!inverse.is_inverse_algebra);

    // The actions that walk into the wall have no inverse.
    let undefined = algebra
        .classes()
        .iter()
        .find(|class| class.outcome().is_undefined())
        .unwrap();
    assert!(!inverse.has_inverse(undefined.label()));
}

#[test]
fn test_identity_wall_stays_defined() {
    let _ = env_logger::builder().is_test(true).try_init();

    let grid = Gridworld2D::new((2, 2)).unwrap();
    let world = Gridworld2DWalls::new(grid, [Wall::east_of((0, 0))], UndefinedActionStrategy::Identity).unwrap();
    let algebra = analysed_local("2x2 identity wall", &world);

    assert!(algebra.classes().iter().all(|class| !class.outcome().is_undefined()));
    assert!(algebra.properties().unwrap().identity().unwrap().has_identity());
}

#[test]
fn test_stages_in_order() {
    let _ = env_logger::builder().is_test(true).try_init();

    let world = Gridworld2D::new((2, 2)).unwrap();
    let mut algebra = TransformationAlgebra::generate_local("2x2", &world, (0, 0), &AlgebraConfig::default()).unwrap();

    assert!(matches!(
        algebra.check_properties(),
        Err(AlgebraError::Precondition { stage: "action table", .. })
    ));

    algebra.generate_cayley_table_actions().unwrap();
    assert!(matches!(
        algebra.find_isomorphism(&algebra.clone(), &AlgebraConfig::default()),
        Err(AlgebraError::Precondition { stage: "property analysis", .. })
    ));
}

#[test]
fn test_discovery_budget() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut config = AlgebraConfig::default();
    config.discovery.budget = Budget::with_max_steps(2);

    let world = Gridworld2D::new((3, 3)).unwrap();
    let error = TransformationAlgebra::generate_global("3x3", &world, &config).unwrap_err();

    assert!(error.is_non_termination());
}
