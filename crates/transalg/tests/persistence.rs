use transalg::compare_algebras;
use transalg::AlgebraConfig;
use transalg::GlobalAlgebra;
use transalg::LocalAlgebra;
use transalg::TransformationAlgebra;
use transalg_worlds::Gridworld2D;
use transalg_worlds::Gridworld2DWalls;
use transalg_worlds::GridPosition;
use transalg_worlds::UndefinedActionStrategy;
use transalg_worlds::Wall;

#[test]
fn test_local_algebra_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let grid = Gridworld2D::new((2, 2)).unwrap();
    let world = Gridworld2DWalls::new(grid, [Wall::north_of((1, 0))], UndefinedActionStrategy::Masked).unwrap();

    let mut algebra = TransformationAlgebra::generate_local("walls", &world, (1, 0), &AlgebraConfig::default()).unwrap();
    algebra.generate_cayley_table_actions().unwrap();
    algebra.check_properties().unwrap();

    let json = serde_json::to_string(&algebra).unwrap();
    let restored: LocalAlgebra<GridPosition> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.name(), "walls");
    assert_eq!(restored.parameters(), algebra.parameters());
    assert!(compare_algebras(&algebra, &restored).is_identical());
    assert_eq!(restored.properties().unwrap(), algebra.properties().unwrap());
}

#[test]
fn test_global_algebra_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let world = Gridworld2D::new((2, 3)).unwrap();
    let algebra = TransformationAlgebra::generate_global("2x3", &world, &AlgebraConfig::default()).unwrap();

    let json = serde_json::to_string(&algebra).unwrap();
    let restored: GlobalAlgebra<GridPosition> = serde_json::from_str(&json).unwrap();

    let comparison = compare_algebras(&algebra, &restored);
    assert!(comparison.is_identical());
    assert_eq!(comparison.actions_tables_equal, None);
    assert!(restored.cayley_table_actions().is_err());
}

#[test]
fn test_rejects_inconsistent_classes() {
    let world = Gridworld2D::new((2, 2)).unwrap();
    let algebra = TransformationAlgebra::generate_local("2x2", &world, (0, 0), &AlgebraConfig::default()).unwrap();

    // Add the label of the second class to the first class as well.
    let mut value = serde_json::to_value(&algebra).unwrap();
    let classes = value["classes"].as_array_mut().unwrap();
    let moved = classes[1]["elements"][0].clone();
    classes[0]["elements"].as_array_mut().unwrap().push(moved);

    assert!(serde_json::from_value::<LocalAlgebra<GridPosition>>(value).is_err());
}
