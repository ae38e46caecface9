use transalg_cayley::CayleyTableActions;
use transalg_world::Action;

/// Builds a table from rows of whitespace separated labels, where the first
/// row lists the labels and the following rows hold `label ∘ column`.
pub fn table(text: &str) -> CayleyTableActions {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let labels: Vec<Action> = lines
        .next()
        .unwrap()
        .split_whitespace()
        .map(Action::from)
        .collect();
    let rows = lines
        .map(|line| line.split_whitespace().map(Action::from).collect())
        .collect();

    CayleyTableActions::from_rows(labels.clone(), labels, rows).unwrap()
}

/// The cyclic group of order three.
pub fn cyclic_three() -> CayleyTableActions {
    table(
        "1 a aa
         1 a aa
         a aa 1
         aa 1 a",
    )
}

/// The left zero semigroup on three elements, x ∘ y = x.
pub fn left_zero_three() -> CayleyTableActions {
    table(
        "x y z
         x x x
         y y y
         z z z",
    )
}
