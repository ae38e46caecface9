use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use transalg_cayley::CayleyTableActions;
use transalg_properties::PropertyAnalysis;
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

pub fn analyse(table: &CayleyTableActions) -> PropertyAnalysis {
    PropertyAnalysis::analyse(table).unwrap()
}

pub fn cyclic_four() -> CayleyTableActions {
    table(
        "1 a aa aaa
         1 a aa aaa
         a aa aaa 1
         aa aaa 1 a
         aaa 1 a aa",
    )
}

pub fn klein_four() -> CayleyTableActions {
    table(
        "1 a b ab
         1 a b ab
         a 1 ab b
         b ab 1 a
         ab b a 1",
    )
}

/// Renames the labels of the table by a random permutation of the labels.
pub fn shuffle_labels(table: &CayleyTableActions, seed: u64) -> CayleyTableActions {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut renamed: Vec<Action> = table.labels().to_vec();
    renamed.shuffle(&mut rng);

    let rename = |label: &Action| renamed[table.index_of(label).unwrap()].clone();
    let rows = table
        .labels()
        .iter()
        .map(|left| {
            table
                .labels()
                .iter()
                .map(|right| rename(table.compose(left, right).unwrap()))
                .collect()
        })
        .collect();

    let labels: Vec<Action> = table.labels().iter().map(rename).collect();
    CayleyTableActions::from_rows(labels.clone(), labels, rows).unwrap()
}
