use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;
use transalg_world::Action;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociativityInfo {
    pub is_associative: bool,

    /// The number of triples (a, b, c) with a ∘ (b ∘ c) ≠ (a ∘ b) ∘ c.
    pub violations: u64,

    /// The first violating triple in table order.
    pub counterexample: Option<(Action, Action, Action)>,
}

pub fn check_associativity(table: &CayleyTableActions) -> AssociativityInfo {
    let size = table.len();

    let mut info = AssociativityInfo::default();
    for a in 0..size {
        for b in 0..size {
            let ab = table.compose_index(a, b);
            for c in 0..size {
                if table.compose_index(a, table.compose_index(b, c)) != table.compose_index(ab, c) {
                    info.violations += 1;
                    if info.counterexample.is_none() {
                        info.counterexample = Some((table.label(a).clone(), table.label(b).clone(), table.label(c).clone()));
                    }
                }
            }
        }
    }

    info.is_associative = info.violations == 0;
    info
}
