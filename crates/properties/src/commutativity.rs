use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;
use transalg_world::Action;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommutativityInfo {
    /// For every element a, the elements b with a ∘ b = b ∘ a, including a.
    pub commuting: BTreeMap<Action, Vec<Action>>,

    /// For every element a, the elements b with a ∘ b ≠ b ∘ a.
    pub non_commuting: BTreeMap<Action, Vec<Action>>,

    /// The elements that commute with every element.
    pub commute_with_all: Vec<Action>,

    pub is_commutative: bool,
}

impl CommutativityInfo {
    /// The number of elements that commute with the given element.
    pub fn num_of_commuting(&self, element: &Action) -> usize {
        self.commuting.get(element).map_or(0, Vec::len)
    }
}

pub fn check_commutativity(table: &CayleyTableActions) -> CommutativityInfo {
    let size = table.len();

    let mut info = CommutativityInfo::default();
    for a in 0..size {
        let (commuting, non_commuting): (Vec<usize>, Vec<usize>) =
            (0..size).partition(|&b| table.compose_index(a, b) == table.compose_index(b, a));

        if non_commuting.is_empty() {
            info.commute_with_all.push(table.label(a).clone());
        }

        info.commuting
            .insert(table.label(a).clone(), commuting.into_iter().map(|b| table.label(b).clone()).collect());
        info.non_commuting
            .insert(table.label(a).clone(), non_commuting.into_iter().map(|b| table.label(b).clone()).collect());
    }

    info.is_commutative = info.commute_with_all.len() == size;
    info
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::test_utility::cyclic_three;
    use crate::test_utility::left_zero_three;
    use crate::test_utility::table;

    use super::*;

    #[test]
    fn test_abelian_group() {
        let info = check_commutativity(&cyclic_three());

        assert!(info.is_commutative);
        assert_eq!(info.num_of_commuting(&Action::from("a")), 3);
    }

    #[test]
    fn test_left_zero_semigroup() {
        let info = check_commutativity(&left_zero_three());

        assert!(!info.is_commutative);
        assert!(info.commute_with_all.is_empty());
        assert_eq!(info.commuting[&Action::from("x")], vec![Action::from("x")]);
    }

    #[test]
    fn test_center() {
        // A monoid with identity 1, where only 1 commutes with everything.
        let info = check_commutativity(&table(
            "1 x y
             1 x y
             x x x
             y y y",
        ));

        assert_eq!(info.commute_with_all, vec![Action::from("1")]);
        assert_eq!(info.non_commuting[&Action::from("x")], vec![Action::from("y")]);
    }
}
