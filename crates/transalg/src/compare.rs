use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::compare_actions_tables;
use transalg_cayley::compare_equivalence_classes;
use transalg_cayley::compare_states_tables;
use transalg_cayley::ClassesComparison;

use crate::TransformationAlgebra;

/// The differences between two algebras generated with the same equivalence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgebraComparison {
    pub classes: ClassesComparison,
    pub states_tables_equal: bool,

    /// Only compared when both algebras have an action table.
    pub actions_tables_equal: Option<bool>,
}

impl AlgebraComparison {
    /// Returns true iff the algebras agree on everything that was compared.
    pub fn is_identical(&self) -> bool {
        self.classes.is_identical() && self.states_tables_equal && self.actions_tables_equal != Some(false)
    }
}

/// Compares the classes and tables of two algebras by label.
pub fn compare_algebras<O: PartialEq>(
    first: &TransformationAlgebra<O>,
    second: &TransformationAlgebra<O>,
) -> AlgebraComparison {
    let actions_tables_equal = match (first.cayley_table_actions(), second.cayley_table_actions()) {
        (Ok(first_table), Ok(second_table)) => Some(compare_actions_tables(first_table, second_table)),
        _ => None,
    };

    AlgebraComparison {
        classes: compare_equivalence_classes(first.classes(), second.classes()),
        states_tables_equal: compare_states_tables(first.states_table(), second.states_table()),
        actions_tables_equal,
    }
}
