use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use transalg_world::Action;

use crate::CayleyTableActions;
use crate::CayleyTableStates;
use crate::EquivalenceClasses;

/// The result of comparing the equivalence classes of two algebras.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassesComparison {
    /// The same labels with the same members.
    Identical,

    /// The same groups of members, but labelled differently.
    SameGrouping,

    /// Descriptions of the classes without a counterpart.
    Different(Vec<String>),
}

impl ClassesComparison {
    pub fn is_identical(&self) -> bool {
        matches!(self, ClassesComparison::Identical)
    }
}

pub fn compare_equivalence_classes<O1, O2>(
    first: &EquivalenceClasses<O1>,
    second: &EquivalenceClasses<O2>,
) -> ClassesComparison {
    if first.len() != second.len() {
        return ClassesComparison::Different(vec![format!(
            "{} classes versus {} classes",
            first.len(),
            second.len()
        )]);
    }

    let identical = first.iter().all(|class| {
        second
            .class(class.label())
            .is_some_and(|other| other.elements() == class.elements())
    });
    if identical {
        return ClassesComparison::Identical;
    }

    let first_groups: BTreeSet<&BTreeSet<Action>> = first.iter().map(|class| class.elements()).collect();
    let second_groups: BTreeSet<&BTreeSet<Action>> = second.iter().map(|class| class.elements()).collect();
    if first_groups == second_groups {
        return ClassesComparison::SameGrouping;
    }

    let mut differences = Vec::new();
    for class in first.iter().filter(|class| !second_groups.contains(class.elements())) {
        differences.push(format!("class {} only occurs in the first algebra", class.label()));
    }
    for class in second.iter().filter(|class| !first_groups.contains(class.elements())) {
        differences.push(format!("class {} only occurs in the second algebra", class.label()));
    }

    ClassesComparison::Different(differences)
}

/// Returns true iff both tables have the same labels and the same outcomes
/// for every pair of labels.
pub fn compare_states_tables<O: PartialEq>(first: &CayleyTableStates<O>, second: &CayleyTableStates<O>) -> bool {
    if first.len() != second.len() {
        return false;
    }

    first.labels().iter().all(|row| {
        first.labels().iter().all(|column| {
            match (first.outcome(row, column), second.outcome(row, column)) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            }
        })
    })
}

/// Returns true iff both tables have the same labels and compositions.
pub fn compare_actions_tables(first: &CayleyTableActions, second: &CayleyTableActions) -> bool {
    if first.len() != second.len() {
        return false;
    }

    first.labels().iter().all(|left| {
        first
            .labels()
            .iter()
            .all(|right| match (first.compose(left, right), second.compose(left, right)) {
                (Ok(x), Ok(y)) => x == y,
                _ => false,
            })
    })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn classes(groups: &[(&str, &[&str])]) -> EquivalenceClasses<()> {
        let mut classes = EquivalenceClasses::new();
        for (label, members) in groups {
            classes.create_class(Action::from(*label), ()).unwrap();
            for member in *members {
                classes.assign(Action::from(*member), &Action::from(*label)).unwrap();
            }
        }

        classes
    }

    #[test]
    fn test_compare_classes() {
        let first = classes(&[("1", &["11"]), ("N", &["S"])]);

        assert_eq!(compare_equivalence_classes(&first, &first), ClassesComparison::Identical);

        let relabeled = classes(&[("11", &["1"]), ("S", &["N"])]);
        assert_eq!(compare_equivalence_classes(&first, &relabeled), ClassesComparison::SameGrouping);

        let different = classes(&[("1", &[]), ("N", &["S", "11"])]);
        assert_eq!(
            compare_equivalence_classes(&first, &different),
            ClassesComparison::Different(vec![
                "class 1 only occurs in the first algebra".to_string(),
                "class N only occurs in the first algebra".to_string(),
                "class 1 only occurs in the second algebra".to_string(),
                "class N only occurs in the second algebra".to_string(),
            ])
        );

        let smaller = classes(&[("1", &["11", "N", "S"])]);
        assert!(matches!(compare_equivalence_classes(&first, &smaller), ClassesComparison::Different(_)));
    }
}
