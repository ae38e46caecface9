use std::hash::Hash;

use rustc_hash::FxHashMap;

use transalg_world::Action;

use crate::CayleyTableStates;
use crate::DiscoveryError;
use crate::EquivalenceClasses;

/// Labels every class by its shortest member, ties broken lexicographically,
/// and renames the rows and columns of the table accordingly.
///
/// Returns the relabeled classes and table, and whether any label changed.
pub fn relabel_classes<O: Clone + Eq + Hash>(
    classes: EquivalenceClasses<O>,
    table: CayleyTableStates<O>,
) -> Result<(EquivalenceClasses<O>, CayleyTableStates<O>, bool), DiscoveryError> {
    let mapping: FxHashMap<Action, Action> = classes
        .iter()
        .filter(|class| class.shortest_element() != class.label())
        .map(|class| (class.label().clone(), class.shortest_element().clone()))
        .collect();

    if mapping.is_empty() {
        return Ok((classes, table, false));
    }

    let relabeled = classes
        .into_classes()
        .into_iter()
        .map(|class| match mapping.get(class.label()) {
            Some(label) => class.with_label(label.clone()),
            None => class,
        })
        .collect::<Vec<_>>();

    Ok((EquivalenceClasses::try_from(relabeled)?, table.relabel(&mapping)?, true))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::Signature;

    use super::*;

    #[test]
    fn test_relabel_by_shortest_member() {
        let mut classes = EquivalenceClasses::new();
        classes.create_class(Action::from("SW"), 1).unwrap();
        classes.assign(Action::from("NE"), &Action::from("SW")).unwrap();
        classes.assign(Action::from("EN"), &Action::from("SW")).unwrap();
        classes.create_class(Action::from("1"), 0).unwrap();

        let mut table = CayleyTableStates::new();
        for (label, outcome) in [("SW", 1), ("1", 0)] {
            let row: Vec<u32> = table.labels().iter().map(|_| outcome).collect();
            let signature = Signature {
                outcome,
                column: row.clone(),
                row,
            };
            table.push_label(Action::from(label), signature, outcome).unwrap();
        }

        let (classes, table, changed) = relabel_classes(classes, table).unwrap();

        assert!(changed);
        assert_eq!(classes.labels().cloned().collect::<Vec<_>>(), vec![Action::from("EN"), Action::from("1")]);
        assert_eq!(classes.find_class(&Action::from("SW")), Some(&Action::from("EN")));
        assert_eq!(table.labels(), &[Action::from("EN"), Action::from("1")]);

        let (_, _, changed) = relabel_classes(classes, table).unwrap();
        assert!(!changed);
    }
}
