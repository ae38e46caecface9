use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;
use transalg_cayley::LabelIndex;
use transalg_world::Action;

use crate::PropertyError;

/// The identities of an algebra.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInfo {
    /// The elements e with e ∘ x = x for all x.
    pub left_identities: Vec<Action>,

    /// The elements e with x ∘ e = x for all x.
    pub right_identities: Vec<Action>,

    /// The two-sided identity, if any.
    pub identity: Option<Action>,
}

impl IdentityInfo {
    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }
}

pub fn check_identity(table: &CayleyTableActions) -> Result<IdentityInfo, PropertyError> {
    let size = table.len();

    let left: Vec<LabelIndex> = (0..size)
        .filter(|&e| (0..size).all(|x| table.compose_index(e, x) == x))
        .collect();
    let right: Vec<LabelIndex> = (0..size)
        .filter(|&e| (0..size).all(|x| table.compose_index(x, e) == x))
        .collect();

    let two_sided = left
        .iter()
        .filter(|e| right.contains(*e))
        .map(|e| table.label(*e).clone())
        .collect();

    Ok(IdentityInfo {
        identity: unique_identity(two_sided)?,
        left_identities: left.into_iter().map(|e| table.label(e).clone()).collect(),
        right_identities: right.into_iter().map(|e| table.label(e).clone()).collect(),
    })
}

/// Picks the two-sided identity, several candidates are an error.
///
/// Two two-sided identities e and f satisfy e = e ∘ f = f, so a table over
/// distinct labels, and in particular every table built from discovered
/// classes, has at most one. Only a caller passing labels that do not come
/// from a single table can reach the error.
pub(crate) fn unique_identity(mut candidates: Vec<Action>) -> Result<Option<Action>, PropertyError> {
    match candidates.len() {
        0 | 1 => Ok(candidates.pop()),
        _ => Err(PropertyError::MultipleIdentities(candidates)),
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::test_utility::cyclic_three;
    use crate::test_utility::left_zero_three;
    use crate::test_utility::table;

    use super::*;

    #[test]
    fn test_group_identity() {
        let info = check_identity(&cyclic_three()).unwrap();

        assert_eq!(info.identity, Some(Action::from("1")));
        assert_eq!(info.left_identities, vec![Action::from("1")]);
        assert_eq!(info.right_identities, vec![Action::from("1")]);
    }

    #[test]
    fn test_only_right_identities() {
        let info = check_identity(&left_zero_three()).unwrap();

        assert!(!info.has_identity());
        assert!(info.left_identities.is_empty());
        assert_eq!(info.right_identities.len(), 3);
    }

    #[test]
    fn test_left_identity_without_identity() {
        // e ∘ x = x, but e is not a right identity.
        let info = check_identity(&table(
            "e f
             e f
             e f",
        ))
        .unwrap();

        assert_eq!(info.left_identities, vec![Action::from("e"), Action::from("f")]);
        assert!(info.right_identities.is_empty());
        assert_eq!(info.identity, None);
    }

    #[test]
    fn test_several_identities_are_rejected() {
        let candidates = vec![Action::from("1"), Action::from("11")];
        assert_eq!(
            unique_identity(candidates.clone()),
            Err(PropertyError::MultipleIdentities(candidates))
        );
        assert_eq!(unique_identity(vec![Action::from("1")]), Ok(Some(Action::from("1"))));
    }
}
