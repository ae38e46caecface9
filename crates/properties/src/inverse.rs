use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;
use transalg_world::Action;

use crate::IdentityInfo;
use crate::PropertyError;

/// An inverse together with the identity that the composition yields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InversePair {
    pub inverse: Action,
    pub identity: Action,
}

/// The inverses of every element, relative to the identities of the algebra.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverseInfo {
    /// The elements b with b ∘ a a right identity, for every element a.
    pub left_inverses: BTreeMap<Action, Vec<InversePair>>,

    /// The elements b with a ∘ b a left identity, for every element a.
    pub right_inverses: BTreeMap<Action, Vec<InversePair>>,

    /// The elements that are both a left and a right inverse for the same identity.
    pub inverses: BTreeMap<Action, Vec<InversePair>>,

    /// True iff every element has a two-sided inverse.
    pub is_inverse_algebra: bool,
}

impl InverseInfo {
    /// Returns true iff the element has a two-sided inverse.
    pub fn has_inverse(&self, element: &Action) -> bool {
        self.inverses.get(element).is_some_and(|pairs| !pairs.is_empty())
    }
}

pub fn check_inverse(table: &CayleyTableActions, identities: &IdentityInfo) -> Result<InverseInfo, PropertyError> {
    let size = table.len();
    let is_left_identity = membership(table, &identities.left_identities);
    let is_right_identity = membership(table, &identities.right_identities);

    let mut info = InverseInfo::default();
    for a in 0..size {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut both = Vec::new();

        for b in 0..size {
            let before = table.compose_index(b, a);
            let after = table.compose_index(a, b);

            let left_identity = is_right_identity[before].then_some(before);
            let right_identity = is_left_identity[after].then_some(after);

            if let Some(identity) = left_identity {
                left.push(pair(table, b, identity));
            }

            if let Some(identity) = right_identity {
                right.push(pair(table, b, identity));
            }

            if let (Some(first), Some(second)) = (left_identity, right_identity) {
                if first != second {
                    return Err(PropertyError::InconsistentInverse {
                        element: table.label(a).clone(),
                        inverse: table.label(b).clone(),
                        left_identity: table.label(first).clone(),
                        right_identity: table.label(second).clone(),
                    });
                }

                both.push(pair(table, b, first));
            }
        }

        let element = table.label(a).clone();
        info.left_inverses.insert(element.clone(), left);
        info.right_inverses.insert(element.clone(), right);
        info.inverses.insert(element, both);
    }

    info.is_inverse_algebra = size > 0 && info.inverses.values().all(|pairs| !pairs.is_empty());
    Ok(info)
}

fn membership(table: &CayleyTableActions, labels: &[Action]) -> Vec<bool> {
    let mut result = vec![false; table.len()];
    for label in labels {
        if let Some(index) = table.index_of(label) {
            result[index] = true;
        }
    }

    result
}

fn pair(table: &CayleyTableActions, inverse: usize, identity: usize) -> InversePair {
    InversePair {
        inverse: table.label(inverse).clone(),
        identity: table.label(identity).clone(),
    }
}
