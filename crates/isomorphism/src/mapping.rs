use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;
use transalg_cayley::LabelIndex;
use transalg_world::Action;

/// A bijection between the labels of two algebras that preserves composition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsomorphismMap {
    mapping: BTreeMap<Action, Action>,
}

impl IsomorphismMap {
    /// Builds the map from the image of every label index of the first table.
    pub(crate) fn from_indices(first: &CayleyTableActions, second: &CayleyTableActions, images: &[LabelIndex]) -> Self {
        IsomorphismMap {
            mapping: images
                .iter()
                .enumerate()
                .map(|(element, image)| (first.label(element).clone(), second.label(*image).clone()))
                .collect(),
        }
    }

    /// Returns the image of the given label.
    pub fn image(&self, label: &Action) -> Option<&Action> {
        self.mapping.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Action, &Action)> {
        self.mapping.iter()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Returns true iff this map is a bijection from the labels of the first
    /// table onto the labels of the second table with
    /// φ(x ∘ y) = φ(x) ∘ φ(y) for all labels x and y.
    pub fn is_isomorphism(&self, first: &CayleyTableActions, second: &CayleyTableActions) -> bool {
        if first.len() != second.len() || self.mapping.len() != first.len() {
            return false;
        }

        let mut images = Vec::with_capacity(first.len());
        let mut used = vec![false; second.len()];
        for label in first.labels() {
            let Some(image) = self.image(label).and_then(|image| second.index_of(image)) else {
                return false;
            };

            if used[image] {
                return false;
            }

            used[image] = true;
            images.push(image);
        }

        is_homomorphism(first, second, &images)
    }
}

/// Checks φ(x ∘ y) = φ(x) ∘ φ(y) for the mapping given by label indices.
pub(crate) fn is_homomorphism(first: &CayleyTableActions, second: &CayleyTableActions, images: &[LabelIndex]) -> bool {
    (0..first.len()).all(|x| {
        (0..first.len()).all(|y| images[first.compose_index(x, y)] == second.compose_index(images[x], images[y]))
    })
}

impl fmt::Display for IsomorphismMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.mapping
                .iter()
                .format_with(", ", |(label, image), f| f(&format_args!("{} ↦ {}", label, image)))
        )
    }
}
