use std::collections::BTreeSet;

use log::trace;

use transalg_cayley::LabelIndex;

use crate::invariants::Invariants;

/// The images that remain possible for every element of the first algebra.
pub(crate) struct Candidates {
    sets: Vec<BTreeSet<LabelIndex>>,
}

/// The reason that no bijection satisfies the candidate sets.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Conflict {
    /// The element of the first algebra has no possible image left.
    NoImage(LabelIndex),

    /// The element of the second algebra is not the image of any element.
    NoPreimage(LabelIndex),
}

impl Candidates {
    /// Restricts every candidate set to the images with the same invariants.
    pub fn new(first: &Invariants, second: &Invariants, size: usize) -> Candidates {
        Candidates {
            sets: (0..size)
                .map(|element| {
                    (0..size)
                        .filter(|image| first.compatible(element, second, *image))
                        .collect()
                })
                .collect(),
        }
    }

    pub fn get(&self, element: LabelIndex) -> &BTreeSet<LabelIndex> {
        &self.sets[element]
    }

    /// The element fixed to a single image, if any.
    pub fn fixed(&self, element: LabelIndex) -> Option<LabelIndex> {
        if self.sets[element].len() == 1 {
            self.sets[element].first().copied()
        } else {
            None
        }
    }

    /// Alternates [Candidates::propagate] and [Candidates::restrict_inverses]
    /// until neither removes an image.
    pub fn constrain(&mut self, first: &Invariants, second: &Invariants) -> Result<(), Conflict> {
        loop {
            self.propagate()?;
            if !self.restrict_inverses(first, second) {
                return Ok(());
            }
        }
    }

    /// Every inverse b of a with identity e must map to an inverse of φ(a) of
    /// the same kind with identity φ(e). Removes the images of a and b that
    /// have no such counterpart, returns true iff an image was removed.
    pub fn restrict_inverses(&mut self, first: &Invariants, second: &Invariants) -> bool {
        let mut changed = false;

        for (relation, other_relation) in first.inverse_relations.iter().zip(&second.inverse_relations) {
            for (element, pairs) in relation.iter().enumerate() {
                for &(inverse, identity) in pairs {
                    let images_of_inverse: BTreeSet<LabelIndex> = self.sets[element]
                        .iter()
                        .flat_map(|image| &other_relation[*image])
                        .filter(|(_, other_identity)| self.sets[identity].contains(other_identity))
                        .map(|(other_inverse, _)| *other_inverse)
                        .collect();

                    let images_of_element: BTreeSet<LabelIndex> = self.sets[element]
                        .iter()
                        .copied()
                        .filter(|image| {
                            other_relation[*image].iter().any(|(other_inverse, other_identity)| {
                                self.sets[inverse].contains(other_inverse)
                                    && self.sets[identity].contains(other_identity)
                            })
                        })
                        .collect();

                    changed |= self.retain(inverse, &images_of_inverse);
                    changed |= self.retain(element, &images_of_element);
                }
            }
        }

        changed
    }

    /// Restricts the images of the element to the given set, returns true iff
    /// an image was removed.
    fn retain(&mut self, element: LabelIndex, allowed: &BTreeSet<LabelIndex>) -> bool {
        let before = self.sets[element].len();
        self.sets[element].retain(|image| allowed.contains(image));

        if self.sets[element].len() != before {
            trace!("Inverses restrict element {} to {:?}", element, self.sets[element]);
            true
        } else {
            false
        }
    }

    /// Removes the image of every fixed element from the other candidate sets
    /// until no more elements become fixed.
    pub fn propagate(&mut self) -> Result<(), Conflict> {
        let size = self.sets.len();
        let mut done = vec![false; size];

        loop {
            let mut changed = false;
            for element in 0..size {
                if done[element] {
                    continue;
                }

                if let Some(image) = self.fixed(element) {
                    trace!("Element {} is fixed to {}", element, image);
                    done[element] = true;
                    changed = true;

                    for (other, set) in self.sets.iter_mut().enumerate() {
                        if other != element {
                            set.remove(&image);
                        }
                    }
                }
            }

            if let Some(element) = self.sets.iter().position(BTreeSet::is_empty) {
                return Err(Conflict::NoImage(element));
            }

            if !changed {
                break;
            }
        }

        let mut covered = vec![false; size];
        for image in self.sets.iter().flatten() {
            covered[*image] = true;
        }

        match covered.iter().position(|covered| !covered) {
            Some(image) => Err(Conflict::NoPreimage(image)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use transalg_properties::OrderInvariant;

    use super::*;

    /// Invariants of an algebra with identity 0 where the given pairs are
    /// mutual inverses and only the orders distinguish the other elements.
    fn invariants(orders: &[usize], pairs: &[(LabelIndex, LabelIndex)]) -> Invariants {
        let size = orders.len();
        let mut relation = vec![Vec::new(); size];
        relation[0] = vec![(0, 0)];
        for &(a, b) in pairs {
            relation[a] = vec![(b, 0)];
            relation[b] = vec![(a, 0)];
        }

        Invariants {
            is_associative: true,
            identity: Some(0),
            left_identities: (0..size).map(|element| element == 0).collect(),
            right_identities: (0..size).map(|element| element == 0).collect(),
            orders: orders.iter().map(|order| OrderInvariant::Finite(*order)).collect(),
            commuting: vec![size; size],
            commutes_with_all: vec![true; size],
            inverse_relations: [relation.clone(), relation.clone(), relation],
        }
    }

    fn candidates(sets: Vec<Vec<LabelIndex>>) -> Candidates {
        Candidates {
            sets: sets.into_iter().map(|set| set.into_iter().collect()).collect(),
        }
    }

    #[test]
    fn test_propagate_fixed_images() {
        let mut candidates = candidates(vec![vec![0], vec![0, 1], vec![0, 1, 2]]);

        assert_eq!(candidates.propagate(), Ok(()));
        assert_eq!(candidates.fixed(1), Some(1));
        assert_eq!(candidates.fixed(2), Some(2));
    }

    #[test]
    fn test_propagate_conflicts() {
        assert_eq!(
            candidates(vec![vec![0], vec![0], vec![1, 2]]).propagate(),
            Err(Conflict::NoImage(1))
        );
        assert_eq!(
            candidates(vec![vec![0, 1], vec![0, 1], vec![0, 1]]).propagate(),
            Err(Conflict::NoPreimage(2))
        );
    }

    #[test]
    fn test_inverse_pairings_differ() {
        // 1 ↔ 2 and 3 ↔ 4 pair an order 2 element with an order 3 element in
        // the first algebra, but elements of the same order in the second.
        let first = invariants(&[1, 2, 3, 2, 3], &[(1, 2), (3, 4)]);
        let second = invariants(&[1, 2, 3, 2, 3], &[(1, 3), (2, 4)]);

        let mut candidates = Candidates::new(&first, &second, 5);
        assert_eq!(candidates.get(1), &BTreeSet::from([1, 3]));
        assert_eq!(candidates.get(2), &BTreeSet::from([2, 4]));
        assert_eq!(candidates.propagate(), Ok(()));

        assert!(candidates.restrict_inverses(&first, &second));
        assert!(candidates.get(2).is_empty());
        assert!(matches!(candidates.constrain(&first, &second), Err(Conflict::NoImage(_))));
    }

    #[test]
    fn test_inverse_pairings_agree() {
        let first = invariants(&[1, 2, 3, 2, 3], &[(1, 2), (3, 4)]);
        let second = invariants(&[1, 3, 2, 2, 3], &[(1, 3), (2, 4)]);

        let mut candidates = Candidates::new(&first, &second, 5);
        assert_eq!(candidates.constrain(&first, &second), Ok(()));
        assert_eq!(candidates.get(1), &BTreeSet::from([2, 3]));
        assert_eq!(candidates.get(2), &BTreeSet::from([1, 4]));
    }
}
