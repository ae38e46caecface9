use std::fmt;

use log::debug;
use log::info;
use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;
use transalg_cayley::LabelIndex;
use transalg_properties::PropertyAnalysis;
use transalg_utilities::BudgetTracker;

use crate::candidates::Candidates;
use crate::candidates::Conflict;
use crate::invariants::Invariants;
use crate::mapping::is_homomorphism;
use crate::IsomorphismError;
use crate::IsomorphismMap;
use crate::SearchConfig;

/// An action table together with its property analysis.
#[derive(Clone, Copy, Debug)]
pub struct AnalysedAlgebra<'a> {
    pub table: &'a CayleyTableActions,
    pub properties: &'a PropertyAnalysis,
}

impl<'a> AnalysedAlgebra<'a> {
    pub fn new(table: &'a CayleyTableActions, properties: &'a PropertyAnalysis) -> Self {
        AnalysedAlgebra { table, properties }
    }
}

/// The stage of the search that ruled out an isomorphism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionStage {
    /// The global invariants differ.
    FastReject,

    /// The invariants of the elements admit no bijection.
    Constraints,

    /// The backtracking search exhausted all candidates.
    Search,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub stage: RejectionStage,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Isomorphic(IsomorphismMap),
    NotIsomorphic(Rejection),
}

impl SearchOutcome {
    pub fn is_isomorphic(&self) -> bool {
        matches!(self, SearchOutcome::Isomorphic(_))
    }

    pub fn map(&self) -> Option<&IsomorphismMap> {
        match self {
            SearchOutcome::Isomorphic(map) => Some(map),
            SearchOutcome::NotIsomorphic(_) => None,
        }
    }

    fn reject(stage: RejectionStage, reason: String) -> SearchOutcome {
        SearchOutcome::NotIsomorphic(Rejection { stage, reason })
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Isomorphic(map) => write!(f, "isomorphic: {}", map),
            SearchOutcome::NotIsomorphic(rejection) => {
                write!(f, "not isomorphic ({:?}): {}", rejection.stage, rejection.reason)
            }
        }
    }
}

/// Decides whether there is a bijection φ from the first algebra onto the
/// second with φ(x ∘ y) = φ(x) ∘ φ(y), and returns one if so.
///
/// Both algebras must have been analysed completely. The search compares the
/// global invariants first, then restricts the images of every element to the
/// elements with the same invariants and matching inverses, and finally extends
/// a partial mapping depth first in the order of the labels.
pub fn find_isomorphism(
    first: AnalysedAlgebra<'_>,
    second: AnalysedAlgebra<'_>,
    config: &SearchConfig,
) -> Result<SearchOutcome, IsomorphismError> {
    let first_invariants = Invariants::new("first", first.table, first.properties)?;
    let second_invariants = Invariants::new("second", second.table, second.properties)?;

    if let Some(reason) = fast_reject(first.table, &first_invariants, second.table, &second_invariants) {
        debug!("Rejected isomorphism: {}", reason);
        return Ok(SearchOutcome::reject(RejectionStage::FastReject, reason));
    }

    let mut candidates = Candidates::new(&first_invariants, &second_invariants, first.table.len());
    if let Err(conflict) = candidates.constrain(&first_invariants, &second_invariants) {
        let reason = match conflict {
            Conflict::NoImage(element) => format!(
                "no element of the second algebra matches the invariants of {}",
                first.table.label(element)
            ),
            Conflict::NoPreimage(image) => format!(
                "no element of the first algebra matches the invariants of {}",
                second.table.label(image)
            ),
        };

        debug!("Rejected isomorphism: {}", reason);
        return Ok(SearchOutcome::reject(RejectionStage::Constraints, reason));
    }

    let mut search = Search::new(first.table, second.table, &candidates);
    let mut tracker = BudgetTracker::new(config.budget);
    let result = search.run(&mut tracker)?;

    info!(
        "Isomorphism search on {} elements visited {} nodes in {:.3}s",
        first.table.len(),
        tracker.steps(),
        tracker.elapsed().as_secs_f64()
    );

    Ok(match result {
        Some(images) => SearchOutcome::Isomorphic(IsomorphismMap::from_indices(first.table, second.table, &images)),
        None => SearchOutcome::reject(
            RejectionStage::Search,
            "no candidate bijection preserves composition".to_string(),
        ),
    })
}

/// Compares the invariants of the algebras as a whole.
fn fast_reject(
    first: &CayleyTableActions,
    first_invariants: &Invariants,
    second: &CayleyTableActions,
    second_invariants: &Invariants,
) -> Option<String> {
    if first.len() != second.len() {
        return Some(format!(
            "the algebras have {} and {} elements",
            first.len(),
            second.len()
        ));
    }

    if first_invariants.is_associative != second_invariants.is_associative {
        return Some(format!(
            "associative is {} for the first algebra and {} for the second",
            first_invariants.is_associative, second_invariants.is_associative
        ));
    }

    if first_invariants.identity.is_some() != second_invariants.identity.is_some() {
        return Some(format!(
            "having an identity is {} for the first algebra and {} for the second",
            first_invariants.identity.is_some(),
            second_invariants.identity.is_some()
        ));
    }

    if first_invariants.num_left_identities() != second_invariants.num_left_identities() {
        return Some(format!(
            "the algebras have {} and {} left identities",
            first_invariants.num_left_identities(),
            second_invariants.num_left_identities()
        ));
    }

    if first_invariants.num_right_identities() != second_invariants.num_right_identities() {
        return Some(format!(
            "the algebras have {} and {} right identities",
            first_invariants.num_right_identities(),
            second_invariants.num_right_identities()
        ));
    }

    None
}

/// A choice point of the backtracking search.
struct Frame {
    element: LabelIndex,
    candidates: Vec<LabelIndex>,
    next: usize,
}

struct Search<'a> {
    first: &'a CayleyTableActions,
    second: &'a CayleyTableActions,
    candidates: &'a Candidates,

    /// The image of every element of the first algebra, if assigned.
    mapping: Vec<Option<LabelIndex>>,

    /// The elements of the second algebra that are an image.
    used: Vec<bool>,
}

impl<'a> Search<'a> {
    fn new(first: &'a CayleyTableActions, second: &'a CayleyTableActions, candidates: &'a Candidates) -> Self {
        Search {
            first,
            second,
            candidates,
            mapping: vec![None; first.len()],
            used: vec![false; second.len()],
        }
    }

    /// Extends the fixed images to a full isomorphism, returns the image of
    /// every element or None when there is no isomorphism.
    fn run(&mut self, tracker: &mut BudgetTracker) -> Result<Option<Vec<LabelIndex>>, IsomorphismError> {
        let mut open = Vec::new();
        for element in 0..self.first.len() {
            match self.candidates.fixed(element) {
                Some(image) => {
                    if !self.consistent(element, image) {
                        debug!("The fixed images do not preserve composition");
                        return Ok(None);
                    }
                    self.assign(element, image);
                }
                None => open.push(element),
            }
        }

        // Deterministic order: by label in both algebras.
        open.sort_by(|left, right| self.first.label(*left).cmp(self.first.label(*right)));

        if open.is_empty() {
            return Ok(self.complete());
        }

        let mut stack = vec![self.frame(open[0])];
        while let Some(frame) = stack.last_mut() {
            let element = frame.element;
            if let Some(image) = self.mapping[element].take() {
                self.used[image] = false;
            }

            let mut chosen = None;
            while frame.next < frame.candidates.len() {
                let image = frame.candidates[frame.next];
                frame.next += 1;

                if self.used[image] {
                    continue;
                }

                tracker.tick()?;
                if self.consistent(element, image) {
                    chosen = Some(image);
                    break;
                }
            }

            let Some(image) = chosen else {
                stack.pop();
                continue;
            };

            self.assign(element, image);
            if stack.len() == open.len() {
                if let Some(images) = self.complete() {
                    return Ok(Some(images));
                }
            } else {
                let next = self.frame(open[stack.len()]);
                stack.push(next);
            }
        }

        Ok(None)
    }

    fn frame(&self, element: LabelIndex) -> Frame {
        let mut candidates: Vec<LabelIndex> = self.candidates.get(element).iter().copied().collect();
        candidates.sort_by(|left, right| self.second.label(*left).cmp(self.second.label(*right)));

        Frame {
            element,
            candidates,
            next: 0,
        }
    }

    fn assign(&mut self, element: LabelIndex, image: LabelIndex) {
        debug_assert!(!self.used[image], "image {} is assigned twice", image);
        self.mapping[element] = Some(image);
        self.used[image] = true;
    }

    /// Checks whether mapping element to image is compatible with the images
    /// assigned so far, for the compositions of element with every assigned
    /// element.
    fn consistent(&self, element: LabelIndex, image: LabelIndex) -> bool {
        let image_of = |x: LabelIndex| if x == element { Some(image) } else { self.mapping[x] };

        for other in 0..self.first.len() {
            let Some(other_image) = image_of(other) else {
                continue;
            };

            for (composed, composed_image) in [
                (
                    self.first.compose_index(element, other),
                    self.second.compose_index(image, other_image),
                ),
                (
                    self.first.compose_index(other, element),
                    self.second.compose_index(other_image, image),
                ),
            ] {
                match image_of(composed) {
                    Some(expected) => {
                        if expected != composed_image {
                            return false;
                        }
                    }
                    None => {
                        if (self.used[composed_image] || composed_image == image)
                            || !self.candidates.get(composed).contains(&composed_image)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }

    /// Verifies the complete mapping.
    fn complete(&self) -> Option<Vec<LabelIndex>> {
        let images: Option<Vec<LabelIndex>> = self.mapping.iter().copied().collect();
        images.filter(|images| is_homomorphism(self.first, self.second, images))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use test_log::test;

    use transalg_utilities::Budget;

    use crate::test_utility::analyse;
    use crate::test_utility::cyclic_four;
    use crate::test_utility::klein_four;
    use crate::test_utility::shuffle_labels;
    use crate::test_utility::table;

    use super::*;

    fn search(
        first: &CayleyTableActions,
        second: &CayleyTableActions,
        config: &SearchConfig,
    ) -> Result<SearchOutcome, IsomorphismError> {
        let first_properties = analyse(first);
        let second_properties = analyse(second);

        find_isomorphism(
            AnalysedAlgebra::new(first, &first_properties),
            AnalysedAlgebra::new(second, &second_properties),
            config,
        )
    }

    fn rejection_stage(outcome: &SearchOutcome) -> Option<RejectionStage> {
        match outcome {
            SearchOutcome::Isomorphic(_) => None,
            SearchOutcome::NotIsomorphic(rejection) => Some(rejection.stage),
        }
    }

    #[test]
    fn test_cyclic_relabelled() {
        let first = cyclic_four();
        let second = table(
            "e x y z
             e x y z
             x z e y
             y e z x
             z y x e",
        );

        let outcome = search(&first, &second, &SearchConfig::default()).unwrap();
        let map = outcome.map().unwrap();

        assert!(map.is_isomorphism(&first, &second));
        assert_eq!(map.image(&"1".into()), Some(&"e".into()));
        assert_eq!(map.image(&"aa".into()), Some(&"z".into()));
    }

    #[test_case(cyclic_four(), 1 ; "cyclic")]
    #[test_case(klein_four(), 2 ; "klein")]
    #[test_case(klein_four(), 3 ; "klein other seed")]
    fn test_shuffled_labels(table: CayleyTableActions, seed: u64) {
        let shuffled = shuffle_labels(&table, seed);

        let outcome = search(&table, &shuffled, &SearchConfig::default()).unwrap();
        assert!(outcome.map().unwrap().is_isomorphism(&table, &shuffled));
    }

    #[test]
    fn test_cyclic_not_klein() {
        let outcome = search(&cyclic_four(), &klein_four(), &SearchConfig::default()).unwrap();

        assert_eq!(rejection_stage(&outcome), Some(RejectionStage::Constraints));
    }

    #[test]
    fn test_fast_reject_identity() {
        let cyclic = table(
            "1 a aa
             1 a aa
             a aa 1
             aa 1 a",
        );
        let left_zero = table(
            "x y z
             x x x
             y y y
             z z z",
        );

        let outcome = search(&cyclic, &left_zero, &SearchConfig::default()).unwrap();
        assert_eq!(rejection_stage(&outcome), Some(RejectionStage::FastReject));

        let outcome = search(&cyclic, &cyclic_four(), &SearchConfig::default()).unwrap();
        assert_eq!(rejection_stage(&outcome), Some(RejectionStage::FastReject));
    }

    #[test]
    fn test_search_budget() {
        let config = SearchConfig {
            budget: Budget::with_max_steps(0),
        };

        let result = search(&klein_four(), &klein_four(), &config);
        assert!(result.unwrap_err().is_non_termination());
    }

    #[test]
    fn test_missing_analysis() {
        let table = klein_four();
        let analysed = analyse(&table);
        let empty = PropertyAnalysis::default();

        let result = find_isomorphism(
            AnalysedAlgebra::new(&table, &analysed),
            AnalysedAlgebra::new(&table, &empty),
            &SearchConfig::default(),
        );

        assert!(matches!(
            result,
            Err(IsomorphismError::Precondition { algebra: "second", .. })
        ));
    }
}
