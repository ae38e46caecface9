use transalg_cayley::CayleyTableActions;
use transalg_cayley::LabelIndex;
use transalg_properties::OrderInvariant;
use transalg_properties::PropertyAnalysis;
use transalg_properties::PropertyError;
use transalg_world::Action;

use crate::IsomorphismError;

/// The properties of one algebra that every isomorphism preserves, indexed
/// by the labels of its table.
pub(crate) struct Invariants {
    pub is_associative: bool,
    pub identity: Option<LabelIndex>,
    pub left_identities: Vec<bool>,
    pub right_identities: Vec<bool>,
    pub orders: Vec<OrderInvariant>,
    pub commuting: Vec<usize>,
    pub commutes_with_all: Vec<bool>,

    /// The left, right and two-sided inverses of every element, each paired
    /// with the identity that the composition yields.
    pub inverse_relations: [Vec<InverseRelation>; 3],
}

/// The pairs (inverse, identity) of one element.
pub(crate) type InverseRelation = Vec<(LabelIndex, LabelIndex)>;

impl Invariants {
    pub fn new(
        algebra: &'static str,
        table: &CayleyTableActions,
        properties: &PropertyAnalysis,
    ) -> Result<Invariants, IsomorphismError> {
        let precondition = |source: PropertyError| IsomorphismError::Precondition { algebra, source };
        let index_of = |label: &Action| {
            table.index_of(label).ok_or_else(|| IsomorphismError::Inconsistent {
                algebra,
                label: label.clone(),
            })
        };

        let associativity = properties.associativity().map_err(precondition)?;
        let identity = properties.identity().map_err(precondition)?;
        let inverse = properties.inverse().map_err(precondition)?;
        let orders = properties.element_orders().map_err(precondition)?;
        let commutativity = properties.commutativity().map_err(precondition)?;

        let mut left_identities = vec![false; table.len()];
        for label in &identity.left_identities {
            left_identities[index_of(label)?] = true;
        }

        let mut right_identities = vec![false; table.len()];
        for label in &identity.right_identities {
            right_identities[index_of(label)?] = true;
        }

        let mut commutes_with_all = vec![false; table.len()];
        for label in &commutativity.commute_with_all {
            commutes_with_all[index_of(label)?] = true;
        }

        let mut element_orders = Vec::with_capacity(table.len());
        let mut commuting = Vec::with_capacity(table.len());
        let mut inverse_relations: [Vec<InverseRelation>; 3] = Default::default();
        for label in table.labels() {
            let missing = || IsomorphismError::Inconsistent {
                algebra,
                label: label.clone(),
            };

            element_orders.push(orders.orders.get(label).ok_or_else(missing)?.invariant());
            commuting.push(commutativity.commuting.get(label).ok_or_else(missing)?.len());

            let relations = [&inverse.left_inverses, &inverse.right_inverses, &inverse.inverses];
            for (kind, pairs) in relations.into_iter().enumerate() {
                let mut relation = InverseRelation::new();
                for pair in pairs.get(label).ok_or_else(missing)? {
                    relation.push((index_of(&pair.inverse)?, index_of(&pair.identity)?));
                }

                inverse_relations[kind].push(relation);
            }
        }

        Ok(Invariants {
            is_associative: associativity.is_associative,
            identity: identity.identity.as_ref().map(index_of).transpose()?,
            left_identities,
            right_identities,
            orders: element_orders,
            commuting,
            commutes_with_all,
            inverse_relations,
        })
    }

    pub fn num_left_identities(&self) -> usize {
        self.left_identities.iter().filter(|is_identity| **is_identity).count()
    }

    pub fn num_right_identities(&self) -> usize {
        self.right_identities.iter().filter(|is_identity| **is_identity).count()
    }

    /// Returns true iff an isomorphism may map `element` of this algebra to
    /// `image` of the other algebra.
    pub fn compatible(&self, element: LabelIndex, other: &Invariants, image: LabelIndex) -> bool {
        (self.identity == Some(element)) == (other.identity == Some(image))
            && self.left_identities[element] == other.left_identities[image]
            && self.right_identities[element] == other.right_identities[image]
            && self.orders[element] == other.orders[image]
            && self.commuting[element] == other.commuting[image]
            && self.commutes_with_all[element] == other.commutes_with_all[image]
            && self
                .inverse_relations
                .iter()
                .zip(&other.inverse_relations)
                .all(|(relation, other_relation)| relation[element].len() == other_relation[image].len())
    }
}
