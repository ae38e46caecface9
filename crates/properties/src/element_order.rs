use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;
use transalg_cayley::LabelIndex;
use transalg_world::Action;

use crate::IdentityInfo;

/// The order of an element: the smallest n with a^n the identity, or the
/// cycle that the powers of the element end up in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Finite(usize),
    Infinite { cycle_start: Action, cycle_length: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOrder {
    pub order: Order,

    /// The powers a, a^2, ... up to the identity or the first repetition.
    pub powers: Vec<Action>,
}

/// The part of an element order that is preserved by isomorphisms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderInvariant {
    Finite(usize),

    /// The powers repeat from a^index onwards with the given period.
    Infinite { index: usize, period: usize },
}

impl ElementOrder {
    pub fn invariant(&self) -> OrderInvariant {
        match &self.order {
            Order::Finite(order) => OrderInvariant::Finite(*order),
            Order::Infinite {
                cycle_start,
                cycle_length,
            } => OrderInvariant::Infinite {
                index: self.powers.iter().position(|power| power == cycle_start).map_or(0, |p| p + 1),
                period: *cycle_length,
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOrders {
    pub orders: BTreeMap<Action, ElementOrder>,
}

impl ElementOrders {
    /// The largest finite order.
    pub fn max_order(&self) -> Option<usize> {
        self.orders
            .values()
            .filter_map(|order| match order.order {
                Order::Finite(order) => Some(order),
                Order::Infinite { .. } => None,
            })
            .max()
    }
}

/// Computes the powers of every element until they reach the identity or
/// repeat. Without an identity every element has an infinite order.
pub fn check_element_orders(table: &CayleyTableActions, identities: &IdentityInfo) -> ElementOrders {
    let identity = identities.identity.as_ref().and_then(|identity| table.index_of(identity));

    let mut result = ElementOrders::default();
    for element in 0..table.len() {
        result
            .orders
            .insert(table.label(element).clone(), element_order(table, element, identity));
    }

    result
}

fn element_order(table: &CayleyTableActions, element: LabelIndex, identity: Option<LabelIndex>) -> ElementOrder {
    // The position of every power seen so far.
    let mut seen: Vec<Option<usize>> = vec![None; table.len()];
    let mut powers = vec![element];
    seen[element] = Some(0);

    let order = loop {
        let current = powers[powers.len() - 1];
        if Some(current) == identity {
            break Order::Finite(powers.len());
        }

        let next = table.compose_index(element, current);
        if let Some(position) = seen[next] {
            break Order::Infinite {
                cycle_start: table.label(next).clone(),
                cycle_length: powers.len() - position,
            };
        }

        seen[next] = Some(powers.len());
        powers.push(next);
    };

    ElementOrder {
        order,
        powers: powers.into_iter().map(|power| table.label(power).clone()).collect(),
    }
}
