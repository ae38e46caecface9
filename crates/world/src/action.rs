use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The symbol of a primitive action.
pub type Primitive = char;

/// A finite sequence of primitive actions.
///
/// Actions are evaluated right to left: the last symbol is applied first. The
/// ordering is shortlex, shorter actions come first and actions of equal
/// length are ordered lexicographically.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    pub fn new(symbols: impl Into<String>) -> Action {
        Action(symbols.into())
    }

    /// The action consisting of a single primitive.
    pub fn primitive(symbol: Primitive) -> Action {
        Action(symbol.to_string())
    }

    /// Returns the action that applies `right` first and `left` second.
    pub fn compose(left: &Action, right: &Action) -> Action {
        let mut symbols = String::with_capacity(left.0.len() + right.0.len());
        symbols.push_str(&left.0);
        symbols.push_str(&right.0);
        Action(symbols)
    }

    /// The number of primitives in this action.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the primitives in the order in which they are applied.
    pub fn application_order(&self) -> impl Iterator<Item = Primitive> + '_ {
        self.0.chars().rev()
    }
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for Action {
    fn from(symbols: &str) -> Self {
        Action::new(symbols)
    }
}

impl From<Primitive> for Action {
    fn from(symbol: Primitive) -> Self {
        Action::primitive(symbol)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}
