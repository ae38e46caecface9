use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A state of a world, or the undefined state reached by an action without
/// a defined effect. The undefined state is absorbing under every action.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorldState<S> {
    Defined(S),
    Undefined,
}

impl<S> WorldState<S> {
    pub fn is_undefined(&self) -> bool {
        matches!(self, WorldState::Undefined)
    }

    /// Returns the inner state, if defined.
    pub fn defined(&self) -> Option<&S> {
        match self {
            WorldState::Defined(state) => Some(state),
            WorldState::Undefined => None,
        }
    }
}

impl<S> From<S> for WorldState<S> {
    fn from(state: S) -> Self {
        WorldState::Defined(state)
    }
}

impl<S: fmt::Debug> fmt::Debug for WorldState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldState::Defined(state) => write!(f, "{:?}", state),
            WorldState::Undefined => write!(f, "undefined"),
        }
    }
}
