use serde::Deserialize;
use serde::Serialize;

use transalg_world::WorldState;

/// Determines the outcome of an action that has no effect in the world, for
/// example walking into a wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UndefinedActionStrategy {
    /// The state is left unchanged.
    #[default]
    Identity,

    /// The action leads to the absorbing undefined state.
    Masked,
}

impl UndefinedActionStrategy {
    pub fn apply<S>(self, state: S) -> WorldState<S> {
        match self {
            UndefinedActionStrategy::Identity => WorldState::Defined(state),
            UndefinedActionStrategy::Masked => WorldState::Undefined,
        }
    }
}
