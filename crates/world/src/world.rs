use std::fmt::Debug;
use std::hash::Hash;

use crate::Action;
use crate::Primitive;
use crate::WorldError;
use crate::WorldState;

/// A deterministic world with finitely many states on which primitive actions
/// act.
pub trait World {
    type State: Clone + Eq + Hash + Debug;

    /// The primitive actions in their configured order.
    fn primitive_actions(&self) -> &[Primitive];

    /// All the (defined) states of this world.
    fn states(&self) -> &[Self::State];

    /// Applies a single primitive to a defined state.
    fn transition(&self, state: &Self::State, primitive: Primitive) -> Result<WorldState<Self::State>, WorldError>;

    fn is_valid_state(&self, state: &Self::State) -> bool {
        self.states().contains(state)
    }

    /// Applies the primitives of the action right to left, the undefined state
    /// absorbs all remaining primitives.
    fn apply_action(
        &self,
        state: &WorldState<Self::State>,
        action: &Action,
    ) -> Result<WorldState<Self::State>, WorldError> {
        let mut current = state.clone();
        for primitive in action.application_order() {
            current = match current {
                WorldState::Defined(ref inner) => self.transition(inner, primitive)?,
                WorldState::Undefined => return Ok(WorldState::Undefined),
            };
        }

        Ok(current)
    }
}
