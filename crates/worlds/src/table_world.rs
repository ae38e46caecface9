use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use transalg_world::Primitive;
use transalg_world::World;
use transalg_world::WorldError;
use transalg_world::WorldState;

/// A world given by an explicit transition table, for example the states and
/// edges of a graph.
///
/// A primitive without a transition from some state is an error when it is
/// applied, incomplete tables are never completed silently.
#[derive(Clone, Debug)]
pub struct TableWorld<S> {
    primitives: Vec<Primitive>,
    states: Vec<S>,
    transitions: FxHashMap<(S, Primitive), WorldState<S>>,
}

impl<S: Clone + Eq + Hash + Debug> TableWorld<S> {
    pub fn new(primitives: Vec<Primitive>) -> TableWorld<S> {
        TableWorld {
            primitives,
            states: Vec::new(),
            transitions: FxHashMap::default(),
        }
    }

    /// Adds a state, states are kept in the order they were first added.
    pub fn add_state(&mut self, state: S) {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
    }

    /// Adds (or replaces) the transition for the primitive from the given state.
    pub fn add_transition(&mut self, from: S, primitive: Primitive, to: WorldState<S>) -> Result<(), WorldError> {
        if !self.primitives.contains(&primitive) {
            return Err(WorldError::UnknownPrimitive(primitive));
        }

        self.add_state(from.clone());
        if let WorldState::Defined(target) = &to {
            self.add_state(target.clone());
        }

        self.transitions.insert((from, primitive), to);
        Ok(())
    }

    /// Creates a world from a list of (from, primitive, to) transitions.
    pub fn from_transitions(
        primitives: Vec<Primitive>,
        transitions: impl IntoIterator<Item = (S, Primitive, WorldState<S>)>,
    ) -> Result<TableWorld<S>, WorldError> {
        let mut world = TableWorld::new(primitives);
        for (from, primitive, to) in transitions {
            world.add_transition(from, primitive, to)?;
        }

        Ok(world)
    }
}

impl<S: Clone + Eq + Hash + Debug> World for TableWorld<S> {
    type State = S;

    fn primitive_actions(&self) -> &[Primitive] {
        &self.primitives
    }

    fn states(&self) -> &[S] {
        &self.states
    }

    fn transition(&self, state: &S, primitive: Primitive) -> Result<WorldState<S>, WorldError> {
        if !self.primitives.contains(&primitive) {
            return Err(WorldError::UnknownPrimitive(primitive));
        }

        self.transitions
            .get(&(state.clone(), primitive))
            .cloned()
            .ok_or_else(|| WorldError::MissingTransition {
                state: format!("{:?}", state),
                primitive,
            })
    }
}
