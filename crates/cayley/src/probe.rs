use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use transalg_world::Action;
use transalg_world::OutcomeCache;
use transalg_world::World;
use transalg_world::WorldError;
use transalg_world::WorldState;

/// Observes the behaviour of actions in a world, two actions are considered
/// equivalent by discovery only when their observed outcomes agree.
pub trait Probe {
    type World: World;
    type Outcome: Clone + Eq + Hash + Debug;

    fn world(&self) -> &Self::World;

    /// The outcome of the action.
    fn observe(&mut self, action: &Action) -> Result<Self::Outcome, WorldError>;

    /// The outcome of applying `right` first and `left` second.
    fn observe_composition(&mut self, left: &Action, right: &Action) -> Result<Self::Outcome, WorldError>;
}

/// Observes the single outcome of an action from a fixed initial state.
pub struct LocalProbe<'a, W: World> {
    world: &'a W,
    initial_state: WorldState<W::State>,
    cache: OutcomeCache<W::State>,
}

impl<'a, W: World> LocalProbe<'a, W> {
    pub fn new(world: &'a W, initial_state: W::State, cache_capacity: usize) -> Result<Self, WorldError> {
        if !world.is_valid_state(&initial_state) {
            return Err(WorldError::InvalidState(format!("{:?}", initial_state)));
        }

        Ok(LocalProbe {
            world,
            initial_state: WorldState::Defined(initial_state),
            cache: OutcomeCache::new(cache_capacity),
        })
    }

    pub fn initial_state(&self) -> &WorldState<W::State> {
        &self.initial_state
    }
}

impl<W: World> Probe for LocalProbe<'_, W> {
    type World = W;
    type Outcome = WorldState<W::State>;

    fn world(&self) -> &W {
        self.world
    }

    fn observe(&mut self, action: &Action) -> Result<Self::Outcome, WorldError> {
        self.cache.outcome(self.world, &self.initial_state, action)
    }

    fn observe_composition(&mut self, left: &Action, right: &Action) -> Result<Self::Outcome, WorldError> {
        let intermediate = self.cache.outcome(self.world, &self.initial_state, right)?;
        self.cache.outcome(self.world, &intermediate, left)
    }
}

/// The images of all the states of a world under one action, in the order of
/// [World::states].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionFunction<S>(Vec<WorldState<S>>);

impl<S> ActionFunction<S> {
    pub fn images(&self) -> &[WorldState<S>] {
        &self.0
    }
}

impl<S: Debug> fmt::Debug for ActionFunction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}]", self.0.iter().format(", "))
    }
}

/// Observes the function an action induces over all the states.
pub struct GlobalProbe<'a, W: World> {
    world: &'a W,
    states: Vec<WorldState<W::State>>,
    cache: OutcomeCache<W::State>,
}

impl<'a, W: World> GlobalProbe<'a, W> {
    pub fn new(world: &'a W, cache_capacity: usize) -> GlobalProbe<'a, W> {
        GlobalProbe {
            world,
            states: world.states().iter().cloned().map(WorldState::Defined).collect(),
            cache: OutcomeCache::new(cache_capacity),
        }
    }
}

impl<W: World> Probe for GlobalProbe<'_, W> {
    type World = W;
    type Outcome = ActionFunction<W::State>;

    fn world(&self) -> &W {
        self.world
    }

    fn observe(&mut self, action: &Action) -> Result<Self::Outcome, WorldError> {
        let mut images = Vec::with_capacity(self.states.len());
        for state in &self.states {
            images.push(self.cache.outcome(self.world, state, action)?);
        }

        Ok(ActionFunction(images))
    }

    fn observe_composition(&mut self, left: &Action, right: &Action) -> Result<Self::Outcome, WorldError> {
        let mut images = Vec::with_capacity(self.states.len());
        for state in &self.states {
            let intermediate = self.cache.outcome(self.world, state, right)?;
            images.push(self.cache.outcome(self.world, &intermediate, left)?);
        }

        Ok(ActionFunction(images))
    }
}
