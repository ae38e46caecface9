use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use log::trace;
use rustc_hash::FxHashMap;

use crate::Action;
use crate::Simulator;
use crate::World;
use crate::WorldError;
use crate::WorldState;

/// Memoises the outcome of applying an action to a start state.
///
/// When the number of entries exceeds the capacity the oldest half of the
/// entries is evicted.
pub struct OutcomeCache<S> {
    entries: FxHashMap<(WorldState<S>, Action), WorldState<S>>,
    insertion_order: VecDeque<(WorldState<S>, Action)>,
    capacity: usize,

    hits: u64,
    misses: u64,
}

impl<S: Clone + Eq + Hash + Debug> OutcomeCache<S> {
    pub fn new(capacity: usize) -> OutcomeCache<S> {
        OutcomeCache {
            entries: FxHashMap::default(),
            insertion_order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the state reached by applying the action to the given state.
    pub fn outcome<W: World<State = S>>(
        &mut self,
        world: &W,
        state: &WorldState<S>,
        action: &Action,
    ) -> Result<WorldState<S>, WorldError> {
        if state.is_undefined() {
            return Ok(WorldState::Undefined);
        }

        let key = (state.clone(), action.clone());
        if let Some(outcome) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(outcome.clone());
        }

        self.misses += 1;
        let mut simulator = Simulator::new(world, state.clone())?;
        simulator.apply_action_sequence(action)?;
        let outcome = simulator.into_state();

        self.insert(key, outcome.clone());
        Ok(outcome)
    }

    fn insert(&mut self, key: (WorldState<S>, Action), outcome: WorldState<S>) {
        if self.entries.insert(key.clone(), outcome).is_none() {
            self.insertion_order.push_back(key);
        }

        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() / 2;
            for key in self.insertion_order.drain(..evicted) {
                self.entries.remove(&key);
            }
            trace!("Evicted {} cached outcomes", evicted);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of (hits, misses) so far.
    pub fn statistics(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
