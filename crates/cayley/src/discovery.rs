use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use transalg_world::Action;
use transalg_world::World;
use transalg_world::WorldError;
use transalg_world::WorldState;

use crate::ActionFunction;
use crate::ActionFunctionGenerator;
use crate::CayleyTableStates;
use crate::DiscoveryConfig;
use crate::DiscoveryError;
use crate::EquivalenceClasses;
use crate::GenerationMethod;
use crate::GlobalProbe;
use crate::LocalProbe;
use crate::Probe;
use crate::Signature;
use crate::StatesCayleyTableGenerator;

/// The equivalence classes and state table found by discovery.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "O: Serialize + Clone", deserialize = "O: Deserialize<'de> + std::hash::Hash"))]
pub struct Discovery<O> {
    pub classes: EquivalenceClasses<O>,
    pub table: CayleyTableStates<O>,
    pub statistics: DiscoveryStatistics,
}

/// Counters describing the work performed during discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryStatistics {
    /// Actions that did not match any class when first encountered.
    pub candidates_found: u64,
    pub candidates_processed: u64,

    /// Candidates that matched an existing class by the time they were processed.
    pub merged: u64,

    /// Candidates that separated members from at least one class.
    pub classes_split: u64,

    /// Split off classes that turned out to match an existing class.
    pub folded: u64,

    /// Members moved to another class by the final audit.
    pub reassigned: u64,

    /// Complete scans over the label pairs, or levels of the breadth first search.
    pub scans: u64,

    pub elapsed: Duration,
}

/// Runs discovery with the method of the configuration.
pub fn discover<P: Probe>(probe: P, config: &DiscoveryConfig) -> Result<Discovery<P::Outcome>, DiscoveryError> {
    match config.method {
        GenerationMethod::StatesCayley => StatesCayleyTableGenerator::new(probe, config.clone()).generate(),
        GenerationMethod::ActionFunction => ActionFunctionGenerator::new(probe, config.clone()).generate(),
    }
}

/// Discovers the algebra of actions that are equivalent from one initial state.
pub fn discover_local<W: World>(
    world: &W,
    initial_state: W::State,
    config: &DiscoveryConfig,
) -> Result<Discovery<WorldState<W::State>>, DiscoveryError> {
    let probe = LocalProbe::new(world, initial_state, config.cache_capacity)?;
    discover(probe, config)
}

/// Discovers the algebra of actions that induce the same function on all states.
pub fn discover_global<W: World>(
    world: &W,
    config: &DiscoveryConfig,
) -> Result<Discovery<ActionFunction<W::State>>, DiscoveryError> {
    discover(GlobalProbe::new(world, config.cache_capacity), config)
}

/// Computes the outcome, row and column of the action against the labels of the table.
pub(crate) fn compute_signature<P: Probe>(
    probe: &mut P,
    table: &CayleyTableStates<P::Outcome>,
    action: &Action,
) -> Result<Signature<P::Outcome>, WorldError> {
    let mut row = Vec::with_capacity(table.len());
    let mut column = Vec::with_capacity(table.len());
    for label in table.labels() {
        row.push(probe.observe_composition(label, action)?);
        column.push(probe.observe_composition(action, label)?);
    }

    Ok(Signature {
        outcome: probe.observe(action)?,
        row,
        column,
    })
}

/// Adds the label with the given signature to the table, checking the label limit.
pub(crate) fn extend_table<P: Probe>(
    probe: &mut P,
    table: &mut CayleyTableStates<P::Outcome>,
    label: &Action,
    signature: Signature<P::Outcome>,
    max_labels: Option<usize>,
) -> Result<(), DiscoveryError> {
    if let Some(limit) = max_labels {
        if table.len() >= limit {
            return Err(DiscoveryError::TooManyLabels { limit });
        }
    }

    let diagonal = probe.observe_composition(label, label)?;
    table.push_label(label.clone(), signature, diagonal)?;
    Ok(())
}
