use log::debug;
use log::info;
use rustc_hash::FxHashMap;

use transalg_utilities::BudgetTracker;
use transalg_utilities::Timing;
use transalg_world::Action;
use transalg_world::World;

use crate::compute_signature;
use crate::extend_table;
use crate::relabel_classes;
use crate::CayleyTableStates;
use crate::Discovery;
use crate::DiscoveryConfig;
use crate::DiscoveryError;
use crate::DiscoveryStatistics;
use crate::EquivalenceClasses;
use crate::Probe;

/// Discovers the equivalence classes by a breadth first search over action
/// lengths. Every action of length n is a distinct primitive applied after a
/// class label of length n - 1, and it is classified by its outcome alone.
pub struct ActionFunctionGenerator<P: Probe> {
    probe: P,
    config: DiscoveryConfig,

    classes: EquivalenceClasses<P::Outcome>,
    by_outcome: FxHashMap<P::Outcome, Action>,

    statistics: DiscoveryStatistics,
    budget: BudgetTracker,
}

impl<P: Probe> ActionFunctionGenerator<P> {
    pub fn new(probe: P, config: DiscoveryConfig) -> ActionFunctionGenerator<P> {
        ActionFunctionGenerator {
            probe,
            budget: BudgetTracker::new(config.budget),
            config,
            classes: EquivalenceClasses::new(),
            by_outcome: FxHashMap::default(),
            statistics: DiscoveryStatistics::default(),
        }
    }

    pub fn generate(mut self) -> Result<Discovery<P::Outcome>, DiscoveryError> {
        let mut timing = Timing::new();

        let mut search = timing.start("search");
        let primitives = self.probe.world().primitive_actions().to_vec();
        if primitives.is_empty() {
            return Err(DiscoveryError::NoPrimitives);
        }

        let mut frontier = Vec::new();
        for primitive in primitives {
            let action = Action::primitive(primitive);
            if self.classify(action.clone())? {
                frontier.push(action);
            }
        }

        let generators = frontier.clone();
        let mut length = 1;
        while !frontier.is_empty() {
            self.statistics.scans += 1;
            debug!("Actions of length {} added {} equivalence classes", length, frontier.len());

            let mut next = Vec::new();
            for previous in &frontier {
                for generator in &generators {
                    let action = Action::compose(generator, previous);
                    if self.classify(action.clone())? {
                        next.push(action);
                    }
                }
            }

            frontier = next;
            length += 1;
        }
        search.finish();

        if self.config.relabel {
            let (classes, _, _) = relabel_classes(std::mem::take(&mut self.classes), CayleyTableStates::new())?;
            self.classes = classes;
        }

        let mut build = timing.start("table");
        let table = self.build_table()?;
        build.finish();

        self.statistics.elapsed = self.budget.elapsed();
        info!(
            "Discovered {} equivalence classes up to length {} in {:.3}s",
            self.classes.len(),
            length - 1,
            self.statistics.elapsed.as_secs_f64()
        );

        Ok(Discovery {
            classes: self.classes,
            table,
            statistics: self.statistics,
        })
    }

    /// Adds the action to the class with the same outcome, returns true iff it
    /// created a new class.
    fn classify(&mut self, action: Action) -> Result<bool, DiscoveryError> {
        self.budget.tick()?;
        self.statistics.candidates_processed += 1;

        let outcome = self.probe.observe(&action)?;
        if let Some(label) = self.by_outcome.get(&outcome) {
            self.classes.assign(action, label)?;
            self.statistics.merged += 1;
            return Ok(false);
        }

        if let Some(limit) = self.config.max_labels {
            if self.classes.len() >= limit {
                return Err(DiscoveryError::TooManyLabels { limit });
            }
        }

        self.statistics.candidates_found += 1;
        self.by_outcome.insert(outcome.clone(), action.clone());
        self.classes.create_class(action, outcome)?;
        Ok(true)
    }

    /// Builds the state table and makes every concatenation of two labels a
    /// member of the class with its outcome.
    fn build_table(&mut self) -> Result<CayleyTableStates<P::Outcome>, DiscoveryError> {
        let labels: Vec<Action> = self.classes.labels().cloned().collect();
        let by_outcome: FxHashMap<P::Outcome, Action> = self
            .classes
            .iter()
            .map(|class| (class.outcome().clone(), class.label().clone()))
            .collect();

        let mut table = CayleyTableStates::new();
        for label in &labels {
            let signature = compute_signature(&mut self.probe, &table, label)?;
            extend_table(&mut self.probe, &mut table, label, signature, None)?;
        }

        for right in &labels {
            for left in &labels {
                let composed = Action::compose(left, right);
                if self.classes.find_class(&composed).is_some() {
                    continue;
                }

                let outcome = self.probe.observe(&composed)?;
                let label = by_outcome
                    .get(&outcome)
                    .ok_or_else(|| DiscoveryError::NotClosed(composed.clone()))?;
                self.classes.assign(composed, label)?;
            }
        }

        Ok(table)
    }
}
