use std::collections::VecDeque;
use std::time::Instant;

use log::debug;
use log::info;
use log::trace;
use rustc_hash::FxHashSet;

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
use crate::Signature;

/// Discovers the equivalence classes of the actions of a world by partition
/// refinement on the rows and columns of the state Cayley table.
///
/// Every concatenation of two labels is either classified by the label whose
/// outcome, row and column it shares, or becomes a candidate for a new class.
/// Creating a class for a candidate can reveal that members of an existing
/// class only looked equivalent to its label, those members are split off
/// into classes of their own.
pub struct StatesCayleyTableGenerator<P: Probe> {
    probe: P,
    config: DiscoveryConfig,

    classes: EquivalenceClasses<P::Outcome>,
    table: CayleyTableStates<P::Outcome>,

    candidates: VecDeque<Action>,
    queued: FxHashSet<Action>,

    statistics: DiscoveryStatistics,
    budget: BudgetTracker,
    last_report: Instant,
}

impl<P: Probe> StatesCayleyTableGenerator<P> {
    pub fn new(probe: P, config: DiscoveryConfig) -> StatesCayleyTableGenerator<P> {
        StatesCayleyTableGenerator {
            probe,
            budget: BudgetTracker::new(config.budget),
            config,
            classes: EquivalenceClasses::new(),
            table: CayleyTableStates::new(),
            candidates: VecDeque::new(),
            queued: FxHashSet::default(),
            statistics: DiscoveryStatistics::default(),
            last_report: Instant::now(),
        }
    }

    /// Runs the discovery until every concatenation of two labels belongs to a class.
    pub fn generate(mut self) -> Result<Discovery<P::Outcome>, DiscoveryError> {
        let mut timing = Timing::new();

        let mut seed = timing.start("seed");
        self.seed()?;
        seed.finish();

        info!(
            "Seeded {} equivalence classes from {} primitive actions",
            self.classes.len(),
            self.probe.world().primitive_actions().len()
        );

        let mut search = timing.start("discovery");
        loop {
            let found = self.find_candidates()? || (self.config.verify_members && self.verify_members()?);
            if found {
                self.process_candidates()?;
                continue;
            }

            // Relabeling changes the label pairs, so they are scanned again.
            if self.config.relabel && self.relabel()? {
                continue;
            }

            break;
        }
        search.finish();

        self.statistics.elapsed = self.budget.elapsed();
        info!(
            "Discovered {} equivalence classes with {} actions in {:.3}s ({} candidates, {} splits)",
            self.classes.len(),
            self.classes.num_of_elements(),
            self.statistics.elapsed.as_secs_f64(),
            self.statistics.candidates_processed,
            self.statistics.classes_split
        );

        Ok(Discovery {
            classes: self.classes,
            table: self.table,
            statistics: self.statistics,
        })
    }

    /// Groups the primitives by their outcome and builds the initial table.
    fn seed(&mut self) -> Result<(), DiscoveryError> {
        let primitives = self.probe.world().primitive_actions().to_vec();
        if primitives.is_empty() {
            return Err(DiscoveryError::NoPrimitives);
        }

        for primitive in primitives {
            let action = Action::primitive(primitive);
            let outcome = self.probe.observe(&action)?;

            let existing = self
                .classes
                .iter()
                .find(|class| *class.outcome() == outcome)
                .map(|class| class.label().clone());

            match existing {
                Some(label) => {
                    trace!("Primitive {} has the same outcome as {}", action, label);
                    self.classes.assign(action, &label)?;
                }
                None => {
                    self.classes.create_class(action, outcome)?;
                }
            }
        }

        let labels: Vec<Action> = self.classes.labels().cloned().collect();
        for label in &labels {
            let signature = compute_signature(&mut self.probe, &self.table, label)?;
            self.push_label(label, signature)?;
        }

        Ok(())
    }

    /// Classifies the concatenations of all pairs of labels, returns true iff
    /// new candidates were queued.
    fn find_candidates(&mut self) -> Result<bool, DiscoveryError> {
        self.statistics.scans += 1;

        let labels = self.table.labels().to_vec();
        let mut found = false;

        for right in &labels {
            for left in &labels {
                let candidate = Action::compose(left, right);
                if self.table.contains(&candidate) || self.queued.contains(&candidate) {
                    continue;
                }

                let signature = compute_signature(&mut self.probe, &self.table, &candidate)?;
                match self.unique_match(&candidate, &signature)? {
                    Some(label) => self.classes.assign(candidate, &label)?,
                    None => {
                        self.enqueue(candidate);
                        found = true;
                    }
                }
            }
        }

        debug!(
            "Scan {} over {} labels queued {} candidates",
            self.statistics.scans,
            labels.len(),
            self.candidates.len()
        );
        Ok(found)
    }

    fn process_candidates(&mut self) -> Result<(), DiscoveryError> {
        while let Some(candidate) = self.candidates.pop_front() {
            self.queued.remove(&candidate);
            self.budget.tick()?;

            self.process_candidate(candidate)?;
            self.statistics.candidates_processed += 1;
            self.report_progress();
        }

        Ok(())
    }

    fn process_candidate(&mut self, candidate: Action) -> Result<(), DiscoveryError> {
        let signature = compute_signature(&mut self.probe, &self.table, &candidate)?;
        if let Some(label) = self.unique_match(&candidate, &signature)? {
            trace!("Candidate {} behaves as {}", candidate, label);
            self.classes.assign(candidate, &label)?;
            self.statistics.merged += 1;
            return Ok(());
        }

        // A candidate can still be a member from an earlier scan.
        self.classes.detach(&candidate)?;

        let (removed, split) = self.split_classes(&candidate)?;
        self.classes.remove_elements(&removed)?;
        if !removed.is_empty() {
            self.statistics.classes_split += 1;
            debug!(
                "Candidate {} separated {} actions into {} classes",
                candidate,
                removed.len(),
                split.len()
            );
        }

        self.classes.create_class(candidate.clone(), signature.outcome.clone())?;
        self.push_label(&candidate, signature)?;

        for class in split.into_classes() {
            let signature = compute_signature(&mut self.probe, &self.table, class.label())?;
            match self.unique_match(class.label(), &signature)? {
                Some(label) => {
                    trace!("Split class {} behaves as {}", class.label(), label);
                    self.classes.absorb(class, &label)?;
                    self.statistics.folded += 1;
                }
                None => {
                    let label = class.label().clone();
                    self.classes.insert_class(class)?;
                    self.push_label(&label, signature)?;
                }
            }
        }

        Ok(())
    }

    /// Collects the members that the candidate separates from their label,
    /// without changing the classes. The separated members are grouped by
    /// their outcome after the candidate.
    fn split_classes(
        &mut self,
        candidate: &Action,
    ) -> Result<(Vec<Action>, EquivalenceClasses<P::Outcome>), DiscoveryError> {
        let mut removed = Vec::new();
        let mut split = EquivalenceClasses::new();

        for class in self.classes.iter() {
            if class.len() < 2 {
                continue;
            }

            let expected = self.probe.observe_composition(class.label(), candidate)?;
            let mut sub_classes: Vec<(P::Outcome, Action)> = Vec::new();

            for member in class.elements() {
                if member == class.label() {
                    continue;
                }

                let outcome = self.probe.observe_composition(member, candidate)?;
                if outcome == expected {
                    continue;
                }

                trace!("Candidate {} separates {} from {}", candidate, member, class.label());
                removed.push(member.clone());

                match sub_classes.iter().find(|(sub_outcome, _)| *sub_outcome == outcome) {
                    Some((_, sub_label)) => split.assign(member.clone(), sub_label)?,
                    None => {
                        split.create_class(member.clone(), self.probe.observe(member)?)?;
                        sub_classes.push((outcome, member.clone()));
                    }
                }
            }
        }

        Ok((removed, split))
    }

    /// Checks every member against the final labels, members that match
    /// another class are moved and members that match no class are queued.
    fn verify_members(&mut self) -> Result<bool, DiscoveryError> {
        let members: Vec<(Action, Action)> = self
            .classes
            .iter()
            .flat_map(|class| {
                class
                    .elements()
                    .iter()
                    .filter(move |member| *member != class.label())
                    .map(move |member| (member.clone(), class.label().clone()))
            })
            .collect();

        let mut found = false;
        for (member, label) in members {
            let signature = compute_signature(&mut self.probe, &self.table, &member)?;
            match self.unique_match(&member, &signature)? {
                Some(matched) if matched == label => {}
                Some(matched) => {
                    trace!("Member {} moves from {} to {}", member, label, matched);
                    self.classes.assign(member, &matched)?;
                    self.statistics.reassigned += 1;
                }
                None => {
                    trace!("Member {} of {} matches no class", member, label);
                    self.classes.detach(&member)?;
                    self.enqueue(member);
                    found = true;
                }
            }
        }

        if found {
            debug!("Member audit queued {} candidates", self.candidates.len());
        }

        Ok(found)
    }

    /// Relabels the classes by their shortest members, returns true iff a label changed.
    fn relabel(&mut self) -> Result<bool, DiscoveryError> {
        let classes = std::mem::take(&mut self.classes);
        let table = std::mem::take(&mut self.table);

        let (classes, table, changed) = relabel_classes(classes, table)?;
        self.classes = classes;
        self.table = table;

        if changed {
            debug!("Relabeled the equivalence classes to {:?}", self.table.labels());
        }

        Ok(changed)
    }

    fn unique_match(&self, action: &Action, signature: &Signature<P::Outcome>) -> Result<Option<Action>, DiscoveryError> {
        let mut matches = self.table.matching_labels(signature);
        if matches.len() > 1 {
            return Err(DiscoveryError::AmbiguousClass {
                action: action.clone(),
                labels: matches,
            });
        }

        Ok(matches.pop())
    }

    fn push_label(&mut self, label: &Action, signature: Signature<P::Outcome>) -> Result<(), DiscoveryError> {
        extend_table(&mut self.probe, &mut self.table, label, signature, self.config.max_labels)
    }

    fn enqueue(&mut self, candidate: Action) {
        if self.queued.insert(candidate.clone()) {
            self.candidates.push_back(candidate);
            self.statistics.candidates_found += 1;
        }
    }

    fn report_progress(&mut self) {
        if self.last_report.elapsed() < self.config.progress_interval {
            return;
        }

        let elapsed = self.budget.elapsed().as_secs_f64().max(f64::EPSILON);
        info!(
            "Processed {} candidates ({:.1}/s), {} remaining, {} classes, {} splits",
            self.statistics.candidates_processed,
            self.statistics.candidates_processed as f64 / elapsed,
            self.candidates.len(),
            self.classes.len(),
            self.statistics.classes_split
        );
        self.last_report = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use test_log::test;

    use transalg_utilities::Budget;
    use transalg_world::WorldError;
    use transalg_world::WorldState;
    use transalg_worlds::Gridworld2D;
    use transalg_worlds::Gridworld2DWalls;
    use transalg_worlds::TableWorld;
    use transalg_worlds::UndefinedActionStrategy;
    use transalg_worlds::Wall;

    use crate::compare_equivalence_classes;
    use crate::compare_states_tables;
    use crate::discover_global;
    use crate::discover_local;

    use super::*;

    /// Primitives 'a' and 'b' agree on state 0 and only differ on state 2,
    /// which is reached by 'c'.
    fn splitting_world() -> TableWorld<u8> {
        let mut transitions = Vec::new();
        for (primitive, images) in [('a', [1, 1, 3, 3]), ('b', [1, 1, 2, 3]), ('c', [2, 2, 2, 3])] {
            for (state, image) in images.into_iter().enumerate() {
                transitions.push((state as u8, primitive, WorldState::Defined(image)));
            }
        }

        TableWorld::from_transitions(vec!['a', 'b', 'c'], transitions).unwrap()
    }

    fn labels<O>(classes: &EquivalenceClasses<O>) -> Vec<&str> {
        classes.labels().map(|label| label.as_str()).collect()
    }

    #[test]
    fn test_cyclic_gridworld_local() {
        let world = Gridworld2D::new((2, 2)).unwrap();
        let discovery = discover_local(&world, (0, 0), &DiscoveryConfig::default()).unwrap();

        assert_eq!(labels(&discovery.classes), vec!["1", "N", "E", "EN"]);
        assert_eq!(discovery.classes.find_class(&Action::from("S")), Some(&Action::from("N")));
        assert_eq!(discovery.classes.find_class(&Action::from("NE")), Some(&Action::from("EN")));
        assert_eq!(
            discovery.table.outcome(&Action::from("EN"), &Action::from("N")),
            Some(&WorldState::Defined((1, 0)))
        );
    }

    #[test_case((2, 2), 4 ; "two by two")]
    #[test_case((3, 3), 9 ; "three by three")]
    #[test_case((2, 3), 6 ; "two by three")]
    fn test_cyclic_gridworld_global(shape: (usize, usize), expected: usize) {
        let world = Gridworld2D::new(shape).unwrap();
        let discovery = discover_global(&world, &DiscoveryConfig::default()).unwrap();

        assert_eq!(discovery.classes.len(), expected);
        assert_eq!(discovery.table.len(), expected);
    }

    #[test]
    fn test_candidate_splits_merged_primitives() {
        let world = splitting_world();
        let config = DiscoveryConfig {
            relabel: false,
            verify_members: false,
            ..DiscoveryConfig::default()
        };

        let discovery = discover_local(&world, 0, &config).unwrap();

        assert!(discovery.statistics.classes_split >= 1);
        assert_eq!(discovery.classes.find_class(&Action::from("a")), Some(&Action::from("a")));
        assert_eq!(discovery.classes.find_class(&Action::from("b")), Some(&Action::from("b")));
        assert_eq!(discovery.classes.find_class(&Action::from("aa")), Some(&Action::from("a")));
    }

    #[test]
    fn test_split_survives_relabeling() {
        let world = splitting_world();
        let discovery = discover_local(&world, 0, &DiscoveryConfig::default()).unwrap();

        assert_ne!(
            discovery.classes.find_class(&Action::from("a")),
            discovery.classes.find_class(&Action::from("b"))
        );

        // Every label is the shortest member of its class.
        for class in discovery.classes.iter() {
            assert_eq!(class.label(), class.shortest_element());
        }
    }

    #[test]
    fn test_masked_wall_has_undefined_class() {
        let grid = Gridworld2D::new((2, 2)).unwrap();
        let world = Gridworld2DWalls::new(grid, [Wall::east_of((0, 0))], UndefinedActionStrategy::Masked).unwrap();

        let discovery = discover_local(&world, (0, 0), &DiscoveryConfig::default()).unwrap();

        let undefined = discovery
            .classes
            .iter()
            .find(|class| class.outcome().is_undefined())
            .unwrap();
        assert!(undefined.contains(&Action::from("E")));
    }

    #[test]
    fn test_discovery_is_deterministic() {
        let world = Gridworld2D::new((3, 2)).unwrap();

        let first = discover_local(&world, (1, 0), &DiscoveryConfig::default()).unwrap();
        let second = discover_local(&world, (1, 0), &DiscoveryConfig::default()).unwrap();

        assert!(compare_equivalence_classes(&first.classes, &second.classes).is_identical());
        assert!(compare_states_tables(&first.table, &second.table));
        assert_eq!(first.statistics.candidates_processed, second.statistics.candidates_processed);
    }

    #[test]
    fn test_candidate_budget() {
        let world = Gridworld2D::new((3, 3)).unwrap();
        let config = DiscoveryConfig {
            budget: Budget::with_max_steps(1),
            ..DiscoveryConfig::default()
        };

        let error = discover_local(&world, (0, 0), &config).unwrap_err();
        assert!(matches!(error, DiscoveryError::NonTermination(_)));
        assert!(error.is_non_termination());
    }

    #[test]
    fn test_label_limit() {
        let world = Gridworld2D::new((3, 3)).unwrap();
        let config = DiscoveryConfig {
            max_labels: Some(5),
            ..DiscoveryConfig::default()
        };

        let error = discover_local(&world, (0, 0), &config).unwrap_err();
        assert!(matches!(error, DiscoveryError::TooManyLabels { limit: 5 }));
    }

    #[test]
    fn test_incomplete_world_fails() {
        let world = TableWorld::from_transitions(
            vec!['a', 'b'],
            [(0u8, 'a', WorldState::Defined(1)), (1, 'a', WorldState::Defined(0)), (0, 'b', WorldState::Defined(0))],
        )
        .unwrap();

        let error = discover_local(&world, 0, &DiscoveryConfig::default()).unwrap_err();
        assert!(matches!(
            error,
            DiscoveryError::World(WorldError::MissingTransition { primitive: 'b', .. })
        ));
    }

    #[test]
    fn test_world_without_primitives() {
        let mut world = TableWorld::<u8>::new(Vec::new());
        world.add_state(0);

        assert!(matches!(
            discover_local(&world, 0, &DiscoveryConfig::default()),
            Err(DiscoveryError::NoPrimitives)
        ));
    }
}
