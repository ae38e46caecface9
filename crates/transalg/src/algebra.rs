use std::fmt::Debug;
use std::hash::Hash;

use log::info;
use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::discover_global;
use transalg_cayley::discover_local;
use transalg_cayley::generate_cayley_table_actions;
use transalg_cayley::ActionFunction;
use transalg_cayley::CayleyTableActions;
use transalg_cayley::CayleyTableStates;
use transalg_cayley::Discovery;
use transalg_cayley::DiscoveryStatistics;
use transalg_cayley::Equivalence;
use transalg_cayley::EquivalenceClasses;
use transalg_cayley::GenerationMethod;
use transalg_isomorphism::AnalysedAlgebra;
use transalg_isomorphism::SearchOutcome;
use transalg_properties::PropertyAnalysis;
use transalg_utilities::Timing;
use transalg_world::Primitive;
use transalg_world::World;
use transalg_world::WorldState;

use crate::AlgebraConfig;
use crate::AlgebraError;

/// How an algebra was generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub equivalence: Equivalence,
    pub method: GenerationMethod,
    pub primitives: Vec<Primitive>,

    /// The initial state of a local algebra, in its debug representation.
    pub initial_state: Option<String>,
}

/// The algebra of a world whose actions are equivalent when they lead to the
/// same state from a fixed initial state.
pub type LocalAlgebra<S> = TransformationAlgebra<WorldState<S>>;

/// The algebra of a world whose actions are equivalent when they induce the
/// same function on all states.
pub type GlobalAlgebra<S> = TransformationAlgebra<ActionFunction<S>>;

/// A discovered transformation algebra together with the results of the
/// stages that have been run on it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "O: Serialize + Clone", deserialize = "O: Deserialize<'de> + std::hash::Hash"))]
pub struct TransformationAlgebra<O> {
    name: String,
    parameters: GenerationParameters,
    classes: EquivalenceClasses<O>,
    states_table: CayleyTableStates<O>,
    actions_table: Option<CayleyTableActions>,
    properties: Option<PropertyAnalysis>,
    statistics: DiscoveryStatistics,
}

impl<S: Clone + Eq + Hash + Debug> TransformationAlgebra<WorldState<S>> {
    /// Discovers the local algebra of the world from the given initial state.
    pub fn generate_local<W: World<State = S>>(
        name: impl Into<String>,
        world: &W,
        initial_state: S,
        config: &AlgebraConfig,
    ) -> Result<LocalAlgebra<S>, AlgebraError> {
        let parameters = GenerationParameters {
            equivalence: Equivalence::Local,
            method: config.discovery.method,
            primitives: world.primitive_actions().to_vec(),
            initial_state: Some(format!("{:?}", initial_state)),
        };

        let mut timing = Timing::new();
        let mut timer = timing.start("local discovery");
        let discovery = discover_local(world, initial_state, &config.discovery)?;
        timer.finish();

        Ok(TransformationAlgebra::from_discovery(name.into(), parameters, discovery))
    }
}

impl<S: Clone + Eq + Hash + Debug> TransformationAlgebra<ActionFunction<S>> {
    /// Discovers the global algebra of the world.
    pub fn generate_global<W: World<State = S>>(
        name: impl Into<String>,
        world: &W,
        config: &AlgebraConfig,
    ) -> Result<GlobalAlgebra<S>, AlgebraError> {
        let parameters = GenerationParameters {
            equivalence: Equivalence::Global,
            method: config.discovery.method,
            primitives: world.primitive_actions().to_vec(),
            initial_state: None,
        };

        let mut timing = Timing::new();
        let mut timer = timing.start("global discovery");
        let discovery = discover_global(world, &config.discovery)?;
        timer.finish();

        Ok(TransformationAlgebra::from_discovery(name.into(), parameters, discovery))
    }
}

impl<O> TransformationAlgebra<O> {
    fn from_discovery(name: String, parameters: GenerationParameters, discovery: Discovery<O>) -> Self {
        info!(
            "Algebra {} has {} equivalence classes covering {} actions",
            name,
            discovery.classes.len(),
            discovery.classes.num_of_elements()
        );

        TransformationAlgebra {
            name,
            parameters,
            classes: discovery.classes,
            states_table: discovery.table,
            actions_table: None,
            properties: None,
            statistics: discovery.statistics,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    pub fn classes(&self) -> &EquivalenceClasses<O> {
        &self.classes
    }

    pub fn states_table(&self) -> &CayleyTableStates<O> {
        &self.states_table
    }

    pub fn statistics(&self) -> &DiscoveryStatistics {
        &self.statistics
    }

    /// The number of elements of the algebra.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Derives the Cayley table of the actions from the equivalence classes.
    pub fn generate_cayley_table_actions(&mut self) -> Result<&CayleyTableActions, AlgebraError> {
        let table = generate_cayley_table_actions(&self.classes)?;
        info!("Generated the action table of algebra {} with {} labels", self.name, table.len());

        // The properties describe the previous table.
        self.properties = None;
        Ok(self.actions_table.insert(table))
    }

    pub fn cayley_table_actions(&self) -> Result<&CayleyTableActions, AlgebraError> {
        self.actions_table.as_ref().ok_or_else(|| self.precondition("action table"))
    }

    /// Runs all property analyses on the action table.
    pub fn check_properties(&mut self) -> Result<&PropertyAnalysis, AlgebraError> {
        let table = self.cayley_table_actions()?;
        let analysis = PropertyAnalysis::analyse(table)?;
        Ok(self.properties.insert(analysis))
    }

    pub fn properties(&self) -> Result<&PropertyAnalysis, AlgebraError> {
        self.properties.as_ref().ok_or_else(|| self.precondition("property analysis"))
    }

    /// Searches for an isomorphism from this algebra onto the other algebra.
    /// Both algebras need their action table and property analysis.
    pub fn find_isomorphism<P>(
        &self,
        other: &TransformationAlgebra<P>,
        config: &AlgebraConfig,
    ) -> Result<SearchOutcome, AlgebraError> {
        let first = AnalysedAlgebra::new(self.cayley_table_actions()?, self.properties()?);
        let second = AnalysedAlgebra::new(other.cayley_table_actions()?, other.properties()?);

        let mut timing = Timing::new();
        let mut timer = timing.start("isomorphism search");
        let outcome = transalg_isomorphism::find_isomorphism(first, second, &config.search)?;
        timer.finish();

        info!("Algebras {} and {} are {}", self.name, other.name, outcome);
        Ok(outcome)
    }

    fn precondition(&self, stage: &'static str) -> AlgebraError {
        AlgebraError::Precondition {
            algebra: self.name.clone(),
            stage,
        }
    }
}
