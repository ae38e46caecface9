use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use transalg_utilities::Budget;

/// The notion of behavioural equivalence used to group actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equivalence {
    /// Equal outcomes from one fixed initial state.
    #[default]
    Local,

    /// Equal functions over all the states.
    Global,
}

/// The algorithm used to discover the equivalence classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationMethod {
    /// Partition refinement on the rows and columns of the state Cayley table.
    #[default]
    StatesCayley,

    /// Breadth first search over action lengths, classifying every action by its outcome.
    ActionFunction,
}

/// Settings of a discovery session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub method: GenerationMethod,

    /// Discovery fails once more equivalence classes are found.
    pub max_labels: Option<usize>,

    /// Limits the number of processed candidates and the running time.
    pub budget: Budget,

    /// The number of memoised outcomes before the oldest half is evicted.
    pub cache_capacity: usize,

    /// Label every class by its shortlex smallest member.
    pub relabel: bool,

    /// Recheck all members against the final labels before terminating.
    pub verify_members: bool,

    /// Interval between progress messages.
    pub progress_interval: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            method: GenerationMethod::default(),
            max_labels: Some(10_000),
            budget: Budget::with_max_steps(1_000_000),
            cache_capacity: 1 << 16,
            relabel: true,
            verify_members: true,
            progress_interval: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DiscoveryConfig =
            serde_json::from_str(r#"{ "method": "ActionFunction", "max_labels": 12, "relabel": false }"#).unwrap();

        assert_eq!(config.method, GenerationMethod::ActionFunction);
        assert_eq!(config.max_labels, Some(12));
        assert!(!config.relabel);
        assert_eq!(config.budget, DiscoveryConfig::default().budget);
        assert!(config.verify_members);
    }
}
