use serde::Deserialize;
use serde::Serialize;

use transalg_utilities::Budget;

/// Settings of the isomorphism search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Every candidate image that is tried counts as one step.
    pub budget: Budget,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            budget: Budget::with_max_steps(10_000_000),
        }
    }
}
