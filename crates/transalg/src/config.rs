use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::DiscoveryConfig;
use transalg_isomorphism::SearchConfig;

/// Settings for all stages of an algebra.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgebraConfig {
    pub discovery: DiscoveryConfig,
    pub search: SearchConfig,
}
