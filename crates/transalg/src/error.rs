use thiserror::Error;

use transalg_cayley::DiscoveryError;
use transalg_cayley::TableError;
use transalg_isomorphism::IsomorphismError;
use transalg_properties::PropertyError;

#[derive(Error, Debug)]
pub enum AlgebraError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Isomorphism(#[from] IsomorphismError),

    #[error("the {stage} of algebra {algebra} has not been computed")]
    Precondition { algebra: String, stage: &'static str },
}

impl AlgebraError {
    /// Returns true iff a stage ran out of its budget.
    pub fn is_non_termination(&self) -> bool {
        match self {
            AlgebraError::Discovery(error) => error.is_non_termination(),
            AlgebraError::Isomorphism(error) => error.is_non_termination(),
            _ => false,
        }
    }
}
