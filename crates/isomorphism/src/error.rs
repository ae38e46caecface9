use thiserror::Error;

use transalg_properties::PropertyError;
use transalg_utilities::BudgetExceeded;
use transalg_world::Action;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsomorphismError {
    #[error("the {algebra} algebra is not analysed: {source}")]
    Precondition {
        algebra: &'static str,
        source: PropertyError,
    },

    #[error("the analysis of the {algebra} algebra does not match its table at {label}")]
    Inconsistent { algebra: &'static str, label: Action },

    #[error("the isomorphism search did not terminate: {0}")]
    NonTermination(#[from] BudgetExceeded),
}

impl IsomorphismError {
    pub fn is_non_termination(&self) -> bool {
        matches!(self, IsomorphismError::NonTermination(_))
    }
}
