use thiserror::Error;

use transalg_utilities::BudgetExceeded;
use transalg_world::Action;
use transalg_world::WorldError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassError {
    #[error("an equivalence class labelled {0} already exists")]
    DuplicateLabel(Action),

    #[error("{element} already belongs to the class labelled {label}")]
    AlreadyMember { element: Action, label: Action },

    #[error("there is no equivalence class labelled {0}")]
    UnknownLabel(Action),

    #[error("{0} labels its class and cannot leave it")]
    LabelRemoval(Action),

    #[error("the class labelled {0} does not contain its label")]
    MissingLabel(Action),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("the composition {composed} of {left} after {right} does not belong to any equivalence class")]
    Composition {
        left: Action,
        right: Action,
        composed: Action,
    },

    #[error("invalid Cayley table at {location}: {reason}")]
    Validation { location: String, reason: String },

    #[error("{0} is not a label of the Cayley table")]
    UnknownLabel(Action),
}

impl TableError {
    pub(crate) fn validation(location: impl Into<String>, reason: impl Into<String>) -> TableError {
        TableError::Validation {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Classes(#[from] ClassError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("the world has no primitive actions")]
    NoPrimitives,

    #[error("{action} matches the signatures of several equivalence classes: {labels:?}")]
    AmbiguousClass { action: Action, labels: Vec<Action> },

    #[error("the composition {0} has an outcome that no equivalence class produces")]
    NotClosed(Action),

    #[error("discovery did not terminate: {0}")]
    NonTermination(#[from] BudgetExceeded),

    #[error("discovery did not terminate: found more than {limit} equivalence classes")]
    TooManyLabels { limit: usize },
}

impl DiscoveryError {
    /// Returns true iff discovery was stopped by one of its configured limits.
    pub fn is_non_termination(&self) -> bool {
        matches!(self, DiscoveryError::NonTermination(_) | DiscoveryError::TooManyLabels { .. })
    }
}
