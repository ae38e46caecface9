use thiserror::Error;

use transalg_world::Action;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("the {stage} analysis has not been run")]
    Precondition { stage: &'static str },

    #[error("found several two-sided identities: {0:?}")]
    MultipleIdentities(Vec<Action>),

    #[error("{inverse} is a left inverse of {element} for identity {left_identity} but a right inverse for identity {right_identity}")]
    InconsistentInverse {
        element: Action,
        inverse: Action,
        left_identity: Action,
        right_identity: Action,
    },
}
