use thiserror::Error;

use crate::Primitive;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid world: {0}")]
    InvalidWorld(String),

    #[error("state {0} is not part of the state space")]
    InvalidState(String),

    #[error("unknown primitive action '{0}'")]
    UnknownPrimitive(Primitive),

    #[error("no transition for primitive '{primitive}' from state {state}")]
    MissingTransition { state: String, primitive: Primitive },
}
