//!
//! A crate containing the discovery of transformation algebras: the
//! partition of actions into equivalence classes, the Cayley table of their
//! outcomes on states and the Cayley table of the algebra itself.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod action_function_generator;
mod cayley_table_actions;
mod cayley_table_states;
mod compare;
mod config;
mod discovery;
mod equivalence_classes;
mod error;
mod probe;
mod relabel;
mod states_generator;

pub use action_function_generator::*;
pub use cayley_table_actions::*;
pub use cayley_table_states::*;
pub use compare::*;
pub use config::*;
pub use discovery::*;
pub use equivalence_classes::*;
pub use error::*;
pub use probe::*;
pub use relabel::*;
pub use states_generator::*;
