//!
//! Discovers the transformation algebra generated by the primitive actions
//! of a deterministic world, analyses its algebraic properties and compares
//! it with other algebras up to isomorphism.
//!
//! The [TransformationAlgebra] ties the stages together: discovery of the
//! equivalence classes, the Cayley table of the actions, the property
//! analyses and the isomorphism search. The stages are also available
//! separately from the re-exported crates.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod algebra;
mod compare;
mod config;
mod error;

pub use algebra::*;
pub use compare::*;
pub use config::*;
pub use error::*;

pub use transalg_cayley as cayley;
pub use transalg_isomorphism as isomorphism;
pub use transalg_properties as properties;
pub use transalg_utilities as utilities;
pub use transalg_world as world;
