//!
//! Searches for an isomorphism between two transformation algebras, using the
//! invariants computed by the property analyses to prune a depth first
//! backtracking search.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod candidates;
mod config;
mod error;
mod invariants;
mod mapping;
mod search;

#[cfg(test)]
mod test_utility;

pub use config::*;
pub use error::*;
pub use mapping::*;
pub use search::*;
