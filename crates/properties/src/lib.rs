//!
//! Brute force analyses of the properties of a transformation algebra given
//! by its Cayley table: associativity, identities, inverses, element orders
//! and commutativity.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod analysis;
mod associativity;
mod commutativity;
mod element_order;
mod error;
mod identity;
mod inverse;

#[cfg(test)]
mod test_utility;

pub use analysis::*;
pub use associativity::*;
pub use commutativity::*;
pub use element_order::*;
pub use error::*;
pub use identity::*;
pub use inverse::*;
