//!
//! A crate containing the interface between the algebra discovery and the
//! deterministic worlds it explores: actions as sequences of primitive
//! symbols, world states with an absorbing undefined state, and a memoising
//! cache for action outcomes.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod action;
mod error;
mod outcome_cache;
mod simulator;
mod state;
mod world;

pub use action::*;
pub use error::*;
pub use outcome_cache::*;
pub use simulator::*;
pub use state::*;
pub use world::*;
