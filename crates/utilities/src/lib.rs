//!
//! This crate defines general utilities shared by the discovery and search
//! crates.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod budget;
mod timing;

pub use budget::*;
pub use timing::*;
