//!
//! Concrete deterministic worlds: cyclic gridworlds, optionally with walls
//! or a pushable block, and worlds given by an explicit transition table.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod gridworld2d;
mod gridworld2d_block;
mod gridworld2d_walls;
mod table_world;
mod undefined_action;

pub use gridworld2d::*;
pub use gridworld2d_block::*;
pub use gridworld2d_walls::*;
pub use table_world::*;
pub use undefined_action::*;
