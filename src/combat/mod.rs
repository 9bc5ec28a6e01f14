//! Turn-based combat: enemies, stances and the deferred enemy turn.

#![allow(unused_imports)]

pub mod data;
pub mod logic;
pub mod types;

pub use data::*;
pub use logic::*;
pub use types::*;
