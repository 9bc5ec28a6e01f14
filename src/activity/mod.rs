//! Timed activities: travel, mining, smelting and crafting.

#![allow(unused_imports)]

pub mod logic;
pub mod recipes;
pub mod types;

pub use logic::*;
pub use recipes::*;
pub use types::*;
