//! The player character: vitals, purse, inventory and skills.

#![allow(unused_imports)]

pub mod player;

pub use player::*;
