//! Idlescape - idle RPG game core
//!
//! Skills, inventory and bank, a travel graph, timed gathering and
//! production, turn-based combat and versioned saves. Rendering and input are
//! left to the host, which drives [`Game`] through its commands and
//! [`Game::tick`].

pub mod activity;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod persistence;
pub mod simulator;
pub mod skills;
pub mod utils;
pub mod world;

pub use crate::core::{Game, GameConfig, GameEvent, GameSnapshot, GameState};
