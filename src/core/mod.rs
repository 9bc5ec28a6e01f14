//! Core game state, orchestration and per-tick logic.

#![allow(unused_imports)]

pub mod bank;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod game;
pub mod game_state;
pub mod snapshot;
pub mod tick;

pub use bank::*;
pub use config::*;
pub use constants::*;
pub use errors::*;
pub use events::*;
pub use game::*;
pub use game_state::*;
pub use snapshot::*;
pub use tick::*;
