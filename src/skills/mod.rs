//! Skills: the XP curve and per-skill leveling.

pub mod skill;

pub use skill::*;
