//! Headless balance simulator.
//!
//! Runs seeded playthroughs of a scripted player through the real [`Game`]
//! orchestrator to see how fast skills level and how often fights go wrong:
//! - Mining and banking throughput
//! - Combat deaths and flees per trip
//! - Skill levels after a fixed stretch of real time
//!
//! [`Game`]: crate::core::Game

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
