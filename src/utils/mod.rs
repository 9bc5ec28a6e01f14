//! Utility modules: data directory helpers, message log, clock formatting.

#![allow(unused_imports)]

pub mod message_log;
pub mod persistence;
pub mod time;

pub use message_log::*;
pub use time::*;
