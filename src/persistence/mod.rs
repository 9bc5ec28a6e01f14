//! Save-game persistence: the versioned blob format and the stores that hold it.

#![allow(unused_imports)]

pub mod errors;
pub mod save;
pub mod storage;

pub use errors::*;
pub use save::*;
pub use storage::*;
