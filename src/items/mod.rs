//! Item stacks, the capacity-bounded inventory and the bank.

pub mod ledger;

pub use ledger::*;
