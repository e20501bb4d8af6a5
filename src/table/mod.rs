//! Pending-request and forwarding-information table entries
//!
//! The host daemon owns these tables and their lifecycles. The strategy only
//! ever borrows an entry for the duration of one event handler.

mod fib;
mod pit;

pub use fib::{FibEntry, FibNextHop};
pub use pit::{InRecord, OutRecord, PitEntry};
