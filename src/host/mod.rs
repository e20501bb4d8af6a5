//! Contract between the strategy and the forwarding daemon hosting it
//!
//! The host owns the face table and the pending Interest table. The strategy
//! calls back into it to transmit, to NACK downstream and to finish a PIT
//! entry. [`MemoryHost`] is an in-process host for tests and simulations.

mod memory;

pub use memory::{HostAction, MemoryHost};

use crate::face::{FaceId, FaceScope};
use crate::packet::{Data, Nack};
use crate::table::PitEntry;
use std::time::Instant;

/// Face table and PIT operations the strategy relies on
pub trait StrategyHost {
    /// Scope of a face, or `None` if the face table has no such face
    fn face_scope(&self, face: FaceId) -> Option<FaceScope>;

    /// Transmit the entry's Interest on `face` and record the out-record
    fn send_interest(&mut self, entry: &mut PitEntry, face: FaceId);

    /// Transmit a NACK on `face`
    fn send_nack(&mut self, face: FaceId, nack: &Nack);

    /// Purge the entry as rejected
    fn reject_pending_interest(&mut self, entry: &PitEntry);

    /// Default satisfaction: hand the Data to the entry's downstream faces
    fn satisfy_pending_interest(&mut self, entry: &PitEntry, in_face: FaceId, data: &Data);

    /// Default expiry: drop the entry
    fn expire_pending_interest(&mut self, entry: &PitEntry);

    /// Current time for out-record expiry checks
    fn now(&self) -> Instant {
        Instant::now()
    }
}
