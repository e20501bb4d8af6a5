//! Link-selection oracle contract
//!
//! The forwarding strategy never scores faces itself. It asks a
//! [`LinkSelector`] for the next candidate, reports what happened to each
//! attempt, and leaves learning entirely to the selector.
//!
//! [`RankedSelector`] is a small adaptive implementation suitable for
//! simulations and tests; production nodes plug in their own engine.

mod ranked;

pub use ranked::{FaceStats, RankedSelector};

use crate::face::FaceId;
use crate::packet::{Data, Interest};
use crate::strategy::ExclusionSet;
use crate::table::{FibEntry, PitEntry};

/// Ranks and selects upstream faces for Interests
///
/// Within one forwarding episode the strategy queries
/// [`select_next_link`](LinkSelector::select_next_link) repeatedly with a
/// growing exclusion set. Implementations must eventually answer `None`
/// once every viable candidate is excluded.
pub trait LinkSelector {
    /// Pick the next face to try, or `None` when no candidate is left
    ///
    /// Faces in `excluded` must not be returned.
    fn select_next_link(
        &mut self,
        interest: &Interest,
        excluded: &ExclusionSet,
        fib: &FibEntry,
    ) -> Option<FaceId>;

    /// Record that the Interest is about to be sent on `face`
    ///
    /// The return value is the selector's own admission verdict. Whether it
    /// is honoured is up to the strategy's admission policy.
    fn try_forward(&mut self, interest: &Interest, face: FaceId) -> bool;

    /// An attempt on `face` did not produce Data
    ///
    /// Reported when admission refuses a send and for every out-record face
    /// that lost the race against the face that returned Data.
    fn notify_attempt_failed(&mut self, face: FaceId, interest: &Interest);

    /// A candidate was given up on when the request was rejected
    ///
    /// Called once per excluded face and then once more with `None` to mark
    /// the exhaustion itself.
    fn notify_candidate_rejected(&mut self, entry: &PitEntry, face: Option<FaceId>);

    /// Data for `entry` arrived on `in_face`
    fn notify_satisfied(&mut self, entry: &PitEntry, in_face: FaceId, data: &Data);

    /// `entry` timed out without Data or NACK
    fn notify_expired(&mut self, entry: &PitEntry);

    /// A face became available
    fn on_link_added(&mut self, face: FaceId);

    /// A face is going away
    fn on_link_removed(&mut self, face: FaceId);
}

impl<S: LinkSelector + ?Sized> LinkSelector for Box<S> {
    fn select_next_link(
        &mut self,
        interest: &Interest,
        excluded: &ExclusionSet,
        fib: &FibEntry,
    ) -> Option<FaceId> {
        (**self).select_next_link(interest, excluded, fib)
    }

    fn try_forward(&mut self, interest: &Interest, face: FaceId) -> bool {
        (**self).try_forward(interest, face)
    }

    fn notify_attempt_failed(&mut self, face: FaceId, interest: &Interest) {
        (**self).notify_attempt_failed(face, interest)
    }

    fn notify_candidate_rejected(&mut self, entry: &PitEntry, face: Option<FaceId>) {
        (**self).notify_candidate_rejected(entry, face)
    }

    fn notify_satisfied(&mut self, entry: &PitEntry, in_face: FaceId, data: &Data) {
        (**self).notify_satisfied(entry, in_face, data)
    }

    fn notify_expired(&mut self, entry: &PitEntry) {
        (**self).notify_expired(entry)
    }

    fn on_link_added(&mut self, face: FaceId) {
        (**self).on_link_added(face)
    }

    fn on_link_removed(&mut self, face: FaceId) {
        (**self).on_link_removed(face)
    }
}
