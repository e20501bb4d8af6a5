//! Retransmission versus duplicate-request classification

use super::known_faces::KnownFaceTracker;
use crate::face::FaceId;
use crate::table::PitEntry;
use std::time::Instant;

/// How an incoming Interest relates to the request already outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Nothing is outstanding upstream (or detection is off): forward normally
    FirstRequest,
    /// A new downstream face asks for a name already in flight: do not forward
    Duplicate,
    /// A face that already asked is asking again: retry, excluding tried faces
    Retransmission,
}

/// Decides whether an Interest should be forwarded, suppressed or retried
#[derive(Debug, Clone, Copy)]
pub struct RetransmissionClassifier {
    threshold: u32,
}

impl RetransmissionClassifier {
    /// Create a classifier; any threshold above zero enables detection
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Whether retransmission detection is enabled
    pub fn is_enabled(&self) -> bool {
        self.threshold > 0
    }

    /// Classify an Interest from `in_face` against `entry`
    ///
    /// The sighting is recorded in `tracker` in every case, so a later
    /// Interest from the same face counts as a retransmission.
    pub fn classify(
        &self,
        tracker: &mut KnownFaceTracker,
        entry: &PitEntry,
        in_face: FaceId,
        now: Instant,
    ) -> Classification {
        let name = entry.name();

        let classification = if self.is_enabled() && entry.has_unexpired_out_records(now) {
            if tracker.has_seen(name, in_face) {
                Classification::Retransmission
            } else {
                Classification::Duplicate
            }
        } else {
            Classification::FirstRequest
        };

        tracker.record_sighting(name, in_face);
        classification
    }
}
