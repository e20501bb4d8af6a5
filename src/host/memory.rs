//! In-memory host for testing
//!
//! Keeps a face table, publishes face additions and removals on a
//! [`FaceEventHandlers`] bus and records every action the strategy asks for,
//! so tests can assert on exactly what would have gone out on the wire.

use super::StrategyHost;
use crate::face::{FaceEvent, FaceEventHandlers, FaceId, FaceScope};
use crate::packet::{Data, Nack, Name};
use crate::table::PitEntry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Something the strategy asked the host to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Interest transmitted upstream
    InterestSent {
        /// Name of the Interest
        name: Name,
        /// Face it was sent on
        face: FaceId,
    },
    /// NACK transmitted downstream
    NackSent {
        /// Face it was sent on
        face: FaceId,
        /// The NACK itself
        nack: Nack,
    },
    /// PIT entry purged as rejected
    Rejected {
        /// Name of the entry
        name: Name,
    },
    /// PIT entry satisfied
    Satisfied {
        /// Name of the entry
        name: Name,
        /// Face the Data arrived on
        face: FaceId,
    },
    /// PIT entry expired
    Expired {
        /// Name of the entry
        name: Name,
    },
}

/// Face table plus action log
pub struct MemoryHost {
    faces: HashMap<FaceId, FaceScope>,
    events: FaceEventHandlers,
    actions: Vec<HostAction>,
    epoch: Instant,
    elapsed: Duration,
}

impl MemoryHost {
    /// Create a host with an empty face table
    pub fn new() -> Self {
        Self {
            faces: HashMap::new(),
            events: FaceEventHandlers::new(),
            actions: Vec::new(),
            epoch: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Face event bus strategies subscribe to
    pub fn face_events(&self) -> &FaceEventHandlers {
        &self.events
    }

    /// Add a face and announce it
    pub fn add_face(&mut self, face: FaceId, scope: FaceScope) {
        self.faces.insert(face, scope);
        self.events.dispatch(FaceEvent::Added { face, scope });
    }

    /// Announce and remove a face. Unknown faces are ignored.
    pub fn remove_face(&mut self, face: FaceId) {
        if self.faces.contains_key(&face) {
            self.events.dispatch(FaceEvent::Removed { face });
            self.faces.remove(&face);
        }
    }

    /// Record an Interest arrival on `face` in `entry`, as the host does
    /// before handing the Interest to the strategy
    pub fn accept_interest(&self, entry: &mut PitEntry, face: FaceId) {
        let scope = self.faces.get(&face).copied().unwrap_or_default();
        entry.insert_in_record(face, scope, self.now());
    }

    /// Move the host clock forward
    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }

    /// Every action so far, oldest first
    pub fn actions(&self) -> &[HostAction] {
        &self.actions
    }

    /// Drain the action log
    pub fn take_actions(&mut self) -> Vec<HostAction> {
        std::mem::take(&mut self.actions)
    }

    /// Faces Interests were sent on, in order
    pub fn sent_interests(&self) -> Vec<FaceId> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::InterestSent { face, .. } => Some(*face),
                _ => None,
            })
            .collect()
    }

    /// NACKs sent, in order
    pub fn sent_nacks(&self) -> Vec<(FaceId, Nack)> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::NackSent { face, nack } => Some((*face, nack.clone())),
                _ => None,
            })
            .collect()
    }

    /// Number of faces in the table
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyHost for MemoryHost {
    fn face_scope(&self, face: FaceId) -> Option<FaceScope> {
        self.faces.get(&face).copied()
    }

    fn send_interest(&mut self, entry: &mut PitEntry, face: FaceId) {
        entry.insert_out_record(face, self.now());
        self.actions.push(HostAction::InterestSent {
            name: entry.name().clone(),
            face,
        });
    }

    fn send_nack(&mut self, face: FaceId, nack: &Nack) {
        self.actions.push(HostAction::NackSent {
            face,
            nack: nack.clone(),
        });
    }

    fn reject_pending_interest(&mut self, entry: &PitEntry) {
        self.actions.push(HostAction::Rejected {
            name: entry.name().clone(),
        });
    }

    fn satisfy_pending_interest(&mut self, entry: &PitEntry, in_face: FaceId, _data: &Data) {
        self.actions.push(HostAction::Satisfied {
            name: entry.name().clone(),
            face: in_face,
        });
    }

    fn expire_pending_interest(&mut self, entry: &PitEntry) {
        self.actions.push(HostAction::Expired {
            name: entry.name().clone(),
        });
    }

    fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Interest;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_face_events_published() {
        let mut host = MemoryHost::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        host.face_events()
            .subscribe(move |event| seen_clone.lock().push(event));

        host.add_face(FaceId(1), FaceScope::Local);
        host.remove_face(FaceId(1));
        host.remove_face(FaceId(1));

        assert_eq!(
            *seen.lock(),
            vec![
                FaceEvent::Added {
                    face: FaceId(1),
                    scope: FaceScope::Local
                },
                FaceEvent::Removed { face: FaceId(1) },
            ]
        );
        assert_eq!(host.face_count(), 0);
    }

    #[test]
    fn test_accept_interest_uses_face_scope() {
        let mut host = MemoryHost::new();
        host.add_face(FaceId(2), FaceScope::Local);

        let mut entry = PitEntry::new(Interest::new(Name::parse("/a").unwrap()));
        host.accept_interest(&mut entry, FaceId(2));

        assert_eq!(entry.in_records()[0].scope, FaceScope::Local);
        assert!(entry.origin_faces().is_empty());
    }

    #[test]
    fn test_send_interest_records_out_record() {
        let mut host = MemoryHost::new();
        let mut entry = PitEntry::new(Interest::new(Name::parse("/a").unwrap()));

        host.send_interest(&mut entry, FaceId(5));

        assert_eq!(entry.out_faces(), vec![FaceId(5)]);
        assert_eq!(host.sent_interests(), vec![FaceId(5)]);
        assert!(entry.has_unexpired_out_records(host.now()));
    }

    #[test]
    fn test_clock_advance_expires_out_records() {
        let mut host = MemoryHost::new();
        let mut entry = PitEntry::new(Interest::new(Name::parse("/a").unwrap()));
        host.send_interest(&mut entry, FaceId(5));

        host.advance(entry.interest().lifetime);
        assert!(!entry.has_unexpired_out_records(host.now()));
    }
}
