//! Common test helpers and utilities
//!
//! Provides a scripted link selector that answers from a fixed table and
//! records every call the strategy makes, plus fixtures for hosts, names and
//! PIT entries.

#![allow(dead_code)]

use saf_strategy::face::{FaceId, FaceScope};
use saf_strategy::host::MemoryHost;
use saf_strategy::packet::{Data, Interest, Name};
use saf_strategy::selector::LinkSelector;
use saf_strategy::strategy::ExclusionSet;
use saf_strategy::table::{FibEntry, PitEntry};
use std::collections::HashMap;

/// A call the strategy made on the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorCall {
    /// `select_next_link` with the exclusion set it was given
    Select(Vec<FaceId>),
    /// `try_forward`
    TryForward(FaceId),
    /// `notify_attempt_failed`
    AttemptFailed(FaceId),
    /// `notify_candidate_rejected`
    CandidateRejected(Option<FaceId>),
    /// `notify_satisfied`
    Satisfied(FaceId),
    /// `notify_expired`
    Expired,
    /// `on_link_added`
    LinkAdded(FaceId),
    /// `on_link_removed`
    LinkRemoved(FaceId),
}

/// Selector answering from a table keyed by the (sorted) exclusion set
#[derive(Debug, Default)]
pub struct ScriptedSelector {
    answers: HashMap<Vec<FaceId>, FaceId>,
    grant: bool,
    calls: Vec<SelectorCall>,
}

impl ScriptedSelector {
    /// A selector that grants every `try_forward`
    pub fn new() -> Self {
        Self {
            grant: true,
            ..Default::default()
        }
    }

    /// Answer `face` when queried with exactly `excluded`
    pub fn answer(mut self, excluded: &[u64], face: u64) -> Self {
        self.answers.insert(sorted(excluded), FaceId(face));
        self
    }

    /// Make `try_forward` return `grant`
    pub fn granting(mut self, grant: bool) -> Self {
        self.grant = grant;
        self
    }

    /// Every call so far
    pub fn calls(&self) -> &[SelectorCall] {
        &self.calls
    }

    /// Exclusion sets the selector was queried with, in order
    pub fn queries(&self) -> Vec<Vec<FaceId>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SelectorCall::Select(excluded) => Some(excluded.clone()),
                _ => None,
            })
            .collect()
    }

    /// Candidate rejections reported, in order
    pub fn rejections(&self) -> Vec<Option<FaceId>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SelectorCall::CandidateRejected(face) => Some(*face),
                _ => None,
            })
            .collect()
    }

    /// Drop the call log
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

fn sorted(faces: &[u64]) -> Vec<FaceId> {
    let mut faces: Vec<_> = faces.iter().map(|&f| FaceId(f)).collect();
    faces.sort();
    faces
}

impl LinkSelector for ScriptedSelector {
    fn select_next_link(
        &mut self,
        _interest: &Interest,
        excluded: &ExclusionSet,
        _fib: &FibEntry,
    ) -> Option<FaceId> {
        self.calls
            .push(SelectorCall::Select(excluded.as_slice().to_vec()));

        let mut key = excluded.as_slice().to_vec();
        key.sort();
        self.answers.get(&key).copied()
    }

    fn try_forward(&mut self, _interest: &Interest, face: FaceId) -> bool {
        self.calls.push(SelectorCall::TryForward(face));
        self.grant
    }

    fn notify_attempt_failed(&mut self, face: FaceId, _interest: &Interest) {
        self.calls.push(SelectorCall::AttemptFailed(face));
    }

    fn notify_candidate_rejected(&mut self, _entry: &PitEntry, face: Option<FaceId>) {
        self.calls.push(SelectorCall::CandidateRejected(face));
    }

    fn notify_satisfied(&mut self, _entry: &PitEntry, in_face: FaceId, _data: &Data) {
        self.calls.push(SelectorCall::Satisfied(in_face));
    }

    fn notify_expired(&mut self, _entry: &PitEntry) {
        self.calls.push(SelectorCall::Expired);
    }

    fn on_link_added(&mut self, face: FaceId) {
        self.calls.push(SelectorCall::LinkAdded(face));
    }

    fn on_link_removed(&mut self, face: FaceId) {
        self.calls.push(SelectorCall::LinkRemoved(face));
    }
}

/// Parse a name, panicking on bad test input
pub fn name(uri: &str) -> Name {
    Name::parse(uri).unwrap()
}

/// Host with the given faces
pub fn create_test_host(faces: &[(u64, FaceScope)]) -> MemoryHost {
    let mut host = MemoryHost::new();
    for &(id, scope) in faces {
        host.add_face(FaceId(id), scope);
    }
    host
}

/// Host with non-local faces `ids`
pub fn create_network_host(ids: &[u64]) -> MemoryHost {
    let faces: Vec<_> = ids.iter().map(|&id| (id, FaceScope::NonLocal)).collect();
    create_test_host(&faces)
}

/// Interest plus a PIT entry that has recorded its arrival on `in_faces`
pub fn create_pending(
    host: &MemoryHost,
    uri: &str,
    in_faces: &[u64],
) -> (Interest, PitEntry) {
    let interest = Interest::new(name(uri));
    let mut entry = PitEntry::new(interest.clone());
    for &face in in_faces {
        host.accept_interest(&mut entry, FaceId(face));
    }
    (interest, entry)
}

/// FIB entry for `prefix` with next hops `(face, cost)`
pub fn create_fib(prefix: &str, hops: &[(u64, u32)]) -> FibEntry {
    hops.iter().fold(FibEntry::new(name(prefix)), |fib, &(face, cost)| {
        fib.with_next_hop(FaceId(face), cost)
    })
}
