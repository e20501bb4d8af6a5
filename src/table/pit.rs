//! Pending Interest table entries

use crate::face::{FaceId, FaceScope};
use crate::packet::{Interest, Name};
use std::time::Instant;

/// A face the Interest arrived on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InRecord {
    /// Downstream face
    pub face: FaceId,
    /// Scope of that face
    pub scope: FaceScope,
    /// When the Interest last arrived on it
    pub last_renewed: Instant,
}

/// A face the Interest was forwarded on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutRecord {
    /// Upstream face
    pub face: FaceId,
    /// When the Interest was last sent on it
    pub last_renewed: Instant,
    /// When the upstream copy of the Interest times out
    pub expiry: Instant,
}

impl OutRecord {
    /// Whether the upstream copy is still outstanding at `now`
    pub fn is_unexpired(&self, now: Instant) -> bool {
        self.expiry > now
    }
}

/// One outstanding request, fanned in from possibly several faces
#[derive(Debug, Clone)]
pub struct PitEntry {
    interest: Interest,
    in_records: Vec<InRecord>,
    out_records: Vec<OutRecord>,
}

impl PitEntry {
    /// Create an entry for the Interest that first caused it
    pub fn new(interest: Interest) -> Self {
        Self {
            interest,
            in_records: Vec::new(),
            out_records: Vec::new(),
        }
    }

    /// The Interest this entry was created for
    pub fn interest(&self) -> &Interest {
        &self.interest
    }

    /// The requested name
    pub fn name(&self) -> &Name {
        &self.interest.name
    }

    /// In-records in arrival order
    pub fn in_records(&self) -> &[InRecord] {
        &self.in_records
    }

    /// Out-records in send order
    pub fn out_records(&self) -> &[OutRecord] {
        &self.out_records
    }

    /// Record an arrival, refreshing the existing record for that face
    pub fn insert_in_record(&mut self, face: FaceId, scope: FaceScope, now: Instant) {
        match self.in_records.iter_mut().find(|r| r.face == face) {
            Some(record) => {
                record.scope = scope;
                record.last_renewed = now;
            },
            None => self.in_records.push(InRecord {
                face,
                scope,
                last_renewed: now,
            }),
        }
    }

    /// Record a send, refreshing the existing record for that face
    pub fn insert_out_record(&mut self, face: FaceId, now: Instant) {
        let expiry = now + self.interest.lifetime;
        match self.out_records.iter_mut().find(|r| r.face == face) {
            Some(record) => {
                record.last_renewed = now;
                record.expiry = expiry;
            },
            None => self.out_records.push(OutRecord {
                face,
                last_renewed: now,
                expiry,
            }),
        }
    }

    /// Drop the out-record for a face, e.g. after it returned a NACK
    pub fn remove_out_record(&mut self, face: FaceId) {
        self.out_records.retain(|r| r.face != face);
    }

    /// Whether any upstream copy is still outstanding at `now`
    pub fn has_unexpired_out_records(&self, now: Instant) -> bool {
        self.out_records.iter().any(|r| r.is_unexpired(now))
    }

    /// Faces the Interest arrived on, excluding local application faces
    pub fn origin_faces(&self) -> Vec<FaceId> {
        self.in_records
            .iter()
            .filter(|r| !r.scope.is_local())
            .map(|r| r.face)
            .collect()
    }

    /// Every face the Interest has been forwarded on
    pub fn out_faces(&self) -> Vec<FaceId> {
        self.out_records.iter().map(|r| r.face).collect()
    }
}
