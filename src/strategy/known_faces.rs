//! Per-name record of faces already seen requesting that name
//!
//! An entry lives from the first Interest for a name until the request is
//! satisfied, expires or is rejected. The host may signal satisfaction or
//! expiry more than once for the same request, so [`KnownFaceTracker::forget`]
//! tolerates absent names.

use crate::face::FaceId;
use crate::packet::Name;
use std::collections::HashMap;

/// Faces observed asking for each outstanding name
#[derive(Debug, Default)]
pub struct KnownFaceTracker {
    faces: HashMap<String, Vec<FaceId>>,
}

impl KnownFaceTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `face` asked for `name`. Idempotent.
    pub fn record_sighting(&mut self, name: &Name, face: FaceId) {
        let faces = self.faces.entry(name.to_uri()).or_default();
        if !faces.contains(&face) {
            faces.push(face);
        }
    }

    /// Whether `face` has asked for `name` since the tracker last forgot it
    pub fn has_seen(&self, name: &Name, face: FaceId) -> bool {
        self.faces
            .get(&name.to_uri())
            .map(|faces| faces.contains(&face))
            .unwrap_or(false)
    }

    /// Drop everything known about `name`. Absent names are a no-op.
    pub fn forget(&mut self, name: &Name) {
        if self.faces.remove(&name.to_uri()).is_none() {
            tracing::trace!(%name, "known faces already cleared");
        }
    }

    /// Faces recorded for `name`, in first-seen order
    pub fn faces(&self, name: &Name) -> &[FaceId] {
        self.faces
            .get(&name.to_uri())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of names currently tracked
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether no name is tracked
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(uri: &str) -> Name {
        Name::parse(uri).unwrap()
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut tracker = KnownFaceTracker::new();
        let n = name("/a");

        tracker.record_sighting(&n, FaceId(1));
        tracker.record_sighting(&n, FaceId(2));
        tracker.record_sighting(&n, FaceId(1));

        assert_eq!(tracker.faces(&n), &[FaceId(1), FaceId(2)]);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_has_seen_unknown_name() {
        let tracker = KnownFaceTracker::new();
        assert!(!tracker.has_seen(&name("/nothing"), FaceId(1)));
        assert!(tracker.faces(&name("/nothing")).is_empty());
    }

    #[test]
    fn test_names_are_independent() {
        let mut tracker = KnownFaceTracker::new();
        tracker.record_sighting(&name("/a"), FaceId(1));

        assert!(tracker.has_seen(&name("/a"), FaceId(1)));
        assert!(!tracker.has_seen(&name("/a/b"), FaceId(1)));
        assert!(!tracker.has_seen(&name("/b"), FaceId(1)));
    }

    #[test]
    fn test_forget_twice() {
        let mut tracker = KnownFaceTracker::new();
        let n = name("/a");
        tracker.record_sighting(&n, FaceId(1));

        tracker.forget(&n);
        tracker.forget(&n);

        assert!(!tracker.has_seen(&n, FaceId(1)));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_forget_leaves_other_names() {
        let mut tracker = KnownFaceTracker::new();
        tracker.record_sighting(&name("/a"), FaceId(1));
        tracker.record_sighting(&name("/b"), FaceId(1));

        tracker.forget(&name("/a"));

        assert!(tracker.has_seen(&name("/b"), FaceId(1)));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_trailing_slash_is_same_key() {
        let mut tracker = KnownFaceTracker::new();
        tracker.record_sighting(&name("/a/"), FaceId(4));
        assert!(tracker.has_seen(&name("/a"), FaceId(4)));
    }
}
