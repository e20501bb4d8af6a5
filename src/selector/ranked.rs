//! Satisfaction-ratio based face ranking

use super::LinkSelector;
use crate::face::FaceId;
use crate::packet::{Data, Interest, Name};
use crate::strategy::ExclusionSet;
use crate::table::{FibEntry, PitEntry};
use std::collections::{HashMap, HashSet};

/// Per-prefix, per-face outcome counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceStats {
    /// Attempts started on the face
    pub forwarded: u64,
    /// Attempts that returned Data
    pub satisfied: u64,
    /// Attempts that were refused, lost the race, expired or were rejected
    pub failed: u64,
}

impl FaceStats {
    /// Laplace-smoothed satisfaction ratio in (0, 1)
    ///
    /// An untried face scores 0.5.
    pub fn score(&self) -> f64 {
        (self.satisfied as f64 + 1.0) / ((self.satisfied + self.failed) as f64 + 2.0)
    }
}

/// Adaptive selector ranking FIB next hops by observed satisfaction
///
/// Statistics are aggregated under the first `prefix_component` components
/// of each name, so with `prefix_component = 1` all of `/video/...` shares
/// one set of counters. Only faces announced through
/// [`LinkSelector::on_link_added`] are ever offered.
#[derive(Debug, Default)]
pub struct RankedSelector {
    prefix_component: usize,
    faces: HashSet<FaceId>,
    stats: HashMap<(Name, FaceId), FaceStats>,
}

impl RankedSelector {
    /// Create a selector aggregating on `prefix_component` name components
    pub fn new(prefix_component: usize) -> Self {
        Self {
            prefix_component,
            faces: HashSet::new(),
            stats: HashMap::new(),
        }
    }

    /// Number of name components statistics are keyed on
    pub fn prefix_component(&self) -> usize {
        self.prefix_component
    }

    /// Counters for a face under the aggregation key of `name`
    pub fn stats(&self, name: &Name, face: FaceId) -> FaceStats {
        self.stats
            .get(&(self.key(name), face))
            .copied()
            .unwrap_or_default()
    }

    /// Whether a face is currently known
    pub fn knows_face(&self, face: FaceId) -> bool {
        self.faces.contains(&face)
    }

    fn key(&self, name: &Name) -> Name {
        name.prefix(self.prefix_component)
    }

    fn entry(&mut self, name: &Name, face: FaceId) -> &mut FaceStats {
        let key = self.key(name);
        self.stats.entry((key, face)).or_default()
    }
}

impl LinkSelector for RankedSelector {
    fn select_next_link(
        &mut self,
        interest: &Interest,
        excluded: &ExclusionSet,
        fib: &FibEntry,
    ) -> Option<FaceId> {
        let mut best: Option<(f64, u32, FaceId)> = None;

        for hop in fib.next_hops() {
            if !self.faces.contains(&hop.face) || excluded.contains(hop.face) {
                continue;
            }

            let score = self.stats(&interest.name, hop.face).score();
            let better = match best {
                None => true,
                Some((best_score, best_cost, best_face)) => {
                    score > best_score
                        || (score == best_score
                            && (hop.cost, hop.face) < (best_cost, best_face))
                },
            };
            if better {
                best = Some((score, hop.cost, hop.face));
            }
        }

        best.map(|(_, _, face)| face)
    }

    fn try_forward(&mut self, interest: &Interest, face: FaceId) -> bool {
        self.entry(&interest.name, face).forwarded += 1;
        true
    }

    fn notify_attempt_failed(&mut self, face: FaceId, interest: &Interest) {
        self.entry(&interest.name, face).failed += 1;
    }

    fn notify_candidate_rejected(&mut self, entry: &PitEntry, face: Option<FaceId>) {
        // Only faces the Interest actually went out on carry information.
        if let Some(face) = face {
            if entry.out_records().iter().any(|r| r.face == face) {
                self.entry(entry.name(), face).failed += 1;
            }
        }
    }

    fn notify_satisfied(&mut self, entry: &PitEntry, in_face: FaceId, _data: &Data) {
        self.entry(entry.name(), in_face).satisfied += 1;
    }

    fn notify_expired(&mut self, entry: &PitEntry) {
        for face in entry.out_faces() {
            self.entry(entry.name(), face).failed += 1;
        }
    }

    fn on_link_added(&mut self, face: FaceId) {
        self.faces.insert(face);
    }

    fn on_link_removed(&mut self, face: FaceId) {
        self.faces.remove(&face);
        self.stats.retain(|(_, f), _| *f != face);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn name(uri: &str) -> Name {
        Name::parse(uri).unwrap()
    }

    fn selector_with_faces(faces: &[u64]) -> RankedSelector {
        let mut selector = RankedSelector::new(1);
        for &f in faces {
            selector.on_link_added(FaceId(f));
        }
        selector
    }

    fn fib() -> FibEntry {
        FibEntry::new(name("/a"))
            .with_next_hop(FaceId(1), 10)
            .with_next_hop(FaceId(2), 20)
            .with_next_hop(FaceId(3), 30)
    }

    #[test]
    fn test_untried_faces_follow_fib_cost() {
        let mut selector = selector_with_faces(&[1, 2, 3]);
        let interest = Interest::new(name("/a/x"));

        let first = selector.select_next_link(&interest, &ExclusionSet::new(), &fib());
        assert_eq!(first, Some(FaceId(1)));
    }

    #[test]
    fn test_respects_exclusions_until_exhausted() {
        let mut selector = selector_with_faces(&[1, 2, 3]);
        let interest = Interest::new(name("/a/x"));
        let fib = fib();
        let mut excluded = ExclusionSet::new();

        let mut order = Vec::new();
        while let Some(face) = selector.select_next_link(&interest, &excluded, &fib) {
            order.push(face);
            excluded.insert(face);
        }

        assert_eq!(order, vec![FaceId(1), FaceId(2), FaceId(3)]);
    }

    #[test]
    fn test_unknown_faces_never_offered() {
        let mut selector = selector_with_faces(&[2]);
        let interest = Interest::new(name("/a/x"));

        let face = selector.select_next_link(&interest, &ExclusionSet::new(), &fib());
        assert_eq!(face, Some(FaceId(2)));

        selector.on_link_removed(FaceId(2));
        let face = selector.select_next_link(&interest, &ExclusionSet::new(), &fib());
        assert_eq!(face, None);
    }

    #[test]
    fn test_satisfaction_outranks_cost() {
        let mut selector = selector_with_faces(&[1, 2, 3]);
        let interest = Interest::new(name("/a/x"));
        let mut entry = PitEntry::new(interest.clone());
        entry.insert_out_record(FaceId(3), Instant::now());
        let data = Data::new(name("/a/x"), b"payload".to_vec());

        selector.notify_satisfied(&entry, FaceId(3), &data);
        selector.notify_attempt_failed(FaceId(1), &interest);

        // Aggregated under /a, so a sibling name benefits too.
        let sibling = Interest::new(name("/a/y"));
        let face = selector.select_next_link(&sibling, &ExclusionSet::new(), &fib());
        assert_eq!(face, Some(FaceId(3)));
        assert_eq!(selector.stats(&name("/a/y"), FaceId(3)).satisfied, 1);
        assert_eq!(selector.stats(&name("/a/z"), FaceId(1)).failed, 1);
    }

    #[test]
    fn test_rejection_counts_only_out_faces() {
        let mut selector = selector_with_faces(&[1, 2]);
        let mut entry = PitEntry::new(Interest::new(name("/a/x")));
        entry.insert_out_record(FaceId(1), Instant::now());

        selector.notify_candidate_rejected(&entry, Some(FaceId(1)));
        selector.notify_candidate_rejected(&entry, Some(FaceId(2)));
        selector.notify_candidate_rejected(&entry, None);

        assert_eq!(selector.stats(&name("/a/x"), FaceId(1)).failed, 1);
        assert_eq!(selector.stats(&name("/a/x"), FaceId(2)).failed, 0);
    }

    #[test]
    fn test_expiry_penalizes_out_faces() {
        let mut selector = selector_with_faces(&[1]);
        let mut entry = PitEntry::new(Interest::new(name("/a/x")));
        entry.insert_out_record(FaceId(1), Instant::now());

        selector.notify_expired(&entry);
        assert_eq!(selector.stats(&name("/a"), FaceId(1)).failed, 1);
    }

    #[test]
    fn test_try_forward_counts_and_grants() {
        let mut selector = selector_with_faces(&[1]);
        let interest = Interest::new(name("/a/x"));

        assert!(selector.try_forward(&interest, FaceId(1)));
        assert_eq!(selector.stats(&name("/a"), FaceId(1)).forwarded, 1);
    }

    #[test]
    fn test_score_smoothing() {
        assert_eq!(FaceStats::default().score(), 0.5);
        let good = FaceStats {
            forwarded: 3,
            satisfied: 3,
            failed: 0,
        };
        assert!(good.score() > 0.5);
    }
}
