//! Candidate selection loop for one forwarding episode
//!
//! The decision step ([`choose_next_link`]) only talks to the link selector;
//! sending is left to the caller once [`run_forward_loop`] reports
//! [`LoopOutcome::Sent`]. Every face that fails or would loop back is added
//! to the exclusion set before the selector is asked again, so no face is
//! offered twice within an episode.

use crate::face::FaceId;
use crate::packet::Interest;
use crate::selector::LinkSelector;
use crate::table::FibEntry;

/// Faces the selector must not offer again in the current episode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    faces: Vec<FaceId>,
}

impl ExclusionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a set from faces already tried, dropping repeats
    pub fn from_faces(faces: impl IntoIterator<Item = FaceId>) -> Self {
        let mut set = Self::new();
        for face in faces {
            set.insert(face);
        }
        set
    }

    /// Add a face. Returns false if it was already excluded.
    pub fn insert(&mut self, face: FaceId) -> bool {
        if self.contains(face) {
            return false;
        }
        self.faces.push(face);
        true
    }

    /// Whether a face is excluded
    pub fn contains(&self, face: FaceId) -> bool {
        self.faces.contains(&face)
    }

    /// Excluded faces in insertion order
    pub fn iter(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().copied()
    }

    /// Excluded faces as a slice
    pub fn as_slice(&self) -> &[FaceId] {
        &self.faces
    }

    /// Number of excluded faces
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Decides whether an Interest may actually be sent on a chosen face
pub trait AdmissionPolicy: Send {
    /// `selector_verdict` is what [`LinkSelector::try_forward`] returned
    fn admit(&self, face: FaceId, selector_verdict: bool) -> bool;
}

/// Admits every send; outgoing limits are not enforced
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAdmit;

impl AdmissionPolicy for AlwaysAdmit {
    fn admit(&self, _face: FaceId, _selector_verdict: bool) -> bool {
        true
    }
}

/// Admits exactly when the selector granted the attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorAdmission;

impl AdmissionPolicy for SelectorAdmission {
    fn admit(&self, _face: FaceId, selector_verdict: bool) -> bool {
        selector_verdict
    }
}

/// What the selector's next answer means for the episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// A face that may be tried
    Viable(FaceId),
    /// A face the Interest arrived on; must never be sent to
    Loopback(FaceId),
    /// No usable candidate is left
    Exhausted,
}

/// Terminal state of a forwarding episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The Interest may be transmitted on this face
    Sent(FaceId),
    /// Every candidate was excluded
    Exhausted,
}

/// The request being forwarded in one episode
#[derive(Debug, Clone, Copy)]
pub struct ForwardRequest<'a> {
    /// Interest to forward
    pub interest: &'a Interest,
    /// Routing information for its name
    pub fib: &'a FibEntry,
    /// Non-local faces the Interest arrived on
    pub origin: &'a [FaceId],
}

/// Ask the selector for the next candidate and validate its answer
///
/// An answer naming an already excluded face or a face unknown to the face
/// table is treated as exhaustion.
pub fn choose_next_link<S, F>(
    selector: &mut S,
    request: &ForwardRequest<'_>,
    excluded: &ExclusionSet,
    face_exists: F,
) -> Candidate
where
    S: LinkSelector + ?Sized,
    F: Fn(FaceId) -> bool,
{
    let next = selector.select_next_link(request.interest, excluded, request.fib);
    tracing::trace!(
        interest = %request.interest,
        excluded = ?excluded.as_slice(),
        ?next,
        "selector answered"
    );

    match next {
        None => Candidate::Exhausted,
        Some(face) if excluded.contains(face) => {
            tracing::warn!(%face, "selector offered an excluded face, treating as exhausted");
            Candidate::Exhausted
        },
        Some(face) if request.origin.contains(&face) => Candidate::Loopback(face),
        Some(face) if !face_exists(face) => {
            tracing::warn!(%face, "selector offered an unknown face, treating as exhausted");
            Candidate::Exhausted
        },
        Some(face) => Candidate::Viable(face),
    }
}

/// Query, admit and retry until a face is admitted or none is left
///
/// On return `excluded` holds every seed exclusion plus every face refused
/// or skipped as loopback during this episode.
pub fn run_forward_loop<S, F>(
    selector: &mut S,
    admission: &dyn AdmissionPolicy,
    request: &ForwardRequest<'_>,
    excluded: &mut ExclusionSet,
    face_exists: F,
) -> LoopOutcome
where
    S: LinkSelector + ?Sized,
    F: Fn(FaceId) -> bool,
{
    loop {
        match choose_next_link(selector, request, excluded, &face_exists) {
            Candidate::Exhausted => return LoopOutcome::Exhausted,
            Candidate::Loopback(face) => {
                tracing::debug!(%face, interest = %request.interest, "skipping origin face");
                excluded.insert(face);
            },
            Candidate::Viable(face) => {
                let verdict = selector.try_forward(request.interest, face);
                if admission.admit(face, verdict) {
                    return LoopOutcome::Sent(face);
                }

                tracing::debug!(%face, interest = %request.interest, "send refused by admission");
                selector.notify_attempt_failed(face, request.interest);
                excluded.insert(face);
            },
        }
    }
}
