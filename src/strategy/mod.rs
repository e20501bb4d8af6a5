//! SAF forwarding strategy
//!
//! This module decides, per pending Interest, which upstream face to try,
//! in what order, and when to give up and NACK downstream.
//!
//! # Architecture
//!
//! - **KnownFaceTracker**: per-name set of downstream faces already seen
//!   asking for that name
//! - **RetransmissionClassifier**: tells a retransmission from a known face
//!   apart from a first request by a new face while the name is in flight
//! - **Forward loop**: asks the link selector for candidates, never sends
//!   back to an origin face and never offers a face twice per episode
//! - **SafStrategy**: the host-facing event handlers tying it together and
//!   NACKing every non-local downstream face on exhaustion
//!
//! # Example
//!
//! ```
//! use saf_strategy::face::{FaceId, FaceScope};
//! use saf_strategy::host::MemoryHost;
//! use saf_strategy::packet::{Interest, Name};
//! use saf_strategy::selector::RankedSelector;
//! use saf_strategy::strategy::{Decision, SafStrategyBuilder};
//! use saf_strategy::table::{FibEntry, PitEntry};
//!
//! # fn example() -> saf_strategy::Result<()> {
//! let mut host = MemoryHost::new();
//! let mut strategy = SafStrategyBuilder::new()
//!     .selector(RankedSelector::new(1))
//!     .build()?;
//!
//! host.add_face(FaceId(1), FaceScope::NonLocal);
//! host.add_face(FaceId(2), FaceScope::NonLocal);
//! strategy.on_face_event(saf_strategy::face::FaceEvent::Added {
//!     face: FaceId(2),
//!     scope: FaceScope::NonLocal,
//! });
//!
//! let name = Name::parse("/video/seg=1")?;
//! let interest = Interest::new(name.clone());
//! let fib = FibEntry::new(Name::parse("/video")?).with_next_hop(FaceId(2), 10);
//! let mut entry = PitEntry::new(interest.clone());
//! host.accept_interest(&mut entry, FaceId(1));
//!
//! let decision = strategy.after_receive_interest(&mut host, FaceId(1), &interest, &fib, &mut entry);
//! assert_eq!(decision, Decision::Forwarded(FaceId(2)));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Retransmissions
//!
//! While an upstream copy is still outstanding, an Interest from a face not
//! yet seen for the name is only recorded: the outstanding copy already
//! covers it. The same face asking again means its earlier attempt has not
//! paid off, so the Interest is retried on faces not yet tried.

mod forwarding;
mod known_faces;
mod retransmission;
mod saf;

pub use forwarding::{
    choose_next_link, run_forward_loop, AdmissionPolicy, AlwaysAdmit, Candidate, ExclusionSet,
    ForwardRequest, LoopOutcome, SelectorAdmission,
};
pub use known_faces::KnownFaceTracker;
pub use retransmission::{Classification, RetransmissionClassifier};
pub use saf::{Decision, EntryState, SafStrategy, SafStrategyBuilder};
