//! Event handlers of the SAF forwarding strategy
//!
//! The host calls one handler per event and each runs to completion. Per
//! PIT entry the handlers drive the lifecycle
//! `Pending -> {Satisfied, Expired, Rejected}`; the known-face tracker entry
//! for a name is dropped on every terminal transition.

use super::forwarding::{run_forward_loop, AdmissionPolicy, ExclusionSet, ForwardRequest, LoopOutcome};
use super::known_faces::KnownFaceTracker;
use super::retransmission::{Classification, RetransmissionClassifier};
use crate::config::StrategyConfig;
use crate::error::{ConfigError, Result};
use crate::face::{FaceEvent, FaceEventHandlers, FaceId, SubscriptionHandle};
use crate::host::StrategyHost;
use crate::packet::{Data, Interest, Nack, NackReason};
use crate::selector::LinkSelector;
use crate::table::{FibEntry, PitEntry};
use parking_lot::Mutex;
use std::sync::Arc;

/// Lifecycle state of a PIT entry as seen by the strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Waiting for Data, NACK or expiry
    Pending,
    /// Data arrived
    Satisfied,
    /// Timed out
    Expired,
    /// Every candidate face was exhausted and downstream was NACKed
    Rejected,
}

/// Result of handling an Interest or a NACK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The Interest was sent on this face
    Forwarded(FaceId),
    /// Duplicate from a new downstream face; nothing was sent
    Suppressed,
    /// No face was left; downstream was NACKed and the entry rejected
    Rejected,
}

impl Decision {
    /// Entry state after this decision
    pub fn state(&self) -> EntryState {
        match self {
            Self::Forwarded(_) | Self::Suppressed => EntryState::Pending,
            Self::Rejected => EntryState::Rejected,
        }
    }
}

/// Adaptive forwarding strategy for one forwarder instance
pub struct SafStrategy<S> {
    config: StrategyConfig,
    selector: S,
    admission: Box<dyn AdmissionPolicy>,
    classifier: RetransmissionClassifier,
    known_faces: KnownFaceTracker,
}

impl<S: LinkSelector> SafStrategy<S> {
    /// Create a strategy using the admission mode from `config`
    pub fn new(config: StrategyConfig, selector: S) -> Self {
        let admission = config.admission.policy();
        let classifier = RetransmissionClassifier::new(config.rtx_detection);

        Self {
            config,
            selector,
            admission,
            classifier,
            known_faces: KnownFaceTracker::new(),
        }
    }

    /// Replace the admission policy
    pub fn with_admission(mut self, admission: Box<dyn AdmissionPolicy>) -> Self {
        self.admission = admission;
        self
    }

    /// The configuration this instance was built with
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// The link selector
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Mutable access to the link selector
    pub fn selector_mut(&mut self) -> &mut S {
        &mut self.selector
    }

    /// Faces currently known to be asking for each outstanding name
    pub fn known_faces(&self) -> &KnownFaceTracker {
        &self.known_faces
    }

    /// Handle an Interest the host has already recorded in `entry`
    pub fn after_receive_interest<H>(
        &mut self,
        host: &mut H,
        in_face: FaceId,
        interest: &Interest,
        fib: &FibEntry,
        entry: &mut PitEntry,
    ) -> Decision
    where
        H: StrategyHost + ?Sized,
    {
        tracing::debug!(%interest, from = %in_face, "interest received");

        let classification =
            self.classifier
                .classify(&mut self.known_faces, entry, in_face, host.now());

        let excluded = match classification {
            Classification::FirstRequest => ExclusionSet::new(),
            Classification::Retransmission => {
                tracing::debug!(%interest, from = %in_face, "retransmission, excluding tried faces");
                ExclusionSet::from_faces(entry.out_faces())
            },
            Classification::Duplicate => {
                tracing::debug!(%interest, from = %in_face, "suppressing duplicate");
                return Decision::Suppressed;
            },
        };

        self.attempt_forward(host, entry, fib, excluded)
    }

    /// Handle a NACK returned by an upstream face
    ///
    /// Every face the Interest already went out on is excluded, regardless
    /// of retransmission detection.
    pub fn after_receive_nack<H>(
        &mut self,
        host: &mut H,
        in_face: FaceId,
        nack: &Nack,
        fib: &FibEntry,
        entry: &mut PitEntry,
    ) -> Decision
    where
        H: StrategyHost + ?Sized,
    {
        tracing::debug!(interest = %nack.interest, reason = %nack.reason, from = %in_face, "nack received");

        let excluded = ExclusionSet::from_faces(entry.out_faces());
        self.attempt_forward(host, entry, fib, excluded)
    }

    /// Handle Data arriving on `in_face` before the host satisfies `entry`
    pub fn before_satisfy_interest<H>(
        &mut self,
        host: &mut H,
        entry: &PitEntry,
        in_face: FaceId,
        data: &Data,
    ) -> EntryState
    where
        H: StrategyHost + ?Sized,
    {
        for record in entry.out_records() {
            if record.face != in_face {
                self.selector
                    .notify_attempt_failed(record.face, entry.interest());
            }
        }

        self.selector.notify_satisfied(entry, in_face, data);
        self.known_faces.forget(entry.name());
        tracing::debug!(name = %entry.name(), from = %in_face, "satisfied");

        host.satisfy_pending_interest(entry, in_face, data);
        EntryState::Satisfied
    }

    /// Handle `entry` timing out before the host drops it
    pub fn before_expire_pending_interest<H>(&mut self, host: &mut H, entry: &PitEntry) -> EntryState
    where
        H: StrategyHost + ?Sized,
    {
        self.selector.notify_expired(entry);
        self.known_faces.forget(entry.name());
        tracing::debug!(name = %entry.name(), "expired");

        host.expire_pending_interest(entry);
        EntryState::Expired
    }

    /// Keep the selector's view of available faces current
    pub fn on_face_event(&mut self, event: FaceEvent) {
        match event {
            FaceEvent::Added { face, .. } => self.selector.on_link_added(face),
            FaceEvent::Removed { face } => self.selector.on_link_removed(face),
        }
    }

    fn attempt_forward<H>(
        &mut self,
        host: &mut H,
        entry: &mut PitEntry,
        fib: &FibEntry,
        mut excluded: ExclusionSet,
    ) -> Decision
    where
        H: StrategyHost + ?Sized,
    {
        let origin = entry.origin_faces();
        let interest = entry.interest().clone();
        let request = ForwardRequest {
            interest: &interest,
            fib,
            origin: &origin,
        };

        let outcome = {
            let host = &*host;
            run_forward_loop(
                &mut self.selector,
                self.admission.as_ref(),
                &request,
                &mut excluded,
                |face| host.face_scope(face).is_some(),
            )
        };

        match outcome {
            LoopOutcome::Sent(face) => {
                tracing::debug!(%interest, to = %face, "forwarding");
                host.send_interest(entry, face);
                Decision::Forwarded(face)
            },
            LoopOutcome::Exhausted => {
                self.reject(host, entry, &excluded);
                Decision::Rejected
            },
        }
    }

    fn reject<H>(&mut self, host: &mut H, entry: &PitEntry, excluded: &ExclusionSet)
    where
        H: StrategyHost + ?Sized,
    {
        for face in excluded.iter() {
            self.selector.notify_candidate_rejected(entry, Some(face));
        }
        self.selector.notify_candidate_rejected(entry, None);

        self.known_faces.forget(entry.name());
        tracing::debug!(interest = %entry.interest(), tried = excluded.len(), "no face left, sending nack");

        broadcast_nack(host, entry);
        host.reject_pending_interest(entry);
    }
}

impl<S: LinkSelector + Send + 'static> SafStrategy<S> {
    /// Subscribe a shared strategy to the host's face notifications
    pub fn attach(strategy: &Arc<Mutex<Self>>, events: &FaceEventHandlers) -> SubscriptionHandle {
        let strategy = Arc::clone(strategy);
        events.subscribe(move |event| strategy.lock().on_face_event(event))
    }
}

/// NACK every non-local downstream face of `entry` with reason congestion
fn broadcast_nack<H>(host: &mut H, entry: &PitEntry)
where
    H: StrategyHost + ?Sized,
{
    let nack = Nack::new(entry.interest().clone(), NackReason::Congestion);

    for record in entry.in_records() {
        if !record.scope.is_local() {
            host.send_nack(record.face, &nack);
        }
    }
}

/// Builder for [`SafStrategy`]
pub struct SafStrategyBuilder<S> {
    config: StrategyConfig,
    selector: Option<S>,
    admission: Option<Box<dyn AdmissionPolicy>>,
}

impl<S: LinkSelector> SafStrategyBuilder<S> {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: StrategyConfig::default(),
            selector: None,
            admission: None,
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: StrategyConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the link selector
    pub fn selector(mut self, selector: S) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Override the admission policy implied by the configuration
    pub fn admission(mut self, admission: Box<dyn AdmissionPolicy>) -> Self {
        self.admission = Some(admission);
        self
    }

    /// Validate and build the strategy
    pub fn build(self) -> Result<SafStrategy<S>> {
        self.config.validate()?;

        let selector = self.selector.ok_or_else(|| ConfigError::MissingRequiredField {
            field: "selector".to_string(),
        })?;

        let strategy = SafStrategy::new(self.config, selector);
        Ok(match self.admission {
            Some(admission) => strategy.with_admission(admission),
            None => strategy,
        })
    }
}

impl<S: LinkSelector> Default for SafStrategyBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
