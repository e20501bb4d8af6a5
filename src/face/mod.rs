//! Face identifiers, scopes and face-table notifications

mod events;

pub use events::{FaceEventCallback, FaceEventHandlers, SubscriptionHandle};

use std::fmt;

/// Opaque handle into the host's face table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u64);

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face[{}]", self.0)
    }
}

impl From<u64> for FaceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Whether a face leads to a local application or into the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FaceScope {
    /// Network-facing link
    #[default]
    NonLocal,
    /// Local application face
    Local,
}

impl FaceScope {
    /// Whether this is a local application face
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

/// Face-table change published by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceEvent {
    /// A face was added to the face table
    Added {
        /// The new face
        face: FaceId,
        /// Its scope
        scope: FaceScope,
    },
    /// A face is about to be removed from the face table
    Removed {
        /// The departing face
        face: FaceId,
    },
}

impl FaceEvent {
    /// The face this event is about
    pub fn face(&self) -> FaceId {
        match self {
            Self::Added { face, .. } | Self::Removed { face } => *face,
        }
    }
}
