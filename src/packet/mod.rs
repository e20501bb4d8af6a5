//! Packet model: Interests, Data and negative acknowledgements
//!
//! Only the fields the forwarding strategy reads are modelled. Wire encoding
//! is the host's business.

mod name;

pub use name::Name;

use rand::RngCore;
use std::fmt;
use std::time::Duration;

/// Default Interest lifetime
pub const DEFAULT_INTEREST_LIFETIME: Duration = Duration::from_millis(4000);

/// A request for named content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    /// Requested name
    pub name: Name,
    /// Random nonce used by the host for loop detection
    pub nonce: u32,
    /// How long the request stays pending upstream
    pub lifetime: Duration,
}

impl Interest {
    /// Create an Interest with a fresh random nonce and the default lifetime
    pub fn new(name: Name) -> Self {
        Self {
            name,
            nonce: rand::thread_rng().next_u32(),
            lifetime: DEFAULT_INTEREST_LIFETIME,
        }
    }

    /// Set the lifetime
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Set the nonce
    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.nonce = nonce;
        self
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?nonce={:08x}", self.name, self.nonce)
    }
}

/// Content satisfying an Interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    /// Content name
    pub name: Name,
    /// Payload bytes
    pub content: Vec<u8>,
}

impl Data {
    /// Create a Data packet
    pub fn new(name: Name, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name,
            content: content.into(),
        }
    }
}

/// Why a request could not be satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NackReason {
    /// No upstream capacity left for this request
    Congestion,
    /// The request was detected as a duplicate
    Duplicate,
    /// No route towards the content
    NoRoute,
}

impl fmt::Display for NackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Congestion => write!(f, "Congestion"),
            Self::Duplicate => write!(f, "Duplicate"),
            Self::NoRoute => write!(f, "NoRoute"),
        }
    }
}

/// Negative acknowledgement carrying the rejected Interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nack {
    /// The Interest being rejected
    pub interest: Interest,
    /// Rejection reason
    pub reason: NackReason,
}

impl Nack {
    /// Create a NACK for an Interest
    pub fn new(interest: Interest, reason: NackReason) -> Self {
        Self { interest, reason }
    }
}
