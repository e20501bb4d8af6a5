//! # saf-strategy
//!
//! Adaptive per-request forwarding for named-content network nodes.
//!
//! The crate plugs into a forwarding daemon that already owns faces, the
//! pending Interest table and the FIB. For every pending Interest it asks a
//! pluggable [`LinkSelector`] for upstream candidates, suppresses duplicate
//! requests from new downstream faces, retries genuine retransmissions on
//! untried faces, and NACKs downstream when every candidate is exhausted.
//!
//! ## Quick Start
//!
//! ```
//! use saf_strategy::{RankedSelector, SafStrategyBuilder, StrategyConfig};
//!
//! let config = StrategyConfig::new().with_prefix_component(2);
//! let strategy = SafStrategyBuilder::new()
//!     .selector(RankedSelector::new(config.prefix_component))
//!     .config(config)
//!     .build()
//!     .unwrap();
//!
//! assert!(strategy.known_faces().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod face;
pub mod host;
pub mod packet;
pub mod selector;
pub mod strategy;
pub mod table;

// Re-export main types
pub use config::{load_config, save_config, AdmissionMode, StrategyConfig};
pub use error::{ConfigError, PacketError, Result, StorageError, StrategyError};
pub use face::{FaceEvent, FaceId, FaceScope};
pub use host::{MemoryHost, StrategyHost};
pub use packet::{Data, Interest, Nack, NackReason, Name};
pub use selector::{LinkSelector, RankedSelector};
pub use strategy::{
    AdmissionPolicy, Decision, EntryState, ExclusionSet, KnownFaceTracker, SafStrategy,
    SafStrategyBuilder,
};
pub use table::{FibEntry, PitEntry};
