//! Lot genealogy library for tracking fungible quantities across a node
//! network.
//!
//! Every unit entering or moving through the network stays traceable
//! end-to-end: lots only split, never merge, and every split preserves the
//! node sequence and exact quantities on both halves.
//!
//! The crate exposes:
//! - [`LotGraph`]: mutation entry points (`introduce_supply`, `transfer`)
//!   plus the splitting engine they drive.
//! - The genealogy query layer: `origin`, `terminus`, `node_balance`,
//!   `provenance_summary`, `detailed_path`, `node_inventory`.
//! - [`GraphError`]: one variant per caller-visible failure kind.
//!
//! `LotGraph` mutation is not reentrant-safe; callers needing concurrent
//! access must serialize on one exclusive writer per graph.

pub mod config;
pub mod error;
pub mod graph;
pub mod ledger;
pub mod lot;
pub mod node_map;
pub mod query;

pub use config::{GraphConfig, DEFAULT_MAX_NODES};
pub use error::{GraphError, LinkSide, Result};
pub use graph::LotGraph;
pub use lot::{Lot, LotArena, LotId, NodeId, Quantity, Upstream};
pub use node_map::{NodeMap, NodeMapError};
pub use query::{LotStanding, LotState, ProvenanceSummary, TracedPath};
