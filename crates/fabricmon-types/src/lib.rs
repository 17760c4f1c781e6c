//! Common types for the FabricMon topology pipeline.
//!
//! This crate provides type-safe representations of the entities shared
//! between the per-device validator (Stage 1) and the graph reconciler
//! (Stage 2):
//!
//! - [`DeviceNode`]: a graph node for one fabric device or endpoint host
//! - [`Link`]: an undirected adjacency between two device ports
//! - [`NeighborRecord`]: one LLDP advertisement seen on a local interface
//! - [`DeclaredEdge`] / [`DeclaredTopology`]: operator-declared adjacencies
//! - [`ValidationRow`] / [`PortVerdict`]: Stage 1 per-interface results
//! - [`PortState`]: administrative/operational port state

mod edge;
mod link;
mod neighbor;
mod node;
mod port;
mod validation;

pub use edge::{DeclaredEdge, DeclaredTopology, Endpoint};
pub use link::{Link, LinkPresence};
pub use neighbor::NeighborRecord;
pub use node::{DeviceNode, NodeIcon};
pub use port::PortState;
pub use validation::{PortVerdict, ValidationRow};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid port state: {0}")]
    InvalidPortState(String),

    #[error("invalid node icon: {0}")]
    InvalidNodeIcon(String),
}
