//! Declared-topology edge types.
//!
//! A [`DeclaredEdge`] is an adjacency the operator asserts should exist,
//! sourced from `topology.dot`. Equality is direction-insensitive:
//! `(A,pA) -- (B,pB)` and `(B,pB) -- (A,pA)` are the same edge. This is
//! implemented by canonicalizing the endpoint order at construction time,
//! so the derived `Eq`/`Hash` give set semantics for free.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One side of a declared edge: a device and one of its ports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Device name, or the literal `"None"` sentinel for an edge that
    /// documents "nothing should be connected here".
    pub device: String,
    /// Local interface name on `device`.
    pub port: String,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(device: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            port: port.into(),
        }
    }
}

/// An undirected operator-declared adjacency between two device ports.
///
/// Endpoints are stored in canonical (sorted) order so the same physical
/// edge hashes identically regardless of the orientation it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredEdge {
    a: Endpoint,
    b: Endpoint,
}

impl DeclaredEdge {
    /// Creates an edge, canonicalizing endpoint order.
    pub fn new(x: Endpoint, y: Endpoint) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// First endpoint in canonical order.
    pub fn a(&self) -> &Endpoint {
        &self.a
    }

    /// Second endpoint in canonical order.
    pub fn b(&self) -> &Endpoint {
        &self.b
    }

    /// Returns the `(local, remote)` endpoint views for every side of
    /// this edge that sits on `device`. Usually zero or one entry; a
    /// self-edge yields both orientations.
    pub fn sides_for(&self, device: &str) -> Vec<(&Endpoint, &Endpoint)> {
        let mut sides = Vec::new();
        if self.a.device == device {
            sides.push((&self.a, &self.b));
        }
        if self.b.device == device {
            sides.push((&self.b, &self.a));
        }
        sides
    }
}

/// The full set of declared edges, preserving first-encounter order.
///
/// Iteration order matters downstream (validator rows and synthesized
/// missing links follow declaration order), so a plain `HashSet` is not
/// enough; the set index is kept alongside a vector for ordered walks.
#[derive(Debug, Clone, Default)]
pub struct DeclaredTopology {
    edges: Vec<DeclaredEdge>,
    index: HashSet<DeclaredEdge>,
}

impl DeclaredTopology {
    /// Creates an empty declared topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an edge, collapsing duplicates (in either orientation).
    /// Returns true if the edge was new.
    pub fn insert(&mut self, edge: DeclaredEdge) -> bool {
        if self.index.insert(edge.clone()) {
            self.edges.push(edge);
            true
        } else {
            false
        }
    }

    /// True if the given device/port pair is declared, in either
    /// orientation.
    pub fn contains_pair(&self, dev_a: &str, port_a: &str, dev_b: &str, port_b: &str) -> bool {
        let probe = DeclaredEdge::new(Endpoint::new(dev_a, port_a), Endpoint::new(dev_b, port_b));
        self.index.contains(&probe)
    }

    /// Walks edges in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &DeclaredEdge> {
        self.edges.iter()
    }

    /// Number of distinct declared edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if no edges were declared.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(da: &str, pa: &str, db: &str, pb: &str) -> DeclaredEdge {
        DeclaredEdge::new(Endpoint::new(da, pa), Endpoint::new(db, pb))
    }

    #[test]
    fn test_edge_equality_is_direction_insensitive() {
        assert_eq!(
            edge("sw1", "swp1", "sw2", "swp3"),
            edge("sw2", "swp3", "sw1", "swp1")
        );
        assert_ne!(
            edge("sw1", "swp1", "sw2", "swp3"),
            edge("sw1", "swp3", "sw2", "swp1")
        );
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let mut topo = DeclaredTopology::new();
        assert!(topo.insert(edge("sw1", "swp1", "sw2", "swp1")));
        assert!(!topo.insert(edge("sw2", "swp1", "sw1", "swp1")));
        assert_eq!(topo.len(), 1);
    }

    #[test]
    fn test_contains_pair_both_orientations() {
        let mut topo = DeclaredTopology::new();
        topo.insert(edge("sw1", "swp1", "sw2", "swp3"));
        assert!(topo.contains_pair("sw1", "swp1", "sw2", "swp3"));
        assert!(topo.contains_pair("sw2", "swp3", "sw1", "swp1"));
        assert!(!topo.contains_pair("sw1", "swp3", "sw2", "swp1"));
    }

    #[test]
    fn test_sides_for_device() {
        let e = edge("sw1", "swp1", "sw2", "swp3");
        let sides = e.sides_for("sw1");
        assert_eq!(sides.len(), 1);
        assert_eq!(sides[0].0.port, "swp1");
        assert_eq!(sides[0].1.device, "sw2");
        assert!(e.sides_for("sw9").is_empty());
    }

    #[test]
    fn test_sides_for_self_edge() {
        let e = edge("sw1", "swp1", "sw1", "swp2");
        assert_eq!(e.sides_for("sw1").len(), 2);
    }

    #[test]
    fn test_iteration_preserves_declaration_order() {
        let mut topo = DeclaredTopology::new();
        topo.insert(edge("sw3", "swp1", "sw4", "swp1"));
        topo.insert(edge("sw1", "swp1", "sw2", "swp1"));
        let devs: Vec<_> = topo.iter().map(|e| e.a().device.clone()).collect();
        assert_eq!(devs, vec!["sw3", "sw1"]);
    }
}
