//! Edge records: directed, typed, weighted, labeled, timestamped.

use crate::arena::ArenaHandle;

/// Which adjacency index (or both) a lookup or filter should walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Forward index only (edges where the queried entity is the source).
    Out,
    /// Reverse index only (edges where the queried entity is the target).
    In,
    /// Forward entries, then reverse entries.
    Both,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub id: u64,
    pub source: u64,
    pub target: u64,
    pub relation_type_id: u64,
    pub weight: f64,
    pub direction: Direction,
    pub label: Option<ArenaHandle>,
    pub timestamp: u64,
}

/// Owned snapshot of an edge, safe to hold after the store's lock is released.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    /// Edge id.
    pub id: u64,
    /// Source entity id.
    pub source: u64,
    /// Target entity id.
    pub target: u64,
    /// The relation type this edge instantiates.
    pub relation_type_id: u64,
    /// Edge weight.
    pub weight: f64,
    /// The direction this edge was recorded with.
    pub direction: Direction,
    /// Optional human-readable label.
    pub label: Option<String>,
    /// Milliseconds since the Unix epoch at creation time.
    pub timestamp: u64,
}
