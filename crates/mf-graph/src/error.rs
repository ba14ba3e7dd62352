//! Graph-specific error types.

use mf_core::NodeId;
use thiserror::Error;

use crate::validate::ValidationError;

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised by graph mutations.
///
/// All of them are locally recoverable: a failed operation leaves the
/// graph exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The operation referenced a node that is not in the graph.
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    /// `connect(x, x)` was requested.
    #[error("Self-loop rejected on node {id}")]
    SelfLoopRejected { id: NodeId },

    /// The edge would close a cycle while cycles are forbidden.
    #[error("Edge {from} -> {to} would create a cycle")]
    CycleRejected { from: NodeId, to: NodeId },

    /// Every node ordinal up to `n4294967295` has been handed out.
    #[error("Node id space exhausted")]
    IdsExhausted,

    /// A replacement node collection failed structural validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
