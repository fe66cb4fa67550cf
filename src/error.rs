//! Error taxonomy shared by the graph container and its algorithms.
//!
//! Every failure here is a deterministic function of the operation's input
//! and the graph's current state; operations detect them before mutating, so
//! a returned error always leaves the graph exactly as it was.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, GraphError>;

/// Failures raised by container operations and graph algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GraphError {
    /// A vertex with an equal payload is already present.
    #[error("vertex already present in graph")]
    DuplicateVertex,

    /// An edge with the same ordered endpoint pair is already present.
    #[error("edge already present between the given endpoints")]
    DuplicateEdge,

    /// The referenced vertex is not a member of the graph.
    #[error("vertex not found in graph")]
    VertexNotFound,

    /// No edge exists between the given ordered endpoint pair.
    #[error("edge not found in graph")]
    EdgeNotFound,

    /// The vertex still has incident edges and cannot be removed.
    #[error("vertex still has incident edges")]
    VertexInUse,

    /// A spanning algorithm ran out of reachable vertices before covering
    /// the graph: the start vertex's component does not span all vertices.
    #[error("graph has disconnected components")]
    Disconnected,

    /// An edge weight was rejected (negative where forbidden, or not
    /// finite). The offending value is widened to `f64` for reporting.
    #[error("edge weight {value} is negative or not finite")]
    InvalidWeight {
        /// The rejected weight.
        value: f64,
    },

    /// A vertex position produced a non-finite coordinate.
    #[error("vertex coordinate is not finite")]
    InvalidCoordinate,
}
