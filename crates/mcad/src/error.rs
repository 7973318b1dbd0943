//! Error types for the assembly engine.

use thiserror::Error;

/// Errors that can occur while building, calculating, or emitting a tree.
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter could not be resolved anywhere in the tree.
    #[error("missing parameter `{key}` for {node}")]
    MissingParam {
        /// Name of the node that asked for the parameter.
        node: String,
        /// The parameter key.
        key: String,
    },

    /// A parameter resolved to a value of the wrong shape.
    #[error("parameter `{key}` for {node} is not a {expected}")]
    ParamType {
        /// Name of the node that asked for the parameter.
        node: String,
        /// The parameter key.
        key: String,
        /// What the caller expected (e.g. "number").
        expected: &'static str,
    },

    /// A part was configured with a style or size it does not support.
    #[error("unsupported {what} `{value}` for {node}")]
    Unsupported {
        /// Name of the offending node.
        node: String,
        /// What kind of thing was unsupported (e.g. "head style").
        what: &'static str,
        /// The offending value.
        value: String,
    },

    /// The node does not generate geometry (plain grouping assembly).
    #[error("{node} does not generate geometry")]
    NoGeometry {
        /// Name of the node.
        node: String,
    },

    /// Geometry or derived data was requested from a node that has not been
    /// calculated yet.
    #[error("{node} has not been calculated")]
    NotCalculated {
        /// Name of the node.
        node: String,
    },

    /// The calculation fixed point was not reached within the retry budget.
    #[error("calculation did not converge; still failing: {}", failed.join(", "))]
    Unresolved {
        /// Names of the nodes whose `calculate` never reported done.
        failed: Vec<String>,
    },

    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization error occurred during persistence.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, Error>;
