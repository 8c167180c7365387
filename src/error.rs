//! Error types for the conversion core
//!
//! All three kinds are deterministic, input-dependent conditions; none is
//! retried. `SizeMismatch` and `EmptyClause` double as certificates that the
//! two graphs cannot be isomorphic.

use thiserror::Error;

/// Which cached graph quantity failed the precondition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeQuantity {
    Vertices,
    Edges,
}

impl std::fmt::Display for SizeQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeQuantity::Vertices => write!(f, "vertices"),
            SizeQuantity::Edges => write!(f, "edges"),
        }
    }
}

/// Errors produced by the conversion core.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The two graphs disagree on a basic count and cannot be isomorphic.
    #[error("mismatched number of {quantity} in graphs: {left} and {right}; the graphs are certainly not isomorphic")]
    SizeMismatch {
        quantity: SizeQuantity,
        left: usize,
        right: usize,
    },

    /// Inconsistent or malformed input data (non-square matrix, bad literal, ...).
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// Simplification pruned every candidate image of one source vertex.
    ///
    /// Vertex numbers in the message are 1-based to match the file formats.
    #[error(
        "simplification produced an empty clause: vertex {} of graph 1 matches no vertex of graph 2 \
         (degree, neighbor-degree sums to depth {depth}, and color all checked); \
         the graphs are certainly not isomorphic",
        vertex + 1
    )]
    EmptyClause { vertex: usize, depth: usize },
}

impl EncodeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        EncodeError::MalformedInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clause_message_is_one_based() {
        let err = EncodeError::EmptyClause {
            vertex: 0,
            depth: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("vertex 1 of graph 1"));
        assert!(msg.contains("depth 5"));
    }

    #[test]
    fn test_size_mismatch_message() {
        let err = EncodeError::SizeMismatch {
            quantity: SizeQuantity::Edges,
            left: 3,
            right: 4,
        };
        assert!(err.to_string().contains("edges in graphs: 3 and 4"));
    }
}
