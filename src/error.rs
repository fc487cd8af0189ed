//! Error types for graph generation and analysis.

use thiserror::Error;

/// Errors returned while generating or measuring a graph.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    /// A generator parameter is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The graph has too few vertices for the requested measurement.
    #[error("graph with {vertex_count} vertices is too small to measure {measure}")]
    DegenerateGraph {
        /// Number of vertices in the graph.
        vertex_count: usize,
        /// Name of the measurement that was requested.
        measure: &'static str,
    },
    /// A pair of vertices has no path between them.
    #[error("graph is disconnected: {unreachable} vertex pairs have no connecting path")]
    Disconnected {
        /// Number of unordered pairs found to be unreachable.
        unreachable: usize,
    },
}

impl GraphError {
    /// Returns a stable, machine-readable error code for the variant.
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::InvalidParameter { .. } => GraphErrorCode::InvalidParameter,
            Self::DegenerateGraph { .. } => GraphErrorCode::DegenerateGraph,
            Self::Disconnected { .. } => GraphErrorCode::Disconnected,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Machine-readable error codes for [`GraphError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphErrorCode {
    /// A generator parameter is outside its valid domain.
    InvalidParameter,
    /// The graph has too few vertices for the requested measurement.
    DegenerateGraph,
    /// A pair of vertices has no path between them.
    Disconnected,
}

impl GraphErrorCode {
    /// Returns the symbolic representation of the error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidParameter => "GRAPH_INVALID_PARAMETER",
            Self::DegenerateGraph => "GRAPH_DEGENERATE",
            Self::Disconnected => "GRAPH_DISCONNECTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        let err = GraphError::invalid("k", "must be even");
        assert_eq!(err.code(), GraphErrorCode::InvalidParameter);
        assert_eq!(err.code().as_str(), "GRAPH_INVALID_PARAMETER");
        assert_eq!(err.to_string(), "invalid parameter `k`: must be even");

        let err = GraphError::DegenerateGraph {
            vertex_count: 1,
            measure: "diameter",
        };
        assert_eq!(err.code(), GraphErrorCode::DegenerateGraph);
    }
}
