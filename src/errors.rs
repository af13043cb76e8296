//! Error types for matrix construction and net mutation
//!
//! Every failure here reflects a caller contract violation, not a transient
//! condition: matrix-build lookups fail when a hypothesis references data the
//! caller never supplied, and net mutations fail when the caller passes node
//! handles that belong to a different net (or to no net at all). Nothing is
//! silently repaired.

use std::fmt;

/// Errors that can occur while building validation/likelihood matrices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A hypothesis references a detection absent from the detection sequence
    UnknownDetection {
        /// Id of the track whose hypothesis failed to resolve
        track_id: u64,
        /// Id of the detection that could not be found
        detection_id: u64,
    },

    /// A track has no entry in the supplied hypothesis map
    MissingHypotheses {
        /// Id of the track without hypotheses
        track_id: u64,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::UnknownDetection {
                track_id,
                detection_id,
            } => {
                write!(
                    f,
                    "track {} references detection {} which is not in the detection sequence",
                    track_id, detection_id
                )
            }
            MatrixError::MissingHypotheses { track_id } => {
                write!(f, "track {} has no hypothesis sequence", track_id)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Errors that can occur while growing a [`HypothesisNet`](crate::HypothesisNet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// An endpoint of `add_node`/`add_edge` does not belong to the net
    UnknownNode {
        /// The offending node index
        index: usize,
        /// Number of nodes currently in the net
        num_nodes: usize,
    },
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::UnknownNode { index, num_nodes } => {
                write!(
                    f,
                    "node index {} is not in the net ({} nodes present)",
                    index, num_nodes
                )
            }
        }
    }
}

impl std::error::Error for NetError {}
