//! Track, detection and hypothesis input types
//!
//! These are the inputs to matrix construction. Tracks and detections carry
//! external identities only; state estimates, gating and weight computation
//! happen upstream in the filter that produced the hypotheses.

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A persistent tracked object awaiting detection assignment this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    /// External track identity
    pub id: u64,
}

impl Track {
    /// Create a track with the given external identity
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

/// A new measurement competing for assignment to at most one track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Detection {
    /// External detection identity
    pub id: u64,
}

impl Detection {
    /// Create a detection with the given external identity
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

/// A weighted claim that a track corresponds to a specific detection, or to
/// none (the null hypothesis)
///
/// Weights must be strictly positive for the hypothesis to be feasible; a
/// zero weight produces a `false` validation entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hypothesis {
    /// The claimed detection, or `None` for the null hypothesis
    pub detection: Option<u64>,
    /// Unnormalised association weight
    pub weight: f64,
}

impl Hypothesis {
    /// Create a null hypothesis (track associates with no detection)
    pub fn null(weight: f64) -> Self {
        Self {
            detection: None,
            weight,
        }
    }

    /// Create a hypothesis claiming the detection with the given identity
    pub fn detected(detection_id: u64, weight: f64) -> Self {
        Self {
            detection: Some(detection_id),
            weight,
        }
    }

    /// Whether this is the null hypothesis
    #[inline]
    pub fn is_null(&self) -> bool {
        self.detection.is_none()
    }
}

/// Ordered hypothesis sequence for one track
///
/// SmallVec avoids heap allocation for typical gate sizes (null plus a
/// handful of detections).
pub type HypothesisList = SmallVec<[Hypothesis; 4]>;
