//! Validation and likelihood matrix construction
//!
//! Both matrices have shape `(num_tracks, num_detections + 1)`, where the
//! first column corresponds to the null hypothesis. The likelihood matrix
//! holds the unnormalised hypothesis weights; the validation matrix is the
//! elementwise `weight > 0` predicate over it, so an entry is valid iff its
//! likelihood is strictly positive.

use std::collections::HashMap;

use nalgebra::DMatrix;

use crate::errors::MatrixError;
use crate::types::{Detection, HypothesisList, Track};

/// Build the validation and likelihood matrices from per-track hypotheses.
///
/// For every track, its null hypothesis writes column 0 and each detection
/// hypothesis writes column `j + 1`, where `j` is the position of the claimed
/// detection in `detections`. Row order follows `tracks`, column order
/// follows `detections`.
///
/// Every track is expected to carry a null hypothesis with positive weight,
/// which is what makes column 0 of the validation matrix all-true downstream.
///
/// # Errors
///
/// - [`MatrixError::UnknownDetection`] if a hypothesis claims a detection
///   that is not in `detections`. This is a caller bug and is never treated
///   as a zero-weight entry.
/// - [`MatrixError::MissingHypotheses`] if a track has no entry in
///   `hypotheses`.
pub fn build_matrices(
    tracks: &[Track],
    detections: &[Detection],
    hypotheses: &HashMap<u64, HypothesisList>,
) -> Result<(DMatrix<bool>, DMatrix<f64>), MatrixError> {
    let num_tracks = tracks.len();
    let num_detections = detections.len();

    let mut likelihood = DMatrix::zeros(num_tracks, num_detections + 1);
    for (i, track) in tracks.iter().enumerate() {
        let track_hypotheses =
            hypotheses
                .get(&track.id)
                .ok_or(MatrixError::MissingHypotheses {
                    track_id: track.id,
                })?;
        for hypothesis in track_hypotheses {
            match hypothesis.detection {
                None => likelihood[(i, 0)] = hypothesis.weight,
                Some(detection_id) => {
                    let j = detections
                        .iter()
                        .position(|d| d.id == detection_id)
                        .ok_or(MatrixError::UnknownDetection {
                            track_id: track.id,
                            detection_id,
                        })?;
                    likelihood[(i, j + 1)] = hypothesis.weight;
                }
            }
        }
    }

    let validation = likelihood.map(|w| w > 0.0);
    Ok((validation, likelihood))
}
