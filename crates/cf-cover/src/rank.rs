//! Cover-spot ranking.
//!
//! Scoring is a two-stage rebasing. First an edge reference is chosen among
//! the candidates using their distance to the target. Then every candidate is
//! ordered by distance to that edge, and scores are spread evenly over
//! `[0, 1]` in that order: the spot nearest the edge scores 0, the farthest 1.

use nalgebra::Point3;
use tracing::trace;

use crate::config::EdgeSelection;
use crate::result::CoverSpot;

/// Index of the candidate used as the edge reference.
///
/// With [`EdgeSelection::TrailingPair`] only the last two candidates are
/// compared. The partitioner appends the outermost pair last, so this picks
/// the outer flank farther from the target, preferring the last candidate
/// when both are equally far. [`EdgeSelection::FarthestFromTarget`]
/// considers every candidate and keeps the first one on ties.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn edge_reference(
    candidates: &[Point3<f64>],
    target: &Point3<f64>,
    selection: EdgeSelection,
) -> Option<usize> {
    let distance = |i: usize| nalgebra::distance(&candidates[i], target);

    match (selection, candidates.len()) {
        (_, 0) => None,
        (_, 1) => Some(0),
        (EdgeSelection::TrailingPair, n) => {
            if distance(n - 2) > distance(n - 1) {
                Some(n - 2)
            } else {
                Some(n - 1)
            }
        }
        (EdgeSelection::FarthestFromTarget, n) => {
            let mut best = 0;
            for i in 1..n {
                if distance(i) > distance(best) {
                    best = i;
                }
            }
            Some(best)
        }
    }
}

/// Scores every candidate in `[0, 1]`.
///
/// The returned spots keep the candidates' order. A single candidate scores
/// 1.0; no candidates yield an empty vector. Candidates equally far from the
/// edge keep their relative order when ranked.
///
/// # Example
///
/// ```
/// use cf_cover::{EdgeSelection, rank_spots};
/// use nalgebra::Point3;
///
/// let spots = rank_spots(
///     &[
///         Point3::new(0.0, -150.0, 0.0),
///         Point3::new(202.0, -150.0, 0.0),
///         Point3::new(-202.0, -150.0, 0.0),
///     ],
///     &Point3::new(0.0, 1000.0, 0.0),
///     EdgeSelection::TrailingPair,
/// );
///
/// let scores: Vec<f64> = spots.iter().map(|s| s.score).collect();
/// assert_eq!(scores, vec![0.5, 1.0, 0.0]);
/// ```
#[must_use]
pub fn rank_spots(
    candidates: &[Point3<f64>],
    target: &Point3<f64>,
    selection: EdgeSelection,
) -> Vec<CoverSpot> {
    let Some(edge) = edge_reference(candidates, target, selection) else {
        return Vec::new();
    };
    if candidates.len() == 1 {
        return vec![CoverSpot::new(candidates[0], 1.0)];
    }

    let edge_point = candidates[edge];
    let mut order: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(i, p)| (i, nalgebra::distance(p, &edge_point)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    #[allow(clippy::cast_precision_loss)]
    let denominator = (candidates.len() - 1) as f64;

    let mut spots: Vec<CoverSpot> = candidates
        .iter()
        .map(|p| CoverSpot::new(*p, 0.0))
        .collect();
    for (rank, (index, _)) in order.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let score = rank as f64 / denominator;
        spots[*index].score = score;
    }

    trace!(candidates = candidates.len(), edge, "Ranked cover spots");

    spots
}
