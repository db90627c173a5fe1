//! Cover-spot partitioning.
//!
//! A cover face is split into a symmetric fan of stand-points: the zone
//! center first, then pairs on either side, innermost pair first. Pair `i`
//! sits at `origin ± 2 * lateral * (1 + separation * i)`. At most
//! [`MAX_PARTITIONS`] partitions are laid out per face; wider faces keep the
//! innermost pairs.

use nalgebra::{Point3, Vector3};
use tracing::{debug, trace};

use crate::config::MAX_PARTITIONS;
use crate::face::CoverFace;
use crate::transform::Transform;

/// Splits a face of `cover_width` into unscored candidate positions.
///
/// `lateral` is in the obstacle's local space and is rotated (not scaled)
/// into world space. Faces no wider than `min_width` yield only `origin`,
/// and no face yields more than `MAX_PARTITIONS + 1` spots.
///
/// # Example
///
/// ```
/// use cf_cover::{Transform, partition_face};
/// use nalgebra::{Point3, Vector3};
///
/// let spots = partition_face(
///     &Point3::new(0.0, -150.0, 0.0),
///     &Vector3::x(),
///     &Transform::identity(),
///     300.0,
///     100.0,
/// );
///
/// assert_eq!(spots.len(), 3);
/// assert!((spots[1].x - 202.0).abs() < 1e-9);
/// assert!((spots[2].x + 202.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn partition_face(
    origin: &Point3<f64>,
    lateral: &Vector3<f64>,
    transform: &Transform,
    cover_width: f64,
    min_width: f64,
) -> Vec<Point3<f64>> {
    let mut spots = vec![*origin];

    if cover_width.is_nan() || cover_width <= min_width {
        return spots;
    }

    let partitions = (cover_width / min_width).floor();
    if !partitions.is_finite() {
        return spots;
    }
    let separation = cover_width / partitions;

    let Some(direction) = transform
        .transform_vector_no_scale(lateral)
        .try_normalize(f64::EPSILON)
    else {
        return spots;
    };

    let half = (partitions / 2.0).floor();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let (pairs, clamped) = {
        let max_pairs = (MAX_PARTITIONS / 2) as f64;
        (half.min(max_pairs) as usize, half > max_pairs)
    };
    if clamped {
        debug!(
            width = cover_width,
            min_width, partitions, pairs, "Partition count clamped"
        );
    }
    spots.reserve(pairs.saturating_mul(2));

    for i in 1..=pairs {
        #[allow(clippy::cast_precision_loss)]
        let offset = direction * (1.0 + separation * i as f64);
        spots.push(origin + offset * 2.0);
        spots.push(origin - offset * 2.0);
    }

    trace!(
        width = cover_width,
        partitions,
        separation,
        spots = spots.len(),
        "Partitioned cover face"
    );

    spots
}

/// Partitions a selected cover face.
///
/// Faces without a lateral direction (top and bottom) yield their zone
/// center alone.
#[must_use]
pub fn partition_cover_face(
    face: &CoverFace,
    transform: &Transform,
    min_width: f64,
) -> Vec<Point3<f64>> {
    match face.lateral {
        Some(lateral) => partition_face(
            &face.origin(),
            &lateral,
            transform,
            face.cover_width,
            min_width,
        ),
        None => vec![face.origin()],
    }
}
