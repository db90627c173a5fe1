//! Cover face selection.
//!
//! Every obstacle is approximated by its local bounding box. Of the six box
//! faces, the selector picks the one that best shields the agent from the
//! target:
//!
//! 1. Face centers go to world space through the full transform; normals
//!    through the rotation only.
//! 2. Faces whose outward normal points toward the target side are
//!    ineligible (`normal · (center - target) < 0`).
//! 3. Each face is scored `distance * (1 - alignment)`, where `alignment` is
//!    the cosine between the normal and the direction to the agent. Close
//!    faces that point at the agent score lowest.
//! 4. The lowest-scoring eligible face wins; ties keep the earlier face.
//!
//! The winner is thickened into a cover zone that extends
//! [`CoverConfig::supplied_depth`] outward from the face.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::{BoundingBox, OrientedBox};
use crate::config::{CapFacePolicy, CoverConfig};
use crate::transform::Transform;

/// One of the six sides of a box, in the order -Y, +Y, -X, +X, -Z, +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaceIndex {
    /// Face at the minimum local Y.
    NegY,
    /// Face at the maximum local Y.
    PosY,
    /// Face at the minimum local X.
    NegX,
    /// Face at the maximum local X.
    PosX,
    /// Face at the minimum local Z (bottom).
    NegZ,
    /// Face at the maximum local Z (top).
    PosZ,
}

impl FaceIndex {
    /// All faces in index order.
    pub const ALL: [Self; 6] = [
        Self::NegY,
        Self::PosY,
        Self::NegX,
        Self::PosX,
        Self::NegZ,
        Self::PosZ,
    ];

    /// Numeric index, 0 through 5.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::NegY => 0,
            Self::PosY => 1,
            Self::NegX => 2,
            Self::PosX => 3,
            Self::NegZ => 4,
            Self::PosZ => 5,
        }
    }

    /// Top or bottom face.
    #[must_use]
    pub const fn is_cap(self) -> bool {
        matches!(self, Self::NegZ | Self::PosZ)
    }

    /// Outward unit normal in local space.
    #[must_use]
    pub fn local_normal(self) -> Vector3<f64> {
        match self {
            Self::NegY => -Vector3::y(),
            Self::PosY => Vector3::y(),
            Self::NegX => -Vector3::x(),
            Self::PosX => Vector3::x(),
            Self::NegZ => -Vector3::z(),
            Self::PosZ => Vector3::z(),
        }
    }

    /// Center of this face of `bbox`, in the box's space.
    #[must_use]
    pub fn local_center(self, bbox: &BoundingBox) -> Point3<f64> {
        let c = bbox.center();
        match self {
            Self::NegY => Point3::new(c.x, bbox.min.y, c.z),
            Self::PosY => Point3::new(c.x, bbox.max.y, c.z),
            Self::NegX => Point3::new(bbox.min.x, c.y, c.z),
            Self::PosX => Point3::new(bbox.max.x, c.y, c.z),
            Self::NegZ => Point3::new(c.x, c.y, bbox.min.z),
            Self::PosZ => Point3::new(c.x, c.y, bbox.max.z),
        }
    }

    /// Local direction along which cover spots spread on this face.
    ///
    /// Y faces spread along local X, X faces along local Y. Top and bottom
    /// faces have no lateral direction.
    #[must_use]
    pub fn lateral_axis(self) -> Option<Vector3<f64>> {
        match self {
            Self::NegY | Self::PosY => Some(Vector3::x()),
            Self::NegX | Self::PosX => Some(Vector3::y()),
            Self::NegZ | Self::PosZ => None,
        }
    }
}

/// Selection metrics for one face.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceEvaluation {
    /// Which face.
    pub face: FaceIndex,
    /// World-space face center.
    pub center: Point3<f64>,
    /// World-space outward unit normal.
    pub normal: Vector3<f64>,
    /// Cosine between the normal and the direction to the agent.
    pub alignment: f64,
    /// Distance from the face center to the agent.
    pub distance: f64,
    /// `distance * (1 - alignment)`; lower is better.
    pub weighted_distance: f64,
    /// Whether the face passed the visibility gate and the cap policy.
    pub eligible: bool,
}

/// The face chosen as cover, with its cover zone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverFace {
    /// Which face of the obstacle.
    pub face: FaceIndex,
    /// World-space center of the face on the obstacle surface.
    pub face_center: Point3<f64>,
    /// World-space outward unit normal.
    pub normal: Vector3<f64>,
    /// Thickened volume in front of the face. Its center is where the
    /// central cover spot stands.
    pub zone: OrientedBox,
    /// Local lateral direction for partitioning, if the face has one.
    pub lateral: Option<Vector3<f64>>,
    /// Usable span handed to the partitioner: the scaled half extent of the
    /// box along the lateral axis.
    pub cover_width: f64,
}

impl CoverFace {
    /// Where the central cover spot stands (the cover zone center).
    #[must_use]
    pub fn origin(&self) -> Point3<f64> {
        self.zone.center
    }
}

/// Computes selection metrics for all six faces.
///
/// # Example
///
/// ```
/// use cf_cover::{BoundingBox, CapFacePolicy, FaceIndex, Transform, evaluate_faces};
/// use nalgebra::Point3;
///
/// let bbox = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
/// let evals = evaluate_faces(
///     &bbox,
///     &Transform::identity(),
///     &Point3::new(0.0, -10.0, 0.0),
///     &Point3::new(0.0, 10.0, 0.0),
///     CapFacePolicy::Singleton,
/// );
///
/// assert!(evals[FaceIndex::NegY.index()].eligible);
/// assert!(!evals[FaceIndex::PosY.index()].eligible);
/// ```
#[must_use]
pub fn evaluate_faces(
    local: &BoundingBox,
    transform: &Transform,
    agent: &Point3<f64>,
    target: &Point3<f64>,
    cap_faces: CapFacePolicy,
) -> [FaceEvaluation; 6] {
    FaceIndex::ALL.map(|face| {
        let center = transform.transform_point(&face.local_center(local));
        let normal = transform.transform_vector_no_scale(&face.local_normal());

        let direction = (agent - center)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        let alignment = normal.dot(&direction);
        let distance = nalgebra::distance(&center, agent);

        let faces_away_from_target = normal.dot(&(center - target)) >= 0.0;
        let allowed = !(face.is_cap() && cap_faces == CapFacePolicy::Exclude);

        FaceEvaluation {
            face,
            center,
            normal,
            alignment,
            distance,
            weighted_distance: distance * (1.0 - alignment),
            eligible: faces_away_from_target && allowed,
        }
    })
}

/// Picks the eligible face with the lowest weighted distance.
///
/// Returns `None` if every face is ineligible or produced a NaN score.
#[must_use]
pub fn best_face(evaluations: &[FaceEvaluation]) -> Option<&FaceEvaluation> {
    let mut best: Option<&FaceEvaluation> = None;
    for eval in evaluations.iter().filter(|e| e.eligible) {
        let better = best.is_none_or(|b| eval.weighted_distance < b.weighted_distance);
        if better && !eval.weighted_distance.is_nan() {
            best = Some(eval);
        }
    }
    best
}

/// Selects the cover face of one obstacle and builds its cover zone.
///
/// Returns `None` when no face is eligible; the obstacle offers no cover.
///
/// # Example
///
/// ```
/// use cf_cover::{BoundingBox, CoverConfig, FaceIndex, Transform, select_cover_face};
/// use nalgebra::Point3;
///
/// let bbox = BoundingBox::new(
///     Point3::new(-300.0, -50.0, -50.0),
///     Point3::new(300.0, 50.0, 50.0),
/// );
/// let face = select_cover_face(
///     &bbox,
///     &Transform::identity(),
///     &Point3::new(0.0, -1000.0, 0.0),
///     &Point3::new(0.0, 1000.0, 0.0),
///     &CoverConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(face.face, FaceIndex::NegY);
/// assert!((face.origin().y + 150.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn select_cover_face(
    local: &BoundingBox,
    transform: &Transform,
    agent: &Point3<f64>,
    target: &Point3<f64>,
    config: &CoverConfig,
) -> Option<CoverFace> {
    let evaluations = evaluate_faces(local, transform, agent, target, config.cap_faces);
    let best = best_face(&evaluations)?;
    Some(build_cover_face(best, local, transform, config.supplied_depth))
}

/// Thickens a selected face into its cover zone.
fn build_cover_face(
    eval: &FaceEvaluation,
    local: &BoundingBox,
    transform: &Transform,
    depth: f64,
) -> CoverFace {
    let extent = local.extent();
    let scale = transform.scale.abs();
    let scaled_x = extent.x * scale.x;
    let scaled_y = extent.y * scale.y;
    let scaled_z = extent.z * scale.z;

    let (half_extents, push, cover_width) = match eval.face {
        FaceIndex::NegY | FaceIndex::PosY => {
            (Vector3::new(scaled_x, depth, scaled_z), depth, scaled_x)
        }
        FaceIndex::NegX | FaceIndex::PosX => {
            (Vector3::new(depth, scaled_y, scaled_z), depth, scaled_y)
        }
        // Caps are not pushed outward and are never partitioned.
        FaceIndex::NegZ | FaceIndex::PosZ => (Vector3::new(scaled_x, scaled_y, depth), 0.0, 0.0),
    };

    CoverFace {
        face: eval.face,
        face_center: eval.center,
        normal: eval.normal,
        zone: OrientedBox::new(
            eval.center + eval.normal * push,
            half_extents,
            transform.rotation,
        ),
        lateral: eval.face.lateral_axis(),
        cover_width,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;
    use std::f64::consts::FRAC_PI_2;

    fn wall() -> BoundingBox {
        BoundingBox::new(
            Point3::new(-300.0, -50.0, -50.0),
            Point3::new(300.0, 50.0, 50.0),
        )
    }

    #[test]
    fn test_face_tables() {
        let bbox = wall();
        for face in FaceIndex::ALL {
            let n = face.local_normal();
            assert_relative_eq!(n.norm(), 1.0);
            // The face center lies on the box surface along its own normal.
            let c = face.local_center(&bbox) - bbox.center();
            assert_relative_eq!(c.dot(&n), bbox.extent().dot(&n.abs()));
            assert_eq!(FaceIndex::ALL[face.index()], face);
        }
        assert!(FaceIndex::PosZ.is_cap());
        assert!(!FaceIndex::NegX.is_cap());
        assert_eq!(FaceIndex::NegY.lateral_axis(), Some(Vector3::x()));
        assert_eq!(FaceIndex::PosX.lateral_axis(), Some(Vector3::y()));
        assert_eq!(FaceIndex::NegZ.lateral_axis(), None);
    }

    #[test]
    fn test_wall_between_agent_and_target() {
        let face = select_cover_face(
            &wall(),
            &Transform::identity(),
            &Point3::new(0.0, -1000.0, 0.0),
            &Point3::new(0.0, 1000.0, 0.0),
            &CoverConfig::default(),
        )
        .unwrap();

        assert_eq!(face.face, FaceIndex::NegY);
        assert_relative_eq!(face.face_center, Point3::new(0.0, -50.0, 0.0));
        assert_relative_eq!(face.origin(), Point3::new(0.0, -150.0, 0.0));
        assert_relative_eq!(face.zone.half_extents, Vector3::new(300.0, 100.0, 50.0));
        assert_eq!(face.lateral, Some(Vector3::x()));
        assert_eq!(face.cover_width, 300.0);
    }

    #[test]
    fn test_metrics() {
        let evals = evaluate_faces(
            &wall(),
            &Transform::identity(),
            &Point3::new(0.0, -1000.0, 0.0),
            &Point3::new(0.0, 1000.0, 0.0),
            CapFacePolicy::Singleton,
        );
        let neg_y = &evals[FaceIndex::NegY.index()];
        assert_relative_eq!(neg_y.alignment, 1.0);
        assert_relative_eq!(neg_y.distance, 950.0);
        assert_relative_eq!(neg_y.weighted_distance, 0.0);

        let pos_y = &evals[FaceIndex::PosY.index()];
        assert!(!pos_y.eligible);
        assert_relative_eq!(pos_y.alignment, -1.0);

        // Side faces point across the corridor, so they stay eligible.
        assert!(evals[FaceIndex::NegX.index()].eligible);
        assert!(evals[FaceIndex::PosX.index()].eligible);
    }

    #[test]
    fn test_rotated_obstacle_uses_rotated_normals() {
        // Rotated a quarter turn about Z, local -X now faces world -Y.
        let transform = Transform::identity()
            .with_rotation(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2));
        let face = select_cover_face(
            &wall(),
            &transform,
            &Point3::new(0.0, -1000.0, 0.0),
            &Point3::new(0.0, 1000.0, 0.0),
            &CoverConfig::default(),
        )
        .unwrap();

        assert_eq!(face.face, FaceIndex::NegX);
        assert_relative_eq!(face.normal, -Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(face.origin(), Point3::new(0.0, -400.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(face.zone.half_extents, Vector3::new(100.0, 50.0, 50.0));
        assert_eq!(face.cover_width, 50.0);
    }

    #[test]
    fn test_scale_applies_to_center_not_depth() {
        let transform = Transform::identity().with_scale(Vector3::new(2.0, 3.0, 1.0));
        let face = select_cover_face(
            &wall(),
            &transform,
            &Point3::new(0.0, -1000.0, 0.0),
            &Point3::new(0.0, 1000.0, 0.0),
            &CoverConfig::default(),
        )
        .unwrap();

        assert_eq!(face.face, FaceIndex::NegY);
        assert_relative_eq!(face.face_center, Point3::new(0.0, -150.0, 0.0));
        assert_relative_eq!(face.origin(), Point3::new(0.0, -250.0, 0.0));
        assert_eq!(face.cover_width, 600.0);
        assert_relative_eq!(face.zone.half_extents, Vector3::new(600.0, 100.0, 50.0));
    }

    #[test]
    fn test_cap_face_selected_from_above() {
        let face = select_cover_face(
            &wall(),
            &Transform::identity(),
            &Point3::new(0.0, 0.0, 1000.0),
            &Point3::new(0.0, 0.0, -1000.0),
            &CoverConfig::default(),
        )
        .unwrap();

        assert_eq!(face.face, FaceIndex::PosZ);
        // Caps are not pushed out.
        assert_relative_eq!(face.origin(), Point3::new(0.0, 0.0, 50.0));
        assert_relative_eq!(face.zone.half_extents, Vector3::new(300.0, 50.0, 100.0));
        assert_eq!(face.lateral, None);
    }

    #[test]
    fn test_cap_faces_excluded() {
        let config = CoverConfig::default().with_cap_faces(CapFacePolicy::Exclude);
        let face = select_cover_face(
            &wall(),
            &Transform::identity(),
            &Point3::new(0.0, 0.0, 1000.0),
            &Point3::new(0.0, 0.0, -1000.0),
            &config,
        )
        .unwrap();
        assert!(!face.face.is_cap());
    }

    #[test]
    fn test_no_eligible_face() {
        // Mirroring every axis puts each face center behind its own normal,
        // so with the target at the center no face points away from it.
        let mirrored = Transform::identity().with_scale(Vector3::new(-1.0, -1.0, -1.0));
        let evals = evaluate_faces(
            &wall(),
            &mirrored,
            &Point3::new(0.0, -1000.0, 0.0),
            &Point3::origin(),
            CapFacePolicy::Singleton,
        );
        assert!(evals.iter().all(|e| !e.eligible));
        assert!(best_face(&evals).is_none());

        let face = select_cover_face(
            &wall(),
            &mirrored,
            &Point3::new(0.0, -1000.0, 0.0),
            &Point3::origin(),
            &CoverConfig::default(),
        );
        assert!(face.is_none());
    }

    #[test]
    fn test_ties_keep_first_face() {
        let evals = evaluate_faces(
            &wall(),
            &Transform::identity(),
            &Point3::new(0.0, -1000.0, 0.0),
            &Point3::new(0.0, 1000.0, 0.0),
            CapFacePolicy::Singleton,
        );
        let tied: Vec<FaceEvaluation> = evals
            .iter()
            .map(|e| FaceEvaluation {
                weighted_distance: 5.0,
                eligible: true,
                ..*e
            })
            .collect();
        assert_eq!(best_face(&tied).unwrap().face, FaceIndex::NegY);
    }

    #[test]
    fn test_nan_scores_never_win() {
        let evals = evaluate_faces(
            &wall(),
            &Transform::identity(),
            &Point3::new(f64::NAN, 0.0, 0.0),
            &Point3::new(0.0, 1000.0, 0.0),
            CapFacePolicy::Singleton,
        );
        assert!(best_face(&evals).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_selection_types_are_serializable() {
        fn assert_serde<T: Serialize + serde::de::DeserializeOwned>() {}

        assert_serde::<FaceIndex>();
        assert_serde::<FaceEvaluation>();
        assert_serde::<CoverFace>();
    }
}
