//! Rigid transforms with non-uniform scale.
//!
//! A [`Transform`] maps obstacle-local coordinates to world space. Points are
//! scaled, then rotated, then translated. Directions can be mapped with or
//! without the scale component.

use nalgebra::{Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position, rotation, and non-uniform scale.
///
/// # Example
///
/// ```
/// use cf_cover::Transform;
/// use nalgebra::{Point3, Vector3};
///
/// let t = Transform::from_translation(Vector3::new(10.0, 0.0, 0.0))
///     .with_scale(Vector3::new(2.0, 1.0, 1.0));
///
/// let p = t.transform_point(&Point3::new(1.0, 1.0, 0.0));
/// assert!((p.x - 12.0).abs() < 1e-10);
/// assert!((p.y - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// World-space translation.
    pub translation: Vector3<f64>,
    /// World-space rotation.
    pub rotation: UnitQuaternion<f64>,
    /// Per-axis scale applied in local space.
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a transform from its three components.
    #[must_use]
    pub const fn new(
        translation: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        scale: Vector3<f64>,
    ) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(
            Vector3::zeros(),
            UnitQuaternion::identity(),
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    /// A pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Replace the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Maps a local point to world space (scale, rotate, translate).
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let scaled = point.coords.component_mul(&self.scale);
        Point3::from(self.rotation * scaled + self.translation)
    }

    /// Maps a local direction to world space, including scale.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * vector.component_mul(&self.scale)
    }

    /// Maps a local direction to world space using rotation only.
    ///
    /// Unit vectors stay unit length.
    #[must_use]
    pub fn transform_vector_no_scale(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * vector
    }
}

/// Rotation whose local +X axis points from `from` toward `to`.
///
/// The rotation is built from yaw (about world +Z) and pitch only, so the
/// local +Y axis stays horizontal. Returns `None` when the points coincide.
///
/// # Example
///
/// ```
/// use cf_cover::look_at_rotation;
/// use nalgebra::{Point3, Vector3};
///
/// let rot = look_at_rotation(&Point3::origin(), &Point3::new(0.0, 5.0, 0.0)).unwrap();
/// let forward = rot * Vector3::x();
/// assert!((forward.y - 1.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn look_at_rotation(from: &Point3<f64>, to: &Point3<f64>) -> Option<UnitQuaternion<f64>> {
    let dir = to - from;
    let horizontal = dir.x.hypot(dir.y);
    if !dir.iter().all(|c| c.is_finite()) || dir.norm() < f64::EPSILON {
        return None;
    }

    let yaw = dir.y.atan2(dir.x);
    let pitch = dir.z.atan2(horizontal);

    // Ry(-pitch) lifts +X toward +Z, then Rz(yaw) swings it around.
    Some(
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -pitch),
    )
}
