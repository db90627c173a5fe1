//! Bounding volumes: axis-aligned and oriented boxes.
//!
//! [`BoundingBox`] is an axis-aligned min/max pair in whatever space it was
//! built in (obstacle-local bounds are the usual case). [`OrientedBox`] is a
//! world-space box with its own rotation, used for the corridor query volume,
//! obstacle world bounds, and cover zones.
//!
//! # Example
//!
//! ```
//! use cf_cover::{BoundingBox, OrientedBox, Transform};
//! use nalgebra::{Point3, Vector3};
//!
//! let local = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
//! let world = OrientedBox::from_local_box(
//!     &local,
//!     &Transform::from_translation(Vector3::new(10.0, 0.0, 0.0)),
//! );
//!
//! assert!(world.contains(&Point3::new(10.5, 0.0, 0.0)));
//! assert!(!world.contains(&Point3::new(0.0, 0.0, 0.0)));
//! ```

use nalgebra::{Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Cross products shorter than this are treated as parallel edges.
const AXIS_EPSILON: f64 = 1e-9;

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use cf_cover::BoundingBox;
/// use nalgebra::Point3;
///
/// let bbox = BoundingBox::new(
///     Point3::new(-300.0, -50.0, -50.0),
///     Point3::new(300.0, 50.0, 50.0),
/// );
///
/// assert_eq!(bbox.extent().x, 300.0);
/// assert!(bbox.contains(&Point3::origin()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Creates a box from two corners, reordering them if necessary.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates a box centered at a point with the given half extents.
    #[must_use]
    pub fn from_center(center: Point3<f64>, extent: Vector3<f64>) -> Self {
        Self::new(center - extent, center + extent)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Half size along each axis.
    #[must_use]
    pub fn extent(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Full size along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Checks if a point is inside the box. Boundary points count as inside.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Checks if this box intersects another axis-aligned box.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// True when both corners are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.coords.iter().chain(self.max.coords.iter()).all(|v| v.is_finite())
    }

    /// True when the box has non-finite corners or zero volume.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        !size.iter().all(|s| s.is_finite()) || size.iter().any(|s| *s <= 0.0)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }
}

/// A box with its own orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientedBox {
    /// World-space center.
    pub center: Point3<f64>,
    /// Half extents along the box's local axes.
    pub half_extents: Vector3<f64>,
    /// Orientation of the local axes.
    pub rotation: UnitQuaternion<f64>,
}

impl OrientedBox {
    /// Creates an oriented box.
    #[must_use]
    pub const fn new(
        center: Point3<f64>,
        half_extents: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// World-space bounds of a local box placed by `transform`.
    ///
    /// Extents are scaled by the absolute per-axis scale; rotation carries over.
    #[must_use]
    pub fn from_local_box(local: &BoundingBox, transform: &Transform) -> Self {
        Self {
            center: transform.transform_point(&local.center()),
            half_extents: local.extent().component_mul(&transform.scale.abs()),
            rotation: transform.rotation,
        }
    }

    /// The three local axes in world space.
    #[must_use]
    pub fn axes(&self) -> [Vector3<f64>; 3] {
        [
            self.rotation * Vector3::x(),
            self.rotation * Vector3::y(),
            self.rotation * Vector3::z(),
        ]
    }

    /// The eight corners in world space.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let h = self.half_extents;
        let signs = [
            (-1.0, -1.0, -1.0),
            (1.0, -1.0, -1.0),
            (1.0, 1.0, -1.0),
            (-1.0, 1.0, -1.0),
            (-1.0, -1.0, 1.0),
            (1.0, -1.0, 1.0),
            (1.0, 1.0, 1.0),
            (-1.0, 1.0, 1.0),
        ];
        signs.map(|(sx, sy, sz): (f64, f64, f64)| {
            self.center + self.rotation * Vector3::new(sx * h.x, sy * h.y, sz * h.z)
        })
    }

    /// Checks if a point is inside the box. Boundary points count as inside.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let local = self.rotation.inverse() * (point - self.center);
        local.x.abs() <= self.half_extents.x
            && local.y.abs() <= self.half_extents.y
            && local.z.abs() <= self.half_extents.z
    }

    /// Checks if this box intersects another using the separating axis theorem.
    ///
    /// Tests the 3 face normals of each box and the 9 edge-edge cross
    /// products. Touching boxes count as intersecting.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let axes_a = self.axes();
        let axes_b = other.axes();
        let offset = other.center - self.center;

        let separated_on = |axis: &Vector3<f64>| {
            let ra = project_radius(axis, &axes_a, &self.half_extents);
            let rb = project_radius(axis, &axes_b, &other.half_extents);
            offset.dot(axis).abs() > ra + rb
        };

        if axes_a.iter().chain(axes_b.iter()).any(&separated_on) {
            return false;
        }

        for a in &axes_a {
            for b in &axes_b {
                let axis = a.cross(b);
                let len = axis.norm();
                if len < AXIS_EPSILON {
                    continue;
                }
                if separated_on(&(axis / len)) {
                    return false;
                }
            }
        }

        true
    }
}

/// Half length of a box's projection onto `axis`.
fn project_radius(axis: &Vector3<f64>, box_axes: &[Vector3<f64>; 3], half: &Vector3<f64>) -> f64 {
    half.x * axis.dot(&box_axes[0]).abs()
        + half.y * axis.dot(&box_axes[1]).abs()
        + half.z * axis.dot(&box_axes[2]).abs()
}
