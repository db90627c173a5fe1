//! In-memory world for driving the identifier without a host engine.
//!
//! A [`StaticScene`] stores entities with their local bounds and transform,
//! plus any number of collision primitives per entity. Overlap queries test
//! every primitive against the query volume and report one [`Entity`] per
//! hit, so an entity with several primitives can be reported several times,
//! the way physics engines report compound bodies.

use std::collections::HashMap;

use crate::bounds::{BoundingBox, OrientedBox};
use crate::entity::{Entity, EntityId, EntityKind, ObstacleProvider, SpatialQuery};
use crate::transform::Transform;

#[derive(Debug, Clone, Copy)]
struct SceneEntity {
    kind: EntityKind,
    local: BoundingBox,
    transform: Transform,
}

/// A fixed set of entities and collision primitives.
///
/// # Example
///
/// ```
/// use cf_cover::{BoundingBox, EntityId, EntityKind, OrientedBox, SpatialQuery, StaticScene, Transform};
/// use nalgebra::{Point3, UnitQuaternion, Vector3};
///
/// let mut scene = StaticScene::new();
/// let crate_box = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
/// scene.add_obstacle(EntityId::new(1), EntityKind::StaticObstacle, crate_box, Transform::identity());
///
/// let query_box = OrientedBox::new(Point3::new(1.5, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0), UnitQuaternion::identity());
/// assert_eq!(scene.overlap_box(&query_box, None).len(), 1);
/// assert!(scene.overlap_box(&query_box, Some(EntityId::new(1))).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    entities: HashMap<EntityId, SceneEntity>,
    primitives: Vec<(EntityId, OrientedBox)>,
}

impl StaticScene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity whose single collision primitive is its own bounds.
    ///
    /// Re-adding an id replaces its geometry and keeps earlier primitives.
    pub fn add_obstacle(
        &mut self,
        id: EntityId,
        kind: EntityKind,
        local: BoundingBox,
        transform: Transform,
    ) -> &mut Self {
        self.entities.insert(
            id,
            SceneEntity {
                kind,
                local,
                transform,
            },
        );
        self.primitives
            .push((id, OrientedBox::from_local_box(&local, &transform)));
        self
    }

    /// Adds an extra collision primitive to an existing entity.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn add_collider(&mut self, id: EntityId, local: &BoundingBox, transform: &Transform) -> bool {
        if !self.entities.contains_key(&id) {
            return false;
        }
        self.primitives
            .push((id, OrientedBox::from_local_box(local, transform)));
        true
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the scene has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of collision primitives across all entities.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
}

impl SpatialQuery for StaticScene {
    fn overlap_box(&self, volume: &OrientedBox, excluding: Option<EntityId>) -> Vec<Entity> {
        self.primitives
            .iter()
            .filter(|(id, _)| Some(*id) != excluding)
            .filter(|(_, shape)| shape.intersects(volume))
            .filter_map(|(id, _)| self.entities.get(id).map(|e| Entity::new(*id, e.kind)))
            .collect()
    }
}

impl ObstacleProvider for StaticScene {
    fn local_bounding_box(&self, obstacle: EntityId) -> Option<BoundingBox> {
        self.entities.get(&obstacle).map(|e| e.local)
    }

    fn world_transform(&self, obstacle: EntityId) -> Option<Transform> {
        self.entities.get(&obstacle).map(|e| e.transform)
    }
}
