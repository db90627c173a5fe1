//! Entities reported by the host world and the collaborator traits.
//!
//! The cover identifier never walks a scene graph. It asks a [`SpatialQuery`]
//! for the entities inside an oriented volume and an [`ObstacleProvider`] for
//! each obstacle's geometry. Whether an entity can act as cover is an explicit
//! [`EntityKind`] rather than a runtime type check.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::{BoundingBox, OrientedBox};
use crate::transform::Transform;

/// Stable identity of an entity for the duration of one query.
///
/// # Example
///
/// ```
/// use cf_cover::EntityId;
///
/// let id = EntityId::new(7);
/// assert_eq!(id.raw(), 7);
/// assert_eq!(id.to_string(), "Entity(7)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(u64);

impl EntityId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// What kind of thing an overlap result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityKind {
    /// Static, box-approximable geometry that can be used as cover.
    StaticObstacle,
    /// A moving body (vehicle, physics prop). Never used as cover.
    Dynamic,
    /// Another agent or character.
    Agent,
    /// Triggers, volumes, anything else.
    Other,
}

/// One entity reported by a spatial overlap query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    /// Identity of the entity.
    pub id: EntityId,
    /// Its kind.
    pub kind: EntityKind,
}

impl Entity {
    /// Creates an entity record.
    #[must_use]
    pub const fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }

    /// Shorthand for a static obstacle.
    #[must_use]
    pub const fn obstacle(id: EntityId) -> Self {
        Self::new(id, EntityKind::StaticObstacle)
    }

    /// The id if this entity can serve as cover.
    #[must_use]
    pub const fn as_obstacle(&self) -> Option<EntityId> {
        match self.kind {
            EntityKind::StaticObstacle => Some(self.id),
            EntityKind::Dynamic | EntityKind::Agent | EntityKind::Other => None,
        }
    }
}

/// Spatial overlap queries against the host world.
///
/// Implementations must return every entity intersecting the volume, not
/// only obstacles; the caller filters by kind. Reporting the same entity
/// more than once (one per collision primitive) is allowed.
pub trait SpatialQuery {
    /// Entities intersecting `volume`, skipping `excluding` if given.
    fn overlap_box(&self, volume: &OrientedBox, excluding: Option<EntityId>) -> Vec<Entity>;
}

/// Read-only geometry of obstacles.
///
/// Returning `None` means the geometry is missing; that obstacle is skipped.
pub trait ObstacleProvider {
    /// The obstacle's bounding box in its own local space.
    fn local_bounding_box(&self, obstacle: EntityId) -> Option<BoundingBox>;

    /// The obstacle's local-to-world transform.
    fn world_transform(&self, obstacle: EntityId) -> Option<Transform>;
}

impl<T: SpatialQuery + ?Sized> SpatialQuery for &T {
    fn overlap_box(&self, volume: &OrientedBox, excluding: Option<EntityId>) -> Vec<Entity> {
        (**self).overlap_box(volume, excluding)
    }
}

impl<T: ObstacleProvider + ?Sized> ObstacleProvider for &T {
    fn local_bounding_box(&self, obstacle: EntityId) -> Option<BoundingBox> {
        (**self).local_bounding_box(obstacle)
    }

    fn world_transform(&self, obstacle: EntityId) -> Option<Transform> {
        (**self).world_transform(obstacle)
    }
}
