//! Cover identification output.
//!
//! A [`CoverResult`] holds one [`CoverSpotGroup`] per obstacle that offered a
//! usable face. Scores are only comparable inside a group.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::OrientedBox;
use crate::entity::EntityId;
use crate::face::CoverFace;

/// A candidate stand-point and its desirability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverSpot {
    /// World-space position.
    pub position: Point3<f64>,
    /// Desirability; 1.0 is best.
    pub score: f64,
}

impl CoverSpot {
    /// Creates a cover spot.
    #[must_use]
    pub const fn new(position: Point3<f64>, score: f64) -> Self {
        Self { position, score }
    }

    /// True for the score given to a lone, unpartitioned spot.
    #[must_use]
    pub fn is_singleton_score(&self) -> bool {
        (self.score - 1.0).abs() <= f64::EPSILON
    }
}

/// Ranked cover spots on one obstacle's cover face.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverSpotGroup {
    /// The obstacle that provides the cover.
    pub obstacle: EntityId,
    /// World-space oriented bounds of the obstacle.
    pub obstacle_bounds: OrientedBox,
    /// The selected face and its cover zone.
    pub face: CoverFace,
    /// Spots in partition order: center first, then outward pairs.
    pub spots: Vec<CoverSpot>,
}

impl CoverSpotGroup {
    /// Grouping key: the cover zone center in front of the face.
    #[must_use]
    pub fn key(&self) -> Point3<f64> {
        self.face.origin()
    }

    /// The spots of this group.
    #[must_use]
    pub fn spots(&self) -> &[CoverSpot] {
        &self.spots
    }

    /// The highest-scoring spot. Ties keep the earliest spot.
    #[must_use]
    pub fn best_spot(&self) -> Option<&CoverSpot> {
        self.spots.iter().fold(None, |best: Option<&CoverSpot>, spot| match best {
            Some(b) if b.score >= spot.score => Some(b),
            _ => Some(spot),
        })
    }
}

/// Everything one cover identification produced.
///
/// Owned by the caller; the identifier keeps nothing between calls.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverResult {
    corridor: Option<OrientedBox>,
    groups: Vec<CoverSpotGroup>,
}

impl CoverResult {
    /// An empty result with no corridor.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A result for the given corridor, with no groups yet.
    #[must_use]
    pub(crate) fn with_corridor(corridor: OrientedBox) -> Self {
        Self {
            corridor: Some(corridor),
            groups: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, group: CoverSpotGroup) {
        self.groups.push(group);
    }

    /// The query volume used, if agent and target were distinct.
    #[must_use]
    pub fn corridor(&self) -> Option<&OrientedBox> {
        self.corridor.as_ref()
    }

    /// All groups, in the order their obstacles were reported.
    #[must_use]
    pub fn groups(&self) -> &[CoverSpotGroup] {
        &self.groups
    }

    /// Iterates over the groups.
    pub fn iter(&self) -> std::slice::Iter<'_, CoverSpotGroup> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no obstacle offered cover.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of spots across all groups.
    #[must_use]
    pub fn spot_count(&self) -> usize {
        self.groups.iter().map(|g| g.spots.len()).sum()
    }

    /// The group whose key lies within `tolerance` of `key`.
    #[must_use]
    pub fn group_at(&self, key: &Point3<f64>, tolerance: f64) -> Option<&CoverSpotGroup> {
        self.groups
            .iter()
            .find(|g| nalgebra::distance(&g.key(), key) <= tolerance)
    }

    /// The group for a given obstacle.
    #[must_use]
    pub fn group_for(&self, obstacle: EntityId) -> Option<&CoverSpotGroup> {
        self.groups.iter().find(|g| g.obstacle == obstacle)
    }

    /// The best spot of every group, paired with its obstacle.
    pub fn best_spots(&self) -> impl Iterator<Item = (EntityId, &CoverSpot)> + '_ {
        self.groups
            .iter()
            .filter_map(|g| g.best_spot().map(|spot| (g.obstacle, spot)))
    }

    /// Consumes the result, returning its groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<CoverSpotGroup> {
        self.groups
    }
}

impl<'a> IntoIterator for &'a CoverResult {
    type Item = &'a CoverSpotGroup;
    type IntoIter = std::slice::Iter<'a, CoverSpotGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
