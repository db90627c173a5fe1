//! Corridor query: which obstacles lie between an agent and its target.
//!
//! The corridor is an oriented box centered on the agent-target midpoint.
//! Its local +X axis points from agent to target and spans half the distance
//! between them; the lateral (Y) and vertical (Z) half extents come from
//! [`CoverConfig`].

use std::collections::HashSet;

use nalgebra::{Point3, Vector3};
use tracing::{debug, trace};

use crate::bounds::OrientedBox;
use crate::config::CoverConfig;
use crate::entity::{EntityId, SpatialQuery};
use crate::transform::look_at_rotation;

/// The query volume plus the obstacles found inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    /// Oriented query volume between agent and target.
    pub volume: OrientedBox,
    /// De-duplicated static obstacles, in first-reported order.
    pub obstacles: Vec<EntityId>,
}

/// Builds the oriented query volume between `agent` and `target`.
///
/// Returns `None` when the points coincide or are not finite.
///
/// # Example
///
/// ```
/// use cf_cover::{CoverConfig, corridor_volume};
/// use nalgebra::Point3;
///
/// let volume = corridor_volume(
///     &Point3::new(0.0, -1000.0, 0.0),
///     &Point3::new(0.0, 1000.0, 0.0),
///     &CoverConfig::default(),
/// )
/// .unwrap();
///
/// assert!((volume.half_extents.x - 1000.0).abs() < 1e-9);
/// assert!(volume.contains(&Point3::origin()));
/// assert!(corridor_volume(&Point3::origin(), &Point3::origin(), &CoverConfig::default()).is_none());
/// ```
#[must_use]
pub fn corridor_volume(
    agent: &Point3<f64>,
    target: &Point3<f64>,
    config: &CoverConfig,
) -> Option<OrientedBox> {
    let rotation = look_at_rotation(agent, target)?;
    let half_length = nalgebra::distance(agent, target) * 0.5;

    Some(OrientedBox::new(
        nalgebra::center(agent, target),
        Vector3::new(
            half_length,
            config.corridor_half_width,
            config.corridor_half_height,
        ),
        rotation,
    ))
}

/// Asks `spatial` for everything inside `volume` and keeps unique static obstacles.
///
/// `agent` is excluded from the overlap query, and is also dropped here if
/// `spatial` reports it anyway. Non-obstacle entities are dropped, and
/// obstacles reported by several collision primitives appear once.
pub fn collect_obstacles<S: SpatialQuery + ?Sized>(
    spatial: &S,
    volume: &OrientedBox,
    agent: Option<EntityId>,
) -> Vec<EntityId> {
    let hits = spatial.overlap_box(volume, agent);
    let mut seen = HashSet::with_capacity(hits.len());
    let mut obstacles = Vec::new();

    for entity in &hits {
        let Some(id) = entity.as_obstacle() else {
            trace!(entity = %entity.id, kind = ?entity.kind, "Ignoring non-obstacle overlap");
            continue;
        };
        if Some(id) == agent {
            continue;
        }
        if seen.insert(id) {
            obstacles.push(id);
        }
    }

    debug!(
        hits = hits.len(),
        obstacles = obstacles.len(),
        "Corridor overlap collected"
    );

    obstacles
}

/// Builds the corridor and collects the obstacles inside it.
///
/// Returns `None` for a degenerate corridor; no obstacle can lie between
/// coincident points.
pub fn query_corridor<S: SpatialQuery + ?Sized>(
    spatial: &S,
    agent_id: Option<EntityId>,
    agent: &Point3<f64>,
    target: &Point3<f64>,
    config: &CoverConfig,
) -> Option<Corridor> {
    let Some(volume) = corridor_volume(agent, target, config) else {
        debug!("Agent and target coincide, no corridor to query");
        return None;
    };

    let obstacles = collect_obstacles(spatial, &volume, agent_id);
    Some(Corridor { volume, obstacles })
}
