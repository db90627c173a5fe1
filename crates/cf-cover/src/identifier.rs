//! Cover identification: corridor, face selection, partitioning, ranking.
//!
//! [`CoverIdentifier`] owns the spatial-query collaborator and a validated
//! [`CoverConfig`]. Each call is independent and returns a fresh
//! [`CoverResult`]; nothing is cached between calls.

use nalgebra::Point3;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::OrientedBox;
use crate::config::CoverConfig;
use crate::corridor::query_corridor;
use crate::entity::{EntityId, ObstacleProvider, SpatialQuery};
use crate::error::Result;
use crate::face::select_cover_face;
use crate::partition::partition_cover_face;
use crate::rank::rank_spots;
use crate::result::{CoverResult, CoverSpotGroup};

/// One agent asking for cover from its current target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverRequest {
    /// The agent's own entity, excluded from the overlap query.
    pub agent: Option<EntityId>,
    /// Where the agent stands.
    pub agent_position: Point3<f64>,
    /// What the agent hides from. `None` yields an empty result.
    pub target: Option<Point3<f64>>,
}

impl CoverRequest {
    /// A request from `agent_position` against `target`.
    #[must_use]
    pub const fn new(agent_position: Point3<f64>, target: Point3<f64>) -> Self {
        Self {
            agent: None,
            agent_position,
            target: Some(target),
        }
    }

    /// A request from an agent that has no target yet.
    #[must_use]
    pub const fn without_target(agent_position: Point3<f64>) -> Self {
        Self {
            agent: None,
            agent_position,
            target: None,
        }
    }

    /// Sets the agent entity to exclude from the overlap query.
    #[must_use]
    pub const fn with_agent(mut self, agent: EntityId) -> Self {
        self.agent = Some(agent);
        self
    }
}

/// Finds and ranks cover spots against a host world.
///
/// # Example
///
/// ```
/// use cf_cover::{
///     BoundingBox, CoverConfig, CoverIdentifier, CoverRequest, EntityId, EntityKind,
///     StaticScene, Transform,
/// };
/// use nalgebra::Point3;
///
/// let mut scene = StaticScene::new();
/// scene.add_obstacle(
///     EntityId::new(1),
///     EntityKind::StaticObstacle,
///     BoundingBox::new(Point3::new(-300.0, -50.0, -50.0), Point3::new(300.0, 50.0, 50.0)),
///     Transform::identity(),
/// );
///
/// let identifier = CoverIdentifier::new(&scene, CoverConfig::default()).unwrap();
/// let request = CoverRequest::new(Point3::new(0.0, -1000.0, 0.0), Point3::new(0.0, 1000.0, 0.0));
/// let result = identifier.identify(&request, &scene);
///
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.spot_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CoverIdentifier<S> {
    spatial: S,
    config: CoverConfig,
}

impl<S: SpatialQuery> CoverIdentifier<S> {
    /// Creates an identifier after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(spatial: S, config: CoverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { spatial, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &CoverConfig {
        &self.config
    }

    /// The spatial-query collaborator.
    #[must_use]
    pub const fn spatial(&self) -> &S {
        &self.spatial
    }

    /// Identifies cover for one request.
    ///
    /// Obstacles with missing or non-finite geometry, and obstacles without
    /// an eligible face, contribute nothing. An absent target or coincident
    /// agent and target positions produce an empty result.
    #[must_use]
    pub fn identify<P: ObstacleProvider + ?Sized>(
        &self,
        request: &CoverRequest,
        provider: &P,
    ) -> CoverResult {
        let Some(target) = request.target else {
            debug!(agent = ?request.agent, "No target, skipping cover identification");
            return CoverResult::empty();
        };
        let agent = request.agent_position;

        let Some(corridor) =
            query_corridor(&self.spatial, request.agent, &agent, &target, &self.config)
        else {
            return CoverResult::empty();
        };

        let mut result = CoverResult::with_corridor(corridor.volume);
        for obstacle in corridor.obstacles {
            if let Some(group) = self.cover_group(obstacle, &agent, &target, provider) {
                result.push(group);
            }
        }

        debug!(
            groups = result.len(),
            spots = result.spot_count(),
            "Cover identification complete"
        );

        result
    }

    /// Builds the ranked group for one obstacle, if it offers cover.
    fn cover_group<P: ObstacleProvider + ?Sized>(
        &self,
        obstacle: EntityId,
        agent: &Point3<f64>,
        target: &Point3<f64>,
        provider: &P,
    ) -> Option<CoverSpotGroup> {
        let (Some(local), Some(transform)) = (
            provider.local_bounding_box(obstacle),
            provider.world_transform(obstacle),
        ) else {
            debug!(%obstacle, "Obstacle geometry missing, skipping");
            return None;
        };
        if !local.is_finite() {
            debug!(%obstacle, "Obstacle bounds not finite, skipping");
            return None;
        }

        let Some(face) = select_cover_face(&local, &transform, agent, target, &self.config)
        else {
            trace!(%obstacle, "No eligible cover face");
            return None;
        };

        let candidates = partition_cover_face(&face, &transform, self.config.min_width);
        let spots = rank_spots(&candidates, target, self.config.edge_selection);

        trace!(
            %obstacle,
            face = ?face.face,
            origin = ?face.origin(),
            spots = spots.len(),
            "Selected cover face"
        );

        Some(CoverSpotGroup {
            obstacle,
            obstacle_bounds: OrientedBox::from_local_box(&local, &transform),
            face,
            spots,
        })
    }

    /// Identifies cover for many requests.
    ///
    /// Output order matches `requests`. With the `parallel` feature the
    /// requests are evaluated on the rayon thread pool; results are identical
    /// either way since requests share no mutable state.
    #[must_use]
    pub fn identify_batch<P>(&self, requests: &[CoverRequest], provider: &P) -> Vec<CoverResult>
    where
        S: Sync,
        P: ObstacleProvider + Sync + ?Sized,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            requests
                .par_iter()
                .map(|request| self.identify(request, provider))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            requests
                .iter()
                .map(|request| self.identify(request, provider))
                .collect()
        }
    }
}

/// One-shot cover identification with the default configuration.
///
/// `agent` is the agent's own entity, if it has one in the world.
#[must_use]
pub fn identify_cover<S, P>(
    agent: Option<EntityId>,
    agent_position: &Point3<f64>,
    target: &Point3<f64>,
    provider: &P,
    spatial: &S,
) -> CoverResult
where
    S: SpatialQuery + ?Sized,
    P: ObstacleProvider + ?Sized,
{
    let identifier = CoverIdentifier {
        spatial,
        config: CoverConfig::default(),
    };
    let mut request = CoverRequest::new(*agent_position, *target);
    request.agent = agent;
    identifier.identify(&request, provider)
}
