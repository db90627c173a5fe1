//! Tactical cover identification for CortenForge.
//!
//! Given an agent, a target it wants to hide from, and a view of the static
//! world, this crate finds the obstacles between them, picks the face of each
//! obstacle that best shields the agent, and returns ranked stand-points along
//! that face.
//!
//! - [`corridor_volume`] and [`query_corridor`] - Oriented query volume between agent and target
//! - [`select_cover_face`] and [`evaluate_faces`] - Choosing the sheltering face of a box
//! - [`partition_face`] - Spreading candidate spots along a face
//! - [`rank_spots`] - Scoring candidates in `[0, 1]`
//! - [`CoverIdentifier`] and [`identify_cover`] - The full pipeline
//! - [`StaticScene`] - In-memory world implementing both collaborator traits
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. The host world is
//! reached only through the [`SpatialQuery`] and [`ObstacleProvider`] traits,
//! so the same code runs in a game engine, a headless simulation, or a test.
//!
//! # Coordinate Systems
//!
//! Right-handed, consistent with mesh-types:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Obstacle bounds are given in obstacle-local space and placed in the world
//! by a [`Transform`] (scale, then rotation, then translation).
//!
//! # Example
//!
//! ```
//! use cf_cover::{
//!     BoundingBox, CoverConfig, CoverIdentifier, CoverRequest, EntityId, EntityKind,
//!     StaticScene, Transform,
//! };
//! use nalgebra::Point3;
//!
//! // A 600 x 100 x 100 wall at the origin.
//! let mut scene = StaticScene::new();
//! scene.add_obstacle(
//!     EntityId::new(1),
//!     EntityKind::StaticObstacle,
//!     BoundingBox::new(Point3::new(-300.0, -50.0, -50.0), Point3::new(300.0, 50.0, 50.0)),
//!     Transform::identity(),
//! );
//!
//! let identifier = CoverIdentifier::new(&scene, CoverConfig::default())?;
//! let result = identifier.identify(
//!     &CoverRequest::new(Point3::new(0.0, -1000.0, 0.0), Point3::new(0.0, 1000.0, 0.0)),
//!     &scene,
//! );
//!
//! // The wall's -Y side faces the agent; its cover zone sits 100 units out.
//! let group = result.group_at(&Point3::new(0.0, -150.0, 0.0), 1e-6).unwrap();
//! assert_eq!(group.spots().len(), 3);
//! assert_eq!(group.best_spot().unwrap().score, 1.0);
//! # Ok::<(), cf_cover::CoverError>(())
//! ```
//!
//! # Configuration
//!
//! ```
//! use cf_cover::{CapFacePolicy, CoverConfig, EdgeSelection};
//!
//! let config = CoverConfig::default()
//!     .with_corridor(800.0, 150.0)
//!     .with_min_width(50.0)
//!     .with_cap_faces(CapFacePolicy::Exclude)
//!     .with_edge_selection(EdgeSelection::FarthestFromTarget);
//! assert!(config.validate().is_ok());
//! assert!(CoverConfig::default().with_min_width(0.0).validate().is_err());
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for configuration and result types
//! - `parallel` - [`CoverIdentifier::identify_batch`] runs on the rayon pool

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod config;
mod corridor;
mod entity;
mod error;
mod face;
mod identifier;
mod partition;
mod rank;
mod result;
mod scene;
mod transform;

// Re-export core types
pub use bounds::{BoundingBox, OrientedBox};
pub use config::{
    CapFacePolicy, CoverConfig, DEFAULT_CORRIDOR_HALF_HEIGHT, DEFAULT_CORRIDOR_HALF_WIDTH,
    DEFAULT_MIN_WIDTH, DEFAULT_SUPPLIED_DEPTH, EdgeSelection, MAX_PARTITIONS,
};
pub use corridor::{Corridor, collect_obstacles, corridor_volume, query_corridor};
pub use entity::{Entity, EntityId, EntityKind, ObstacleProvider, SpatialQuery};
pub use error::{CoverError, Result};
pub use face::{
    CoverFace, FaceEvaluation, FaceIndex, best_face, evaluate_faces, select_cover_face,
};
pub use identifier::{CoverIdentifier, CoverRequest, identify_cover};
pub use partition::{partition_cover_face, partition_face};
pub use rank::{edge_reference, rank_spots};
pub use result::{CoverResult, CoverSpot, CoverSpotGroup};
pub use scene::StaticScene;
pub use transform::{Transform, look_at_rotation};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
