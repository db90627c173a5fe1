//! Configuration for cover identification.
//!
//! [`CoverConfig`] holds the design constants that shape the corridor query,
//! the cover zone, and cover-spot spacing. All distances are in world units.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoverError, Result};

/// Lateral half extent of the corridor between agent and target.
pub const DEFAULT_CORRIDOR_HALF_WIDTH: f64 = 500.0;

/// Vertical half extent of the corridor between agent and target.
pub const DEFAULT_CORRIDOR_HALF_HEIGHT: f64 = 100.0;

/// Distance the cover zone extends outward from a cover face.
pub const DEFAULT_SUPPLIED_DEPTH: f64 = 100.0;

/// Minimum spacing between neighbouring cover spots.
pub const DEFAULT_MIN_WIDTH: f64 = 100.0;

/// Upper bound on the partitions laid out along one cover face.
pub const MAX_PARTITIONS: usize = 256;

/// How the top and bottom (local Z) faces of an obstacle are treated.
///
/// These faces have no lateral partitioning direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CapFacePolicy {
    /// Z faces may be selected and yield a single spot scored 1.0.
    #[default]
    Singleton,
    /// Z faces are never eligible as cover faces.
    Exclude,
}

/// How the ranker picks the edge vector that scores are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeSelection {
    /// Compare the last two candidates in insertion order and take the one
    /// farther from the target. Depends on the partitioner's insertion order.
    #[default]
    TrailingPair,
    /// Take the candidate farthest from the target (first one on ties).
    FarthestFromTarget,
}

/// Configuration for a [`CoverIdentifier`](crate::CoverIdentifier).
///
/// # Example
///
/// ```
/// use cf_cover::{CapFacePolicy, CoverConfig};
///
/// let config = CoverConfig::default()
///     .with_min_width(50.0)
///     .with_cap_faces(CapFacePolicy::Exclude);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.min_width, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverConfig {
    /// Lateral half extent of the corridor query volume.
    pub corridor_half_width: f64,
    /// Vertical half extent of the corridor query volume.
    pub corridor_half_height: f64,
    /// Depth of the cover zone pushed out from the selected face.
    pub supplied_depth: f64,
    /// Minimum spacing between cover spots along a face.
    pub min_width: f64,
    /// Treatment of top and bottom faces.
    pub cap_faces: CapFacePolicy,
    /// Edge vector selection used by the ranker.
    pub edge_selection: EdgeSelection,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            corridor_half_width: DEFAULT_CORRIDOR_HALF_WIDTH,
            corridor_half_height: DEFAULT_CORRIDOR_HALF_HEIGHT,
            supplied_depth: DEFAULT_SUPPLIED_DEPTH,
            min_width: DEFAULT_MIN_WIDTH,
            cap_faces: CapFacePolicy::default(),
            edge_selection: EdgeSelection::default(),
        }
    }
}

impl CoverConfig {
    /// Set the corridor half extents (lateral and vertical).
    #[must_use]
    pub fn with_corridor(mut self, half_width: f64, half_height: f64) -> Self {
        self.corridor_half_width = half_width;
        self.corridor_half_height = half_height;
        self
    }

    /// Set the cover zone depth.
    #[must_use]
    pub fn with_supplied_depth(mut self, depth: f64) -> Self {
        self.supplied_depth = depth;
        self
    }

    /// Set the minimum spacing between cover spots.
    #[must_use]
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    /// Set the top/bottom face policy.
    #[must_use]
    pub fn with_cap_faces(mut self, policy: CapFacePolicy) -> Self {
        self.cap_faces = policy;
        self
    }

    /// Set the edge vector selection used for ranking.
    #[must_use]
    pub fn with_edge_selection(mut self, selection: EdgeSelection) -> Self {
        self.edge_selection = selection;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any distance is non-finite, if the spacing or the
    /// corridor extents are not positive, or if the depth is negative.
    pub fn validate(&self) -> Result<()> {
        if !self.min_width.is_finite() || self.min_width <= 0.0 {
            return Err(CoverError::InvalidMinWidth(self.min_width));
        }

        if !self.supplied_depth.is_finite() || self.supplied_depth < 0.0 {
            return Err(CoverError::InvalidDepth(self.supplied_depth));
        }

        let corridor_ok = |v: f64| v.is_finite() && v > 0.0;
        if !corridor_ok(self.corridor_half_width) || !corridor_ok(self.corridor_half_height) {
            return Err(CoverError::InvalidCorridor {
                half_width: self.corridor_half_width,
                half_height: self.corridor_half_height,
            });
        }

        Ok(())
    }
}
