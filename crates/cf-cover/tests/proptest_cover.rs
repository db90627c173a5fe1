//! Property-based tests for cover identification.
//!
//! These tests use proptest to generate random obstacles and requests and
//! verify invariants of face selection, partitioning, and ranking.
//!
//! Run with: cargo test -p cf-cover -- proptest

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]

use cf_cover::{
    BoundingBox, CoverConfig, CoverIdentifier, CoverRequest, EdgeSelection, EntityId,
    EntityKind, StaticScene, Transform, partition_face, rank_spots, select_cover_face,
};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A world position in a bounded range.
fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-2000.0..2000.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// A non-degenerate local box around the origin.
fn arb_box() -> impl Strategy<Value = BoundingBox> {
    prop::array::uniform3(10.0..600.0f64)
        .prop_map(|[x, y, z]| BoundingBox::from_center(Point3::origin(), Vector3::new(x, y, z)))
}

/// A transform with yaw, positive scale, and a bounded translation.
fn arb_transform() -> impl Strategy<Value = Transform> {
    (
        prop::array::uniform3(-500.0..500.0f64),
        -std::f64::consts::PI..std::f64::consts::PI,
        prop::array::uniform3(0.5..3.0f64),
    )
        .prop_map(|([tx, ty, tz], yaw, [sx, sy, sz])| {
            Transform::new(
                Vector3::new(tx, ty, tz),
                UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw),
                Vector3::new(sx, sy, sz),
            )
        })
}

fn arb_selection() -> impl Strategy<Value = EdgeSelection> {
    prop_oneof![
        Just(EdgeSelection::TrailingPair),
        Just(EdgeSelection::FarthestFromTarget),
    ]
}

/// Candidates laid out the way the partitioner produces them.
fn arb_candidates() -> impl Strategy<Value = Vec<Point3<f64>>> {
    (arb_point(), 0.0..2000.0f64).prop_map(|(origin, width)| {
        partition_face(&origin, &Vector3::x(), &Transform::identity(), width, 100.0)
    })
}

// =============================================================================
// Property Tests: Partitioning
// =============================================================================

proptest! {
    /// Faces wider than the minimum split into `1 + 2 * floor(floor(w / min) / 2)` spots.
    #[test]
    fn partition_count_law(width in 100.001..5000.0f64) {
        let spots = partition_face(
            &Point3::origin(),
            &Vector3::x(),
            &Transform::identity(),
            width,
            100.0,
        );
        let partitions = (width / 100.0).floor();
        let expected = 1 + 2 * (partitions / 2.0).floor() as usize;
        prop_assert_eq!(spots.len(), expected);
    }

    /// Faces no wider than the minimum yield exactly the origin.
    #[test]
    fn narrow_faces_are_singletons(width in 0.0..=100.0f64, origin in arb_point()) {
        let spots = partition_face(&origin, &Vector3::y(), &Transform::identity(), width, 100.0);
        prop_assert_eq!(spots, vec![origin]);
    }

    /// Every spot lies on the lateral line through the origin.
    #[test]
    fn spots_stay_on_lateral_line(transform in arb_transform(), width in 0.0..3000.0f64) {
        let origin = Point3::new(10.0, 20.0, 30.0);
        let lateral = transform.transform_vector_no_scale(&Vector3::x());
        for spot in partition_face(&origin, &Vector3::x(), &transform, width, 100.0) {
            let offset = spot - origin;
            prop_assert!(offset.cross(&lateral).norm() < 1e-6 * (1.0 + offset.norm()));
        }
    }
}

// =============================================================================
// Property Tests: Ranking
// =============================================================================

proptest! {
    /// Scores stay within [0, 1].
    #[test]
    fn scores_bounded(
        candidates in arb_candidates(),
        target in arb_point(),
        selection in arb_selection(),
    ) {
        for spot in rank_spots(&candidates, &target, selection) {
            prop_assert!((0.0..=1.0).contains(&spot.score), "score {}", spot.score);
        }
    }

    /// Ranking keeps positions and candidate order.
    #[test]
    fn ranking_preserves_candidates(
        candidates in arb_candidates(),
        target in arb_point(),
        selection in arb_selection(),
    ) {
        let spots = rank_spots(&candidates, &target, selection);
        let positions: Vec<_> = spots.iter().map(|s| s.position).collect();
        prop_assert_eq!(positions, candidates);
    }

    /// Scores are a permutation of k / (n - 1), non-decreasing with edge distance.
    #[test]
    fn scores_evenly_spaced_and_monotonic(
        candidates in arb_candidates(),
        target in arb_point(),
        selection in arb_selection(),
    ) {
        let spots = rank_spots(&candidates, &target, selection);
        let n = spots.len();
        if n == 1 {
            prop_assert_eq!(spots[0].score, 1.0);
            return Ok(());
        }

        let mut scores: Vec<f64> = spots.iter().map(|s| s.score).collect();
        scores.sort_by(f64::total_cmp);
        for (k, score) in scores.iter().enumerate() {
            prop_assert!((score - k as f64 / (n - 1) as f64).abs() < 1e-12);
        }

        // The lowest score marks the edge; scores never fall as spots get farther from it.
        let edge = spots.iter().find(|s| s.score == 0.0).unwrap().position;
        let mut by_distance: Vec<_> = spots
            .iter()
            .map(|s| (nalgebra::distance(&s.position, &edge), s.score))
            .collect();
        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        for pair in by_distance.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
    }
}

// =============================================================================
// Property Tests: Face selection and the full pipeline
// =============================================================================

proptest! {
    /// A selected face never points toward the target side.
    #[test]
    fn selected_face_passes_visibility_gate(
        local in arb_box(),
        transform in arb_transform(),
        agent in arb_point(),
        target in arb_point(),
    ) {
        if let Some(face) =
            select_cover_face(&local, &transform, &agent, &target, &CoverConfig::default())
        {
            prop_assert!(face.normal.dot(&(face.face_center - target)) >= 0.0);
            prop_assert!((face.normal.norm() - 1.0).abs() < 1e-9);
        }
    }

    /// Identical inputs give identical results, and every score is in range.
    #[test]
    fn pipeline_deterministic_and_bounded(
        local in arb_box(),
        transform in arb_transform(),
        agent in arb_point(),
        target in arb_point(),
    ) {
        let mut scene = StaticScene::new();
        scene.add_obstacle(EntityId::new(1), EntityKind::StaticObstacle, local, transform);
        let identifier = CoverIdentifier::new(&scene, CoverConfig::default()).unwrap();
        let request = CoverRequest::new(agent, target);

        let first = identifier.identify(&request, &scene);
        let second = identifier.identify(&request, &scene);
        prop_assert_eq!(&first, &second);

        prop_assert!(first.len() <= 1);
        for group in &first {
            prop_assert!(!group.spots().is_empty());
            for spot in group.spots() {
                prop_assert!((0.0..=1.0).contains(&spot.score));
            }
        }
    }
}
