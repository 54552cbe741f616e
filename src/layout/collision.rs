// Pairwise repulsion for blip markers.
//
// Each pass visits every unordered pair (i, j), i < j, in index order and
// pushes colliding pairs apart symmetrically along the line joining them.
// Passes stop at the first one that finds no collision, or at the cap.
// Dense clusters are not guaranteed to fully separate.

use rand::Rng;
use tracing::{debug, warn};

use super::PointF;

/// Below this distance the pair direction is treated as undefined.
const COINCIDENT_EPSILON: f64 = 0.1;

/// Outcome of one `resolve_collisions` call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CollisionStats {
    /// Number of passes executed.
    pub iterations: usize,
    /// True when a pass completed without finding any collision.
    pub converged: bool,
}

/// Strictly closer than `min_distance`.
pub fn has_collision(p1: &PointF, p2: &PointF, min_distance: f64) -> bool {
    p1.distance(p2) < min_distance
}

/// Nudge `points` apart in place until no pair is closer than `min_distance`
/// or `max_iterations` passes have run.
///
/// Coincident pairs are separated along an angle drawn from `rng`; that is the
/// only use of randomness, so a seeded rng makes the whole pass reproducible.
pub fn resolve_collisions<R: Rng + ?Sized>(
    points: &mut [PointF],
    min_distance: f64,
    max_iterations: usize,
    rng: &mut R,
) -> CollisionStats {
    let mut stats = CollisionStats { iterations: 0, converged: false };

    while stats.iterations < max_iterations {
        stats.iterations += 1;
        let mut collisions = 0usize;

        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                if !has_collision(&points[i], &points[j], min_distance) {
                    continue;
                }
                collisions += 1;

                let dx = points[j].x - points[i].x;
                let dy = points[j].y - points[i].y;
                let distance = (dx * dx + dy * dy).sqrt();

                let (push_x, push_y) = if distance < COINCIDENT_EPSILON {
                    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                    let half = min_distance * 0.5;
                    (angle.cos() * half, angle.sin() * half)
                } else {
                    let half_overlap = (min_distance - distance) * 0.5;
                    (dx / distance * half_overlap, dy / distance * half_overlap)
                };

                points[i].x -= push_x;
                points[i].y -= push_y;
                points[j].x += push_x;
                points[j].y += push_y;
            }
        }

        if collisions == 0 {
            stats.converged = true;
            break;
        }
    }

    if stats.converged {
        debug!(points = points.len(), iterations = stats.iterations, "collisions resolved");
    } else if !points.is_empty() && max_iterations > 0 {
        warn!(
            points = points.len(),
            max_iterations,
            "collision resolution hit the iteration cap"
        );
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn p(x: f64, y: f64) -> PointF {
        PointF { x, y }
    }

    #[test]
    fn test_has_collision_threshold() {
        assert!(has_collision(&p(0.0, 0.0), &p(5.0, 0.0), 20.0));
        assert!(!has_collision(&p(0.0, 0.0), &p(100.0, 0.0), 20.0));
        // exactly at threshold is not a collision
        assert!(!has_collision(&p(0.0, 0.0), &p(20.0, 0.0), 20.0));
    }

    #[test]
    fn test_point_collides_with_itself() {
        let a = p(12.5, -3.0);
        for min in [0.001, 1.0, 20.0] {
            assert!(has_collision(&a, &a, min));
        }
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<PointF> = vec![];
        resolve_collisions(&mut empty, 20.0, 50, &mut rng());
        assert!(empty.is_empty());

        let mut single = vec![p(3.0, 4.0)];
        let stats = resolve_collisions(&mut single, 20.0, 50, &mut rng());
        assert_eq!(single, vec![p(3.0, 4.0)]);
        assert!(stats.converged);
    }

    #[test]
    fn test_separates_coincident_pair() {
        let mut points = vec![p(100.0, 100.0), p(100.0, 100.0)];
        resolve_collisions(&mut points, 20.0, 2, &mut rng());
        assert!(points[0].distance(&points[1]) >= 20.0 - 1e-9);
    }

    #[test]
    fn test_separates_overlapping_pair_symmetrically() {
        let mut points = vec![p(0.0, 0.0), p(10.0, 0.0)];
        let stats = resolve_collisions(&mut points, 20.0, 50, &mut rng());

        assert!(stats.converged);
        assert!((points[0].x + 5.0).abs() < 1e-9);
        assert!((points[1].x - 15.0).abs() < 1e-9);
        assert_eq!(points[0].y, 0.0);
        assert_eq!(points[1].y, 0.0);
    }

    #[test]
    fn test_far_points_untouched() {
        let original = vec![p(0.0, 0.0), p(100.0, 0.0), p(0.0, 100.0)];
        let mut points = original.clone();
        let stats = resolve_collisions(&mut points, 20.0, 50, &mut rng());
        assert_eq!(points, original);
        assert_eq!(stats.iterations, 1);
    }

    #[test]
    fn test_resolved_set_is_stable_on_rerun() {
        let mut points = vec![p(0.0, 0.0), p(10.0, 0.0), p(200.0, 200.0)];
        let first = resolve_collisions(&mut points, 20.0, 100, &mut rng());
        assert!(first.converged);

        let settled = points.clone();
        let second = resolve_collisions(&mut points, 20.0, 100, &mut rng());
        assert_eq!(points, settled);
        assert_eq!(second, CollisionStats { iterations: 1, converged: true });
    }

    #[test]
    fn test_all_coincident_terminates_within_cap() {
        let mut points = vec![p(50.0, 50.0); 40];
        let stats = resolve_collisions(&mut points, 20.0, 50, &mut rng());
        assert!(stats.iterations <= 50);
        assert_eq!(points.len(), 40);
        assert!(points.iter().all(|q| q.x.is_finite() && q.y.is_finite()));
    }

    #[test]
    fn test_zero_iterations_is_a_no_op() {
        let mut points = vec![p(1.0, 1.0), p(1.0, 1.0)];
        let stats = resolve_collisions(&mut points, 20.0, 0, &mut rng());
        assert_eq!(stats, CollisionStats { iterations: 0, converged: false });
        assert_eq!(points[0], points[1]);
    }

    #[test]
    fn test_same_seed_same_result() {
        let start = vec![p(10.0, 10.0); 5];
        let mut a = start.clone();
        let mut b = start;
        resolve_collisions(&mut a, 18.0, 50, &mut ChaCha8Rng::seed_from_u64(99));
        resolve_collisions(&mut b, 18.0, 50, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
