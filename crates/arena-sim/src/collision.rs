//! Collision queries.
//!
//! Pure functions, no side effects. Callers test a candidate position
//! against every obstacle before committing it; a move is either applied
//! whole or discarded whole.

use arena_core::constants::ARENA_HALF_EXTENT;
use arena_core::types::{Obstacle, Vector3};

/// How a point is tested against an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleTest {
    /// Strict intrusion into the obstacle's box.
    Box,
    /// Closer than the given radius to the obstacle's center.
    Proximity(f64),
}

/// True iff `point` lies strictly inside the box on all three axes.
/// Touching a face does not count.
pub fn point_in_box(point: &Vector3, center: &Vector3, half_extents: &Vector3) -> bool {
    (point.x - center.x).abs() < half_extents.x
        && (point.y - center.y).abs() < half_extents.y
        && (point.z - center.z).abs() < half_extents.z
}

/// True iff the two points are closer than `radius`.
pub fn within_radius(a: &Vector3, b: &Vector3, radius: f64) -> bool {
    a.distance(b) < radius
}

pub fn intersects(point: &Vector3, obstacle: &Obstacle, test: ObstacleTest) -> bool {
    match test {
        ObstacleTest::Box => point_in_box(point, &obstacle.position, &obstacle.half_extents()),
        ObstacleTest::Proximity(radius) => within_radius(point, &obstacle.position, radius),
    }
}

/// True iff no obstacle intersects `candidate`.
pub fn is_clear(candidate: &Vector3, obstacles: &[Obstacle], test: ObstacleTest) -> bool {
    !obstacles
        .iter()
        .any(|obstacle| intersects(candidate, obstacle, test))
}

/// True iff the point is on the floor area (x and z within the arena, inclusive).
pub fn in_arena(point: &Vector3) -> bool {
    point.x.abs() <= ARENA_HALF_EXTENT && point.z.abs() <= ARENA_HALF_EXTENT
}
