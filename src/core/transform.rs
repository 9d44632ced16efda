//! Pure coordinate-transform functions: world↔map rotation, bounding
//! extents, midpoints. No state, no side effects; the viewport applies
//! zoom and pan on top of these at draw time.

use crate::core::bounds::Bounds;
use crate::core::geo::{Point, WorldPosition};

/// Rotates a point about the origin by `angle_degrees` (counter-clockwise).
pub fn rotate(point: Point, angle_degrees: f64) -> Point {
    let radians = angle_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    Point::new(
        point.x * cos - point.y * sin,
        point.x * sin + point.y * cos,
    )
}

/// Axis-aligned extent of a set of points as (width, height).
pub fn bounding_rectangle(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    Bounds::from_points(points).size()
}

/// Extent of an axis-aligned rectangle after rotation.
///
/// Map art is pre-rotated to align level tiers, so the content rect has to
/// be sized to the rotated footprint of the world bounds.
pub fn rotated_bounding_rectangle(size: Point, angle_degrees: f64) -> Point {
    let radians = angle_degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    Point::new(
        size.x * cos + size.y * sin,
        size.x * sin + size.y * cos,
    )
}

/// Midpoint of a set of points.
pub fn midpoint(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }

    let mut sum = Point::ZERO;
    for p in points {
        sum = sum.add(p);
    }
    sum.multiply(1.0 / points.len() as f64)
}

/// Projects a host 3D position into map space: the horizontal plane rotated
/// by the negated map rotation. Height is dropped; level selection uses it
/// separately.
pub fn world_to_map(world: WorldPosition, coordinate_rotation: f64) -> Point {
    rotate(world.horizontal(), -coordinate_rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate(Point::new(1.0, 0.0), 90.0);
        assert!(p.approx_eq(&Point::new(0.0, 1.0), EPS));

        let p = rotate(Point::new(1.0, 0.0), -90.0);
        assert!(p.approx_eq(&Point::new(0.0, -1.0), EPS));
    }

    #[test]
    fn test_rotate_round_trip() {
        let p = Point::new(3.5, -2.25);
        let back = rotate(rotate(p, 37.0), -37.0);
        assert!(back.approx_eq(&p, EPS));
    }

    #[test]
    fn test_bounding_rectangle() {
        let points = [
            Point::new(-10.0, 5.0),
            Point::new(20.0, -15.0),
            Point::new(0.0, 0.0),
        ];
        assert_eq!(bounding_rectangle(&points), Point::new(30.0, 20.0));
        assert_eq!(bounding_rectangle(&[]), Point::ZERO);
    }

    #[test]
    fn test_rotated_bounding_rectangle() {
        // 90 degrees swaps the extents
        let size = rotated_bounding_rectangle(Point::new(100.0, 50.0), 90.0);
        assert!(size.approx_eq(&Point::new(50.0, 100.0), EPS));

        // 45 degrees on a square grows it by sqrt(2)
        let size = rotated_bounding_rectangle(Point::new(10.0, 10.0), 45.0);
        let expected = 10.0 * 2.0_f64.sqrt();
        assert!((size.x - expected).abs() < EPS);
        assert!((size.y - expected).abs() < EPS);
    }

    #[test]
    fn test_midpoint() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 20.0)];
        assert_eq!(midpoint(&points), Point::new(5.0, 10.0));
    }

    #[test]
    fn test_world_to_map_drops_height() {
        let world = WorldPosition::new(4.0, 100.0, 6.0);
        let map = world_to_map(world, 0.0);
        assert_eq!(map, Point::new(4.0, 6.0));
    }

    #[test]
    fn test_world_to_map_applies_negated_rotation() {
        let world = WorldPosition::new(1.0, 0.0, 0.0);
        let map = world_to_map(world, 90.0);
        assert!(map.approx_eq(&Point::new(0.0, -1.0), EPS));
    }
}
