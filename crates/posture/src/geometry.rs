//! Angle helpers on 2D image points
//!
//! Image space has y growing downward. All results are in degrees.

use pose_capture::Point;

/// Offset that brings a level shoulder pair near 0° with the subject facing
/// the camera (left shoulder on the image right).
pub const SHOULDER_BASELINE_DEG: f32 = 205.0;

/// Same offset for the ear pair.
pub const EAR_BASELINE_DEG: f32 = 210.0;

/// `base` minus the absolute angle of the `p1 -> p2` line from the +x axis.
pub fn angle_from_horizontal(base: f32, p1: Point, p2: Point) -> f32 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    base - dy.atan2(dx).to_degrees().abs()
}

/// Angle at vertex `p2` between `p1` and `p3`, by the law of cosines.
///
/// Returns `None` when a point is missing or when `p2` coincides with one of
/// the other points (the angle is undefined there).
pub fn three_point_angle(p1: Option<Point>, p2: Option<Point>, p3: Option<Point>) -> Option<f32> {
    let (p1, p2, p3) = (p1?, p2?, p3?);

    let a = p2.distance(&p3);
    let b = p1.distance(&p3);
    let c = p1.distance(&p2);

    let denom = 2.0 * a * c;
    if denom <= f32::EPSILON {
        return None;
    }

    // Rounding can push the ratio just past ±1 for collinear points
    let cos = ((a * a + c * c - b * b) / denom).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Point `offset` pixels straight above `p` in image space.
pub fn vertical_above(p: Point, offset: f32) -> Point {
    Point::new(p.x, p.y - offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_level_pair_left_to_right() {
        // Points ordered left-to-right in the image: atan2 is 0°
        let angle = angle_from_horizontal(
            SHOULDER_BASELINE_DEG,
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
        );
        assert!(approx(angle, 205.0));
    }

    #[test]
    fn test_level_pair_mirrored() {
        // Subject facing the camera: left landmark sits at the larger x
        let angle = angle_from_horizontal(
            SHOULDER_BASELINE_DEG,
            Point::new(200.0, 100.0),
            Point::new(100.0, 100.0),
        );
        assert!(approx(angle, 25.0));
    }

    #[test]
    fn test_tilt_increases_angle() {
        let level = angle_from_horizontal(EAR_BASELINE_DEG, Point::new(200.0, 100.0), Point::new(100.0, 100.0));
        let tilted = angle_from_horizontal(EAR_BASELINE_DEG, Point::new(200.0, 100.0), Point::new(100.0, 130.0));
        assert!(tilted > level);
        // Sign of the tilt does not matter
        let other_way = angle_from_horizontal(EAR_BASELINE_DEG, Point::new(200.0, 100.0), Point::new(100.0, 70.0));
        assert!(approx(tilted, other_way));
    }

    #[test]
    fn test_right_angle() {
        let angle = three_point_angle(
            Some(Point::new(0.0, -100.0)),
            Some(Point::new(0.0, 0.0)),
            Some(Point::new(50.0, 0.0)),
        );
        assert!(approx(angle.unwrap(), 90.0));
    }

    #[test]
    fn test_collinear_points_clamped() {
        // Straight line through the vertex: exactly 180°, never NaN
        let angle = three_point_angle(
            Some(Point::new(0.1, 0.3)),
            Some(Point::new(0.2, 0.6)),
            Some(Point::new(0.3, 0.9)),
        )
        .unwrap();
        assert!(!angle.is_nan());
        assert!(approx(angle, 180.0) || angle > 179.9);

        // Same direction from the vertex: 0°
        let angle = three_point_angle(
            Some(Point::new(300.0, 150.0)),
            Some(Point::new(300.0, 250.0)),
            Some(Point::new(300.0, 140.0)),
        )
        .unwrap();
        assert!(!angle.is_nan());
        assert!(angle < 0.1);
    }

    #[test]
    fn test_missing_point() {
        assert!(three_point_angle(None, Some(Point::default()), Some(Point::new(1.0, 1.0))).is_none());
        assert!(three_point_angle(Some(Point::new(1.0, 1.0)), None, Some(Point::default())).is_none());
        assert!(three_point_angle(Some(Point::new(1.0, 1.0)), Some(Point::default()), None).is_none());
    }

    #[test]
    fn test_degenerate_vertex() {
        let p = Point::new(10.0, 10.0);
        assert!(three_point_angle(Some(Point::new(0.0, 0.0)), Some(p), Some(p)).is_none());
    }

    #[test]
    fn test_vertical_above() {
        assert_eq!(vertical_above(Point::new(150.0, 100.0), 100.0), Point::new(150.0, 0.0));
    }
}
