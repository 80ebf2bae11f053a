//! Shared 2D geometry helpers.
//!
//! Plain segment, line and polygon math used by entity hit tests and by the
//! plan editing engine. Coordinates follow the plan convention: Y grows
//! downwards, angles measured counterclockwise on screen are negative in
//! model space.

use serde::{Deserialize, Serialize};

/// A point in plan coordinates (centimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        distance(self.x, self.y, other.x, other.y)
    }

    pub fn distance_sq(&self, other: &Point) -> f64 {
        distance_sq(self.x, self.y, other.x, other.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    distance_sq(x1, y1, x2, y2).sqrt()
}

/// Squared euclidean distance between two points.
pub fn distance_sq(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

/// Squared distance from (px, py) to the segment (x1, y1)-(x2, y2).
pub fn seg_distance_sq(x1: f64, y1: f64, x2: f64, y2: f64, px: f64, py: f64) -> f64 {
    let vx = x2 - x1;
    let vy = y2 - y1;
    let mut wx = px - x1;
    let mut wy = py - y1;
    let dot = wx * vx + wy * vy;
    let proj_len_sq = if dot <= 0.0 {
        0.0
    } else {
        wx = vx - wx;
        wy = vy - wy;
        let dot = wx * vx + wy * vy;
        if dot <= 0.0 {
            0.0
        } else {
            dot * dot / (vx * vx + vy * vy)
        }
    };
    (wx * wx + wy * wy - proj_len_sq).max(0.0)
}

/// Distance from (px, py) to the segment (x1, y1)-(x2, y2).
pub fn seg_distance(x1: f64, y1: f64, x2: f64, y2: f64, px: f64, py: f64) -> f64 {
    seg_distance_sq(x1, y1, x2, y2, px, py).sqrt()
}

/// Squared distance from (px, py) to the infinite line through
/// (x1, y1) and (x2, y2). Falls back to point distance for a degenerate line.
pub fn line_distance_sq(x1: f64, y1: f64, x2: f64, y2: f64, px: f64, py: f64) -> f64 {
    let vx = x2 - x1;
    let vy = y2 - y1;
    let wx = px - x1;
    let wy = py - y1;
    let len_sq = vx * vx + vy * vy;
    if len_sq == 0.0 {
        return wx * wx + wy * wy;
    }
    let dot = wx * vx + wy * vy;
    let proj_len_sq = dot * dot / len_sq;
    (wx * wx + wy * wy - proj_len_sq).max(0.0)
}

/// Distance from (px, py) to the infinite line through (x1, y1) and (x2, y2).
pub fn line_distance(x1: f64, y1: f64, x2: f64, y2: f64, px: f64, py: f64) -> f64 {
    line_distance_sq(x1, y1, x2, y2, px, py).sqrt()
}

/// Returns where (px, py) lies relative to the directed line
/// (x1, y1) → (x2, y2): -1 on one side, 1 on the other, 0 on the segment's
/// carrier within its span.
pub fn relative_ccw(x1: f64, y1: f64, x2: f64, y2: f64, px: f64, py: f64) -> i32 {
    let vx = x2 - x1;
    let vy = y2 - y1;
    let mut wx = px - x1;
    let mut wy = py - y1;
    let mut ccw = wx * vy - wy * vx;
    if ccw == 0.0 {
        ccw = wx * vx + wy * vy;
        if ccw > 0.0 {
            wx -= vx;
            wy -= vy;
            ccw = wx * vx + wy * vy;
            if ccw < 0.0 {
                ccw = 0.0;
            }
        }
    }
    if ccw < 0.0 {
        -1
    } else if ccw > 0.0 {
        1
    } else {
        0
    }
}

/// Whether the segments (x1, y1)-(x2, y2) and (x3, y3)-(x4, y4) intersect.
pub fn segments_intersect(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
    x4: f64,
    y4: f64,
) -> bool {
    relative_ccw(x1, y1, x2, y2, x3, y3) * relative_ccw(x1, y1, x2, y2, x4, y4) <= 0
        && relative_ccw(x3, y3, x4, y4, x1, y1) * relative_ccw(x3, y3, x4, y4, x2, y2) <= 0
}

/// Whether the polygon described by `points` contains (x, y). Ray casting on
/// the closed ring; points on an edge may land on either side.
pub fn polygon_contains(points: &[Point], x: f64, y: f64) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Signed shoelace area of the polygon. In Y-down plan coordinates a
/// positive value means the ring turns clockwise on screen.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        sum += points[j].x * points[i].y - points[i].x * points[j].y;
        j = i;
    }
    sum / 2.0
}

/// Axis-aligned bounds of a point list as (min_x, min_y, max_x, max_y).
pub fn points_bounds(points: &[Point]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}

/// Whether the polygon intersects the axis-aligned rectangle of origin
/// (rx, ry) and size (rw, rh). True when either shape has a vertex inside
/// the other or any edges cross.
pub fn polygon_intersects_rect(points: &[Point], rx: f64, ry: f64, rw: f64, rh: f64) -> bool {
    if points.is_empty() {
        return false;
    }
    for p in points {
        if p.x >= rx && p.x <= rx + rw && p.y >= ry && p.y <= ry + rh {
            return true;
        }
    }
    let corners = [
        Point::new(rx, ry),
        Point::new(rx + rw, ry),
        Point::new(rx + rw, ry + rh),
        Point::new(rx, ry + rh),
    ];
    for c in &corners {
        if polygon_contains(points, c.x, c.y) {
            return true;
        }
    }
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[j];
        let b = points[i];
        let mut cj = 3;
        for ci in 0..4 {
            let c = corners[cj];
            let d = corners[ci];
            if segments_intersect(a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y) {
                return true;
            }
            cj = ci;
        }
        j = i;
    }
    false
}

/// Whether the segment (x1, y1)-(x2, y2) intersects the axis-aligned
/// rectangle of origin (rx, ry) and size (rw, rh).
pub fn segment_intersects_rect(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    rx: f64,
    ry: f64,
    rw: f64,
    rh: f64,
) -> bool {
    let inside =
        |x: f64, y: f64| -> bool { x >= rx && x <= rx + rw && y >= ry && y <= ry + rh };
    if inside(x1, y1) || inside(x2, y2) {
        return true;
    }
    let corners = [
        (rx, ry),
        (rx + rw, ry),
        (rx + rw, ry + rh),
        (rx, ry + rh),
    ];
    let mut j = 3;
    for i in 0..4 {
        let (cx1, cy1) = corners[j];
        let (cx2, cy2) = corners[i];
        if segments_intersect(x1, y1, x2, y2, cx1, cy1, cx2, cy2) {
            return true;
        }
        j = i;
    }
    false
}

/// Rotates (x, y) around (cx, cy) by `angle` radians.
pub fn rotate(x: f64, y: f64, cx: f64, cy: f64, angle: f64) -> (f64, f64) {
    let cos = angle.cos();
    let sin = angle.sin();
    let dx = x - cx;
    let dy = y - cy;
    (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(distance_sq(1.0, 1.0, 4.0, 5.0), 25.0);
    }

    #[test]
    fn test_seg_distance() {
        // Perpendicular projection inside the segment
        assert!((seg_distance(0.0, 0.0, 10.0, 0.0, 5.0, 3.0) - 3.0).abs() < 1e-12);
        // Beyond the end: distance to the endpoint
        assert!((seg_distance(0.0, 0.0, 10.0, 0.0, 13.0, 4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_distance_extends_past_ends() {
        assert!((line_distance(0.0, 0.0, 10.0, 0.0, 25.0, 7.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_relative_ccw_sides() {
        let left = relative_ccw(0.0, 0.0, 10.0, 0.0, 5.0, -1.0);
        let right = relative_ccw(0.0, 0.0, 10.0, 0.0, 5.0, 1.0);
        assert_ne!(left, right);
        assert_eq!(relative_ccw(0.0, 0.0, 10.0, 0.0, 5.0, 0.0), 0);
    }

    #[test]
    fn test_segments_intersect() {
        assert!(segments_intersect(
            0.0, 0.0, 10.0, 10.0, 0.0, 10.0, 10.0, 0.0
        ));
        assert!(!segments_intersect(0.0, 0.0, 1.0, 1.0, 5.0, 5.0, 6.0, 4.0));
    }

    #[test]
    fn test_polygon_contains() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(polygon_contains(&square, 5.0, 5.0));
        assert!(!polygon_contains(&square, 15.0, 5.0));
    }

    #[test]
    fn test_polygon_area_sign() {
        // Clockwise on screen in Y-down coordinates
        let cw = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(polygon_area(&cw) > 0.0);
        let mut ccw = cw;
        ccw.reverse();
        assert!(polygon_area(&ccw) < 0.0);
        assert_eq!(polygon_area(&cw).abs(), 100.0);
    }

    #[test]
    fn test_polygon_intersects_rect() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(polygon_intersects_rect(&square, 5.0, 5.0, 20.0, 20.0));
        // Rectangle fully inside the polygon
        assert!(polygon_intersects_rect(&square, 4.0, 4.0, 2.0, 2.0));
        assert!(!polygon_intersects_rect(&square, 11.0, 11.0, 5.0, 5.0));
    }

    #[test]
    fn test_rotate() {
        let (x, y) = rotate(1.0, 0.0, 0.0, 0.0, std::f64::consts::FRAC_PI_2);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }
}
