//! Plan compass showing the north direction.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};

/// Compass disc drawn in the plan. There is exactly one per home and it
/// belongs to every level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compass {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub north_direction: f64,
    pub visible: bool,
}

impl Compass {
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self {
            x,
            y,
            diameter,
            north_direction: 0.0,
            visible: true,
        }
    }

    /// Corners of the square bounding the disc, rotated by the north
    /// direction, in top-left, top-right, bottom-right, bottom-left order.
    pub fn points(&self) -> Vec<Point> {
        let half = self.diameter / 2.0;
        [
            (self.x - half, self.y - half),
            (self.x + half, self.y - half),
            (self.x + half, self.y + half),
            (self.x - half, self.y + half),
        ]
        .iter()
        .map(|&(px, py)| {
            let (rx, ry) = geometry::rotate(px, py, self.x, self.y, self.north_direction);
            Point::new(rx, ry)
        })
        .collect()
    }

    /// Middle of the right edge of the bounding square, where the rotation
    /// indicator renders.
    pub fn rotation_point(&self) -> Point {
        let points = self.points();
        Point::new(
            (points[1].x + points[2].x) / 2.0,
            (points[1].y + points[2].y) / 2.0,
        )
    }

    /// Middle of the bottom edge of the bounding square, where the resize
    /// indicator renders.
    pub fn resize_point(&self) -> Point {
        let points = self.points();
        Point::new(
            (points[2].x + points[3].x) / 2.0,
            (points[2].y + points[3].y) / 2.0,
        )
    }

    pub fn is_rotation_point_at(&self, x: f64, y: f64, margin: f64) -> bool {
        let p = self.rotation_point();
        (x - p.x).abs() <= margin && (y - p.y).abs() <= margin
    }

    pub fn is_resize_point_at(&self, x: f64, y: f64, margin: f64) -> bool {
        let p = self.resize_point();
        (x - p.x).abs() <= margin && (y - p.y).abs() <= margin
    }

    /// Whether the disc contains (x, y), inflated by `margin`.
    pub fn contains_point(&self, x: f64, y: f64, margin: f64) -> bool {
        let radius = self.diameter / 2.0 + margin;
        geometry::distance_sq(x, y, self.x, self.y) <= radius * radius
    }

    pub fn intersects_rectangle(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        // Disc vs rectangle: clamp the center into the rectangle and compare
        // the remaining distance to the radius.
        let rx0 = x0.min(x1);
        let ry0 = y0.min(y1);
        let rx1 = x0.max(x1);
        let ry1 = y0.max(y1);
        let closest_x = self.x.clamp(rx0, rx1);
        let closest_y = self.y.clamp(ry0, ry1);
        let radius = self.diameter / 2.0;
        geometry::distance_sq(self.x, self.y, closest_x, closest_y) <= radius * radius
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

impl Default for Compass {
    fn default() -> Self {
        Self::new(-100.0, 50.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_contains() {
        let compass = Compass::new(0.0, 0.0, 100.0);
        assert!(compass.contains_point(49.0, 0.0, 0.0));
        assert!(!compass.contains_point(51.0, 0.0, 0.0));
        assert!(compass.contains_point(53.0, 0.0, 4.0));
    }

    #[test]
    fn test_indicator_points_follow_north() {
        let mut compass = Compass::new(0.0, 0.0, 100.0);
        assert_eq!(compass.rotation_point(), Point::new(50.0, 0.0));
        assert_eq!(compass.resize_point(), Point::new(0.0, 50.0));
        compass.north_direction = std::f64::consts::FRAC_PI_2;
        let rotation = compass.rotation_point();
        assert!((rotation.x - 0.0).abs() < 1e-9);
        assert!((rotation.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_intersects_rectangle() {
        let compass = Compass::new(0.0, 0.0, 100.0);
        assert!(compass.intersects_rectangle(40.0, -10.0, 90.0, 10.0));
        assert!(!compass.intersects_rectangle(60.0, 60.0, 90.0, 90.0));
    }
}
