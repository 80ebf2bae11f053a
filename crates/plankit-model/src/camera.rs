//! Observer camera shown as a plan item.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};

/// The observer camera. Its plan footprint is a human-proportioned box
/// whose size follows the eyes elevation `z`, rotated by the yaw angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub field_of_view: f64,
}

impl Camera {
    pub fn new(x: f64, y: f64, z: f64, yaw: f64, pitch: f64, field_of_view: f64) -> Self {
        Self {
            x,
            y,
            z,
            yaw,
            pitch,
            field_of_view,
        }
    }

    /// Body width from human proportions, 4 times the head to eyes distance.
    pub fn width(&self) -> f64 {
        (self.z * 4.0 / 14.0).clamp(20.0, 62.5)
    }

    /// Body depth, 2 / 5 of the width proportions.
    pub fn depth(&self) -> f64 {
        (self.z * 8.0 / 70.0).clamp(8.0, 25.0)
    }

    /// Corners of the rectangle surrounding the camera figure, rotated by
    /// yaw, in top-left, top-right, bottom-right, bottom-left order.
    pub fn points(&self) -> Vec<Point> {
        let half_width = self.width() / 2.0;
        let half_depth = self.depth() / 2.0;
        [
            (self.x - half_width, self.y - half_depth),
            (self.x + half_width, self.y - half_depth),
            (self.x + half_width, self.y + half_depth),
            (self.x - half_width, self.y + half_depth),
        ]
        .iter()
        .map(|&(px, py)| {
            let (rx, ry) = geometry::rotate(px, py, self.x, self.y, self.yaw);
            Point::new(rx, ry)
        })
        .collect()
    }

    /// Whether the elliptic camera figure contains (x, y), inflated by
    /// `margin`.
    pub fn contains_point(&self, x: f64, y: f64, margin: f64) -> bool {
        // Bring the point into the camera frame, then run the ellipse test.
        let (px, py) = geometry::rotate(x, y, self.x, self.y, -self.yaw);
        let a = self.width() / 2.0 + margin;
        let b = self.depth() / 2.0 + margin;
        let nx = (px - self.x) / a;
        let ny = (py - self.y) / b;
        nx * nx + ny * ny <= 1.0
    }

    pub fn intersects_rectangle(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let rx = x0.min(x1);
        let ry = y0.min(y1);
        geometry::polygon_intersects_rect(
            &self.points(),
            rx,
            ry,
            (x1 - x0).abs(),
            (y1 - y0).abs(),
        )
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

impl Default for Camera {
    fn default() -> Self {
        // 170 cm eyes elevation, looking north-west, 63 degree lens.
        Self::new(
            100.0,
            100.0,
            170.0,
            7.0 * std::f64::consts::PI / 4.0,
            std::f64::consts::PI / 16.0,
            63.0 * std::f64::consts::PI / 180.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_follows_elevation() {
        let camera = Camera::new(0.0, 0.0, 170.0, 0.0, 0.0, 1.0);
        assert!((camera.width() - 48.571428).abs() < 1e-5);
        assert!((camera.depth() - 19.428571).abs() < 1e-5);
        let low = Camera::new(0.0, 0.0, 10.0, 0.0, 0.0, 1.0);
        assert_eq!(low.width(), 20.0);
        assert_eq!(low.depth(), 8.0);
    }

    #[test]
    fn test_contains_point() {
        let camera = Camera::new(100.0, 100.0, 170.0, 0.0, 0.0, 1.0);
        assert!(camera.contains_point(100.0, 100.0, 0.0));
        assert!(camera.contains_point(120.0, 100.0, 0.0));
        assert!(!camera.contains_point(100.0, 120.0, 0.0));
        assert!(camera.contains_point(100.0, 112.0, 4.0));
    }

    #[test]
    fn test_points_rotated_by_yaw() {
        let camera = Camera::new(0.0, 0.0, 170.0, std::f64::consts::FRAC_PI_2, 0.0, 1.0);
        let points = camera.points();
        let half_width = camera.width() / 2.0;
        assert!((points[0].x - camera.depth() / 2.0).abs() < 1e-9);
        assert!((points[0].y - -half_width).abs() < 1e-9);
    }
}
