//! Walls and their footprint geometry.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::home::{LevelId, WallId};

/// A wall between two points, with a thickness and one optional joined
/// neighbor per endpoint. Heights may differ at both ends for raked walls,
/// and a non-zero arc extent turns the wall into a circle arc.
///
/// Join symmetry invariant: if this wall references a neighbor at one of its
/// endpoints, that neighbor references this wall back from whichever of its
/// own endpoints coincides, or neither references the other. The invariant is
/// maintained by the editing operations, not by these setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub x_start: f64,
    pub y_start: f64,
    pub x_end: f64,
    pub y_end: f64,
    pub thickness: f64,
    /// Height at the start point.
    pub height: f64,
    /// Height at the end point for raked walls, `None` for a level top.
    pub height_at_end: Option<f64>,
    /// Angle in radians subtended by the arc of a round wall.
    pub arc_extent: Option<f64>,
    pub wall_at_start: Option<WallId>,
    pub wall_at_end: Option<WallId>,
    pub left_side_color: Option<u32>,
    pub right_side_color: Option<u32>,
    pub level: Option<LevelId>,
}

impl Wall {
    pub fn new(x_start: f64, y_start: f64, x_end: f64, y_end: f64, thickness: f64, height: f64) -> Self {
        Self {
            id: WallId(0),
            x_start,
            y_start,
            x_end,
            y_end,
            thickness,
            height,
            height_at_end: None,
            arc_extent: None,
            wall_at_start: None,
            wall_at_end: None,
            left_side_color: None,
            right_side_color: None,
            level: None,
        }
    }

    pub fn start_point(&self) -> Point {
        Point::new(self.x_start, self.y_start)
    }

    pub fn end_point(&self) -> Point {
        Point::new(self.x_end, self.y_end)
    }

    /// Length along the wall, following the arc for round walls.
    pub fn length(&self) -> f64 {
        match self.arc_circle_center() {
            Some(center) => {
                let radius = geometry::distance(center.x, center.y, self.x_start, self.y_start);
                radius * self.arc_extent.unwrap_or(0.0).abs()
            }
            None => geometry::distance(self.x_start, self.y_start, self.x_end, self.y_end),
        }
    }

    /// Point halfway along the wall, on the arc for round walls.
    pub fn middle_point(&self) -> Point {
        match self.arc_circle_center() {
            Some(center) => {
                let radius = geometry::distance(center.x, center.y, self.x_start, self.y_start);
                let (a0, sweep) = self.arc_angles(&center);
                let a = a0 + sweep / 2.0;
                Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
            }
            None => Point::new(
                (self.x_start + self.x_end) / 2.0,
                (self.y_start + self.y_end) / 2.0,
            ),
        }
    }

    /// Height at the end point, equal to the start height for level walls.
    pub fn end_height(&self) -> f64 {
        self.height_at_end.unwrap_or(self.height)
    }

    /// Whether start and end heights differ.
    pub fn is_raked(&self) -> bool {
        match self.height_at_end {
            Some(h) => h != self.height,
            None => false,
        }
    }

    /// Center of the circle a round wall lies on, `None` for straight walls.
    pub fn arc_circle_center(&self) -> Option<Point> {
        let arc_extent = self.arc_extent?;
        if arc_extent == 0.0 {
            return None;
        }
        let chord = geometry::distance(self.x_start, self.y_start, self.x_end, self.y_end);
        if chord == 0.0 {
            return None;
        }
        let center_angle = if arc_extent.abs() > std::f64::consts::PI {
            -(std::f64::consts::PI + arc_extent) / 2.0
        } else {
            (std::f64::consts::PI - arc_extent) / 2.0
        };
        let center_to_chord = -(center_angle.tan() * chord / 2.0);
        let x_middle = (self.x_start + self.x_end) / 2.0;
        let y_middle = (self.y_start + self.y_end) / 2.0;
        let angle = f64::atan2(self.x_start - self.x_end, self.y_end - self.y_start);
        Some(Point::new(
            x_middle + center_to_chord * angle.cos(),
            y_middle - center_to_chord * angle.sin(),
        ))
    }

    fn arc_angles(&self, center: &Point) -> (f64, f64) {
        let a0 = f64::atan2(self.y_start - center.y, self.x_start - center.x);
        let a1 = f64::atan2(self.y_end - center.y, self.x_end - center.x);
        let ext = self.arc_extent.unwrap_or(0.0);
        // Pick the sweep direction that actually lands on the end point.
        let forward = a0 + ext;
        if (forward.sin() - a1.sin()).abs() < 1e-6 && (forward.cos() - a1.cos()).abs() < 1e-6 {
            (a0, ext)
        } else {
            (a0, -ext)
        }
    }

    /// Footprint polygon of the wall including its thickness. Straight walls
    /// yield their four corners, round walls a sampled double arc.
    pub fn points(&self) -> Vec<Point> {
        if let Some(center) = self.arc_circle_center() {
            let radius = geometry::distance(center.x, center.y, self.x_start, self.y_start);
            let outer = radius + self.thickness / 2.0;
            let inner = (radius - self.thickness / 2.0).max(0.0);
            let (a0, sweep) = self.arc_angles(&center);
            let steps = ((sweep.abs() / 0.15).ceil() as usize).max(2);
            let mut points = Vec::with_capacity(2 * (steps + 1));
            for i in 0..=steps {
                let a = a0 + sweep * (i as f64) / (steps as f64);
                points.push(Point::new(center.x + outer * a.cos(), center.y + outer * a.sin()));
            }
            for i in (0..=steps).rev() {
                let a = a0 + sweep * (i as f64) / (steps as f64);
                points.push(Point::new(center.x + inner * a.cos(), center.y + inner * a.sin()));
            }
            points
        } else {
            self.corner_points().to_vec()
        }
    }

    /// The four true corner points of the wall footprint, excluding any arc
    /// interior samples: [start left, end left, end right, start right].
    pub fn corner_points(&self) -> [Point; 4] {
        if let Some(center) = self.arc_circle_center() {
            let radius = geometry::distance(center.x, center.y, self.x_start, self.y_start);
            let outer = radius + self.thickness / 2.0;
            let inner = (radius - self.thickness / 2.0).max(0.0);
            let (a0, sweep) = self.arc_angles(&center);
            let a1 = a0 + sweep;
            [
                Point::new(center.x + outer * a0.cos(), center.y + outer * a0.sin()),
                Point::new(center.x + outer * a1.cos(), center.y + outer * a1.sin()),
                Point::new(center.x + inner * a1.cos(), center.y + inner * a1.sin()),
                Point::new(center.x + inner * a0.cos(), center.y + inner * a0.sin()),
            ]
        } else {
            let angle = f64::atan2(self.y_end - self.y_start, self.x_end - self.x_start);
            let dx = angle.sin() * self.thickness / 2.0;
            let dy = angle.cos() * self.thickness / 2.0;
            [
                Point::new(self.x_start + dx, self.y_start - dy),
                Point::new(self.x_end + dx, self.y_end - dy),
                Point::new(self.x_end - dx, self.y_end + dy),
                Point::new(self.x_start - dx, self.y_start + dy),
            ]
        }
    }

    /// Whether the footprint contains (x, y). With a non-zero margin the test
    /// succeeds when the footprint crosses the square of half-size `margin`
    /// centered on the point.
    pub fn contains_point(&self, x: f64, y: f64, margin: f64) -> bool {
        let points = self.points();
        if margin == 0.0 {
            geometry::polygon_contains(&points, x, y)
        } else {
            geometry::polygon_intersects_rect(&points, x - margin, y - margin, 2.0 * margin, 2.0 * margin)
        }
    }

    pub fn contains_wall_start_at(&self, x: f64, y: f64, margin: f64) -> bool {
        geometry::distance_sq(self.x_start, self.y_start, x, y) <= margin * margin
    }

    pub fn contains_wall_end_at(&self, x: f64, y: f64, margin: f64) -> bool {
        geometry::distance_sq(self.x_end, self.y_end, x, y) <= margin * margin
    }

    pub fn intersects_rectangle(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let rx = x0.min(x1);
        let ry = y0.min(y1);
        geometry::polygon_intersects_rect(&self.points(), rx, ry, (x1 - x0).abs(), (y1 - y0).abs())
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x_start += dx;
        self.y_start += dy;
        self.x_end += dx;
        self.y_end += dy;
    }

    pub fn is_at_level(&self, level: Option<LevelId>) -> bool {
        self.level == level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_wall_footprint() {
        let wall = Wall::new(0.0, 0.0, 100.0, 0.0, 10.0, 250.0);
        let corners = wall.corner_points();
        assert_eq!(corners[0], Point::new(0.0, -5.0));
        assert_eq!(corners[1], Point::new(100.0, -5.0));
        assert_eq!(corners[2], Point::new(100.0, 5.0));
        assert_eq!(corners[3], Point::new(0.0, 5.0));
        assert_eq!(wall.length(), 100.0);
    }

    #[test]
    fn test_contains_point_with_margin() {
        let wall = Wall::new(0.0, 0.0, 100.0, 0.0, 10.0, 250.0);
        assert!(wall.contains_point(50.0, 0.0, 0.0));
        assert!(!wall.contains_point(50.0, 8.0, 0.0));
        assert!(wall.contains_point(50.0, 8.0, 4.0));
    }

    #[test]
    fn test_arc_wall_length_longer_than_chord() {
        let mut wall = Wall::new(0.0, 0.0, 100.0, 0.0, 10.0, 250.0);
        wall.arc_extent = Some(std::f64::consts::FRAC_PI_2);
        let chord = 100.0;
        assert!(wall.length() > chord);
        // Half circle chord/2 * pi/2 relation for a quarter arc
        let center = wall.arc_circle_center().unwrap();
        let r = center.distance(&wall.start_point());
        assert!((wall.length() - r * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_arc_wall_middle_point_off_chord() {
        let mut wall = Wall::new(0.0, 0.0, 100.0, 0.0, 10.0, 250.0);
        wall.arc_extent = Some(1.0);
        let middle = wall.middle_point();
        assert!((middle.x - 50.0).abs() < 1e-6);
        assert!(middle.y.abs() > 1.0);
    }

    #[test]
    fn test_raked_heights() {
        let mut wall = Wall::new(0.0, 0.0, 100.0, 0.0, 10.0, 250.0);
        assert!(!wall.is_raked());
        assert_eq!(wall.end_height(), 250.0);
        wall.height_at_end = Some(300.0);
        assert!(wall.is_raked());
        assert_eq!(wall.end_height(), 300.0);
    }
}
