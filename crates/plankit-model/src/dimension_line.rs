//! Dimension lines measuring a distance between two plan points.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::home::{DimensionLineId, LevelId};

/// A dimension line measures the segment from its start point to its end
/// point. It is drawn parallel to that segment, shifted sideways by `offset`,
/// with extension lines linking the measured points to the shifted ones.
/// A positive offset shifts towards the left side of the start to end
/// direction in Y-down coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionLine {
    pub id: DimensionLineId,
    pub x_start: f64,
    pub y_start: f64,
    pub x_end: f64,
    pub y_end: f64,
    pub offset: f64,
    pub level: Option<LevelId>,
}

impl DimensionLine {
    pub fn new(x_start: f64, y_start: f64, x_end: f64, y_end: f64, offset: f64) -> Self {
        Self {
            id: DimensionLineId(0),
            x_start,
            y_start,
            x_end,
            y_end,
            offset,
            level: None,
        }
    }

    /// Measured distance in centimeters.
    pub fn length(&self) -> f64 {
        geometry::distance(self.x_start, self.y_start, self.x_end, self.y_end)
    }

    fn angle(&self) -> f64 {
        (self.y_end - self.y_start).atan2(self.x_end - self.x_start)
    }

    /// Perpendicular shift applied to the measured segment.
    fn offset_vector(&self) -> (f64, f64) {
        let angle = self.angle();
        (-angle.sin() * self.offset, angle.cos() * self.offset)
    }

    /// The drawn outline as start, shifted start, shifted end, end.
    pub fn points(&self) -> [Point; 4] {
        let (dx, dy) = self.offset_vector();
        [
            Point::new(self.x_start, self.y_start),
            Point::new(self.x_start + dx, self.y_start + dy),
            Point::new(self.x_end + dx, self.y_end + dy),
            Point::new(self.x_end, self.y_end),
        ]
    }

    /// Center of the shifted segment, where the measure text renders.
    pub fn middle_point(&self) -> Point {
        let (dx, dy) = self.offset_vector();
        Point::new(
            (self.x_start + self.x_end) / 2.0 + dx,
            (self.y_start + self.y_end) / 2.0 + dy,
        )
    }

    /// Whether (x, y) lies within `margin` of the drawn shape, meaning the
    /// shifted segment or either extension line.
    pub fn contains_point(&self, x: f64, y: f64, margin: f64) -> bool {
        let [start, shifted_start, shifted_end, end] = self.points();
        let margin_sq = margin * margin;
        geometry::seg_distance_sq(
            shifted_start.x,
            shifted_start.y,
            shifted_end.x,
            shifted_end.y,
            x,
            y,
        ) <= margin_sq
            || geometry::seg_distance_sq(start.x, start.y, shifted_start.x, shifted_start.y, x, y)
                <= margin_sq
            || geometry::seg_distance_sq(end.x, end.y, shifted_end.x, shifted_end.y, x, y)
                <= margin_sq
    }

    /// Whether (x, y) lies within `margin` of the start extension line.
    pub fn contains_start_extension_line_at(&self, x: f64, y: f64, margin: f64) -> bool {
        let (dx, dy) = self.offset_vector();
        geometry::seg_distance_sq(
            self.x_start,
            self.y_start,
            self.x_start + dx,
            self.y_start + dy,
            x,
            y,
        ) <= margin * margin
    }

    /// Whether (x, y) lies within `margin` of the end extension line.
    pub fn contains_end_extension_line_at(&self, x: f64, y: f64, margin: f64) -> bool {
        let (dx, dy) = self.offset_vector();
        geometry::seg_distance_sq(
            self.x_end,
            self.y_end,
            self.x_end + dx,
            self.y_end + dy,
            x,
            y,
        ) <= margin * margin
    }

    /// Whether (x, y) lies within `margin` of the middle point on both axes.
    pub fn is_middle_point_at(&self, x: f64, y: f64, margin: f64) -> bool {
        let middle = self.middle_point();
        (x - middle.x).abs() <= margin && (y - middle.y).abs() <= margin
    }

    pub fn intersects_rectangle(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let rx = x0.min(x1);
        let ry = y0.min(y1);
        let rw = (x1 - x0).abs();
        let rh = (y1 - y0).abs();
        let [start, shifted_start, shifted_end, end] = self.points();
        geometry::segment_intersects_rect(
            shifted_start.x,
            shifted_start.y,
            shifted_end.x,
            shifted_end.y,
            rx,
            ry,
            rw,
            rh,
        ) || geometry::segment_intersects_rect(
            start.x,
            start.y,
            shifted_start.x,
            shifted_start.y,
            rx,
            ry,
            rw,
            rh,
        ) || geometry::segment_intersects_rect(
            end.x, end.y, shifted_end.x, shifted_end.y, rx, ry, rw, rh,
        )
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
    fn test_points_follow_offset() {
        let line = DimensionLine::new(0.0, 0.0, 100.0, 0.0, 20.0);
        let points = line.points();
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[1], Point::new(0.0, 20.0));
        assert_eq!(points[2], Point::new(100.0, 20.0));
        assert_eq!(points[3], Point::new(100.0, 0.0));
        assert_eq!(line.middle_point(), Point::new(50.0, 20.0));
    }

    #[test]
    fn test_contains_point_on_shifted_segment() {
        let line = DimensionLine::new(0.0, 0.0, 100.0, 0.0, 20.0);
        assert!(line.contains_point(50.0, 21.0, 2.0));
        assert!(!line.contains_point(50.0, 10.0, 2.0));
        assert!(line.contains_point(0.0, 10.0, 2.0));
    }

    #[test]
    fn test_extension_line_hits() {
        let line = DimensionLine::new(0.0, 0.0, 100.0, 0.0, 20.0);
        assert!(line.contains_start_extension_line_at(0.5, 10.0, 2.0));
        assert!(!line.contains_start_extension_line_at(99.5, 10.0, 2.0));
        assert!(line.contains_end_extension_line_at(99.5, 10.0, 2.0));
    }

    #[test]
    fn test_length_ignores_offset() {
        let line = DimensionLine::new(10.0, 10.0, 40.0, 50.0, -15.0);
        assert_eq!(line.length(), 50.0);
    }
}
