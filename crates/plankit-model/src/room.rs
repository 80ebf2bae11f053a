//! Rooms as free polygons with floor/ceiling paint and label offsets.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::home::{LevelId, RoomId};

/// A room described by an ordered polygon. Finalized rooms have at least
/// three points; two are permitted transiently while the room is being drawn.
/// Association with surrounding walls is purely geometric, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub points: Vec<Point>,
    pub name: Option<String>,
    pub name_x_offset: f64,
    pub name_y_offset: f64,
    pub area_visible: bool,
    pub area_x_offset: f64,
    pub area_y_offset: f64,
    pub floor_visible: bool,
    pub floor_color: Option<u32>,
    pub ceiling_visible: bool,
    pub ceiling_color: Option<u32>,
    pub level: Option<LevelId>,
}

impl Room {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: RoomId(0),
            points,
            name: None,
            name_x_offset: 0.0,
            name_y_offset: -40.0,
            area_visible: false,
            area_x_offset: 0.0,
            area_y_offset: 0.0,
            floor_visible: true,
            floor_color: None,
            ceiling_visible: true,
            ceiling_color: None,
            level: None,
        }
    }

    /// Surface of the room polygon in square centimeters.
    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.points).abs()
    }

    /// Whether the polygon winds clockwise on screen.
    pub fn is_clockwise(&self) -> bool {
        geometry::polygon_area(&self.points) > 0.0
    }

    /// Center of the room bounding box.
    pub fn center(&self) -> Point {
        let (min_x, min_y, max_x, max_y) = geometry::points_bounds(&self.points);
        Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
    }

    /// Where the room name renders.
    pub fn name_point(&self) -> Point {
        let center = self.center();
        Point::new(center.x + self.name_x_offset, center.y + self.name_y_offset)
    }

    /// Where the room area text renders.
    pub fn area_point(&self) -> Point {
        let center = self.center();
        Point::new(center.x + self.area_x_offset, center.y + self.area_y_offset)
    }

    pub fn contains_point(&self, x: f64, y: f64, margin: f64) -> bool {
        if margin == 0.0 {
            geometry::polygon_contains(&self.points, x, y)
        } else {
            geometry::polygon_intersects_rect(
                &self.points,
                x - margin,
                y - margin,
                2.0 * margin,
                2.0 * margin,
            )
        }
    }

    /// Index of the polygon point within `margin` of (x, y) on both axes.
    pub fn point_index_at(&self, x: f64, y: f64, margin: f64) -> Option<usize> {
        self.points
            .iter()
            .position(|p| (p.x - x).abs() <= margin && (p.y - y).abs() <= margin)
    }

    pub fn add_point(&mut self, index: usize, x: f64, y: f64) {
        self.points.insert(index, Point::new(x, y));
    }

    pub fn set_point(&mut self, index: usize, x: f64, y: f64) {
        self.points[index] = Point::new(x, y);
    }

    pub fn remove_point(&mut self, index: usize) {
        self.points.remove(index);
    }

    pub fn intersects_rectangle(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let rx = x0.min(x1);
        let ry = y0.min(y1);
        geometry::polygon_intersects_rect(&self.points, rx, ry, (x1 - x0).abs(), (y1 - y0).abs())
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    pub fn is_at_level(&self, level: Option<LevelId>) -> bool {
        self.level == level
    }
}
