//! Furniture pieces with their specialized kinds.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::home::{FurnitureId, LevelId};

/// What a piece of furniture is beyond its box geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FurnitureKind {
    /// Plain piece.
    Piece,
    /// Door or window meant to sit inside a wall. `bound_to_wall` records
    /// that the piece was snapped into a wall and still fits it.
    DoorOrWindow { bound_to_wall: bool },
    /// Light source with a power fraction in 0..=1.
    Light { power: f64 },
    /// Group moving and rotating as one piece. Groups are not resizable.
    Group { furniture: Vec<Furniture> },
}

/// A piece of furniture centered at (x, y), `angle` radians clockwise on
/// screen. Width runs along the piece X axis, depth along its Y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    pub id: FurnitureId,
    pub kind: FurnitureKind,
    pub name: String,
    pub name_visible: bool,
    pub name_x_offset: f64,
    pub name_y_offset: f64,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub elevation: f64,
    pub visible: bool,
    pub movable: bool,
    pub resizable: bool,
    pub deformable: bool,
    pub level: Option<LevelId>,
}

impl Furniture {
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, depth: f64, height: f64) -> Self {
        Self {
            id: FurnitureId(0),
            kind: FurnitureKind::Piece,
            name: name.into(),
            name_visible: false,
            name_x_offset: 0.0,
            name_y_offset: 0.0,
            x,
            y,
            angle: 0.0,
            width,
            depth,
            height,
            elevation: 0.0,
            visible: true,
            movable: true,
            resizable: true,
            deformable: true,
            level: None,
        }
    }

    pub fn new_door_or_window(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Self {
        let mut piece = Self::new(name, x, y, width, depth, height);
        piece.kind = FurnitureKind::DoorOrWindow {
            bound_to_wall: false,
        };
        piece
    }

    pub fn new_light(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Self {
        let mut piece = Self::new(name, x, y, width, depth, height);
        piece.kind = FurnitureKind::Light { power: 0.5 };
        piece
    }

    /// Builds a group around existing pieces. The group box is the bounding
    /// box of its children and its angle starts at zero.
    pub fn new_group(name: impl Into<String>, furniture: Vec<Furniture>) -> Self {
        let mut all_points = Vec::new();
        for piece in &furniture {
            all_points.extend(piece.points());
        }
        let (min_x, min_y, max_x, max_y) = geometry::points_bounds(&all_points);
        let elevation = furniture
            .iter()
            .map(|piece| piece.elevation)
            .fold(f64::MAX, f64::min);
        let height = furniture
            .iter()
            .map(|piece| piece.elevation + piece.height)
            .fold(f64::MIN, f64::max)
            - elevation;
        let mut group = Self::new(
            name,
            (min_x + max_x) / 2.0,
            (min_y + max_y) / 2.0,
            max_x - min_x,
            max_y - min_y,
            height,
        );
        group.elevation = elevation;
        group.resizable = false;
        group.deformable = false;
        group.kind = FurnitureKind::Group { furniture };
        group
    }

    pub fn is_door_or_window(&self) -> bool {
        matches!(self.kind, FurnitureKind::DoorOrWindow { .. })
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, FurnitureKind::Light { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, FurnitureKind::Group { .. })
    }

    /// Footprint corners rotated around the center, in top-left, top-right,
    /// bottom-right, bottom-left order.
    pub fn points(&self) -> Vec<Point> {
        let half_width = self.width / 2.0;
        let half_depth = self.depth / 2.0;
        [
            (self.x - half_width, self.y - half_depth),
            (self.x + half_width, self.y - half_depth),
            (self.x + half_width, self.y + half_depth),
            (self.x - half_width, self.y + half_depth),
        ]
        .iter()
        .map(|&(px, py)| {
            let (rx, ry) = geometry::rotate(px, py, self.x, self.y, self.angle);
            Point::new(rx, ry)
        })
        .collect()
    }

    pub fn contains_point(&self, x: f64, y: f64, margin: f64) -> bool {
        let points = self.points();
        if margin == 0.0 {
            geometry::polygon_contains(&points, x, y)
        } else {
            geometry::polygon_intersects_rect(
                &points,
                x - margin,
                y - margin,
                2.0 * margin,
                2.0 * margin,
            )
        }
    }

    fn is_corner_point_at(&self, index: usize, x: f64, y: f64, margin: f64) -> bool {
        let corner = self.points()[index];
        geometry::distance_sq(x, y, corner.x, corner.y) <= margin * margin
    }

    /// Rotation indicator corner.
    pub fn is_top_left_point_at(&self, x: f64, y: f64, margin: f64) -> bool {
        self.is_corner_point_at(0, x, y, margin)
    }

    /// Elevation indicator corner.
    pub fn is_top_right_point_at(&self, x: f64, y: f64, margin: f64) -> bool {
        self.is_corner_point_at(1, x, y, margin)
    }

    /// Resize indicator corner.
    pub fn is_bottom_right_point_at(&self, x: f64, y: f64, margin: f64) -> bool {
        self.is_corner_point_at(2, x, y, margin)
    }

    /// Height indicator corner on pieces, power indicator corner on lights.
    pub fn is_bottom_left_point_at(&self, x: f64, y: f64, margin: f64) -> bool {
        self.is_corner_point_at(3, x, y, margin)
    }

    /// Where the name text renders when visible.
    pub fn name_point(&self) -> Point {
        Point::new(self.x + self.name_x_offset, self.y + self.name_y_offset)
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
        if let FurnitureKind::Group { furniture } = &mut self.kind {
            for piece in furniture {
                piece.move_by(dx, dy);
            }
        }
    }

    /// Changes the piece angle. Group children revolve around the group
    /// center and keep their relative layout.
    pub fn set_angle(&mut self, angle: f64) {
        let delta = angle - self.angle;
        self.angle = angle;
        let (cx, cy) = (self.x, self.y);
        if let FurnitureKind::Group { furniture } = &mut self.kind {
            for piece in furniture {
                let (x, y) = geometry::rotate(piece.x, piece.y, cx, cy, delta);
                piece.x = x;
                piece.y = y;
                piece.set_angle(piece.angle + delta);
            }
        }
    }

    /// Changes elevation, shifting group children by the same delta.
    pub fn set_elevation(&mut self, elevation: f64) {
        let delta = elevation - self.elevation;
        self.elevation = elevation;
        if let FurnitureKind::Group { furniture } = &mut self.kind {
            for piece in furniture {
                piece.set_elevation(piece.elevation + delta);
            }
        }
    }

    pub fn is_at_level(&self, level: Option<LevelId>) -> bool {
        self.level == level
    }
}
