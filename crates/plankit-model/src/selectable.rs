//! Uniform handle over every selectable plan item.

use serde::{Deserialize, Serialize};

use crate::home::{DimensionLineId, FurnitureId, Home, LabelId, LevelId, RoomId, WallId};

/// Closed sum over the items a plan selection can hold. Geometry queries
/// dispatch to the entity behind the ID; a stale ID simply never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selectable {
    Wall(WallId),
    Room(RoomId),
    DimensionLine(DimensionLineId),
    Label(LabelId),
    Furniture(FurnitureId),
    Compass,
    Camera,
}

impl Selectable {
    pub fn contains_point(&self, home: &Home, x: f64, y: f64, margin: f64) -> bool {
        match self {
            Selectable::Wall(id) => home
                .wall(*id)
                .map_or(false, |wall| wall.contains_point(x, y, margin)),
            Selectable::Room(id) => home
                .room(*id)
                .map_or(false, |room| room.contains_point(x, y, margin)),
            Selectable::DimensionLine(id) => home
                .dimension_line(*id)
                .map_or(false, |line| line.contains_point(x, y, margin)),
            Selectable::Label(id) => home
                .label(*id)
                .map_or(false, |label| label.contains_point(x, y, margin)),
            Selectable::Furniture(id) => home
                .furniture_piece(*id)
                .map_or(false, |piece| piece.contains_point(x, y, margin)),
            Selectable::Compass => home.compass().contains_point(x, y, margin),
            Selectable::Camera => home.camera().contains_point(x, y, margin),
        }
    }

    pub fn intersects_rectangle(&self, home: &Home, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        match self {
            Selectable::Wall(id) => home
                .wall(*id)
                .map_or(false, |wall| wall.intersects_rectangle(x0, y0, x1, y1)),
            Selectable::Room(id) => home
                .room(*id)
                .map_or(false, |room| room.intersects_rectangle(x0, y0, x1, y1)),
            Selectable::DimensionLine(id) => home
                .dimension_line(*id)
                .map_or(false, |line| line.intersects_rectangle(x0, y0, x1, y1)),
            Selectable::Label(id) => home
                .label(*id)
                .map_or(false, |label| label.intersects_rectangle(x0, y0, x1, y1)),
            Selectable::Furniture(id) => home
                .furniture_piece(*id)
                .map_or(false, |piece| piece.intersects_rectangle(x0, y0, x1, y1)),
            Selectable::Compass => home.compass().intersects_rectangle(x0, y0, x1, y1),
            Selectable::Camera => home.camera().intersects_rectangle(x0, y0, x1, y1),
        }
    }

    /// Compass and camera belong to every level.
    pub fn is_at_level(&self, home: &Home, level: Option<LevelId>) -> bool {
        match self {
            Selectable::Wall(id) => home.wall(*id).map_or(false, |wall| wall.is_at_level(level)),
            Selectable::Room(id) => home.room(*id).map_or(false, |room| room.is_at_level(level)),
            Selectable::DimensionLine(id) => home
                .dimension_line(*id)
                .map_or(false, |line| line.is_at_level(level)),
            Selectable::Label(id) => home
                .label(*id)
                .map_or(false, |label| label.is_at_level(level)),
            Selectable::Furniture(id) => home
                .furniture_piece(*id)
                .map_or(false, |piece| piece.is_at_level(level)),
            Selectable::Compass | Selectable::Camera => true,
        }
    }

    /// Translates the item geometry. Walls move both endpoints without any
    /// neighbor propagation; editing operations that must preserve the wall
    /// graph go through their own topology-aware path.
    pub fn move_by(&self, home: &mut Home, dx: f64, dy: f64) {
        match self {
            Selectable::Wall(id) => {
                if let Some(wall) = home.wall_mut(*id) {
                    wall.move_by(dx, dy);
                }
            }
            Selectable::Room(id) => {
                if let Some(room) = home.room_mut(*id) {
                    room.move_by(dx, dy);
                }
            }
            Selectable::DimensionLine(id) => {
                if let Some(line) = home.dimension_line_mut(*id) {
                    line.move_by(dx, dy);
                }
            }
            Selectable::Label(id) => {
                if let Some(label) = home.label_mut(*id) {
                    label.move_by(dx, dy);
                }
            }
            Selectable::Furniture(id) => {
                if let Some(piece) = home.furniture_piece_mut(*id) {
                    piece.move_by(dx, dy);
                }
            }
            Selectable::Compass => home.compass_mut().move_by(dx, dy),
            Selectable::Camera => home.camera_mut().move_by(dx, dy),
        }
        home.notify_changed(*self);
    }
}
