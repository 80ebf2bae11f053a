//! Hit testing under the pointer: whole items, their modification handles
//! and rubber band rectangles.
//!
//! Handle probes only answer for a selection holding exactly the probed
//! item, and their zones stay disjoint because each handle sits on a
//! different corner and the press must land outside the piece body. When
//! the base plan is locked, structural items answer to no probe at all.

use plankit_model::{DimensionLineId, Furniture, FurnitureId, FurnitureKind, Home, RoomId, Selectable, WallId};

use crate::context::EditContext;

/// Whether the item belongs to the base plan protected by the lock.
/// Furniture counts only when fixed in place or built into a wall.
pub fn is_item_part_of_base_plan(home: &Home, item: Selectable) -> bool {
    match item {
        Selectable::Furniture(id) => match home.furniture_piece(id) {
            Some(piece) => !piece.movable || piece.is_door_or_window(),
            None => false,
        },
        Selectable::Camera => false,
        _ => true,
    }
}

impl EditContext {
    /// Whether the base plan lock permits picking and modifying the item.
    pub fn item_modifiable(&self, item: Selectable) -> bool {
        !self.home.is_base_plan_locked() || !is_item_part_of_base_plan(&self.home, item)
    }

    /// Topmost pickable item under (x, y), camera first and compass last.
    /// Furniture is scanned in reverse order so the piece drawn last wins,
    /// unless a lower one sits at a strictly higher elevation.
    pub fn selectable_item_at(&self, x: f64, y: f64) -> Option<Selectable> {
        let margin = self.pixel_margin();
        let level = self.home.selected_level();
        if self.home.is_camera_in_plan() && self.home.camera().contains_point(x, y, margin) {
            return Some(Selectable::Camera);
        }
        for line in self.home.dimension_lines() {
            if line.is_at_level(level)
                && self.item_modifiable(Selectable::DimensionLine(line.id))
                && line.contains_point(x, y, margin)
            {
                return Some(Selectable::DimensionLine(line.id));
            }
        }
        for label in self.home.labels() {
            if label.is_at_level(level)
                && self.item_modifiable(Selectable::Label(label.id))
                && label.contains_point(x, y, margin)
            {
                return Some(Selectable::Label(label.id));
            }
        }
        let mut found: Option<&Furniture> = None;
        for piece in self.home.furniture().iter().rev() {
            if piece.visible
                && piece.is_at_level(level)
                && self.item_modifiable(Selectable::Furniture(piece.id))
                && piece.contains_point(x, y, margin)
                && found.is_none_or(|other| piece.elevation > other.elevation)
            {
                found = Some(piece);
            }
        }
        if let Some(piece) = found {
            return Some(Selectable::Furniture(piece.id));
        }
        for wall in self.home.walls() {
            if wall.is_at_level(level)
                && self.item_modifiable(Selectable::Wall(wall.id))
                && wall.contains_point(x, y, margin)
            {
                return Some(Selectable::Wall(wall.id));
            }
        }
        for room in self.home.rooms() {
            if room.is_at_level(level)
                && self.item_modifiable(Selectable::Room(room.id))
                && room.contains_point(x, y, margin)
            {
                return Some(Selectable::Room(room.id));
            }
        }
        let compass = self.home.compass();
        if compass.visible
            && self.item_modifiable(Selectable::Compass)
            && compass.contains_point(x, y, margin)
        {
            return Some(Selectable::Compass);
        }
        None
    }

    /// All pickable items intersecting the rectangle with opposite corners
    /// (x0, y0) and (x1, y1).
    pub fn selectable_items_in_rect(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Selectable> {
        let level = self.home.selected_level();
        let mut items = Vec::new();
        for line in self.home.dimension_lines() {
            if line.is_at_level(level)
                && self.item_modifiable(Selectable::DimensionLine(line.id))
                && line.intersects_rectangle(x0, y0, x1, y1)
            {
                items.push(Selectable::DimensionLine(line.id));
            }
        }
        for room in self.home.rooms() {
            if room.is_at_level(level)
                && self.item_modifiable(Selectable::Room(room.id))
                && room.intersects_rectangle(x0, y0, x1, y1)
            {
                items.push(Selectable::Room(room.id));
            }
        }
        for wall in self.home.walls() {
            if wall.is_at_level(level)
                && self.item_modifiable(Selectable::Wall(wall.id))
                && wall.intersects_rectangle(x0, y0, x1, y1)
            {
                items.push(Selectable::Wall(wall.id));
            }
        }
        if self.home.is_camera_in_plan() && self.home.camera().intersects_rectangle(x0, y0, x1, y1)
        {
            items.push(Selectable::Camera);
        }
        for piece in self.home.furniture() {
            if piece.visible
                && piece.is_at_level(level)
                && self.item_modifiable(Selectable::Furniture(piece.id))
                && piece.intersects_rectangle(x0, y0, x1, y1)
            {
                items.push(Selectable::Furniture(piece.id));
            }
        }
        for label in self.home.labels() {
            if label.is_at_level(level)
                && self.item_modifiable(Selectable::Label(label.id))
                && label.intersects_rectangle(x0, y0, x1, y1)
            {
                items.push(Selectable::Label(label.id));
            }
        }
        let compass = self.home.compass();
        if compass.visible
            && self.item_modifiable(Selectable::Compass)
            && compass.intersects_rectangle(x0, y0, x1, y1)
        {
            items.push(Selectable::Compass);
        }
        items
    }

    /// Selected items the delete key may remove.
    pub fn deletable_selected_items(&self) -> Vec<Selectable> {
        self.home
            .selected_items()
            .iter()
            .copied()
            .filter(|item| !matches!(item, Selectable::Camera | Selectable::Compass))
            .filter(|item| self.item_modifiable(*item))
            .collect()
    }

    /// Selected items arrow keys and drags may move.
    pub fn movable_selected_items(&self) -> Vec<Selectable> {
        self.home
            .selected_items()
            .iter()
            .copied()
            .filter(|item| self.item_modifiable(*item))
            .collect()
    }

    fn selected_single_wall(&self) -> Option<WallId> {
        match self.home.selected_items() {
            [Selectable::Wall(id)] if self.item_modifiable(Selectable::Wall(*id)) => Some(*id),
            _ => None,
        }
    }

    /// Selected wall with its start point under (x, y).
    pub fn resized_wall_start_at(&self, x: f64, y: f64) -> Option<WallId> {
        let id = self.selected_single_wall()?;
        let wall = self.home.wall(id)?;
        if wall.contains_wall_start_at(x, y, self.indicator_margin()) {
            Some(id)
        } else {
            None
        }
    }

    /// Selected wall with its end point under (x, y).
    pub fn resized_wall_end_at(&self, x: f64, y: f64) -> Option<WallId> {
        let id = self.selected_single_wall()?;
        let wall = self.home.wall(id)?;
        if wall.contains_wall_end_at(x, y, self.indicator_margin()) {
            Some(id)
        } else {
            None
        }
    }

    fn selected_single_room(&self) -> Option<RoomId> {
        match self.home.selected_items() {
            [Selectable::Room(id)] if self.item_modifiable(Selectable::Room(*id)) => Some(*id),
            _ => None,
        }
    }

    /// Selected room with a vertex under (x, y), and that vertex's index.
    pub fn resized_room_at(&self, x: f64, y: f64) -> Option<(RoomId, usize)> {
        let id = self.selected_single_room()?;
        let room = self.home.room(id)?;
        let index = room.point_index_at(x, y, self.indicator_margin())?;
        Some((id, index))
    }

    /// Selected room with its name anchor under (x, y).
    pub fn room_name_at(&self, x: f64, y: f64) -> Option<RoomId> {
        let id = self.selected_single_room()?;
        let room = self.home.room(id)?;
        let named = room
            .name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        if !named {
            return None;
        }
        let anchor = room.name_point();
        let margin = self.indicator_margin();
        if (x - anchor.x).abs() <= margin && (y - anchor.y).abs() <= margin {
            Some(id)
        } else {
            None
        }
    }

    /// Selected room with its area text anchor under (x, y).
    pub fn room_area_at(&self, x: f64, y: f64) -> Option<RoomId> {
        let id = self.selected_single_room()?;
        let room = self.home.room(id)?;
        if !room.area_visible {
            return None;
        }
        let anchor = room.area_point();
        let margin = self.indicator_margin();
        if (x - anchor.x).abs() <= margin && (y - anchor.y).abs() <= margin {
            Some(id)
        } else {
            None
        }
    }

    fn selected_single_dimension_line(&self) -> Option<DimensionLineId> {
        match self.home.selected_items() {
            [Selectable::DimensionLine(id)]
                if self.item_modifiable(Selectable::DimensionLine(*id)) =>
            {
                Some(*id)
            }
            _ => None,
        }
    }

    /// Selected dimension line with its start extension line under (x, y).
    pub fn resized_dimension_line_start_at(&self, x: f64, y: f64) -> Option<DimensionLineId> {
        let id = self.selected_single_dimension_line()?;
        let line = self.home.dimension_line(id)?;
        if line.contains_start_extension_line_at(x, y, self.indicator_margin()) {
            Some(id)
        } else {
            None
        }
    }

    /// Selected dimension line with its end extension line under (x, y).
    pub fn resized_dimension_line_end_at(&self, x: f64, y: f64) -> Option<DimensionLineId> {
        let id = self.selected_single_dimension_line()?;
        let line = self.home.dimension_line(id)?;
        if line.contains_end_extension_line_at(x, y, self.indicator_margin()) {
            Some(id)
        } else {
            None
        }
    }

    /// Selected dimension line with its middle point under (x, y), grabbed
    /// to change the offset.
    pub fn offset_dimension_line_at(&self, x: f64, y: f64) -> Option<DimensionLineId> {
        let id = self.selected_single_dimension_line()?;
        let line = self.home.dimension_line(id)?;
        if line.is_middle_point_at(x, y, self.indicator_margin()) {
            Some(id)
        } else {
            None
        }
    }

    fn selected_single_furniture(&self) -> Option<&Furniture> {
        match self.home.selected_items() {
            [Selectable::Furniture(id)] if self.item_modifiable(Selectable::Furniture(*id)) => {
                self.home.furniture_piece(*id)
            }
            _ => None,
        }
    }

    /// Selected piece with its rotation indicator under (x, y).
    pub fn rotated_furniture_at(&self, x: f64, y: f64) -> Option<FurnitureId> {
        let piece = self.selected_single_furniture()?;
        if piece.is_top_left_point_at(x, y, self.indicator_margin())
            && !piece.contains_point(x, y, 0.0)
        {
            Some(piece.id)
        } else {
            None
        }
    }

    /// Selected piece with its elevation indicator under (x, y).
    pub fn elevated_furniture_at(&self, x: f64, y: f64) -> Option<FurnitureId> {
        let piece = self.selected_single_furniture()?;
        if piece.is_top_right_point_at(x, y, self.indicator_margin())
            && !piece.contains_point(x, y, 0.0)
        {
            Some(piece.id)
        } else {
            None
        }
    }

    /// Selected resizable piece with its height indicator under (x, y).
    pub fn height_resized_furniture_at(&self, x: f64, y: f64) -> Option<FurnitureId> {
        let piece = self.selected_single_furniture()?;
        if piece.resizable
            && piece.is_bottom_left_point_at(x, y, self.indicator_margin())
            && !piece.contains_point(x, y, 0.0)
        {
            Some(piece.id)
        } else {
            None
        }
    }

    /// Selected light with its power indicator under (x, y). Probed before
    /// the height indicator sharing the same corner.
    pub fn light_power_at(&self, x: f64, y: f64) -> Option<FurnitureId> {
        let piece = self.selected_single_furniture()?;
        if matches!(piece.kind, FurnitureKind::Light { .. })
            && piece.is_bottom_left_point_at(x, y, self.indicator_margin())
            && !piece.contains_point(x, y, 0.0)
        {
            Some(piece.id)
        } else {
            None
        }
    }

    /// Selected resizable piece with its width and depth indicator under
    /// (x, y).
    pub fn width_depth_resized_furniture_at(&self, x: f64, y: f64) -> Option<FurnitureId> {
        let piece = self.selected_single_furniture()?;
        if piece.resizable
            && piece.is_bottom_right_point_at(x, y, self.indicator_margin())
            && !piece.contains_point(x, y, 0.0)
        {
            Some(piece.id)
        } else {
            None
        }
    }

    /// Selected piece with its visible name anchor under (x, y).
    pub fn furniture_name_at(&self, x: f64, y: f64) -> Option<FurnitureId> {
        let piece = self.selected_single_furniture()?;
        if !piece.name_visible || piece.name.trim().is_empty() {
            return None;
        }
        let anchor = piece.name_point();
        let margin = self.indicator_margin();
        if (x - anchor.x).abs() <= margin && (y - anchor.y).abs() <= margin {
            Some(piece.id)
        } else {
            None
        }
    }

    fn camera_selected(&self) -> bool {
        self.home.is_camera_in_plan()
            && matches!(self.home.selected_items(), [Selectable::Camera])
    }

    /// Whether (x, y) lands on the selected camera's yaw indicator, the
    /// middle of its left side.
    pub fn yaw_rotated_camera_at(&self, x: f64, y: f64) -> bool {
        if !self.camera_selected() {
            return false;
        }
        let points = self.home.camera().points();
        let mx = (points[0].x + points[3].x) / 2.0;
        let my = (points[0].y + points[3].y) / 2.0;
        let margin = self.indicator_margin();
        (x - mx).abs() <= margin && (y - my).abs() <= margin
    }

    /// Whether (x, y) lands on the selected camera's pitch indicator, the
    /// middle of its right side.
    pub fn pitch_rotated_camera_at(&self, x: f64, y: f64) -> bool {
        if !self.camera_selected() {
            return false;
        }
        let points = self.home.camera().points();
        let mx = (points[1].x + points[2].x) / 2.0;
        let my = (points[1].y + points[2].y) / 2.0;
        let margin = self.indicator_margin();
        (x - mx).abs() <= margin && (y - my).abs() <= margin
    }

    /// Whether (x, y) lands on the selected camera's elevation indicator,
    /// the middle of its top side.
    pub fn elevated_camera_at(&self, x: f64, y: f64) -> bool {
        if !self.camera_selected() {
            return false;
        }
        let points = self.home.camera().points();
        let mx = (points[0].x + points[1].x) / 2.0;
        let my = (points[0].y + points[1].y) / 2.0;
        let margin = self.indicator_margin();
        (x - mx).abs() <= margin && (y - my).abs() <= margin
    }

    fn compass_selected(&self) -> bool {
        matches!(self.home.selected_items(), [Selectable::Compass])
            && self.item_modifiable(Selectable::Compass)
            && self.home.compass().visible
    }

    /// Whether (x, y) lands on the selected compass rotation indicator.
    pub fn rotated_compass_at(&self, x: f64, y: f64) -> bool {
        self.compass_selected()
            && self
                .home
                .compass()
                .is_rotation_point_at(x, y, self.indicator_margin())
    }

    /// Whether (x, y) lands on the selected compass resize indicator.
    pub fn resized_compass_at(&self, x: f64, y: f64) -> bool {
        self.compass_selected()
            && self
                .home
                .compass()
                .is_resize_point_at(x, y, self.indicator_margin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::NoOpView;
    use plankit_model::{Label, Room, UserPreferences, Wall};

    fn context_with(home: Home) -> EditContext {
        EditContext::new(home, UserPreferences::default(), Box::new(NoOpView))
    }

    #[test]
    fn test_item_at_prefers_furniture_over_walls_and_rooms() {
        let mut home = Home::new();
        home.add_room(Room::new(vec![
            plankit_model::Point::new(0.0, 0.0),
            plankit_model::Point::new(400.0, 0.0),
            plankit_model::Point::new(400.0, 300.0),
            plankit_model::Point::new(0.0, 300.0),
        ]));
        let piece = home.add_furniture(Furniture::new("table", 200.0, 150.0, 50.0, 50.0, 75.0));
        let ctx = context_with(home);
        assert_eq!(
            ctx.selectable_item_at(200.0, 150.0),
            Some(Selectable::Furniture(piece))
        );
    }

    #[test]
    fn test_item_at_picks_highest_elevation_piece() {
        let mut home = Home::new();
        let low = home.add_furniture(Furniture::new("rug", 100.0, 100.0, 80.0, 80.0, 1.0));
        let mut lamp = Furniture::new("lamp", 100.0, 100.0, 20.0, 20.0, 40.0);
        lamp.elevation = 75.0;
        let high = home.add_furniture(lamp);
        let ctx = context_with(home);
        assert_eq!(
            ctx.selectable_item_at(100.0, 100.0),
            Some(Selectable::Furniture(high))
        );
        assert_ne!(high, low);
    }

    #[test]
    fn test_base_plan_lock_hides_walls_but_not_movable_furniture() {
        let mut home = Home::new();
        home.add_wall(Wall::new(0.0, 0.0, 200.0, 0.0, 7.5, 250.0));
        let piece = home.add_furniture(Furniture::new("chair", 100.0, 100.0, 45.0, 45.0, 90.0));
        home.set_base_plan_locked(true);
        let ctx = context_with(home);
        assert_eq!(ctx.selectable_item_at(100.0, 0.0), None);
        assert_eq!(
            ctx.selectable_item_at(100.0, 100.0),
            Some(Selectable::Furniture(piece))
        );
    }

    #[test]
    fn test_rotation_handle_requires_press_outside_piece() {
        let mut home = Home::new();
        let id = home.add_furniture(Furniture::new("table", 100.0, 100.0, 50.0, 50.0, 75.0));
        home.set_selected_items(vec![Selectable::Furniture(id)]);
        let ctx = context_with(home);
        // Top left corner is at (75, 75); just outside rotates, just inside
        // stays a plain move.
        assert_eq!(ctx.rotated_furniture_at(72.0, 72.0), Some(id));
        assert_eq!(ctx.rotated_furniture_at(78.0, 78.0), None);
    }

    #[test]
    fn test_handle_probes_need_single_selection() {
        let mut home = Home::new();
        let wall = home.add_wall(Wall::new(0.0, 0.0, 200.0, 0.0, 7.5, 250.0));
        let label = home.add_label(Label::new(300.0, 300.0, "kitchen"));
        home.set_selected_items(vec![Selectable::Wall(wall), Selectable::Label(label)]);
        let ctx = context_with(home);
        assert_eq!(ctx.resized_wall_start_at(0.0, 0.0), None);
    }

    #[test]
    fn test_rectangle_selection_collects_level_items() {
        let mut home = Home::new();
        let wall = home.add_wall(Wall::new(10.0, 10.0, 150.0, 10.0, 7.5, 250.0));
        let label = home.add_label(Label::new(50.0, 50.0, "note"));
        home.add_label(Label::new(900.0, 900.0, "far"));
        let ctx = context_with(home);
        let items = ctx.selectable_items_in_rect(0.0, 0.0, 200.0, 200.0);
        assert!(items.contains(&Selectable::Wall(wall)));
        assert!(items.contains(&Selectable::Label(label)));
        assert_eq!(items.len(), 2);
    }
}
