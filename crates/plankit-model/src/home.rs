//! The Home aggregate owning every plan entity.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::camera::Camera;
use crate::compass::Compass;
use crate::dimension_line::DimensionLine;
use crate::events::{EventDispatcher, HomeEvent, ListenerHandle};
use crate::furniture::Furniture;
use crate::label::Label;
use crate::level::Level;
use crate::room::Room;
use crate::selectable::Selectable;
use crate::wall::Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DimensionLineId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FurnitureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(pub u32);

/// Container for the walls, rooms, dimension lines, labels, furniture,
/// levels, compass and camera of one edited home, plus the selection and
/// level bookkeeping shared by every editing operation.
///
/// IDs are assigned from a single monotonic counter when an entity is added;
/// `restore_*` methods re-insert an entity under the ID it already carries,
/// which undo relies on.
#[derive(Debug, Serialize, Deserialize)]
pub struct Home {
    pub id: Uuid,
    walls: Vec<Wall>,
    rooms: Vec<Room>,
    dimension_lines: Vec<DimensionLine>,
    labels: Vec<Label>,
    furniture: Vec<Furniture>,
    levels: Vec<Level>,
    compass: Compass,
    camera: Camera,
    camera_in_plan: bool,
    selected_items: Vec<Selectable>,
    selected_level: Option<LevelId>,
    base_plan_locked: bool,
    next_id: u32,
    #[serde(skip)]
    events: EventDispatcher<HomeEvent>,
}

impl Home {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            walls: Vec::new(),
            rooms: Vec::new(),
            dimension_lines: Vec::new(),
            labels: Vec::new(),
            furniture: Vec::new(),
            levels: Vec::new(),
            compass: Compass::default(),
            camera: Camera::default(),
            camera_in_plan: false,
            selected_items: Vec::new(),
            selected_level: None,
            base_plan_locked: false,
            next_id: 0,
            events: EventDispatcher::new(),
        }
    }

    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: Fn(&HomeEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.events.unsubscribe(handle)
    }

    /// Fires an `ItemChanged` notification after direct entity mutation.
    pub fn notify_changed(&self, item: Selectable) {
        self.events.fire(&HomeEvent::ItemChanged(item));
    }

    // Walls

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.iter().find(|wall| wall.id == id)
    }

    pub fn wall_mut(&mut self, id: WallId) -> Option<&mut Wall> {
        self.walls.iter_mut().find(|wall| wall.id == id)
    }

    pub fn add_wall(&mut self, mut wall: Wall) -> WallId {
        let id = WallId(self.fresh_id());
        wall.id = id;
        self.walls.push(wall);
        self.events.fire(&HomeEvent::ItemsAdded(vec![Selectable::Wall(id)]));
        id
    }

    /// Re-inserts a wall under the ID it carries.
    pub fn restore_wall(&mut self, wall: Wall) {
        let id = wall.id;
        self.walls.push(wall);
        self.events.fire(&HomeEvent::ItemsAdded(vec![Selectable::Wall(id)]));
    }

    /// Removes a wall, detaching any other wall still joined to it.
    pub fn delete_wall(&mut self, id: WallId) -> Option<Wall> {
        let index = self.walls.iter().position(|wall| wall.id == id)?;
        for other in &mut self.walls {
            if other.wall_at_start == Some(id) {
                other.wall_at_start = None;
            } else if other.wall_at_end == Some(id) {
                other.wall_at_end = None;
            }
        }
        let wall = self.walls.remove(index);
        debug!(wall = id.0, "wall deleted");
        self.deselect(Selectable::Wall(id));
        self.events
            .fire(&HomeEvent::ItemsDeleted(vec![Selectable::Wall(id)]));
        Some(wall)
    }

    // Rooms

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id == id)
    }

    pub fn add_room(&mut self, mut room: Room) -> RoomId {
        let id = RoomId(self.fresh_id());
        room.id = id;
        self.rooms.push(room);
        self.events.fire(&HomeEvent::ItemsAdded(vec![Selectable::Room(id)]));
        id
    }

    pub fn restore_room(&mut self, room: Room) {
        let id = room.id;
        self.rooms.push(room);
        self.events.fire(&HomeEvent::ItemsAdded(vec![Selectable::Room(id)]));
    }

    pub fn delete_room(&mut self, id: RoomId) -> Option<Room> {
        let index = self.rooms.iter().position(|room| room.id == id)?;
        let room = self.rooms.remove(index);
        self.deselect(Selectable::Room(id));
        self.events
            .fire(&HomeEvent::ItemsDeleted(vec![Selectable::Room(id)]));
        Some(room)
    }

    // Dimension lines

    pub fn dimension_lines(&self) -> &[DimensionLine] {
        &self.dimension_lines
    }

    pub fn dimension_line(&self, id: DimensionLineId) -> Option<&DimensionLine> {
        self.dimension_lines.iter().find(|line| line.id == id)
    }

    pub fn dimension_line_mut(&mut self, id: DimensionLineId) -> Option<&mut DimensionLine> {
        self.dimension_lines.iter_mut().find(|line| line.id == id)
    }

    pub fn add_dimension_line(&mut self, mut line: DimensionLine) -> DimensionLineId {
        let id = DimensionLineId(self.fresh_id());
        line.id = id;
        self.dimension_lines.push(line);
        self.events
            .fire(&HomeEvent::ItemsAdded(vec![Selectable::DimensionLine(id)]));
        id
    }

    pub fn restore_dimension_line(&mut self, line: DimensionLine) {
        let id = line.id;
        self.dimension_lines.push(line);
        self.events
            .fire(&HomeEvent::ItemsAdded(vec![Selectable::DimensionLine(id)]));
    }

    pub fn delete_dimension_line(&mut self, id: DimensionLineId) -> Option<DimensionLine> {
        let index = self
            .dimension_lines
            .iter()
            .position(|line| line.id == id)?;
        let line = self.dimension_lines.remove(index);
        self.deselect(Selectable::DimensionLine(id));
        self.events
            .fire(&HomeEvent::ItemsDeleted(vec![Selectable::DimensionLine(id)]));
        Some(line)
    }

    // Labels

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|label| label.id == id)
    }

    pub fn label_mut(&mut self, id: LabelId) -> Option<&mut Label> {
        self.labels.iter_mut().find(|label| label.id == id)
    }

    pub fn add_label(&mut self, mut label: Label) -> LabelId {
        let id = LabelId(self.fresh_id());
        label.id = id;
        self.labels.push(label);
        self.events
            .fire(&HomeEvent::ItemsAdded(vec![Selectable::Label(id)]));
        id
    }

    pub fn restore_label(&mut self, label: Label) {
        let id = label.id;
        self.labels.push(label);
        self.events
            .fire(&HomeEvent::ItemsAdded(vec![Selectable::Label(id)]));
    }

    pub fn delete_label(&mut self, id: LabelId) -> Option<Label> {
        let index = self.labels.iter().position(|label| label.id == id)?;
        let label = self.labels.remove(index);
        self.deselect(Selectable::Label(id));
        self.events
            .fire(&HomeEvent::ItemsDeleted(vec![Selectable::Label(id)]));
        Some(label)
    }

    // Furniture

    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    pub fn furniture_piece(&self, id: FurnitureId) -> Option<&Furniture> {
        self.furniture.iter().find(|piece| piece.id == id)
    }

    pub fn furniture_piece_mut(&mut self, id: FurnitureId) -> Option<&mut Furniture> {
        self.furniture.iter_mut().find(|piece| piece.id == id)
    }

    pub fn add_furniture(&mut self, mut piece: Furniture) -> FurnitureId {
        let id = FurnitureId(self.fresh_id());
        piece.id = id;
        self.furniture.push(piece);
        self.events
            .fire(&HomeEvent::ItemsAdded(vec![Selectable::Furniture(id)]));
        id
    }

    pub fn restore_furniture(&mut self, piece: Furniture) {
        let id = piece.id;
        self.furniture.push(piece);
        self.events
            .fire(&HomeEvent::ItemsAdded(vec![Selectable::Furniture(id)]));
    }

    pub fn delete_furniture(&mut self, id: FurnitureId) -> Option<Furniture> {
        let index = self.furniture.iter().position(|piece| piece.id == id)?;
        let piece = self.furniture.remove(index);
        self.deselect(Selectable::Furniture(id));
        self.events
            .fire(&HomeEvent::ItemsDeleted(vec![Selectable::Furniture(id)]));
        Some(piece)
    }

    // Levels

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.iter().find(|level| level.id == id)
    }

    pub fn add_level(&mut self, mut level: Level) -> LevelId {
        let id = LevelId(self.fresh_id());
        level.id = id;
        debug!(level = id.0, name = %level.name, "level added");
        self.levels.push(level);
        self.events.fire(&HomeEvent::LevelAdded(id));
        id
    }

    // Compass and camera

    pub fn compass(&self) -> &Compass {
        &self.compass
    }

    pub fn compass_mut(&mut self) -> &mut Compass {
        &mut self.compass
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Whether the observer camera is shown, and selectable, in the plan.
    pub fn is_camera_in_plan(&self) -> bool {
        self.camera_in_plan
    }

    pub fn set_camera_in_plan(&mut self, in_plan: bool) {
        self.camera_in_plan = in_plan;
    }

    // Selection, level and lock bookkeeping

    pub fn selected_items(&self) -> &[Selectable] {
        &self.selected_items
    }

    pub fn set_selected_items(&mut self, items: Vec<Selectable>) {
        self.selected_items = items;
        self.events.fire(&HomeEvent::SelectionChanged);
    }

    pub fn deselect_all(&mut self) {
        if !self.selected_items.is_empty() {
            self.selected_items.clear();
            self.events.fire(&HomeEvent::SelectionChanged);
        }
    }

    fn deselect(&mut self, item: Selectable) {
        let before = self.selected_items.len();
        self.selected_items.retain(|selected| *selected != item);
        if self.selected_items.len() != before {
            self.events.fire(&HomeEvent::SelectionChanged);
        }
    }

    pub fn selected_level(&self) -> Option<LevelId> {
        self.selected_level
    }

    pub fn set_selected_level(&mut self, level: Option<LevelId>) {
        if self.selected_level != level {
            self.selected_level = level;
            self.events.fire(&HomeEvent::SelectedLevelChanged);
        }
    }

    pub fn is_base_plan_locked(&self) -> bool {
        self.base_plan_locked
    }

    pub fn set_base_plan_locked(&mut self, locked: bool) {
        if self.base_plan_locked != locked {
            self.base_plan_locked = locked;
            self.events.fire(&HomeEvent::BasePlanLockChanged);
        }
    }
}

impl Default for Home {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_ids_are_unique_across_arenas() {
        let mut home = Home::new();
        let wall_id = home.add_wall(Wall::new(0.0, 0.0, 100.0, 0.0, 7.5, 250.0));
        let room_id = home.add_room(Room::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]));
        assert_ne!(wall_id.0, room_id.0);
        assert_eq!(home.wall(wall_id).map(|w| w.id), Some(wall_id));
    }

    #[test]
    fn test_delete_wall_detaches_neighbors() {
        let mut home = Home::new();
        let a = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
        let b = home.add_wall(Wall::new(300.0, 0.0, 300.0, 200.0, 7.5, 250.0));
        home.wall_mut(a).unwrap().wall_at_end = Some(b);
        home.wall_mut(b).unwrap().wall_at_start = Some(a);
        home.delete_wall(a);
        assert_eq!(home.wall(b).unwrap().wall_at_start, None);
    }

    #[test]
    fn test_delete_removes_from_selection() {
        let mut home = Home::new();
        let id = home.add_wall(Wall::new(0.0, 0.0, 100.0, 0.0, 7.5, 250.0));
        home.set_selected_items(vec![Selectable::Wall(id)]);
        home.delete_wall(id);
        assert!(home.selected_items().is_empty());
    }

    #[test]
    fn test_restore_keeps_id() {
        let mut home = Home::new();
        let id = home.add_wall(Wall::new(0.0, 0.0, 100.0, 0.0, 7.5, 250.0));
        let wall = home.delete_wall(id).unwrap();
        home.restore_wall(wall);
        assert!(home.wall(id).is_some());
        let next = home.add_wall(Wall::new(0.0, 0.0, 50.0, 0.0, 7.5, 250.0));
        assert_ne!(next, id);
    }

    #[test]
    fn test_serde_round_trip_skips_listeners() {
        let mut home = Home::new();
        home.add_wall(Wall::new(0.0, 0.0, 100.0, 0.0, 7.5, 250.0));
        home.subscribe(|_| {});
        let json = serde_json::to_string(&home).unwrap();
        let restored: Home = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.walls().len(), 1);
        assert_eq!(restored.id, home.id);
    }
}
