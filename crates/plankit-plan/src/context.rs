//! Mutable state shared by the controller and its gesture states: the home,
//! the preferences, the feedback view, the viewport, the undo journal and
//! the room paths cache, plus the coordinates of the latest mouse events.
//!
//! Gesture states receive `&mut EditContext` with every event. The
//! accessors returning plain references panic when the item is gone, which
//! only happens if a gesture kept editing an item after its deletion; that
//! is a programming error, not a recoverable condition.

use plankit_model::{
    DimensionLine, DimensionLineId, EventDispatcher, Furniture, FurnitureId, Home, ListenerHandle,
    Point, Room, RoomId, Selectable, UserPreferences, Wall, WallId,
};

use crate::commands::{EditJournal, PlanCommand, UndoableEdit};
use crate::controller::ControllerEvent;
use crate::room_paths::RoomPathsCache;
use crate::view::PlanView;
use crate::viewport::Viewport;
use crate::wall_ops::{self, JoinedWall};

/// Margin in pixels around an item outline when picking it under the
/// pointer.
pub const PIXEL_MARGIN: f64 = 4.0;
/// Margin in pixels around resize, rotation and elevation indicators, half
/// the indicator size.
pub const INDICATOR_PIXEL_MARGIN: f64 = 4.0;
/// Margin in pixels within which a drawn point magnetizes to a wall corner
/// or room vertex.
pub const PIXEL_WALL_MARGIN: f64 = 2.0;

pub struct EditContext {
    pub home: Home,
    pub preferences: UserPreferences,
    pub view: Box<dyn PlanView>,
    pub viewport: Viewport,
    pub journal: EditJournal,
    pub room_paths: RoomPathsCache,
    pub events: EventDispatcher<ControllerEvent>,
    pub x_last_mouse_press: f64,
    pub y_last_mouse_press: f64,
    pub shift_down_last_mouse_press: bool,
    pub duplication_activated_last_mouse_press: bool,
    pub x_last_mouse_move: f64,
    pub y_last_mouse_move: f64,
}

impl EditContext {
    pub fn new(home: Home, preferences: UserPreferences, view: Box<dyn PlanView>) -> Self {
        Self {
            home,
            preferences,
            view,
            viewport: Viewport::new(),
            journal: EditJournal::new(),
            room_paths: RoomPathsCache::new(),
            events: EventDispatcher::new(),
            x_last_mouse_press: 0.0,
            y_last_mouse_press: 0.0,
            shift_down_last_mouse_press: false,
            duplication_activated_last_mouse_press: false,
            x_last_mouse_move: 0.0,
            y_last_mouse_move: 0.0,
        }
    }

    /// Picking margin in model units at the current scale.
    pub fn pixel_margin(&self) -> f64 {
        PIXEL_MARGIN / self.viewport.scale()
    }

    /// Indicator picking margin in model units at the current scale.
    pub fn indicator_margin(&self) -> f64 {
        INDICATOR_PIXEL_MARGIN / self.viewport.scale()
    }

    /// Point magnetism margin in model units at the current scale.
    pub fn wall_margin(&self) -> f64 {
        PIXEL_WALL_MARGIN / self.viewport.scale()
    }

    /// Whether magnetism applies right now, `inverted` being the state of
    /// the key that toggles it away from the preference.
    pub fn magnetism_enabled(&self, inverted: bool) -> bool {
        self.preferences.magnetism_enabled ^ inverted
    }

    pub fn select_item(&mut self, item: Selectable) {
        self.home.set_selected_items(vec![item]);
    }

    pub fn select_items(&mut self, items: Vec<Selectable>) {
        self.home.set_selected_items(items);
    }

    pub fn deselect_all(&mut self) {
        self.home.deselect_all();
    }

    pub fn wall(&self, id: WallId) -> &Wall {
        self.home.wall(id).expect("edited wall missing from home")
    }

    pub fn wall_mut(&mut self, id: WallId) -> &mut Wall {
        self.home
            .wall_mut(id)
            .expect("edited wall missing from home")
    }

    pub fn room(&self, id: RoomId) -> &Room {
        self.home.room(id).expect("edited room missing from home")
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        self.home
            .room_mut(id)
            .expect("edited room missing from home")
    }

    pub fn dimension_line(&self, id: DimensionLineId) -> &DimensionLine {
        self.home
            .dimension_line(id)
            .expect("edited dimension line missing from home")
    }

    pub fn dimension_line_mut(&mut self, id: DimensionLineId) -> &mut DimensionLine {
        self.home
            .dimension_line_mut(id)
            .expect("edited dimension line missing from home")
    }

    pub fn furniture(&self, id: FurnitureId) -> &Furniture {
        self.home
            .furniture_piece(id)
            .expect("edited furniture missing from home")
    }

    pub fn furniture_mut(&mut self, id: FurnitureId) -> &mut Furniture {
        self.home
            .furniture_piece_mut(id)
            .expect("edited furniture missing from home")
    }

    /// The wall a single-wall modification gesture works on.
    pub fn selected_wall(&self) -> WallId {
        match self.home.selected_items() {
            [Selectable::Wall(id)] => *id,
            _ => panic!("selection does not hold a single wall"),
        }
    }

    /// The room a single-room modification gesture works on.
    pub fn selected_room(&self) -> RoomId {
        match self.home.selected_items() {
            [Selectable::Room(id)] => *id,
            _ => panic!("selection does not hold a single room"),
        }
    }

    /// The dimension line a single-line modification gesture works on.
    pub fn selected_dimension_line(&self) -> DimensionLineId {
        match self.home.selected_items() {
            [Selectable::DimensionLine(id)] => *id,
            _ => panic!("selection does not hold a single dimension line"),
        }
    }

    /// The piece a single-piece modification gesture works on.
    pub fn selected_furniture(&self) -> FurnitureId {
        match self.home.selected_items() {
            [Selectable::Furniture(id)] => *id,
            _ => panic!("selection does not hold a single piece of furniture"),
        }
    }

    pub fn invalidate_room_paths(&mut self) {
        self.room_paths.invalidate();
    }

    /// Creates a wall at the selected level with the preferred thickness and
    /// height, already joined at its start if a free endpoint was grabbed.
    pub fn create_new_wall(
        &mut self,
        x_start: f64,
        y_start: f64,
        x_end: f64,
        y_end: f64,
        start_at_start: Option<WallId>,
        end_at_start: Option<WallId>,
    ) -> WallId {
        let id = wall_ops::create_new_wall(
            &mut self.home,
            x_start,
            y_start,
            x_end,
            y_end,
            self.preferences.new_wall_thickness,
            self.preferences.new_wall_height,
            start_at_start,
            end_at_start,
        );
        self.room_paths.invalidate();
        id
    }

    pub fn join_new_wall_end_to_wall(
        &mut self,
        wall: WallId,
        start_at_end: Option<WallId>,
        end_at_end: Option<WallId>,
    ) {
        wall_ops::join_new_wall_end_to_wall(&mut self.home, wall, start_at_end, end_at_end);
        self.room_paths.invalidate();
    }

    pub fn wall_start_at(&self, x: f64, y: f64, ignored: Option<WallId>) -> Option<WallId> {
        wall_ops::wall_start_at(&self.home, x, y, self.pixel_margin(), ignored)
    }

    pub fn wall_end_at(&self, x: f64, y: f64, ignored: Option<WallId>) -> Option<WallId> {
        wall_ops::wall_end_at(&self.home, x, y, self.pixel_margin(), ignored)
    }

    pub fn move_wall_point(&mut self, wall: WallId, x: f64, y: f64, start_point: bool) {
        wall_ops::move_wall_point(&mut self.home, wall, x, y, start_point);
        self.room_paths.invalidate();
    }

    pub fn move_items(&mut self, items: &[Selectable], dx: f64, dy: f64) {
        wall_ops::move_items(&mut self.home, items, dx, dy);
        self.room_paths.invalidate();
    }

    pub fn duplicate_items(&mut self, items: &[Selectable]) -> Vec<Selectable> {
        let copies = wall_ops::duplicate_items(&mut self.home, items);
        self.room_paths.invalidate();
        copies
    }

    /// Corner points of walls and vertices of room paths and rooms that
    /// drawn points magnetize to, all at the selected level.
    pub fn magnetism_reference_points(&mut self, excluded_room: Option<RoomId>) -> Vec<Point> {
        let level = self.home.selected_level();
        let mut points = Vec::new();
        for wall in self.home.walls() {
            if wall.is_at_level(level) {
                points.extend(wall.corner_points());
            }
        }
        for path in self.room_paths.paths(&self.home) {
            points.extend(path.iter().copied());
        }
        for room in self.home.rooms() {
            if Some(room.id) == excluded_room || !room.is_at_level(level) {
                continue;
            }
            points.extend(room.points.iter().copied());
        }
        points
    }

    /// Corner points of walls other than the edited one and room vertices,
    /// used while a wall endpoint is dragged. Room paths are skipped since
    /// they would include sides of the moving wall itself.
    pub fn wall_magnetism_reference_points(&self, excluded_wall: Option<WallId>) -> Vec<Point> {
        let level = self.home.selected_level();
        let mut points = Vec::new();
        for wall in self.home.walls() {
            if Some(wall.id) == excluded_wall || !wall.is_at_level(level) {
                continue;
            }
            points.extend(wall.corner_points());
        }
        for room in self.home.rooms() {
            if room.is_at_level(level) {
                points.extend(room.points.iter().copied());
            }
        }
        points
    }

    pub fn length_tool_tip(&self, length: f64) -> String {
        self.preferences.unit.format(length)
    }

    pub fn size_tool_tip(&self, width: f64, depth: f64) -> String {
        format!(
            "{} x {}",
            self.preferences.unit.format(width),
            self.preferences.unit.format(depth)
        )
    }

    /// Wraps a command in an edit record and posts it to the journal. The
    /// command must already be applied to the home.
    pub fn post_edit(
        &mut self,
        name: &'static str,
        command: PlanCommand,
        old_selection: Vec<Selectable>,
        new_selection: Vec<Selectable>,
    ) {
        let edit = UndoableEdit::new(
            name,
            command,
            old_selection,
            new_selection,
            self.home.is_base_plan_locked(),
        );
        self.journal.post(edit);
        self.room_paths.invalidate();
    }

    pub fn post_items_move(&mut self, items: Vec<Selectable>, dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.post_edit(
            "Move items",
            PlanCommand::MoveItems {
                items: items.clone(),
                dx,
                dy,
            },
            items.clone(),
            items,
        );
    }

    /// Records the duplication whose copies are already in the home at
    /// their dropped position.
    pub fn post_items_duplication(&mut self, copies: Vec<Selectable>, originals: Vec<Selectable>) {
        if copies.is_empty() {
            return;
        }
        let command = PlanCommand::add_items(&self.home, &copies);
        self.post_edit("Duplicate items", command, originals, copies);
    }

    pub fn post_add_walls(&mut self, wall_ids: &[WallId], old_selection: Vec<Selectable>) {
        if wall_ids.is_empty() {
            return;
        }
        let walls = JoinedWall::capture_all(&self.home, wall_ids);
        let new_selection = wall_ids.iter().map(|id| Selectable::Wall(*id)).collect();
        self.post_edit(
            "Add walls",
            PlanCommand::AddWalls { walls },
            old_selection,
            new_selection,
        );
    }

    pub fn post_add_rooms(&mut self, room_ids: &[RoomId], old_selection: Vec<Selectable>) {
        if room_ids.is_empty() {
            return;
        }
        let rooms = room_ids
            .iter()
            .filter_map(|id| self.home.room(*id).cloned())
            .collect();
        let new_selection = room_ids.iter().map(|id| Selectable::Room(*id)).collect();
        self.post_edit(
            "Add room",
            PlanCommand::AddRooms { rooms },
            old_selection,
            new_selection,
        );
    }

    pub fn post_add_dimension_lines(
        &mut self,
        line_ids: &[DimensionLineId],
        old_selection: Vec<Selectable>,
    ) {
        if line_ids.is_empty() {
            return;
        }
        let lines = line_ids
            .iter()
            .filter_map(|id| self.home.dimension_line(*id).cloned())
            .collect();
        let new_selection = line_ids
            .iter()
            .map(|id| Selectable::DimensionLine(*id))
            .collect();
        self.post_edit(
            "Add dimension line",
            PlanCommand::AddDimensionLines { lines },
            old_selection,
            new_selection,
        );
    }

    pub fn post_add_labels(&mut self, label_ids: &[plankit_model::LabelId], old_selection: Vec<Selectable>) {
        if label_ids.is_empty() {
            return;
        }
        let labels = label_ids
            .iter()
            .filter_map(|id| self.home.label(*id).cloned())
            .collect();
        let new_selection = label_ids.iter().map(|id| Selectable::Label(*id)).collect();
        self.post_edit(
            "Add label",
            PlanCommand::AddLabels { labels },
            old_selection,
            new_selection,
        );
    }

    pub fn post_add_furniture(
        &mut self,
        furniture_ids: &[FurnitureId],
        old_selection: Vec<Selectable>,
    ) {
        if furniture_ids.is_empty() {
            return;
        }
        let furniture = furniture_ids
            .iter()
            .filter_map(|id| self.home.furniture_piece(*id).cloned())
            .collect();
        let new_selection = furniture_ids
            .iter()
            .map(|id| Selectable::Furniture(*id))
            .collect();
        self.post_edit(
            "Add furniture",
            PlanCommand::AddFurniture { furniture },
            old_selection,
            new_selection,
        );
    }

    pub fn post_wall_resize(&mut self, wall: WallId, old_x: f64, old_y: f64, start_point: bool) {
        let (new_x, new_y) = {
            let wall = self.wall(wall);
            if start_point {
                (wall.x_start, wall.y_start)
            } else {
                (wall.x_end, wall.y_end)
            }
        };
        if new_x == old_x && new_y == old_y {
            return;
        }
        let selection = vec![Selectable::Wall(wall)];
        self.post_edit(
            "Resize wall",
            PlanCommand::ResizeWall {
                wall,
                old_x,
                old_y,
                new_x,
                new_y,
                start_point,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_room_resize(&mut self, room: RoomId, old_x: f64, old_y: f64, index: usize) {
        let point = self.room(room).points[index];
        if point.x == old_x && point.y == old_y {
            return;
        }
        let selection = vec![Selectable::Room(room)];
        self.post_edit(
            "Resize room",
            PlanCommand::ResizeRoomPoint {
                room,
                index,
                old_x,
                old_y,
                new_x: point.x,
                new_y: point.y,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_room_name_offset(&mut self, room: RoomId, old_x: f64, old_y: f64) {
        let (new_x, new_y) = {
            let room = self.room(room);
            (room.name_x_offset, room.name_y_offset)
        };
        if new_x == old_x && new_y == old_y {
            return;
        }
        let selection = vec![Selectable::Room(room)];
        self.post_edit(
            "Move room name",
            PlanCommand::SetRoomNameOffset {
                room,
                old_x,
                old_y,
                new_x,
                new_y,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_room_area_offset(&mut self, room: RoomId, old_x: f64, old_y: f64) {
        let (new_x, new_y) = {
            let room = self.room(room);
            (room.area_x_offset, room.area_y_offset)
        };
        if new_x == old_x && new_y == old_y {
            return;
        }
        let selection = vec![Selectable::Room(room)];
        self.post_edit(
            "Move room area",
            PlanCommand::SetRoomAreaOffset {
                room,
                old_x,
                old_y,
                new_x,
                new_y,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_dimension_line_resize(
        &mut self,
        line: DimensionLineId,
        old_x: f64,
        old_y: f64,
        start_point: bool,
    ) {
        let (new_x, new_y) = {
            let line = self.dimension_line(line);
            if start_point {
                (line.x_start, line.y_start)
            } else {
                (line.x_end, line.y_end)
            }
        };
        if new_x == old_x && new_y == old_y {
            return;
        }
        let selection = vec![Selectable::DimensionLine(line)];
        self.post_edit(
            "Resize dimension line",
            PlanCommand::ResizeDimensionLinePoint {
                line,
                old_x,
                old_y,
                new_x,
                new_y,
                start_point,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_dimension_line_offset(&mut self, line: DimensionLineId, old_offset: f64) {
        let new_offset = self.dimension_line(line).offset;
        if new_offset == old_offset {
            return;
        }
        let selection = vec![Selectable::DimensionLine(line)];
        self.post_edit(
            "Change dimension line offset",
            PlanCommand::SetDimensionLineOffset {
                line,
                old_offset,
                new_offset,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_furniture_rotation(&mut self, piece: FurnitureId, old_angle: f64) {
        let new_angle = self.furniture(piece).angle;
        if new_angle == old_angle {
            return;
        }
        let selection = vec![Selectable::Furniture(piece)];
        self.post_edit(
            "Rotate furniture",
            PlanCommand::RotateFurniture {
                piece,
                old_angle,
                new_angle,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_furniture_elevation(&mut self, piece: FurnitureId, old_elevation: f64) {
        let new_elevation = self.furniture(piece).elevation;
        if new_elevation == old_elevation {
            return;
        }
        let selection = vec![Selectable::Furniture(piece)];
        self.post_edit(
            "Elevate furniture",
            PlanCommand::ElevateFurniture {
                piece,
                old_elevation,
                new_elevation,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_furniture_height(&mut self, piece: FurnitureId, old_height: f64) {
        let new_height = self.furniture(piece).height;
        if new_height == old_height {
            return;
        }
        let selection = vec![Selectable::Furniture(piece)];
        self.post_edit(
            "Change furniture height",
            PlanCommand::SetFurnitureHeight {
                piece,
                old_height,
                new_height,
            },
            selection.clone(),
            selection,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn post_furniture_resize(
        &mut self,
        piece: FurnitureId,
        old_x: f64,
        old_y: f64,
        old_width: f64,
        old_depth: f64,
        old_bound_to_wall: bool,
    ) {
        let (new_x, new_y, new_width, new_depth, new_bound_to_wall) = {
            let piece = self.furniture(piece);
            let bound = match piece.kind {
                plankit_model::FurnitureKind::DoorOrWindow { bound_to_wall } => bound_to_wall,
                _ => old_bound_to_wall,
            };
            (piece.x, piece.y, piece.width, piece.depth, bound)
        };
        if new_x == old_x && new_y == old_y && new_width == old_width && new_depth == old_depth {
            return;
        }
        let selection = vec![Selectable::Furniture(piece)];
        self.post_edit(
            "Resize furniture",
            PlanCommand::ResizeFurniture {
                piece,
                old_x,
                old_y,
                old_width,
                old_depth,
                old_bound_to_wall,
                new_x,
                new_y,
                new_width,
                new_depth,
                new_bound_to_wall,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_furniture_name_offset(&mut self, piece: FurnitureId, old_x: f64, old_y: f64) {
        let (new_x, new_y) = {
            let piece = self.furniture(piece);
            (piece.name_x_offset, piece.name_y_offset)
        };
        if new_x == old_x && new_y == old_y {
            return;
        }
        let selection = vec![Selectable::Furniture(piece)];
        self.post_edit(
            "Move furniture name",
            PlanCommand::SetFurnitureNameOffset {
                piece,
                old_x,
                old_y,
                new_x,
                new_y,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_light_power(&mut self, piece: FurnitureId, old_power: f64) {
        let new_power = match self.furniture(piece).kind {
            plankit_model::FurnitureKind::Light { power } => power,
            _ => return,
        };
        if new_power == old_power {
            return;
        }
        let selection = vec![Selectable::Furniture(piece)];
        self.post_edit(
            "Change light power",
            PlanCommand::SetLightPower {
                piece,
                old_power,
                new_power,
            },
            selection.clone(),
            selection,
        );
    }

    pub fn post_compass_rotation(&mut self, old_north: f64) {
        let new_north = self.home.compass().north_direction;
        if new_north == old_north {
            return;
        }
        self.post_edit(
            "Rotate compass",
            PlanCommand::RotateCompass {
                old_north,
                new_north,
            },
            vec![Selectable::Compass],
            vec![Selectable::Compass],
        );
    }

    pub fn post_compass_resize(&mut self, old_diameter: f64) {
        let new_diameter = self.home.compass().diameter;
        if new_diameter == old_diameter {
            return;
        }
        self.post_edit(
            "Resize compass",
            PlanCommand::ResizeCompass {
                old_diameter,
                new_diameter,
            },
            vec![Selectable::Compass],
            vec![Selectable::Compass],
        );
    }

    /// Deletes the given items and posts one compound record for the whole
    /// deletion, capturing wall joins before anything is detached.
    pub fn delete_items(&mut self, items: &[Selectable]) {
        if items.is_empty() {
            return;
        }
        let old_selection = self.home.selected_items().to_vec();
        let command = PlanCommand::delete_items(&self.home, items);
        command.apply(&mut self.home);
        self.post_edit("Delete selection", command, old_selection, Vec::new());
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: Fn(&ControllerEvent) + 'static,
    {
        self.events.subscribe(listener)
    }
}
