//! Undoable edit records and the journal holding them.
//!
//! Gestures mutate the home live while they run; nothing is recorded until
//! the gesture commits. At commit time the controller builds one
//! [`PlanCommand`] from before/after values captured around the gesture and
//! posts it wrapped in an [`UndoableEdit`]. Undo applies the command
//! backwards, redo forwards, and both restore the selection and base plan
//! lock that belong with the edit. Multi-step operations group their parts
//! in a [`PlanCommand::Compound`] applied forward and reverted in reverse.

use tracing::debug;

use plankit_model::{
    DimensionLine, DimensionLineId, Furniture, FurnitureId, FurnitureKind, Home, Label, Room,
    RoomId, Selectable, WallId,
};

use crate::wall_ops::{self, JoinedWall, SplitWalls};

/// Number of edits the journal keeps before forgetting the oldest.
const JOURNAL_DEPTH: usize = 50;

/// One reversible plan mutation, with enough captured state to run in both
/// directions.
#[derive(Debug, Clone)]
pub enum PlanCommand {
    AddWalls {
        walls: Vec<JoinedWall>,
    },
    DeleteWalls {
        walls: Vec<JoinedWall>,
    },
    AddRooms {
        rooms: Vec<Room>,
    },
    DeleteRooms {
        rooms: Vec<Room>,
    },
    AddDimensionLines {
        lines: Vec<DimensionLine>,
    },
    DeleteDimensionLines {
        lines: Vec<DimensionLine>,
    },
    AddLabels {
        labels: Vec<Label>,
    },
    DeleteLabels {
        labels: Vec<Label>,
    },
    AddFurniture {
        furniture: Vec<Furniture>,
    },
    DeleteFurniture {
        furniture: Vec<Furniture>,
    },
    MoveItems {
        items: Vec<Selectable>,
        dx: f64,
        dy: f64,
    },
    ResizeWall {
        wall: WallId,
        old_x: f64,
        old_y: f64,
        new_x: f64,
        new_y: f64,
        start_point: bool,
    },
    ReverseWalls {
        walls: Vec<WallId>,
    },
    SplitWall(SplitWalls),
    ResizeRoomPoint {
        room: RoomId,
        index: usize,
        old_x: f64,
        old_y: f64,
        new_x: f64,
        new_y: f64,
    },
    SetRoomNameOffset {
        room: RoomId,
        old_x: f64,
        old_y: f64,
        new_x: f64,
        new_y: f64,
    },
    SetRoomAreaOffset {
        room: RoomId,
        old_x: f64,
        old_y: f64,
        new_x: f64,
        new_y: f64,
    },
    ResizeDimensionLinePoint {
        line: DimensionLineId,
        old_x: f64,
        old_y: f64,
        new_x: f64,
        new_y: f64,
        start_point: bool,
    },
    SetDimensionLineOffset {
        line: DimensionLineId,
        old_offset: f64,
        new_offset: f64,
    },
    RotateFurniture {
        piece: FurnitureId,
        old_angle: f64,
        new_angle: f64,
    },
    ElevateFurniture {
        piece: FurnitureId,
        old_elevation: f64,
        new_elevation: f64,
    },
    SetFurnitureHeight {
        piece: FurnitureId,
        old_height: f64,
        new_height: f64,
    },
    ResizeFurniture {
        piece: FurnitureId,
        old_x: f64,
        old_y: f64,
        old_width: f64,
        old_depth: f64,
        old_bound_to_wall: bool,
        new_x: f64,
        new_y: f64,
        new_width: f64,
        new_depth: f64,
        new_bound_to_wall: bool,
    },
    SetFurnitureNameOffset {
        piece: FurnitureId,
        old_x: f64,
        old_y: f64,
        new_x: f64,
        new_y: f64,
    },
    SetLightPower {
        piece: FurnitureId,
        old_power: f64,
        new_power: f64,
    },
    RotateCompass {
        old_north: f64,
        new_north: f64,
    },
    ResizeCompass {
        old_diameter: f64,
        new_diameter: f64,
    },
    Compound(Vec<PlanCommand>),
}

impl PlanCommand {
    /// Builds the compound re-adding already inserted items, snapshotting
    /// them as they stand now. Used by paste and duplication records.
    pub fn add_items(home: &Home, items: &[Selectable]) -> PlanCommand {
        let mut walls = Vec::new();
        let mut rooms = Vec::new();
        let mut lines = Vec::new();
        let mut labels = Vec::new();
        let mut furniture = Vec::new();
        for item in items {
            match item {
                Selectable::Wall(id) => walls.push(*id),
                Selectable::Room(id) => {
                    if let Some(room) = home.room(*id) {
                        rooms.push(room.clone());
                    }
                }
                Selectable::DimensionLine(id) => {
                    if let Some(line) = home.dimension_line(*id) {
                        lines.push(line.clone());
                    }
                }
                Selectable::Label(id) => {
                    if let Some(label) = home.label(*id) {
                        labels.push(label.clone());
                    }
                }
                Selectable::Furniture(id) => {
                    if let Some(piece) = home.furniture_piece(*id) {
                        furniture.push(piece.clone());
                    }
                }
                Selectable::Compass | Selectable::Camera => {}
            }
        }
        let mut commands = Vec::new();
        if !walls.is_empty() {
            commands.push(PlanCommand::AddWalls {
                walls: JoinedWall::capture_all(home, &walls),
            });
        }
        if !rooms.is_empty() {
            commands.push(PlanCommand::AddRooms { rooms });
        }
        if !lines.is_empty() {
            commands.push(PlanCommand::AddDimensionLines { lines });
        }
        if !labels.is_empty() {
            commands.push(PlanCommand::AddLabels { labels });
        }
        if !furniture.is_empty() {
            commands.push(PlanCommand::AddFurniture { furniture });
        }
        PlanCommand::Compound(commands)
    }

    /// Builds the compound deleting the given items, snapshotting them and
    /// the wall topology before anything is removed.
    pub fn delete_items(home: &Home, items: &[Selectable]) -> PlanCommand {
        match Self::add_items(home, items) {
            PlanCommand::Compound(commands) => PlanCommand::Compound(
                commands
                    .into_iter()
                    .map(|command| match command {
                        PlanCommand::AddWalls { walls } => PlanCommand::DeleteWalls { walls },
                        PlanCommand::AddRooms { rooms } => PlanCommand::DeleteRooms { rooms },
                        PlanCommand::AddDimensionLines { lines } => {
                            PlanCommand::DeleteDimensionLines { lines }
                        }
                        PlanCommand::AddLabels { labels } => PlanCommand::DeleteLabels { labels },
                        PlanCommand::AddFurniture { furniture } => {
                            PlanCommand::DeleteFurniture { furniture }
                        }
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        }
    }

    /// Applies the command in the redo direction.
    pub fn apply(&self, home: &mut Home) {
        match self {
            PlanCommand::AddWalls { walls } => wall_ops::do_add_walls(home, walls),
            PlanCommand::DeleteWalls { walls } => {
                let ids: Vec<WallId> = walls.iter().map(|joined| joined.wall_id()).collect();
                wall_ops::do_delete_walls(home, &ids);
            }
            PlanCommand::AddRooms { rooms } => {
                for room in rooms {
                    home.restore_room(room.clone());
                }
            }
            PlanCommand::DeleteRooms { rooms } => {
                for room in rooms {
                    home.delete_room(room.id);
                }
            }
            PlanCommand::AddDimensionLines { lines } => {
                for line in lines {
                    home.restore_dimension_line(line.clone());
                }
            }
            PlanCommand::DeleteDimensionLines { lines } => {
                for line in lines {
                    home.delete_dimension_line(line.id);
                }
            }
            PlanCommand::AddLabels { labels } => {
                for label in labels {
                    home.restore_label(label.clone());
                }
            }
            PlanCommand::DeleteLabels { labels } => {
                for label in labels {
                    home.delete_label(label.id);
                }
            }
            PlanCommand::AddFurniture { furniture } => {
                for piece in furniture {
                    home.restore_furniture(piece.clone());
                }
            }
            PlanCommand::DeleteFurniture { furniture } => {
                for piece in furniture {
                    home.delete_furniture(piece.id);
                }
            }
            PlanCommand::MoveItems { items, dx, dy } => {
                wall_ops::move_items(home, items, *dx, *dy);
            }
            PlanCommand::ResizeWall {
                wall,
                new_x,
                new_y,
                start_point,
                ..
            } => {
                wall_ops::move_wall_point(home, *wall, *new_x, *new_y, *start_point);
            }
            PlanCommand::ReverseWalls { walls } => wall_ops::reverse_walls(home, walls),
            PlanCommand::SplitWall(split) => {
                wall_ops::do_delete_walls(home, &[split.original.wall_id()]);
                wall_ops::do_add_walls(home, &[split.first.clone(), split.second.clone()]);
            }
            PlanCommand::ResizeRoomPoint {
                room,
                index,
                new_x,
                new_y,
                ..
            } => {
                if let Some(room) = home.room_mut(*room) {
                    room.set_point(*index, *new_x, *new_y);
                }
            }
            PlanCommand::SetRoomNameOffset {
                room, new_x, new_y, ..
            } => {
                if let Some(room) = home.room_mut(*room) {
                    room.name_x_offset = *new_x;
                    room.name_y_offset = *new_y;
                }
            }
            PlanCommand::SetRoomAreaOffset {
                room, new_x, new_y, ..
            } => {
                if let Some(room) = home.room_mut(*room) {
                    room.area_x_offset = *new_x;
                    room.area_y_offset = *new_y;
                }
            }
            PlanCommand::ResizeDimensionLinePoint {
                line,
                new_x,
                new_y,
                start_point,
                ..
            } => {
                move_dimension_line_point(home, *line, *new_x, *new_y, *start_point);
            }
            PlanCommand::SetDimensionLineOffset {
                line, new_offset, ..
            } => {
                if let Some(line) = home.dimension_line_mut(*line) {
                    line.offset = *new_offset;
                }
            }
            PlanCommand::RotateFurniture {
                piece, new_angle, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.set_angle(*new_angle);
                }
            }
            PlanCommand::ElevateFurniture {
                piece,
                new_elevation,
                ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.set_elevation(*new_elevation);
                }
            }
            PlanCommand::SetFurnitureHeight {
                piece, new_height, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.height = *new_height;
                }
            }
            PlanCommand::ResizeFurniture {
                piece,
                new_x,
                new_y,
                new_width,
                new_depth,
                new_bound_to_wall,
                ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.x = *new_x;
                    piece.y = *new_y;
                    piece.width = *new_width;
                    piece.depth = *new_depth;
                    if let FurnitureKind::DoorOrWindow { bound_to_wall } = &mut piece.kind {
                        *bound_to_wall = *new_bound_to_wall;
                    }
                }
            }
            PlanCommand::SetFurnitureNameOffset {
                piece, new_x, new_y, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.name_x_offset = *new_x;
                    piece.name_y_offset = *new_y;
                }
            }
            PlanCommand::SetLightPower {
                piece, new_power, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    if let FurnitureKind::Light { power } = &mut piece.kind {
                        *power = *new_power;
                    }
                }
            }
            PlanCommand::RotateCompass { new_north, .. } => {
                home.compass_mut().north_direction = *new_north;
            }
            PlanCommand::ResizeCompass { new_diameter, .. } => {
                home.compass_mut().diameter = *new_diameter;
            }
            PlanCommand::Compound(commands) => {
                for command in commands {
                    command.apply(home);
                }
            }
        }
    }

    /// Applies the command in the undo direction.
    pub fn unapply(&self, home: &mut Home) {
        match self {
            PlanCommand::AddWalls { walls } => {
                let ids: Vec<WallId> = walls.iter().map(|joined| joined.wall_id()).collect();
                wall_ops::do_delete_walls(home, &ids);
            }
            PlanCommand::DeleteWalls { walls } => wall_ops::do_add_walls(home, walls),
            PlanCommand::AddRooms { rooms } => {
                for room in rooms {
                    home.delete_room(room.id);
                }
            }
            PlanCommand::DeleteRooms { rooms } => {
                for room in rooms {
                    home.restore_room(room.clone());
                }
            }
            PlanCommand::AddDimensionLines { lines } => {
                for line in lines {
                    home.delete_dimension_line(line.id);
                }
            }
            PlanCommand::DeleteDimensionLines { lines } => {
                for line in lines {
                    home.restore_dimension_line(line.clone());
                }
            }
            PlanCommand::AddLabels { labels } => {
                for label in labels {
                    home.delete_label(label.id);
                }
            }
            PlanCommand::DeleteLabels { labels } => {
                for label in labels {
                    home.restore_label(label.clone());
                }
            }
            PlanCommand::AddFurniture { furniture } => {
                for piece in furniture {
                    home.delete_furniture(piece.id);
                }
            }
            PlanCommand::DeleteFurniture { furniture } => {
                for piece in furniture {
                    home.restore_furniture(piece.clone());
                }
            }
            PlanCommand::MoveItems { items, dx, dy } => {
                wall_ops::move_items(home, items, -dx, -dy);
            }
            PlanCommand::ResizeWall {
                wall,
                old_x,
                old_y,
                start_point,
                ..
            } => {
                wall_ops::move_wall_point(home, *wall, *old_x, *old_y, *start_point);
            }
            PlanCommand::ReverseWalls { walls } => wall_ops::reverse_walls(home, walls),
            PlanCommand::SplitWall(split) => {
                wall_ops::do_delete_walls(home, &[split.first.wall_id(), split.second.wall_id()]);
                wall_ops::do_add_walls(home, &[split.original.clone()]);
            }
            PlanCommand::ResizeRoomPoint {
                room,
                index,
                old_x,
                old_y,
                ..
            } => {
                if let Some(room) = home.room_mut(*room) {
                    room.set_point(*index, *old_x, *old_y);
                }
            }
            PlanCommand::SetRoomNameOffset {
                room, old_x, old_y, ..
            } => {
                if let Some(room) = home.room_mut(*room) {
                    room.name_x_offset = *old_x;
                    room.name_y_offset = *old_y;
                }
            }
            PlanCommand::SetRoomAreaOffset {
                room, old_x, old_y, ..
            } => {
                if let Some(room) = home.room_mut(*room) {
                    room.area_x_offset = *old_x;
                    room.area_y_offset = *old_y;
                }
            }
            PlanCommand::ResizeDimensionLinePoint {
                line,
                old_x,
                old_y,
                start_point,
                ..
            } => {
                move_dimension_line_point(home, *line, *old_x, *old_y, *start_point);
            }
            PlanCommand::SetDimensionLineOffset {
                line, old_offset, ..
            } => {
                if let Some(line) = home.dimension_line_mut(*line) {
                    line.offset = *old_offset;
                }
            }
            PlanCommand::RotateFurniture {
                piece, old_angle, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.set_angle(*old_angle);
                }
            }
            PlanCommand::ElevateFurniture {
                piece,
                old_elevation,
                ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.set_elevation(*old_elevation);
                }
            }
            PlanCommand::SetFurnitureHeight {
                piece, old_height, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.height = *old_height;
                }
            }
            PlanCommand::ResizeFurniture {
                piece,
                old_x,
                old_y,
                old_width,
                old_depth,
                old_bound_to_wall,
                ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.x = *old_x;
                    piece.y = *old_y;
                    piece.width = *old_width;
                    piece.depth = *old_depth;
                    if let FurnitureKind::DoorOrWindow { bound_to_wall } = &mut piece.kind {
                        *bound_to_wall = *old_bound_to_wall;
                    }
                }
            }
            PlanCommand::SetFurnitureNameOffset {
                piece, old_x, old_y, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    piece.name_x_offset = *old_x;
                    piece.name_y_offset = *old_y;
                }
            }
            PlanCommand::SetLightPower {
                piece, old_power, ..
            } => {
                if let Some(piece) = home.furniture_piece_mut(*piece) {
                    if let FurnitureKind::Light { power } = &mut piece.kind {
                        *power = *old_power;
                    }
                }
            }
            PlanCommand::RotateCompass { old_north, .. } => {
                home.compass_mut().north_direction = *old_north;
            }
            PlanCommand::ResizeCompass { old_diameter, .. } => {
                home.compass_mut().diameter = *old_diameter;
            }
            PlanCommand::Compound(commands) => {
                for command in commands.iter().rev() {
                    command.unapply(home);
                }
            }
        }
    }
}

pub(crate) fn move_dimension_line_point(
    home: &mut Home,
    id: DimensionLineId,
    x: f64,
    y: f64,
    start_point: bool,
) {
    if let Some(line) = home.dimension_line_mut(id) {
        if start_point {
            line.x_start = x;
            line.y_start = y;
        } else {
            line.x_end = x;
            line.y_end = y;
        }
    }
}

/// A command together with everything redisplayed around it: presentation
/// name, the selections to restore and the base plan lock flag captured at
/// commit time.
#[derive(Debug, Clone)]
pub struct UndoableEdit {
    name: &'static str,
    command: PlanCommand,
    old_selection: Vec<Selectable>,
    new_selection: Vec<Selectable>,
    base_plan_locked: bool,
}

impl UndoableEdit {
    pub fn new(
        name: &'static str,
        command: PlanCommand,
        old_selection: Vec<Selectable>,
        new_selection: Vec<Selectable>,
        base_plan_locked: bool,
    ) -> Self {
        Self {
            name,
            command,
            old_selection,
            new_selection,
            base_plan_locked,
        }
    }

    /// Gets the presentation name of the edit.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn undo(&self, home: &mut Home) {
        self.command.unapply(home);
        home.set_base_plan_locked(self.base_plan_locked);
        home.set_selected_items(self.old_selection.clone());
    }

    pub fn redo(&self, home: &mut Home) {
        self.command.apply(home);
        home.set_base_plan_locked(self.base_plan_locked);
        home.set_selected_items(self.new_selection.clone());
    }
}

/// Bounded pair of undo and redo stacks.
#[derive(Debug, Default)]
pub struct EditJournal {
    undo_stack: Vec<UndoableEdit>,
    redo_stack: Vec<UndoableEdit>,
}

impl EditJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an edit already applied to the home. Posting drops the redo
    /// history and the oldest edit beyond the journal depth.
    pub fn post(&mut self, edit: UndoableEdit) {
        debug!(name = edit.name(), "edit posted");
        self.undo_stack.push(edit);
        self.redo_stack.clear();
        if self.undo_stack.len() > JOURNAL_DEPTH {
            self.undo_stack.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Gets the presentation name of the next edit to undo.
    pub fn undo_name(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|edit| edit.name())
    }

    /// Gets the presentation name of the next edit to redo.
    pub fn redo_name(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|edit| edit.name())
    }

    /// Undoes the latest edit. Returns whether one was undone.
    pub fn undo(&mut self, home: &mut Home) -> bool {
        match self.undo_stack.pop() {
            Some(edit) => {
                debug!(name = edit.name(), "undo");
                edit.undo(home);
                self.redo_stack.push(edit);
                true
            }
            None => false,
        }
    }

    /// Redoes the latest undone edit. Returns whether one was redone.
    pub fn redo(&mut self, home: &mut Home) -> bool {
        match self.redo_stack.pop() {
            Some(edit) => {
                debug!(name = edit.name(), "redo");
                edit.redo(home);
                self.undo_stack.push(edit);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
