//! Selection mode states: the armed selection state with its handle
//! dispatch, the selection move and rubber band gestures, plan panning and
//! the drag and drop of furniture coming from outside the plan.

use plankit_model::{Furniture, Selectable};

use crate::context::EditContext;
use crate::controller::Mode;
use crate::magnetism;
use crate::states::{
    initial_state, move_and_show_selected_items, CameraElevationState, CameraPitchRotationState,
    CameraYawRotationState, CompassResizeState, CompassRotationState, DimensionLineOffsetState,
    DimensionLineResizeState, FurnitureElevationState, FurnitureHeightState,
    FurnitureNameOffsetState, FurnitureResizeState, FurnitureRotationState, LightPowerState,
    RoomAreaOffsetState, RoomNameOffsetState, RoomResizeState, State, WallResizeState,
};
use crate::view::CursorKind;

/// Deletes items without posting any undo record. Duplication uses this to
/// take back the copies it added when the modifier is released or escaped.
fn do_delete_items(ctx: &mut EditContext, items: &[Selectable]) {
    for item in items {
        match *item {
            Selectable::Wall(id) => {
                ctx.home.delete_wall(id);
            }
            Selectable::Room(id) => {
                ctx.home.delete_room(id);
            }
            Selectable::DimensionLine(id) => {
                ctx.home.delete_dimension_line(id);
            }
            Selectable::Label(id) => {
                ctx.home.delete_label(id);
            }
            Selectable::Furniture(id) => {
                ctx.home.delete_furniture(id);
            }
            Selectable::Compass | Selectable::Camera => {}
        }
    }
    ctx.invalidate_room_paths();
}

/// Picks the cursor matching whatever sits under the pointer, handle states
/// first in the same order the press dispatch probes them.
fn update_selection_cursor(ctx: &mut EditContext, x: f64, y: f64) {
    let cursor = if ctx.yaw_rotated_camera_at(x, y) || ctx.pitch_rotated_camera_at(x, y) {
        CursorKind::Rotation
    } else if ctx.elevated_camera_at(x, y) {
        CursorKind::Elevation
    } else if ctx.room_name_at(x, y).is_some()
        || ctx.room_area_at(x, y).is_some()
        || ctx.resized_dimension_line_start_at(x, y).is_some()
        || ctx.resized_dimension_line_end_at(x, y).is_some()
        || ctx.width_depth_resized_furniture_at(x, y).is_some()
        || ctx.resized_wall_start_at(x, y).is_some()
        || ctx.resized_wall_end_at(x, y).is_some()
        || ctx.resized_room_at(x, y).is_some()
        || ctx.furniture_name_at(x, y).is_some()
        || ctx.resized_compass_at(x, y)
    {
        CursorKind::Resize
    } else if ctx.light_power_at(x, y).is_some() {
        CursorKind::PowerLevel
    } else if ctx.offset_dimension_line_at(x, y).is_some()
        || ctx.height_resized_furniture_at(x, y).is_some()
    {
        CursorKind::Height
    } else if ctx.rotated_furniture_at(x, y).is_some() || ctx.rotated_compass_at(x, y) {
        CursorKind::Rotation
    } else if ctx.elevated_furniture_at(x, y).is_some() {
        CursorKind::Elevation
    } else {
        CursorKind::Selection
    };
    ctx.view.set_cursor(cursor);
}

/// Armed state of the selection mode. Dispatches presses to the handle
/// state matching the indicator under the pointer, or to a move or rubber
/// band gesture.
pub struct SelectionState;

impl SelectionState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        update_selection_cursor(ctx, x, y);
        ctx.view.set_resize_indicator_visible(true);
        State::Selection(SelectionState)
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn set_mode(self, ctx: &mut EditContext, mode: Mode) -> State {
        Self::exit(ctx);
        initial_state(ctx, mode)
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        update_selection_cursor(ctx, x, y);
        State::Selection(self)
    }

    pub fn press_mouse(
        self,
        ctx: &mut EditContext,
        x: f64,
        y: f64,
        click_count: u32,
        shift_down: bool,
    ) -> State {
        if click_count != 1 {
            // Double clicks open the property dialogs of the outer layers.
            return State::Selection(self);
        }
        Self::exit(ctx);
        if ctx.yaw_rotated_camera_at(x, y) {
            CameraYawRotationState::enter(ctx)
        } else if ctx.pitch_rotated_camera_at(x, y) {
            CameraPitchRotationState::enter(ctx)
        } else if ctx.elevated_camera_at(x, y) {
            CameraElevationState::enter(ctx)
        } else if let Some(room) = ctx.room_name_at(x, y) {
            RoomNameOffsetState::enter(ctx, room)
        } else if let Some(room) = ctx.room_area_at(x, y) {
            RoomAreaOffsetState::enter(ctx, room)
        } else if let Some(line) = ctx.resized_dimension_line_start_at(x, y) {
            DimensionLineResizeState::enter(ctx, line, true)
        } else if let Some(line) = ctx.resized_dimension_line_end_at(x, y) {
            DimensionLineResizeState::enter(ctx, line, false)
        } else if let Some(piece) = ctx.width_depth_resized_furniture_at(x, y) {
            FurnitureResizeState::enter(ctx, piece)
        } else if let Some(wall) = ctx.resized_wall_start_at(x, y) {
            WallResizeState::enter(ctx, wall, true)
        } else if let Some(wall) = ctx.resized_wall_end_at(x, y) {
            WallResizeState::enter(ctx, wall, false)
        } else if let Some((room, index)) = ctx.resized_room_at(x, y) {
            RoomResizeState::enter(ctx, room, index)
        } else if let Some(line) = ctx.offset_dimension_line_at(x, y) {
            DimensionLineOffsetState::enter(ctx, line)
        } else if let Some(piece) = ctx.light_power_at(x, y) {
            LightPowerState::enter(ctx, piece)
        } else if let Some(piece) = ctx.height_resized_furniture_at(x, y) {
            FurnitureHeightState::enter(ctx, piece)
        } else if let Some(piece) = ctx.rotated_furniture_at(x, y) {
            FurnitureRotationState::enter(ctx, piece)
        } else if let Some(piece) = ctx.elevated_furniture_at(x, y) {
            FurnitureElevationState::enter(ctx, piece)
        } else if let Some(piece) = ctx.furniture_name_at(x, y) {
            FurnitureNameOffsetState::enter(ctx, piece)
        } else if ctx.rotated_compass_at(x, y) {
            CompassRotationState::enter(ctx)
        } else if ctx.resized_compass_at(x, y) {
            CompassResizeState::enter(ctx)
        } else if !shift_down && ctx.selectable_item_at(x, y).is_some() {
            SelectionMoveState::enter(ctx)
        } else {
            RectangleSelectionState::enter(ctx)
        }
    }

    pub fn delete_selection(self, ctx: &mut EditContext) -> State {
        let deletable = ctx.deletable_selected_items();
        ctx.delete_items(&deletable);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        update_selection_cursor(ctx, x, y);
        State::Selection(self)
    }

    pub fn move_selection(self, ctx: &mut EditContext, dx: f64, dy: f64) -> State {
        move_and_show_selected_items(ctx, dx, dy);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        update_selection_cursor(ctx, x, y);
        State::Selection(self)
    }
}

/// Moves the selected items under the mouse. A press without any move turns
/// into a plain click selection on release. Holding the duplication
/// modifier swaps the moved set for fresh copies.
pub struct SelectionMoveState {
    x_last_mouse_move: f64,
    y_last_mouse_move: f64,
    mouse_moved: bool,
    moved_items: Vec<Selectable>,
    duplicated_items: Option<Vec<Selectable>>,
}

impl SelectionMoveState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let x = ctx.x_last_mouse_press;
        let y = ctx.y_last_mouse_press;
        if let Some(item) = ctx.selectable_item_at(x, y) {
            if !ctx.home.selected_items().contains(&item) {
                // The item under the cursor replaces the selection.
                ctx.select_item(item);
            }
        }
        let state = SelectionMoveState {
            x_last_mouse_move: x,
            y_last_mouse_move: y,
            mouse_moved: false,
            moved_items: ctx.movable_selected_items(),
            duplicated_items: None,
        };
        let duplication = ctx.duplication_activated_last_mouse_press;
        state.activate_duplication(ctx, duplication)
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        ctx.move_items(
            &self.moved_items,
            x - self.x_last_mouse_move,
            y - self.y_last_mouse_move,
        );
        ctx.view.make_point_visible(x, y);
        self.x_last_mouse_move = x;
        self.y_last_mouse_move = y;
        self.mouse_moved = true;
        State::SelectionMove(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        if self.mouse_moved {
            // A camera move leaves no record behind.
            if !matches!(self.moved_items.first(), None | Some(Selectable::Camera)) {
                if let Some(originals) = self.duplicated_items {
                    ctx.post_items_duplication(self.moved_items, originals);
                } else {
                    ctx.post_items_move(
                        self.moved_items,
                        self.x_last_mouse_move - ctx.x_last_mouse_press,
                        self.y_last_mouse_move - ctx.y_last_mouse_press,
                    );
                }
            }
        } else if let Some(item) = ctx.selectable_item_at(x, y) {
            ctx.select_item(item);
        }
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        if let Some(originals) = self.duplicated_items {
            do_delete_items(ctx, &self.moved_items);
            ctx.select_items(originals);
        } else if self.mouse_moved {
            ctx.move_items(
                &self.moved_items,
                ctx.x_last_mouse_press - self.x_last_mouse_move,
                ctx.y_last_mouse_press - self.y_last_mouse_move,
            );
        }
        SelectionState::enter(ctx)
    }

    pub fn activate_duplication(mut self, ctx: &mut EditContext, activated: bool) -> State {
        if self.moved_items.is_empty() || matches!(self.moved_items[0], Selectable::Camera) {
            return State::SelectionMove(self);
        }
        if activated && self.duplicated_items.is_none() {
            // The copies take over the drag and the originals go back to
            // where the press found them.
            let copies = ctx.duplicate_items(&self.moved_items);
            let originals = std::mem::replace(&mut self.moved_items, copies);
            ctx.move_items(
                &originals,
                ctx.x_last_mouse_press - self.x_last_mouse_move,
                ctx.y_last_mouse_press - self.y_last_mouse_move,
            );
            self.duplicated_items = Some(originals);
            ctx.view.set_cursor(CursorKind::Duplication);
        } else if !activated {
            if let Some(originals) = self.duplicated_items.take() {
                do_delete_items(ctx, &self.moved_items);
                ctx.move_items(
                    &originals,
                    self.x_last_mouse_move - ctx.x_last_mouse_press,
                    self.y_last_mouse_move - ctx.y_last_mouse_press,
                );
                self.moved_items = originals;
                ctx.view.set_cursor(CursorKind::Selection);
            }
        }
        ctx.select_items(self.moved_items.clone());
        State::SelectionMove(self)
    }
}

/// Rubber band selection. A press without any move toggles the item under
/// the cursor instead.
pub struct RectangleSelectionState {
    selected_items_mouse_pressed: Vec<Selectable>,
    mouse_moved: bool,
}

impl RectangleSelectionState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let x = ctx.x_last_mouse_press;
        let y = ctx.y_last_mouse_press;
        if ctx.selectable_item_at(x, y).is_none() && !ctx.shift_down_last_mouse_press {
            ctx.deselect_all();
        }
        State::RectangleSelection(RectangleSelectionState {
            selected_items_mouse_pressed: ctx.home.selected_items().to_vec(),
            mouse_moved: false,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_rectangle_feedback();
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        self.mouse_moved = true;
        let x0 = ctx.x_last_mouse_press;
        let y0 = ctx.y_last_mouse_press;
        self.update_selected_items(ctx, x0, y0, x, y);
        ctx.view.set_rectangle_feedback(x0, y0, x, y);
        ctx.view.make_point_visible(x, y);
        State::RectangleSelection(self)
    }

    pub fn release_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        if !self.mouse_moved {
            if let Some(item) = ctx.selectable_item_at(x, y) {
                if self.selected_items_mouse_pressed.contains(&item) {
                    self.selected_items_mouse_pressed
                        .retain(|other| *other != item);
                } else {
                    self.selected_items_mouse_pressed
                        .retain(|other| !matches!(other, Selectable::Camera));
                    // The camera only ever belongs to a selection alone.
                    if !matches!(item, Selectable::Camera)
                        || self.selected_items_mouse_pressed.is_empty()
                    {
                        self.selected_items_mouse_pressed.push(item);
                    }
                }
                ctx.select_items(self.selected_items_mouse_pressed);
            }
        }
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    fn update_selected_items(&self, ctx: &mut EditContext, x0: f64, y0: f64, x1: f64, y1: f64) {
        let shift_down = ctx.shift_down_last_mouse_press;
        let mut selected_items = if shift_down {
            self.selected_items_mouse_pressed.clone()
        } else {
            Vec::new()
        };
        for item in ctx.selectable_items_in_rect(x0, y0, x1, y1) {
            // The camera can't be caught by a rubber band.
            if matches!(item, Selectable::Camera) {
                continue;
            }
            if shift_down {
                if self.selected_items_mouse_pressed.contains(&item) {
                    selected_items.retain(|other| *other != item);
                } else {
                    selected_items.push(item);
                }
            } else if !self.selected_items_mouse_pressed.contains(&item) {
                selected_items.push(item);
            }
        }
        ctx.select_items(selected_items);
    }
}

/// Armed state of the panning mode. Dragging shifts the viewport origin and
/// never touches the home.
pub struct PanningState {
    mouse_pressed: bool,
}

impl PanningState {
    pub fn enter(ctx: &mut EditContext) -> State {
        ctx.view.set_cursor(CursorKind::Panning);
        State::Panning(PanningState {
            mouse_pressed: false,
        })
    }

    pub fn set_mode(self, ctx: &mut EditContext, mode: Mode) -> State {
        initial_state(ctx, mode)
    }

    pub fn press_mouse(mut self, _ctx: &mut EditContext, _x: f64, _y: f64) -> State {
        self.mouse_pressed = true;
        State::Panning(self)
    }

    pub fn release_mouse(mut self, _ctx: &mut EditContext) -> State {
        self.mouse_pressed = false;
        State::Panning(self)
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        if self.mouse_pressed {
            // The pan shifts the model point under the pointer back to the
            // press point, so the press anchor needs no accumulation.
            ctx.viewport
                .pan(ctx.x_last_mouse_press - x, ctx.y_last_mouse_press - y);
        }
        State::Panning(self)
    }
}

/// Furniture dragged in from a catalog. The pieces exist only in this state
/// until they are dropped, so cancelling is free.
pub struct DragAndDropState {
    items: Vec<Furniture>,
    previous_mode: Mode,
}

impl DragAndDropState {
    pub fn enter(ctx: &mut EditContext, items: Vec<Furniture>, previous_mode: Mode) -> State {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.delete_alignment_feedback();
        State::DragAndDrop(DragAndDropState {
            items,
            previous_mode,
        })
    }

    pub fn previous_mode(&self) -> Mode {
        self.previous_mode
    }

    /// Dragged pieces translated so the first piece's center follows the
    /// pointer, others keeping their relative layout.
    fn positioned_items(&self, x: f64, y: f64) -> Vec<Furniture> {
        let Some(first) = self.items.first() else {
            return Vec::new();
        };
        let (dx, dy) = (x - first.x, y - first.y);
        self.items
            .iter()
            .map(|piece| {
                let mut positioned = piece.clone();
                positioned.move_by(dx, dy);
                positioned
            })
            .collect()
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let mut positioned = self.positioned_items(x, y);
        if positioned.len() == 1 && ctx.preferences.magnetism_enabled {
            let piece = &mut positioned[0];
            let wall = magnetism::adjust_piece_on_wall(
                &ctx.home,
                piece,
                ctx.pixel_margin(),
                ctx.preferences.door_window_wall_distance,
            );
            match wall {
                Some(wall_id) => {
                    let lines = magnetism::wall_distance_feedback(ctx.wall(wall_id), piece);
                    ctx.view.set_dimension_lines_feedback(&lines);
                }
                None => {
                    magnetism::release_piece_from_wall(piece);
                    ctx.view.delete_dimension_lines_feedback();
                }
            }
            magnetism::adjust_piece_elevation(&ctx.home, piece);
        }
        ctx.view.set_dragged_items_feedback(&positioned);
        State::DragAndDrop(self)
    }

    /// Adds the dragged pieces to the home at the drop point, as one record.
    pub fn drop(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let mut positioned = self.positioned_items(x, y);
        if positioned.len() == 1 && ctx.preferences.magnetism_enabled {
            let piece = &mut positioned[0];
            if magnetism::adjust_piece_on_wall(
                &ctx.home,
                piece,
                ctx.pixel_margin(),
                ctx.preferences.door_window_wall_distance,
            )
            .is_none()
            {
                magnetism::release_piece_from_wall(piece);
            }
            magnetism::adjust_piece_elevation(&ctx.home, piece);
        }
        Self::exit(ctx);
        let old_selection = ctx.home.selected_items().to_vec();
        let level = ctx.home.selected_level();
        let mut added = Vec::with_capacity(positioned.len());
        for mut piece in positioned {
            piece.level = level;
            added.push(ctx.home.add_furniture(piece));
        }
        ctx.post_add_furniture(&added, old_selection);
        ctx.select_items(added.into_iter().map(Selectable::Furniture).collect());
        initial_state(ctx, self.previous_mode)
    }

    /// Cancels the drag, typically when the pointer leaves the plan.
    pub fn stop(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        initial_state(ctx, self.previous_mode)
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_dragged_items_feedback();
        ctx.view.delete_dimension_lines_feedback();
    }
}
