//! Room mode states: polygon drawing point by point, plus the vertex
//! resize and text offset gestures entered from the selection mode.

use std::time::Instant;

use plankit_model::{Point, Room, RoomId, Selectable};

use crate::context::EditContext;
use crate::controller::Mode;
use crate::magnetism::{self, PointWithAngleMagnetism};
use crate::room_paths;
use crate::states::{initial_state, SelectionState, State, PENDING_POINT_DELAY};
use crate::view::{CursorKind, EditableProperty};

/// Armed state of the room mode. The alignment feedback already follows the
/// pointer so the user sees where the first point would land.
pub struct RoomCreationState {
    magnetism_enabled: bool,
}

impl RoomCreationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        ctx.view.set_cursor(CursorKind::Draw);
        let state = RoomCreationState {
            magnetism_enabled: ctx.magnetism_enabled(false),
        };
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        state.move_mouse(ctx, x, y)
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_alignment_feedback();
    }

    pub fn set_mode(self, ctx: &mut EditContext, mode: Mode) -> State {
        Self::exit(ctx);
        initial_state(ctx, mode)
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        if self.magnetism_enabled {
            let references = ctx.magnetism_reference_points(None);
            let point = magnetism::magnetize_to_closest_point(&references, x, y, ctx.wall_margin());
            ctx.view
                .set_alignment_feedback(None, point.x, point.y, point.magnetized);
        } else {
            ctx.view.set_alignment_feedback(None, x, y, false);
        }
        State::RoomCreation(self)
    }

    pub fn press_mouse(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        RoomDrawingState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }
}

/// Draws a room polygon. Every single click fixes the point under the
/// pointer and arms the next one; a double click or a numeric edition
/// commit ends the polygon. A double click in an area surrounded by walls
/// creates a room filling that area at once.
pub struct RoomDrawingState {
    x_previous_point: f64,
    y_previous_point: f64,
    new_room: Option<RoomId>,
    new_point_armed: bool,
    old_selection: Vec<Selectable>,
    magnetism_enabled: bool,
    pending_point_instant: Option<Instant>,
}

impl RoomDrawingState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let old_selection = ctx.home.selected_items().to_vec();
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        let (x_previous_point, y_previous_point) = if magnetism_enabled {
            let references = ctx.magnetism_reference_points(None);
            let point = magnetism::magnetize_to_closest_point(
                &references,
                ctx.x_last_mouse_move,
                ctx.y_last_mouse_move,
                ctx.wall_margin(),
            );
            ctx.view
                .set_alignment_feedback(None, point.x, point.y, point.magnetized);
            (point.x, point.y)
        } else {
            let (x, y) = (ctx.x_last_mouse_press, ctx.y_last_mouse_press);
            ctx.view.set_alignment_feedback(None, x, y, false);
            (x, y)
        };
        ctx.deselect_all();
        State::RoomDrawing(RoomDrawingState {
            x_previous_point,
            y_previous_point,
            new_room: None,
            new_point_armed: false,
            old_selection,
            magnetism_enabled,
            pending_point_instant: None,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_alignment_feedback();
    }

    fn add_new_room(&mut self, ctx: &mut EditContext, points: Vec<Point>) -> RoomId {
        let mut room = Room::new(points);
        room.level = ctx.home.selected_level();
        let id = ctx.home.add_room(room);
        ctx.invalidate_room_paths();
        ctx.select_item(Selectable::Room(id));
        self.new_room = Some(id);
        id
    }

    /// Posts the drawn room as one record, unless it never grew past a
    /// segment, and goes back to the armed room mode.
    fn commit(self, ctx: &mut EditContext) -> State {
        if let Some(room) = self.new_room {
            if ctx.room(room).points.len() > 2 {
                ctx.post_add_rooms(&[room], self.old_selection);
            } else {
                ctx.home.delete_room(room);
                ctx.invalidate_room_paths();
            }
        }
        Self::exit(ctx);
        RoomCreationState::enter(ctx)
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let (mut x_end, mut y_end) = (x, y);
        let mut magnetized_point = false;
        if self.magnetism_enabled {
            let references = ctx.magnetism_reference_points(self.new_room);
            let point = magnetism::magnetize_to_closest_point(&references, x, y, ctx.wall_margin());
            if point.magnetized {
                x_end = point.x;
                y_end = point.y;
                magnetized_point = true;
            } else {
                let point = PointWithAngleMagnetism::new(
                    self.x_previous_point,
                    self.y_previous_point,
                    x,
                    y,
                    ctx.preferences.unit,
                    ctx.viewport.pixel_length(),
                );
                x_end = point.x();
                y_end = point.y();
            }
        }
        let room = match self.new_room {
            None => self.add_new_room(
                ctx,
                vec![
                    Point::new(self.x_previous_point, self.y_previous_point),
                    Point::new(x_end, y_end),
                ],
            ),
            Some(room) => {
                let last = ctx.room(room).points.len() - 1;
                if self.new_point_armed {
                    // The click fixed the point under the pointer; the next
                    // move appends a new floating one after it.
                    let fixed = ctx.room(room).points[last];
                    self.x_previous_point = fixed.x;
                    self.y_previous_point = fixed.y;
                    ctx.room_mut(room).add_point(last + 1, x_end, y_end);
                    self.new_point_armed = false;
                } else {
                    ctx.room_mut(room).set_point(last, x_end, y_end);
                }
                ctx.invalidate_room_paths();
                room
            }
        };
        ctx.view
            .set_alignment_feedback(Some(Selectable::Room(room)), x_end, y_end, magnetized_point);
        ctx.view.make_point_visible(x, y);
        State::RoomDrawing(self)
    }

    pub fn press_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64, click_count: u32) -> State {
        if click_count == 2 {
            if self.new_room.is_none() {
                let polygon = {
                    let paths = ctx.room_paths.paths(&ctx.home);
                    room_paths::room_polygon_at(&ctx.home, paths, x, y)
                };
                if let Some(points) = polygon {
                    self.add_new_room(ctx, points);
                }
            }
            return self.commit(ctx);
        }
        if self.new_room.is_some() {
            self.new_point_armed = true;
            self.pending_point_instant = Some(Instant::now());
        }
        State::RoomDrawing(self)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        if self.new_room.is_some() {
            let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
            return self.move_mouse(ctx, x, y);
        }
        State::RoomDrawing(self)
    }

    pub fn set_edition_activated(mut self, ctx: &mut EditContext, activated: bool) -> State {
        if !activated {
            // Validating the typed values ends the polygon like a double
            // click would.
            return self.commit(ctx);
        }
        if let Some(room) = self.new_room {
            if self.new_point_armed {
                if let Some(instant) = self.pending_point_instant {
                    if instant.elapsed() < PENDING_POINT_DELAY {
                        // The click just before was a chaining click; the
                        // typed values edit the point it fixed.
                        self.new_point_armed = false;
                    }
                }
            }
            let last = ctx.room(room).points.len() - 1;
            let point = ctx.room(room).points[last];
            ctx.view.set_edited_properties(
                &[(EditableProperty::X, point.x), (EditableProperty::Y, point.y)],
                point.x,
                point.y,
            );
        }
        State::RoomDrawing(self)
    }

    pub fn update_editable_property(
        self,
        ctx: &mut EditContext,
        property: EditableProperty,
        value: f64,
    ) -> State {
        let Some(room) = self.new_room else {
            return State::RoomDrawing(self);
        };
        let last = ctx.room(room).points.len() - 1;
        let point = ctx.room(room).points[last];
        let (x, y) = match property {
            EditableProperty::X => (value, point.y),
            EditableProperty::Y => (point.x, value),
            _ => return State::RoomDrawing(self),
        };
        ctx.room_mut(room).set_point(last, x, y);
        ctx.invalidate_room_paths();
        ctx.view
            .set_alignment_feedback(Some(Selectable::Room(room)), x, y, false);
        State::RoomDrawing(self)
    }

    pub fn escape(mut self, ctx: &mut EditContext) -> State {
        if let Some(room) = self.new_room {
            if ctx.room(room).points.len() <= 3 {
                // Without the floating point the polygon degenerates.
                ctx.home.delete_room(room);
                ctx.invalidate_room_paths();
                self.new_room = None;
            } else {
                let last = ctx.room(room).points.len() - 1;
                ctx.room_mut(room).remove_point(last);
                ctx.invalidate_room_paths();
            }
        }
        self.commit(ctx)
    }
}

/// Drags one vertex of the selected room.
pub struct RoomResizeState {
    room: RoomId,
    point_index: usize,
    old_x: f64,
    old_y: f64,
    delta_x_to_resize_point: f64,
    delta_y_to_resize_point: f64,
    magnetism_enabled: bool,
}

impl RoomResizeState {
    pub fn enter(ctx: &mut EditContext, room: RoomId, point_index: usize) -> State {
        let point = ctx.room(room).points[point_index];
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        ctx.view
            .set_alignment_feedback(Some(Selectable::Room(room)), point.x, point.y, false);
        State::RoomResize(RoomResizeState {
            room,
            point_index,
            old_x: point.x,
            old_y: point.y,
            delta_x_to_resize_point: ctx.x_last_mouse_press - point.x,
            delta_y_to_resize_point: ctx.y_last_mouse_press - point.y,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_alignment_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let mut new_x = x - self.delta_x_to_resize_point;
        let mut new_y = y - self.delta_y_to_resize_point;
        let mut magnetized_point = false;
        if self.magnetism_enabled {
            let references = ctx.magnetism_reference_points(Some(self.room));
            let point =
                magnetism::magnetize_to_closest_point(&references, new_x, new_y, ctx.wall_margin());
            if point.magnetized {
                new_x = point.x;
                new_y = point.y;
                magnetized_point = true;
            } else {
                // The dragged vertex magnetizes around the previous one.
                let count = ctx.room(self.room).points.len();
                let previous = ctx.room(self.room).points[if self.point_index == 0 {
                    count - 1
                } else {
                    self.point_index - 1
                }];
                let point = PointWithAngleMagnetism::new(
                    previous.x,
                    previous.y,
                    new_x,
                    new_y,
                    ctx.preferences.unit,
                    ctx.viewport.pixel_length(),
                );
                new_x = point.x();
                new_y = point.y();
            }
        }
        ctx.room_mut(self.room).set_point(self.point_index, new_x, new_y);
        ctx.invalidate_room_paths();
        ctx.view.set_alignment_feedback(
            Some(Selectable::Room(self.room)),
            new_x,
            new_y,
            magnetized_point,
        );
        ctx.view.make_point_visible(x, y);
        State::RoomResize(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_room_resize(self.room, self.old_x, self.old_y, self.point_index);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.room_mut(self.room)
            .set_point(self.point_index, self.old_x, self.old_y);
        ctx.invalidate_room_paths();
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the name of the selected room away from its default spot.
pub struct RoomNameOffsetState {
    room: RoomId,
    old_x_offset: f64,
    old_y_offset: f64,
    x_last_mouse_move: f64,
    y_last_mouse_move: f64,
}

impl RoomNameOffsetState {
    pub fn enter(ctx: &mut EditContext, room: RoomId) -> State {
        let edited = ctx.room(room);
        let state = RoomNameOffsetState {
            room,
            old_x_offset: edited.name_x_offset,
            old_y_offset: edited.name_y_offset,
            x_last_mouse_move: ctx.x_last_mouse_press,
            y_last_mouse_move: ctx.y_last_mouse_press,
        };
        ctx.view.set_resize_indicator_visible(true);
        State::RoomNameOffset(state)
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let edited = ctx.room_mut(self.room);
        edited.name_x_offset += x - self.x_last_mouse_move;
        edited.name_y_offset += y - self.y_last_mouse_move;
        self.x_last_mouse_move = x;
        self.y_last_mouse_move = y;
        ctx.view.make_point_visible(x, y);
        State::RoomNameOffset(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_room_name_offset(self.room, self.old_x_offset, self.old_y_offset);
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        let edited = ctx.room_mut(self.room);
        edited.name_x_offset = self.old_x_offset;
        edited.name_y_offset = self.old_y_offset;
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }
}

/// Drags the displayed area of the selected room away from the room center.
pub struct RoomAreaOffsetState {
    room: RoomId,
    old_x_offset: f64,
    old_y_offset: f64,
    x_last_mouse_move: f64,
    y_last_mouse_move: f64,
}

impl RoomAreaOffsetState {
    pub fn enter(ctx: &mut EditContext, room: RoomId) -> State {
        let edited = ctx.room(room);
        let state = RoomAreaOffsetState {
            room,
            old_x_offset: edited.area_x_offset,
            old_y_offset: edited.area_y_offset,
            x_last_mouse_move: ctx.x_last_mouse_press,
            y_last_mouse_move: ctx.y_last_mouse_press,
        };
        ctx.view.set_resize_indicator_visible(true);
        State::RoomAreaOffset(state)
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let edited = ctx.room_mut(self.room);
        edited.area_x_offset += x - self.x_last_mouse_move;
        edited.area_y_offset += y - self.y_last_mouse_move;
        self.x_last_mouse_move = x;
        self.y_last_mouse_move = y;
        ctx.view.make_point_visible(x, y);
        State::RoomAreaOffset(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_room_area_offset(self.room, self.old_x_offset, self.old_y_offset);
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        let edited = ctx.room_mut(self.room);
        edited.area_x_offset = self.old_x_offset;
        edited.area_y_offset = self.old_y_offset;
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }
}
