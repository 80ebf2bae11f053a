//! Wall mode states: chain drawing from press to press, and the endpoint
//! resize gesture entered from the selection mode.

use std::time::Instant;

use plankit_model::{Selectable, WallId};

use crate::context::EditContext;
use crate::controller::Mode;
use crate::magnetism::{self, PointWithAngleMagnetism};
use crate::states::{initial_state, SelectionState, State, PENDING_POINT_DELAY};
use crate::view::{CursorKind, EditableProperty};

/// Armed state of the wall mode, waiting for the press that will anchor a
/// new wall chain.
pub struct WallCreationState;

impl WallCreationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        ctx.view.set_cursor(CursorKind::Draw);
        State::WallCreation(WallCreationState)
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_alignment_feedback();
    }

    pub fn set_mode(self, ctx: &mut EditContext, mode: Mode) -> State {
        Self::exit(ctx);
        initial_state(ctx, mode)
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        ctx.view.set_alignment_feedback(None, x, y, false);
        State::WallCreation(self)
    }

    pub fn press_mouse(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        WallDrawingState::enter(ctx)
    }
}

/// Draws a chain of walls. Every single click commits the wall under the
/// pointer and starts the next one from its end; a double click, a numeric
/// edition commit or closing the chain on its own first wall ends the
/// gesture and posts one record for the whole chain.
pub struct WallDrawingState {
    x_start: f64,
    y_start: f64,
    x_last_end: f64,
    y_last_end: f64,
    wall_start_at_start: Option<WallId>,
    wall_end_at_start: Option<WallId>,
    new_wall: Option<WallId>,
    wall_start_at_end: Option<WallId>,
    wall_end_at_end: Option<WallId>,
    last_wall: Option<WallId>,
    old_selection: Vec<Selectable>,
    new_walls: Vec<WallId>,
    magnetism_enabled: bool,
    chain_instant: Option<Instant>,
}

impl WallDrawingState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let old_selection = ctx.home.selected_items().to_vec();
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        let mut x_start = ctx.x_last_mouse_press;
        let mut y_start = ctx.y_last_mouse_press;
        // The chain start attaches to a free wall endpoint nearby, or
        // magnetizes to a reference point.
        let mut wall_start_at_start = None;
        let mut wall_end_at_start = None;
        if let Some(wall) = ctx.wall_end_at(x_start, y_start, None) {
            wall_end_at_start = Some(wall);
            let point = ctx.wall(wall).end_point();
            x_start = point.x;
            y_start = point.y;
        } else if let Some(wall) = ctx.wall_start_at(x_start, y_start, None) {
            wall_start_at_start = Some(wall);
            let point = ctx.wall(wall).start_point();
            x_start = point.x;
            y_start = point.y;
        } else if magnetism_enabled {
            let references = ctx.wall_magnetism_reference_points(None);
            let snapped =
                magnetism::magnetize_to_closest_point(&references, x_start, y_start, ctx.wall_margin());
            x_start = snapped.x;
            y_start = snapped.y;
        }
        ctx.deselect_all();
        ctx.view.set_alignment_feedback(None, x_start, y_start, false);
        State::WallDrawing(WallDrawingState {
            x_start,
            y_start,
            x_last_end: x_start,
            y_last_end: y_start,
            wall_start_at_start,
            wall_end_at_start,
            new_wall: None,
            wall_start_at_end: None,
            wall_end_at_end: None,
            last_wall: None,
            old_selection,
            new_walls: Vec::new(),
            magnetism_enabled,
            chain_instant: None,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.delete_alignment_feedback();
    }

    /// Posts the walls drawn so far as one record and goes back to the
    /// armed wall mode.
    fn commit(self, ctx: &mut EditContext) -> State {
        ctx.post_add_walls(&self.new_walls, self.old_selection);
        let selection = self.new_walls.iter().map(|id| Selectable::Wall(*id)).collect();
        ctx.select_items(selection);
        Self::exit(ctx);
        WallCreationState::enter(ctx)
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let (mut x_end, mut y_end) = if self.magnetism_enabled {
            let point = PointWithAngleMagnetism::new(
                self.x_start,
                self.y_start,
                x,
                y,
                ctx.preferences.unit,
                ctx.viewport.pixel_length(),
            );
            (point.x(), point.y())
        } else {
            (x, y)
        };
        let mut magnetized_point = false;
        if self.magnetism_enabled {
            let references = ctx.wall_magnetism_reference_points(self.new_wall);
            if let Some(snapped) = magnetism::magnetize_to_closest_point_on_ray(
                &references,
                self.x_start,
                self.y_start,
                x_end,
                y_end,
                ctx.wall_margin(),
            ) {
                x_end = snapped.x;
                y_end = snapped.y;
                magnetized_point = true;
            }
        }
        // The wall itself appears on the first move, once it has a length.
        let wall = match self.new_wall {
            None => {
                let wall = ctx.create_new_wall(
                    self.x_start,
                    self.y_start,
                    x_end,
                    y_end,
                    self.wall_start_at_start,
                    self.wall_end_at_start,
                );
                self.new_wall = Some(wall);
                self.new_walls.push(wall);
                wall
            }
            Some(wall) => {
                let edited = ctx.wall_mut(wall);
                edited.x_end = x_end;
                edited.y_end = y_end;
                ctx.invalidate_room_paths();
                wall
            }
        };
        let tool_tip = ctx.length_tool_tip(ctx.wall(wall).length());
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        ctx.view
            .set_alignment_feedback(Some(Selectable::Wall(wall)), x_end, y_end, magnetized_point);
        if let Some(previous) = self.last_wall {
            let previous_start = ctx.wall(previous).start_point();
            ctx.view.set_angle_feedback(
                self.x_start,
                self.y_start,
                previous_start.x,
                previous_start.y,
                x_end,
                y_end,
            );
        }
        // Highlight the wall whose free endpoint would catch the chain end.
        self.wall_start_at_end = ctx.wall_start_at(x_end, y_end, Some(wall));
        if let Some(attached) = self.wall_start_at_end {
            self.wall_end_at_end = None;
            ctx.select_item(Selectable::Wall(attached));
        } else {
            self.wall_end_at_end = ctx.wall_end_at(x_end, y_end, Some(wall));
            if let Some(attached) = self.wall_end_at_end {
                ctx.select_item(Selectable::Wall(attached));
            } else {
                ctx.deselect_all();
            }
        }
        ctx.view.make_point_visible(x, y);
        self.x_last_end = x_end;
        self.y_last_end = y_end;
        State::WallDrawing(self)
    }

    pub fn press_mouse(mut self, ctx: &mut EditContext, click_count: u32) -> State {
        if click_count == 2 {
            if let Some(last) = self.last_wall {
                ctx.join_new_wall_end_to_wall(last, self.wall_start_at_end, self.wall_end_at_end);
            }
            return self.commit(ctx);
        }
        if let Some(wall) = self.new_wall.take() {
            ctx.view.delete_tool_tip_feedback();
            ctx.select_item(Selectable::Wall(wall));
            if let Some(attached) = self.wall_start_at_end {
                if self.new_walls.first() == Some(&attached) {
                    // The chain closed on its own first wall.
                    ctx.join_new_wall_end_to_wall(wall, self.wall_start_at_end, self.wall_end_at_end);
                    return self.commit(ctx);
                }
            }
            self.last_wall = Some(wall);
            self.wall_end_at_start = Some(wall);
            self.wall_start_at_start = None;
            self.x_start = self.x_last_end;
            self.y_start = self.y_last_end;
            self.chain_instant = Some(Instant::now());
        }
        State::WallDrawing(self)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        if self.new_wall.is_some() {
            let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
            return self.move_mouse(ctx, x, y);
        }
        State::WallDrawing(self)
    }

    pub fn set_edition_activated(mut self, ctx: &mut EditContext, activated: bool) -> State {
        if !activated {
            // Validating the typed values ends the chain like a double
            // click would.
            return self.commit(ctx);
        }
        if self.new_wall.is_none() {
            if let (Some(instant), Some(last)) = (self.chain_instant, self.last_wall) {
                if instant.elapsed() < PENDING_POINT_DELAY {
                    // The click just before was a chaining click; reopen
                    // that wall for edition instead of starting a new one.
                    self.new_wall = Some(last);
                    let wall = ctx.wall(last);
                    self.x_start = wall.x_start;
                    self.y_start = wall.y_start;
                    self.x_last_end = wall.x_end;
                    self.y_last_end = wall.y_end;
                    let index = self.new_walls.iter().position(|id| *id == last);
                    self.last_wall = match index {
                        Some(i) if i > 0 => Some(self.new_walls[i - 1]),
                        _ => None,
                    };
                }
            }
        }
        if let Some(wall) = self.new_wall {
            let length = ctx.wall(wall).length();
            let angle = f64::atan2(self.y_start - self.y_last_end, self.x_last_end - self.x_start)
                .to_degrees();
            ctx.view.set_edited_properties(
                &[
                    (EditableProperty::Length, length),
                    (EditableProperty::Angle, angle),
                ],
                self.x_last_end,
                self.y_last_end,
            );
        }
        State::WallDrawing(self)
    }

    pub fn update_editable_property(
        mut self,
        ctx: &mut EditContext,
        property: EditableProperty,
        value: f64,
    ) -> State {
        let Some(wall) = self.new_wall else {
            return State::WallDrawing(self);
        };
        let current_length = ctx.wall(wall).length();
        let current_angle = f64::atan2(self.y_start - self.y_last_end, self.x_last_end - self.x_start);
        let (length, angle) = match property {
            EditableProperty::Length => (value.max(0.0), current_angle),
            EditableProperty::Angle => (current_length, value.to_radians()),
            _ => return State::WallDrawing(self),
        };
        let x_end = self.x_start + length * angle.cos();
        let y_end = self.y_start - length * angle.sin();
        {
            let edited = ctx.wall_mut(wall);
            edited.x_end = x_end;
            edited.y_end = y_end;
        }
        ctx.invalidate_room_paths();
        self.x_last_end = x_end;
        self.y_last_end = y_end;
        ctx.view
            .set_alignment_feedback(Some(Selectable::Wall(wall)), x_end, y_end, false);
        State::WallDrawing(self)
    }

    pub fn escape(mut self, ctx: &mut EditContext) -> State {
        if let Some(wall) = self.new_wall.take() {
            ctx.home.delete_wall(wall);
            ctx.invalidate_room_paths();
            self.new_walls.retain(|id| *id != wall);
        }
        self.commit(ctx)
    }
}

/// Drags one endpoint of the selected wall, pulling the walls joined to it.
pub struct WallResizeState {
    wall: WallId,
    start_point: bool,
    old_x: f64,
    old_y: f64,
    delta_x_to_resize_point: f64,
    delta_y_to_resize_point: f64,
    magnetism_enabled: bool,
}

impl WallResizeState {
    pub fn enter(ctx: &mut EditContext, wall: WallId, start_point: bool) -> State {
        let point = if start_point {
            ctx.wall(wall).start_point()
        } else {
            ctx.wall(wall).end_point()
        };
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = ctx.length_tool_tip(ctx.wall(wall).length());
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        ctx.view
            .set_alignment_feedback(Some(Selectable::Wall(wall)), point.x, point.y, false);
        State::WallResize(WallResizeState {
            wall,
            start_point,
            old_x: point.x,
            old_y: point.y,
            delta_x_to_resize_point: ctx.x_last_mouse_press - point.x,
            delta_y_to_resize_point: ctx.y_last_mouse_press - point.y,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.delete_alignment_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let mut new_x = x - self.delta_x_to_resize_point;
        let mut new_y = y - self.delta_y_to_resize_point;
        let mut magnetized_point = false;
        if self.magnetism_enabled {
            // The dragged endpoint magnetizes around the opposite one.
            let opposite = if self.start_point {
                ctx.wall(self.wall).end_point()
            } else {
                ctx.wall(self.wall).start_point()
            };
            let point = PointWithAngleMagnetism::new(
                opposite.x,
                opposite.y,
                new_x,
                new_y,
                ctx.preferences.unit,
                ctx.viewport.pixel_length(),
            );
            new_x = point.x();
            new_y = point.y();
            let references = ctx.wall_magnetism_reference_points(Some(self.wall));
            if let Some(snapped) = magnetism::magnetize_to_closest_point_on_ray(
                &references,
                opposite.x,
                opposite.y,
                new_x,
                new_y,
                ctx.wall_margin(),
            ) {
                new_x = snapped.x;
                new_y = snapped.y;
                magnetized_point = true;
            }
        }
        ctx.move_wall_point(self.wall, new_x, new_y, self.start_point);
        let tool_tip = ctx.length_tool_tip(ctx.wall(self.wall).length());
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        ctx.view.set_alignment_feedback(
            Some(Selectable::Wall(self.wall)),
            new_x,
            new_y,
            magnetized_point,
        );
        ctx.view.make_point_visible(x, y);
        State::WallResize(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_wall_resize(self.wall, self.old_x, self.old_y, self.start_point);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.move_wall_point(self.wall, self.old_x, self.old_y, self.start_point);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}
