//! Dimension line mode states: two-phase drawing (length then offset side),
//! plus the extension line resize and offset gestures entered from the
//! selection mode.

use plankit_model::{geometry, DimensionLine, DimensionLineId, Selectable};

use crate::commands;
use crate::context::EditContext;
use crate::controller::Mode;
use crate::magnetism::PointWithAngleMagnetism;
use crate::states::{initial_state, SelectionState, State};
use crate::view::{CursorKind, EditableProperty};

/// Armed state of the dimension mode, waiting for the press that will fix
/// the start of a new dimension line.
pub struct DimensionLineCreationState;

impl DimensionLineCreationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        ctx.view.set_cursor(CursorKind::Draw);
        State::DimensionLineCreation(DimensionLineCreationState)
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
        State::DimensionLineCreation(self)
    }

    pub fn press_mouse(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        DimensionLineDrawingState::enter(ctx)
    }
}

/// Draws a dimension line in two phases. The first drag stretches the line
/// from its start point; a click then freezes the length and the pointer
/// picks the side and distance of the offset until a second click commits
/// the whole line.
pub struct DimensionLineDrawingState {
    x_start: f64,
    y_start: f64,
    new_line: Option<DimensionLineId>,
    old_selection: Vec<Selectable>,
    magnetism_enabled: bool,
    offset_choice: bool,
}

impl DimensionLineDrawingState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let old_selection = ctx.home.selected_items().to_vec();
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        let x_start = ctx.x_last_mouse_press;
        let y_start = ctx.y_last_mouse_press;
        ctx.deselect_all();
        ctx.view.set_alignment_feedback(None, x_start, y_start, false);
        State::DimensionLineDrawing(DimensionLineDrawingState {
            x_start,
            y_start,
            new_line: None,
            old_selection,
            magnetism_enabled,
            offset_choice: false,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.delete_alignment_feedback();
    }

    fn commit(self, ctx: &mut EditContext) -> State {
        if let Some(line) = self.new_line {
            ctx.select_item(Selectable::DimensionLine(line));
            ctx.post_add_dimension_lines(&[line], self.old_selection);
        }
        Self::exit(ctx);
        DimensionLineCreationState::enter(ctx)
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        if self.offset_choice {
            if let Some(line) = self.new_line {
                let (x_start, y_start, x_end, y_end) = {
                    let edited = ctx.dimension_line(line);
                    (edited.x_start, edited.y_start, edited.x_end, edited.y_end)
                };
                let offset = -f64::from(geometry::relative_ccw(x_start, y_start, x_end, y_end, x, y))
                    * geometry::line_distance(x_start, y_start, x_end, y_end, x, y);
                ctx.dimension_line_mut(line).offset = offset;
            }
            return State::DimensionLineDrawing(self);
        }
        let (x_end, y_end) = if self.magnetism_enabled {
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
        let line = match self.new_line {
            None => {
                let mut line = DimensionLine::new(self.x_start, self.y_start, x_end, y_end, 0.0);
                line.level = ctx.home.selected_level();
                let id = ctx.home.add_dimension_line(line);
                self.new_line = Some(id);
                id
            }
            Some(line) => {
                let edited = ctx.dimension_line_mut(line);
                edited.x_end = x_end;
                edited.y_end = y_end;
                line
            }
        };
        let tool_tip = ctx.length_tool_tip(ctx.dimension_line(line).length());
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        ctx.view.set_alignment_feedback(
            Some(Selectable::DimensionLine(line)),
            x_end,
            y_end,
            false,
        );
        ctx.view.make_point_visible(x, y);
        State::DimensionLineDrawing(self)
    }

    pub fn press_mouse(mut self, ctx: &mut EditContext) -> State {
        if self.new_line.is_some() {
            if self.offset_choice {
                return self.commit(ctx);
            }
            // The length is now frozen; the next drag picks the offset side.
            self.offset_choice = true;
            ctx.view.set_cursor(CursorKind::Height);
            ctx.view.delete_tool_tip_feedback();
            ctx.view.delete_alignment_feedback();
        }
        State::DimensionLineDrawing(self)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        if self.new_line.is_some() && !self.offset_choice {
            let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
            return self.move_mouse(ctx, x, y);
        }
        State::DimensionLineDrawing(self)
    }

    pub fn set_edition_activated(self, ctx: &mut EditContext, activated: bool) -> State {
        if !activated {
            return self.commit(ctx);
        }
        if let Some(line) = self.new_line {
            let (x_start, y_start, x_end, y_end, offset, length) = {
                let edited = ctx.dimension_line(line);
                (
                    edited.x_start,
                    edited.y_start,
                    edited.x_end,
                    edited.y_end,
                    edited.offset,
                    edited.length(),
                )
            };
            if self.offset_choice {
                ctx.view
                    .set_edited_properties(&[(EditableProperty::Offset, offset)], x_end, y_end);
            } else {
                let angle = f64::atan2(y_start - y_end, x_end - x_start).to_degrees();
                ctx.view.set_edited_properties(
                    &[
                        (EditableProperty::Length, length),
                        (EditableProperty::Angle, angle),
                    ],
                    x_end,
                    y_end,
                );
            }
        }
        State::DimensionLineDrawing(self)
    }

    pub fn update_editable_property(
        self,
        ctx: &mut EditContext,
        property: EditableProperty,
        value: f64,
    ) -> State {
        let Some(line) = self.new_line else {
            return State::DimensionLineDrawing(self);
        };
        match property {
            EditableProperty::Length | EditableProperty::Angle => {
                let (x_start, y_start, x_end, y_end, length) = {
                    let edited = ctx.dimension_line(line);
                    (
                        edited.x_start,
                        edited.y_start,
                        edited.x_end,
                        edited.y_end,
                        edited.length(),
                    )
                };
                let current_angle = f64::atan2(y_start - y_end, x_end - x_start);
                let (length, angle) = match property {
                    EditableProperty::Length => (value.max(0.0), current_angle),
                    _ => (length, value.to_radians()),
                };
                let new_x_end = x_start + length * angle.cos();
                let new_y_end = y_start - length * angle.sin();
                {
                    let edited = ctx.dimension_line_mut(line);
                    edited.x_end = new_x_end;
                    edited.y_end = new_y_end;
                }
                ctx.view.set_alignment_feedback(
                    Some(Selectable::DimensionLine(line)),
                    new_x_end,
                    new_y_end,
                    false,
                );
            }
            EditableProperty::Offset => {
                ctx.dimension_line_mut(line).offset = value;
            }
            _ => {}
        }
        State::DimensionLineDrawing(self)
    }

    pub fn escape(mut self, ctx: &mut EditContext) -> State {
        if self.offset_choice {
            // Step back to the length phase instead of dropping the line.
            self.offset_choice = false;
            if let Some(line) = self.new_line {
                let (x_end, y_end) = {
                    let edited = ctx.dimension_line_mut(line);
                    edited.offset = 0.0;
                    (edited.x_end, edited.y_end)
                };
                ctx.view.set_alignment_feedback(
                    Some(Selectable::DimensionLine(line)),
                    x_end,
                    y_end,
                    false,
                );
            }
            ctx.view.set_cursor(CursorKind::Draw);
            return State::DimensionLineDrawing(self);
        }
        if let Some(line) = self.new_line.take() {
            ctx.home.delete_dimension_line(line);
        }
        Self::exit(ctx);
        DimensionLineCreationState::enter(ctx)
    }
}

/// Drags one extension line of the selected dimension line. The dragged
/// point stays at a fixed distance from the base line, so the gesture
/// swings and stretches the measured segment without crossing it.
pub struct DimensionLineResizeState {
    line: DimensionLineId,
    start_point: bool,
    old_x: f64,
    old_y: f64,
    delta_x_to_resize_point: f64,
    delta_y_to_resize_point: f64,
    distance_from_base_line: f64,
    magnetism_enabled: bool,
}

impl DimensionLineResizeState {
    pub fn enter(ctx: &mut EditContext, line: DimensionLineId, start_point: bool) -> State {
        let (x_start, y_start, x_end, y_end) = {
            let edited = ctx.dimension_line(line);
            (edited.x_start, edited.y_start, edited.x_end, edited.y_end)
        };
        let (x_point, y_point) = if start_point {
            (x_start, y_start)
        } else {
            (x_end, y_end)
        };
        let x_press = ctx.x_last_mouse_press;
        let y_press = ctx.y_last_mouse_press;
        // Project the press on the extension line going through the dragged
        // point, to measure how far above the base line it grabbed.
        let (x_resize, y_resize) = if x_start == x_end {
            (x_press, y_point)
        } else if y_start == y_end {
            (x_point, y_press)
        } else {
            let alpha1 = (y_end - y_start) / (x_end - x_start);
            let beta1 = y_press - alpha1 * x_press;
            let alpha2 = -1.0 / alpha1;
            let beta2 = y_point - alpha2 * x_point;
            let x = (beta2 - beta1) / (alpha1 - alpha2);
            (x, alpha1 * x + beta1)
        };
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        ctx.view.set_alignment_feedback(
            Some(Selectable::DimensionLine(line)),
            x_point,
            y_point,
            false,
        );
        State::DimensionLineResize(DimensionLineResizeState {
            line,
            start_point,
            old_x: x_point,
            old_y: y_point,
            delta_x_to_resize_point: x_press - x_resize,
            delta_y_to_resize_point: y_press - y_resize,
            distance_from_base_line: geometry::distance(x_resize, y_resize, x_point, y_point),
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_alignment_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let x_resize = x - self.delta_x_to_resize_point;
        let y_resize = y - self.delta_y_to_resize_point;
        let (x_fixed, y_fixed, offset) = {
            let edited = ctx.dimension_line(self.line);
            if self.start_point {
                (edited.x_end, edited.y_end, edited.offset)
            } else {
                (edited.x_start, edited.y_start, edited.offset)
            }
        };
        // The dragged point keeps its distance to the base line, so the
        // base length is the remaining side of a right triangle.
        let hypotenuse = geometry::distance(x_resize, y_resize, x_fixed, y_fixed);
        let base_length_sq =
            hypotenuse * hypotenuse - self.distance_from_base_line * self.distance_from_base_line;
        if base_length_sq > 0.0 {
            let base_length = base_length_sq.sqrt();
            let mut relative_angle = f64::atan2(self.distance_from_base_line, base_length);
            if self.start_point {
                relative_angle = -relative_angle;
            }
            if offset >= 0.0 {
                relative_angle = -relative_angle;
            }
            let resize_angle = f64::atan2(y_resize - y_fixed, x_resize - x_fixed);
            let angle = relative_angle + resize_angle;
            let mut new_x = x_fixed + base_length * angle.cos();
            let mut new_y = y_fixed + base_length * angle.sin();
            if self.magnetism_enabled {
                let point = PointWithAngleMagnetism::new(
                    x_fixed,
                    y_fixed,
                    new_x,
                    new_y,
                    ctx.preferences.unit,
                    ctx.viewport.pixel_length(),
                );
                new_x = point.x();
                new_y = point.y();
            }
            commands::move_dimension_line_point(
                &mut ctx.home,
                self.line,
                new_x,
                new_y,
                self.start_point,
            );
            ctx.view.set_alignment_feedback(
                Some(Selectable::DimensionLine(self.line)),
                new_x,
                new_y,
                false,
            );
        } else {
            ctx.view.delete_alignment_feedback();
        }
        ctx.view.make_point_visible(x, y);
        State::DimensionLineResize(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_dimension_line_resize(self.line, self.old_x, self.old_y, self.start_point);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        commands::move_dimension_line_point(
            &mut ctx.home,
            self.line,
            self.old_x,
            self.old_y,
            self.start_point,
        );
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the selected dimension line sideways to change which side its
/// text and markers sit on, and how far from the base line.
pub struct DimensionLineOffsetState {
    line: DimensionLineId,
    old_offset: f64,
    delta_x_to_offset_point: f64,
    delta_y_to_offset_point: f64,
}

impl DimensionLineOffsetState {
    pub fn enter(ctx: &mut EditContext, line: DimensionLineId) -> State {
        let (x_offset_point, y_offset_point, old_offset) = {
            let edited = ctx.dimension_line(line);
            let angle = f64::atan2(
                edited.y_end - edited.y_start,
                edited.x_end - edited.x_start,
            );
            let middle = edited.middle_point();
            (
                middle.x - angle.sin() * edited.offset,
                middle.y + angle.cos() * edited.offset,
                edited.offset,
            )
        };
        ctx.view.set_resize_indicator_visible(true);
        State::DimensionLineOffset(DimensionLineOffsetState {
            line,
            old_offset,
            delta_x_to_offset_point: ctx.x_last_mouse_press - x_offset_point,
            delta_y_to_offset_point: ctx.y_last_mouse_press - y_offset_point,
        })
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let new_x = x - self.delta_x_to_offset_point;
        let new_y = y - self.delta_y_to_offset_point;
        let (x_start, y_start, x_end, y_end) = {
            let edited = ctx.dimension_line(self.line);
            (edited.x_start, edited.y_start, edited.x_end, edited.y_end)
        };
        let offset = -f64::from(geometry::relative_ccw(x_start, y_start, x_end, y_end, new_x, new_y))
            * geometry::line_distance(x_start, y_start, x_end, y_end, new_x, new_y);
        ctx.dimension_line_mut(self.line).offset = offset;
        ctx.view.make_point_visible(x, y);
        State::DimensionLineOffset(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_dimension_line_offset(self.line, self.old_offset);
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.dimension_line_mut(self.line).offset = self.old_offset;
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }
}
