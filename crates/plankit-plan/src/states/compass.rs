//! Compass gesture states entered from the selection mode.

use plankit_model::geometry;

use crate::context::EditContext;
use crate::magnetism;
use crate::states::{degrees_tool_tip, SelectionState, State};

/// Rotates the compass rose to point north elsewhere.
pub struct CompassRotationState {
    angle_mouse_press: f64,
    old_north_direction: f64,
    magnetism_enabled: bool,
}

impl CompassRotationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let (x, y, old_north_direction) = {
            let compass = ctx.home.compass();
            (compass.x, compass.y, compass.north_direction)
        };
        let angle_mouse_press =
            f64::atan2(ctx.y_last_mouse_press - y, ctx.x_last_mouse_press - x);
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = degrees_tool_tip(old_north_direction);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::CompassRotation(CompassRotationState {
            angle_mouse_press,
            old_north_direction,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let (compass_x, compass_y) = {
            let compass = ctx.home.compass();
            (compass.x, compass.y)
        };
        let angle_mouse_move = f64::atan2(y - compass_y, x - compass_x);
        let mut new_north_direction =
            self.old_north_direction + angle_mouse_move - self.angle_mouse_press;
        if self.magnetism_enabled {
            new_north_direction = magnetism::magnetized_angle(new_north_direction);
        }
        ctx.home.compass_mut().north_direction = new_north_direction;
        let tool_tip = degrees_tool_tip(new_north_direction);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        State::CompassRotation(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_compass_rotation(self.old_north_direction);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.home.compass_mut().north_direction = self.old_north_direction;
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the resize handle at the south east of the compass rose.
pub struct CompassResizeState {
    old_diameter: f64,
    delta_x_to_resize_point: f64,
    delta_y_to_resize_point: f64,
    magnetism_enabled: bool,
}

impl CompassResizeState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let (resize_point, old_diameter) = {
            let compass = ctx.home.compass();
            (compass.resize_point(), compass.diameter)
        };
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = ctx.length_tool_tip(old_diameter);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::CompassResize(CompassResizeState {
            old_diameter,
            delta_x_to_resize_point: ctx.x_last_mouse_press - resize_point.x,
            delta_y_to_resize_point: ctx.y_last_mouse_press - resize_point.y,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let (compass_x, compass_y) = {
            let compass = ctx.home.compass();
            (compass.x, compass.y)
        };
        let mut new_diameter = 2.0
            * geometry::distance(
                compass_x,
                compass_y,
                x - self.delta_x_to_resize_point,
                y - self.delta_y_to_resize_point,
            );
        if self.magnetism_enabled {
            new_diameter = ctx
                .preferences
                .unit
                .magnetized_length(new_diameter, ctx.viewport.pixel_length());
        }
        new_diameter = new_diameter.max(10.0);
        ctx.home.compass_mut().diameter = new_diameter;
        let tool_tip = ctx.length_tool_tip(new_diameter);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        State::CompassResize(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_compass_resize(self.old_diameter);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.home.compass_mut().diameter = self.old_diameter;
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}
