//! Furniture gesture states entered from the selection mode: rotation,
//! elevation, height, plan resize, name offset and light power.

use plankit_model::{FurnitureId, FurnitureKind};

use crate::context::EditContext;
use crate::magnetism;
use crate::states::{degrees_tool_tip, SelectionState, State};

/// Rotates the selected piece around its center with its top left vertex.
pub struct FurnitureRotationState {
    piece: FurnitureId,
    angle_mouse_press: f64,
    old_angle: f64,
    magnetism_enabled: bool,
}

impl FurnitureRotationState {
    pub fn enter(ctx: &mut EditContext, piece: FurnitureId) -> State {
        let (x, y, old_angle) = {
            let rotated = ctx.furniture(piece);
            (rotated.x, rotated.y, rotated.angle)
        };
        let angle_mouse_press =
            f64::atan2(y - ctx.y_last_mouse_press, ctx.x_last_mouse_press - x);
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = degrees_tool_tip(old_angle);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::FurnitureRotation(FurnitureRotationState {
            piece,
            angle_mouse_press,
            old_angle,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let (piece_x, piece_y) = {
            let rotated = ctx.furniture(self.piece);
            (rotated.x, rotated.y)
        };
        let angle_mouse_move = f64::atan2(piece_y - y, x - piece_x);
        let mut new_angle = self.old_angle - angle_mouse_move + self.angle_mouse_press;
        if self.magnetism_enabled {
            new_angle = magnetism::magnetized_angle(new_angle);
        }
        ctx.furniture_mut(self.piece).set_angle(new_angle);
        let tool_tip = degrees_tool_tip(new_angle);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        ctx.view.make_point_visible(x, y);
        State::FurnitureRotation(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_furniture_rotation(self.piece, self.old_angle);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.furniture_mut(self.piece).set_angle(self.old_angle);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the elevation indicator at the top right vertex of the selected
/// piece to raise or lower it above the floor.
pub struct FurnitureElevationState {
    piece: FurnitureId,
    delta_y_to_elevation_point: f64,
    old_elevation: f64,
    magnetism_enabled: bool,
}

impl FurnitureElevationState {
    pub fn enter(ctx: &mut EditContext, piece: FurnitureId) -> State {
        let (elevation_point, old_elevation) = {
            let elevated = ctx.furniture(piece);
            (elevated.points()[1], elevated.elevation)
        };
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = ctx.length_tool_tip(old_elevation);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::FurnitureElevation(FurnitureElevationState {
            piece,
            delta_y_to_elevation_point: ctx.y_last_mouse_press - elevation_point.y,
            old_elevation,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let top_right = ctx.furniture(self.piece).points()[1];
        let delta_y = y - self.delta_y_to_elevation_point - top_right.y;
        let mut new_elevation = (self.old_elevation - delta_y).max(0.0);
        if self.magnetism_enabled {
            new_elevation = ctx
                .preferences
                .unit
                .magnetized_length(new_elevation, ctx.viewport.pixel_length());
        }
        ctx.furniture_mut(self.piece).set_elevation(new_elevation);
        let tool_tip = ctx.length_tool_tip(new_elevation);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        ctx.view.make_point_visible(x, y);
        State::FurnitureElevation(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_furniture_elevation(self.piece, self.old_elevation);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.furniture_mut(self.piece).set_elevation(self.old_elevation);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the height indicator at the bottom left vertex of the selected
/// piece.
pub struct FurnitureHeightState {
    piece: FurnitureId,
    delta_y_to_resize_point: f64,
    old_height: f64,
    magnetism_enabled: bool,
}

impl FurnitureHeightState {
    pub fn enter(ctx: &mut EditContext, piece: FurnitureId) -> State {
        let (resize_point, old_height) = {
            let resized = ctx.furniture(piece);
            (resized.points()[3], resized.height)
        };
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = ctx.length_tool_tip(old_height);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::FurnitureHeight(FurnitureHeightState {
            piece,
            delta_y_to_resize_point: ctx.y_last_mouse_press - resize_point.y,
            old_height,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let bottom_left = ctx.furniture(self.piece).points()[3];
        let delta_y = y - self.delta_y_to_resize_point - bottom_left.y;
        let mut new_height = (self.old_height - delta_y).max(0.0);
        if self.magnetism_enabled {
            new_height = ctx
                .preferences
                .unit
                .magnetized_length(new_height, ctx.viewport.pixel_length());
        }
        new_height = new_height.max(ctx.preferences.unit.minimum_length());
        ctx.furniture_mut(self.piece).height = new_height;
        let tool_tip = ctx.length_tool_tip(new_height);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        ctx.view.make_point_visible(x, y);
        State::FurnitureHeight(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_furniture_height(self.piece, self.old_height);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.furniture_mut(self.piece).height = self.old_height;
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the bottom right vertex of the selected piece to resize its width
/// and depth in the plan, keeping the top left vertex in place.
pub struct FurnitureResizeState {
    piece: FurnitureId,
    delta_x_to_resize_point: f64,
    delta_y_to_resize_point: f64,
    old_x: f64,
    old_y: f64,
    old_width: f64,
    old_depth: f64,
    old_bound_to_wall: bool,
    magnetism_enabled: bool,
}

impl FurnitureResizeState {
    pub fn enter(ctx: &mut EditContext, piece: FurnitureId) -> State {
        let (resize_point, old_x, old_y, old_width, old_depth, old_bound_to_wall) = {
            let resized = ctx.furniture(piece);
            (
                resized.points()[2],
                resized.x,
                resized.y,
                resized.width,
                resized.depth,
                matches!(
                    resized.kind,
                    FurnitureKind::DoorOrWindow { bound_to_wall: true }
                ),
            )
        };
        let magnetism_enabled = ctx.magnetism_enabled(ctx.shift_down_last_mouse_press);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = ctx.size_tool_tip(old_width, old_depth);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::FurnitureResize(FurnitureResizeState {
            piece,
            delta_x_to_resize_point: ctx.x_last_mouse_press - resize_point.x,
            delta_y_to_resize_point: ctx.y_last_mouse_press - resize_point.y,
            old_x,
            old_y,
            old_width,
            old_depth,
            old_bound_to_wall,
            magnetism_enabled,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let (angle, deformable, top_left) = {
            let resized = ctx.furniture(self.piece);
            (resized.angle, resized.deformable, resized.points()[0])
        };
        let delta_x = x - self.delta_x_to_resize_point - top_left.x;
        let delta_y = y - self.delta_y_to_resize_point - top_left.y;
        let cos = angle.cos();
        let sin = angle.sin();
        let mut new_width = delta_y * sin + delta_x * cos;
        if self.magnetism_enabled {
            new_width = ctx
                .preferences
                .unit
                .magnetized_length(new_width, ctx.viewport.pixel_length());
        }
        new_width = new_width.max(ctx.preferences.unit.minimum_length());
        let mut new_depth = delta_y * cos - delta_x * sin;
        if self.magnetism_enabled {
            new_depth = ctx
                .preferences
                .unit
                .magnetized_length(new_depth, ctx.viewport.pixel_length());
        }
        new_depth = new_depth.max(ctx.preferences.unit.minimum_length());
        if !deformable {
            // Fixed proportions pieces scale their depth with their width.
            new_depth = new_width * self.old_depth / self.old_width;
        }
        // The top left vertex stays in place, so the center shifts by half
        // the size change along the piece axes.
        let new_x = top_left.x + (new_width * cos - new_depth * sin) / 2.0;
        let new_y = top_left.y + (new_width * sin + new_depth * cos) / 2.0;
        {
            let resized = ctx.furniture_mut(self.piece);
            resized.x = new_x;
            resized.y = new_y;
            resized.width = new_width;
            resized.depth = new_depth;
        }
        let tool_tip = ctx.size_tool_tip(new_width, new_depth);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        ctx.view.make_point_visible(x, y);
        State::FurnitureResize(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_furniture_resize(
            self.piece,
            self.old_x,
            self.old_y,
            self.old_width,
            self.old_depth,
            self.old_bound_to_wall,
        );
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn toggle_magnetism(mut self, ctx: &mut EditContext, toggled: bool) -> State {
        self.magnetism_enabled = ctx.magnetism_enabled(toggled);
        let (x, y) = (ctx.x_last_mouse_move, ctx.y_last_mouse_move);
        self.move_mouse(ctx, x, y)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        {
            let resized = ctx.furniture_mut(self.piece);
            resized.x = self.old_x;
            resized.y = self.old_y;
            resized.width = self.old_width;
            resized.depth = self.old_depth;
        }
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the name of the selected piece away from its default spot above
/// the piece.
pub struct FurnitureNameOffsetState {
    piece: FurnitureId,
    old_x_offset: f64,
    old_y_offset: f64,
    x_last_mouse_move: f64,
    y_last_mouse_move: f64,
}

impl FurnitureNameOffsetState {
    pub fn enter(ctx: &mut EditContext, piece: FurnitureId) -> State {
        let edited = ctx.furniture(piece);
        let state = FurnitureNameOffsetState {
            piece,
            old_x_offset: edited.name_x_offset,
            old_y_offset: edited.name_y_offset,
            x_last_mouse_move: ctx.x_last_mouse_press,
            y_last_mouse_move: ctx.y_last_mouse_press,
        };
        ctx.view.set_resize_indicator_visible(true);
        State::FurnitureNameOffset(state)
    }

    pub fn move_mouse(mut self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let edited = ctx.furniture_mut(self.piece);
        edited.name_x_offset += x - self.x_last_mouse_move;
        edited.name_y_offset += y - self.y_last_mouse_move;
        self.x_last_mouse_move = x;
        self.y_last_mouse_move = y;
        ctx.view.make_point_visible(x, y);
        State::FurnitureNameOffset(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_furniture_name_offset(self.piece, self.old_x_offset, self.old_y_offset);
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        let edited = ctx.furniture_mut(self.piece);
        edited.name_x_offset = self.old_x_offset;
        edited.name_y_offset = self.old_y_offset;
        ctx.view.set_resize_indicator_visible(false);
        SelectionState::enter(ctx)
    }
}

/// Drags the power indicator of the selected light. Each pixel dragged up
/// adds one percent of power.
pub struct LightPowerState {
    piece: FurnitureId,
    old_power: f64,
}

impl LightPowerState {
    pub fn enter(ctx: &mut EditContext, piece: FurnitureId) -> State {
        let old_power = match ctx.furniture(piece).kind {
            FurnitureKind::Light { power } => power,
            _ => panic!("light power gesture on a piece that is not a light"),
        };
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = power_tool_tip(old_power);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::LightPower(LightPowerState { piece, old_power })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let delta_power = (ctx.y_last_mouse_press - y) / 100.0;
        let mut new_power = (self.old_power + delta_power).clamp(0.0, 1.0);
        new_power = (new_power * 100.0).round() / 100.0;
        if let FurnitureKind::Light { power } = &mut ctx.furniture_mut(self.piece).kind {
            *power = new_power;
        }
        let tool_tip = power_tool_tip(new_power);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        State::LightPower(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        ctx.post_light_power(self.piece, self.old_power);
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        if let FurnitureKind::Light { power } = &mut ctx.furniture_mut(self.piece).kind {
            *power = self.old_power;
        }
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

fn power_tool_tip(power: f64) -> String {
    format!("{}%", (power * 100.0).round() as i64)
}
