//! Observer camera gesture states. Camera moves are not recorded in the
//! edit journal, so releasing the mouse just goes back to selection.

use std::f64::consts::PI;

use crate::context::EditContext;
use crate::states::{degrees_tool_tip, SelectionState, State};

/// Rotates the camera around its vertical axis with the indicator at the
/// tip of its field of view.
pub struct CameraYawRotationState {
    angle_mouse_press: f64,
    old_yaw: f64,
}

impl CameraYawRotationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let (x, y, old_yaw) = {
            let camera = ctx.home.camera();
            (camera.x, camera.y, camera.yaw)
        };
        let angle_mouse_press =
            f64::atan2(y - ctx.y_last_mouse_press, ctx.x_last_mouse_press - x);
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = degrees_tool_tip(old_yaw);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::CameraYawRotation(CameraYawRotationState {
            angle_mouse_press,
            old_yaw,
        })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let (camera_x, camera_y) = {
            let camera = ctx.home.camera();
            (camera.x, camera.y)
        };
        let angle_mouse_move = f64::atan2(camera_y - y, x - camera_x);
        let new_yaw = self.old_yaw - angle_mouse_move + self.angle_mouse_press;
        ctx.home.camera_mut().yaw = new_yaw;
        let tool_tip = degrees_tool_tip(new_yaw);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        State::CameraYawRotation(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.home.camera_mut().yaw = self.old_yaw;
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Tilts the camera up and down with the indicator on its body.
pub struct CameraPitchRotationState {
    old_pitch: f64,
}

impl CameraPitchRotationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let old_pitch = ctx.home.camera().pitch;
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = pitch_tool_tip(old_pitch);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::CameraPitchRotation(CameraPitchRotationState { old_pitch })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let yaw = ctx.home.camera().yaw;
        // The drag tilts along the camera sight axis, whichever way the
        // camera is turned in the plan.
        let new_pitch = (self.old_pitch
            + (y - ctx.y_last_mouse_press) * yaw.cos() * PI / 360.0
            - (x - ctx.x_last_mouse_press) * yaw.sin() * PI / 360.0)
            .clamp(-PI / 3.0, PI / 36.0 * 15.0);
        ctx.home.camera_mut().pitch = new_pitch;
        let tool_tip = pitch_tool_tip(new_pitch);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        State::CameraPitchRotation(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.home.camera_mut().pitch = self.old_pitch;
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

/// Drags the camera up and down with the indicator at its top.
pub struct CameraElevationState {
    old_elevation: f64,
}

impl CameraElevationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        let old_elevation = ctx.home.camera().z;
        ctx.view.set_resize_indicator_visible(true);
        let tool_tip = ctx.length_tool_tip(old_elevation);
        ctx.view
            .set_tool_tip_feedback(&tool_tip, ctx.x_last_mouse_press, ctx.y_last_mouse_press);
        State::CameraElevation(CameraElevationState { old_elevation })
    }

    fn exit(ctx: &mut EditContext) {
        ctx.view.delete_tool_tip_feedback();
        ctx.view.set_resize_indicator_visible(false);
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        let new_elevation =
            (self.old_elevation - (y - ctx.y_last_mouse_press)).clamp(10.0, 1000.0);
        ctx.home.camera_mut().z = new_elevation;
        let tool_tip = ctx.length_tool_tip(new_elevation);
        ctx.view.set_tool_tip_feedback(&tool_tip, x, y);
        State::CameraElevation(self)
    }

    pub fn release_mouse(self, ctx: &mut EditContext) -> State {
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        ctx.home.camera_mut().z = self.old_elevation;
        Self::exit(ctx);
        SelectionState::enter(ctx)
    }
}

fn pitch_tool_tip(pitch: f64) -> String {
    format!("{}°", pitch.to_degrees().round() as i64 % 360)
}
