//! Gesture state machine of the plan controller.
//!
//! Each editing gesture is a state. Events consume the current state and
//! return the next one, so a state owns the data it captured when the
//! gesture started and `escape` can put the plan back exactly as it was.
//! States that an event does not concern fall through unchanged.
//!
//! This module is split into submodules by edited item:
//! - `selection`: selection, move, rubber band, panning, drag and drop
//! - `walls`: wall chain drawing and wall endpoint resize
//! - `rooms`: room drawing, vertex resize, name and area offsets
//! - `dimensions`: dimension line drawing, resize and offset
//! - `labels`: label creation
//! - `furniture`: rotation, elevation, height, resize, name, light power
//! - `camera`: observer camera yaw, pitch and elevation
//! - `compass`: compass rotation and resize

mod camera;
mod compass;
mod dimensions;
mod furniture;
mod labels;
mod rooms;
mod selection;
mod walls;

pub use camera::{CameraElevationState, CameraPitchRotationState, CameraYawRotationState};
pub use compass::{CompassResizeState, CompassRotationState};
pub use dimensions::{
    DimensionLineCreationState, DimensionLineDrawingState, DimensionLineOffsetState,
    DimensionLineResizeState,
};
pub use furniture::{
    FurnitureElevationState, FurnitureHeightState, FurnitureNameOffsetState, FurnitureResizeState,
    FurnitureRotationState, LightPowerState,
};
pub use labels::LabelCreationState;
pub use rooms::{
    RoomAreaOffsetState, RoomCreationState, RoomDrawingState, RoomNameOffsetState, RoomResizeState,
};
pub use selection::{
    DragAndDropState, PanningState, RectangleSelectionState, SelectionMoveState, SelectionState,
};
pub use walls::{WallCreationState, WallDrawingState, WallResizeState};

use std::time::Duration;

use plankit_model::Selectable;

use crate::context::EditContext;
use crate::controller::Mode;
use crate::view::EditableProperty;

/// Delay after a chaining click during which activating keyboard edition
/// reopens the point placed by that click instead of starting a new one.
pub(crate) const PENDING_POINT_DELAY: Duration = Duration::from_millis(300);

/// The gesture currently in progress, or the armed state of the current mode
/// when no mouse button is down.
pub enum State {
    Selection(SelectionState),
    SelectionMove(SelectionMoveState),
    RectangleSelection(RectangleSelectionState),
    Panning(PanningState),
    DragAndDrop(DragAndDropState),
    WallCreation(WallCreationState),
    WallDrawing(WallDrawingState),
    WallResize(WallResizeState),
    RoomCreation(RoomCreationState),
    RoomDrawing(RoomDrawingState),
    RoomResize(RoomResizeState),
    RoomNameOffset(RoomNameOffsetState),
    RoomAreaOffset(RoomAreaOffsetState),
    DimensionLineCreation(DimensionLineCreationState),
    DimensionLineDrawing(DimensionLineDrawingState),
    DimensionLineResize(DimensionLineResizeState),
    DimensionLineOffset(DimensionLineOffsetState),
    LabelCreation(LabelCreationState),
    FurnitureRotation(FurnitureRotationState),
    FurnitureElevation(FurnitureElevationState),
    FurnitureHeight(FurnitureHeightState),
    FurnitureResize(FurnitureResizeState),
    FurnitureNameOffset(FurnitureNameOffsetState),
    LightPower(LightPowerState),
    CameraYawRotation(CameraYawRotationState),
    CameraPitchRotation(CameraPitchRotationState),
    CameraElevation(CameraElevationState),
    CompassRotation(CompassRotationState),
    CompassResize(CompassResizeState),
}

/// Enters the armed state of `mode`.
pub fn initial_state(ctx: &mut EditContext, mode: Mode) -> State {
    match mode {
        Mode::Selection => SelectionState::enter(ctx),
        Mode::Panning => PanningState::enter(ctx),
        Mode::WallCreation => WallCreationState::enter(ctx),
        Mode::RoomCreation => RoomCreationState::enter(ctx),
        Mode::DimensionLineCreation => DimensionLineCreationState::enter(ctx),
        Mode::LabelCreation => LabelCreationState::enter(ctx),
    }
}

/// Angle feedback text, normalized to [0°, 360°).
pub(crate) fn degrees_tool_tip(angle: f64) -> String {
    format!("{}°", (angle.to_degrees().round() as i64).rem_euclid(360))
}

/// Moves the whole selection, keeps it visible and records the move unless
/// only the camera moved. Arrow keys go through here in every armed mode.
fn move_and_show_selected_items(ctx: &mut EditContext, dx: f64, dy: f64) {
    let moved = ctx.movable_selected_items();
    if moved.is_empty() {
        return;
    }
    ctx.move_items(&moved, dx, dy);
    ctx.view.make_selection_visible();
    if !matches!(moved[0], Selectable::Camera) {
        ctx.post_items_move(moved, dx, dy);
    }
}

impl State {
    pub fn mode(&self) -> Mode {
        match self {
            State::Panning(_) => Mode::Panning,
            State::DragAndDrop(state) => state.previous_mode(),
            State::WallCreation(_) | State::WallDrawing(_) => Mode::WallCreation,
            State::RoomCreation(_) | State::RoomDrawing(_) => Mode::RoomCreation,
            State::DimensionLineCreation(_) | State::DimensionLineDrawing(_) => {
                Mode::DimensionLineCreation
            }
            State::LabelCreation(_) => Mode::LabelCreation,
            _ => Mode::Selection,
        }
    }

    /// Whether the state is in the middle of changing the home, which is
    /// when undo and redo must stay unavailable.
    pub fn is_modification_state(&self) -> bool {
        !matches!(
            self,
            State::Selection(_)
                | State::RectangleSelection(_)
                | State::Panning(_)
                | State::WallCreation(_)
                | State::RoomCreation(_)
                | State::DimensionLineCreation(_)
                | State::LabelCreation(_)
        )
    }

    pub fn set_mode(self, ctx: &mut EditContext, mode: Mode) -> State {
        match self {
            State::Selection(state) => state.set_mode(ctx, mode),
            State::Panning(state) => state.set_mode(ctx, mode),
            State::WallCreation(state) => state.set_mode(ctx, mode),
            State::RoomCreation(state) => state.set_mode(ctx, mode),
            State::DimensionLineCreation(state) => state.set_mode(ctx, mode),
            State::LabelCreation(state) => state.set_mode(ctx, mode),
            // A drawing in progress is cancelled first, then the armed state
            // it fell back to handles the change.
            State::WallDrawing(state) => state.escape(ctx).set_mode(ctx, mode),
            State::RoomDrawing(state) => state.escape(ctx).set_mode(ctx, mode),
            State::DimensionLineDrawing(state) => state.escape(ctx).set_mode(ctx, mode),
            other => other,
        }
    }

    pub fn press_mouse(
        self,
        ctx: &mut EditContext,
        x: f64,
        y: f64,
        click_count: u32,
        shift_down: bool,
    ) -> State {
        match self {
            State::Selection(state) => state.press_mouse(ctx, x, y, click_count, shift_down),
            State::Panning(state) => state.press_mouse(ctx, x, y),
            State::WallCreation(state) => state.press_mouse(ctx),
            State::WallDrawing(state) => state.press_mouse(ctx, click_count),
            State::RoomCreation(state) => state.press_mouse(ctx),
            State::RoomDrawing(state) => state.press_mouse(ctx, x, y, click_count),
            State::DimensionLineCreation(state) => state.press_mouse(ctx),
            State::DimensionLineDrawing(state) => state.press_mouse(ctx),
            State::LabelCreation(state) => state.press_mouse(ctx, x, y),
            other => other,
        }
    }

    pub fn release_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        match self {
            State::SelectionMove(state) => state.release_mouse(ctx, x, y),
            State::RectangleSelection(state) => state.release_mouse(ctx, x, y),
            State::Panning(state) => state.release_mouse(ctx),
            State::WallResize(state) => state.release_mouse(ctx),
            State::RoomResize(state) => state.release_mouse(ctx),
            State::RoomNameOffset(state) => state.release_mouse(ctx),
            State::RoomAreaOffset(state) => state.release_mouse(ctx),
            State::DimensionLineResize(state) => state.release_mouse(ctx),
            State::DimensionLineOffset(state) => state.release_mouse(ctx),
            State::FurnitureRotation(state) => state.release_mouse(ctx),
            State::FurnitureElevation(state) => state.release_mouse(ctx),
            State::FurnitureHeight(state) => state.release_mouse(ctx),
            State::FurnitureResize(state) => state.release_mouse(ctx),
            State::FurnitureNameOffset(state) => state.release_mouse(ctx),
            State::LightPower(state) => state.release_mouse(ctx),
            State::CameraYawRotation(state) => state.release_mouse(ctx),
            State::CameraPitchRotation(state) => state.release_mouse(ctx),
            State::CameraElevation(state) => state.release_mouse(ctx),
            State::CompassRotation(state) => state.release_mouse(ctx),
            State::CompassResize(state) => state.release_mouse(ctx),
            other => other,
        }
    }

    pub fn move_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        match self {
            State::Selection(state) => state.move_mouse(ctx, x, y),
            State::SelectionMove(state) => state.move_mouse(ctx, x, y),
            State::RectangleSelection(state) => state.move_mouse(ctx, x, y),
            State::Panning(state) => state.move_mouse(ctx, x, y),
            State::DragAndDrop(state) => state.move_mouse(ctx, x, y),
            State::WallCreation(state) => state.move_mouse(ctx, x, y),
            State::WallDrawing(state) => state.move_mouse(ctx, x, y),
            State::WallResize(state) => state.move_mouse(ctx, x, y),
            State::RoomCreation(state) => state.move_mouse(ctx, x, y),
            State::RoomDrawing(state) => state.move_mouse(ctx, x, y),
            State::RoomResize(state) => state.move_mouse(ctx, x, y),
            State::RoomNameOffset(state) => state.move_mouse(ctx, x, y),
            State::RoomAreaOffset(state) => state.move_mouse(ctx, x, y),
            State::DimensionLineCreation(state) => state.move_mouse(ctx, x, y),
            State::DimensionLineDrawing(state) => state.move_mouse(ctx, x, y),
            State::DimensionLineResize(state) => state.move_mouse(ctx, x, y),
            State::DimensionLineOffset(state) => state.move_mouse(ctx, x, y),
            State::FurnitureRotation(state) => state.move_mouse(ctx, x, y),
            State::FurnitureElevation(state) => state.move_mouse(ctx, x, y),
            State::FurnitureHeight(state) => state.move_mouse(ctx, x, y),
            State::FurnitureResize(state) => state.move_mouse(ctx, x, y),
            State::FurnitureNameOffset(state) => state.move_mouse(ctx, x, y),
            State::LightPower(state) => state.move_mouse(ctx, x, y),
            State::CameraYawRotation(state) => state.move_mouse(ctx, x, y),
            State::CameraPitchRotation(state) => state.move_mouse(ctx, x, y),
            State::CameraElevation(state) => state.move_mouse(ctx, x, y),
            State::CompassRotation(state) => state.move_mouse(ctx, x, y),
            State::CompassResize(state) => state.move_mouse(ctx, x, y),
            other => other,
        }
    }

    pub fn escape(self, ctx: &mut EditContext) -> State {
        match self {
            State::SelectionMove(state) => state.escape(ctx),
            State::RectangleSelection(state) => state.escape(ctx),
            State::WallDrawing(state) => state.escape(ctx),
            State::WallResize(state) => state.escape(ctx),
            State::RoomDrawing(state) => state.escape(ctx),
            State::RoomResize(state) => state.escape(ctx),
            State::RoomNameOffset(state) => state.escape(ctx),
            State::RoomAreaOffset(state) => state.escape(ctx),
            State::DimensionLineDrawing(state) => state.escape(ctx),
            State::DimensionLineResize(state) => state.escape(ctx),
            State::DimensionLineOffset(state) => state.escape(ctx),
            State::FurnitureRotation(state) => state.escape(ctx),
            State::FurnitureElevation(state) => state.escape(ctx),
            State::FurnitureHeight(state) => state.escape(ctx),
            State::FurnitureResize(state) => state.escape(ctx),
            State::FurnitureNameOffset(state) => state.escape(ctx),
            State::LightPower(state) => state.escape(ctx),
            State::CameraYawRotation(state) => state.escape(ctx),
            State::CameraPitchRotation(state) => state.escape(ctx),
            State::CameraElevation(state) => state.escape(ctx),
            State::CompassRotation(state) => state.escape(ctx),
            State::CompassResize(state) => state.escape(ctx),
            other => other,
        }
    }

    pub fn move_selection(self, ctx: &mut EditContext, dx: f64, dy: f64) -> State {
        match self {
            State::Selection(state) => state.move_selection(ctx, dx, dy),
            State::WallCreation(_)
            | State::RoomCreation(_)
            | State::DimensionLineCreation(_)
            | State::LabelCreation(_) => {
                move_and_show_selected_items(ctx, dx, dy);
                self
            }
            other => other,
        }
    }

    pub fn toggle_magnetism(self, ctx: &mut EditContext, toggled: bool) -> State {
        match self {
            State::WallDrawing(state) => state.toggle_magnetism(ctx, toggled),
            State::WallResize(state) => state.toggle_magnetism(ctx, toggled),
            State::RoomCreation(state) => state.toggle_magnetism(ctx, toggled),
            State::RoomDrawing(state) => state.toggle_magnetism(ctx, toggled),
            State::RoomResize(state) => state.toggle_magnetism(ctx, toggled),
            State::DimensionLineDrawing(state) => state.toggle_magnetism(ctx, toggled),
            State::DimensionLineResize(state) => state.toggle_magnetism(ctx, toggled),
            State::FurnitureRotation(state) => state.toggle_magnetism(ctx, toggled),
            State::FurnitureElevation(state) => state.toggle_magnetism(ctx, toggled),
            State::FurnitureHeight(state) => state.toggle_magnetism(ctx, toggled),
            State::FurnitureResize(state) => state.toggle_magnetism(ctx, toggled),
            State::CompassRotation(state) => state.toggle_magnetism(ctx, toggled),
            State::CompassResize(state) => state.toggle_magnetism(ctx, toggled),
            other => other,
        }
    }

    pub fn activate_duplication(self, ctx: &mut EditContext, activated: bool) -> State {
        match self {
            State::SelectionMove(state) => state.activate_duplication(ctx, activated),
            other => other,
        }
    }

    pub fn set_edition_activated(self, ctx: &mut EditContext, activated: bool) -> State {
        match self {
            State::WallDrawing(state) => state.set_edition_activated(ctx, activated),
            State::RoomDrawing(state) => state.set_edition_activated(ctx, activated),
            State::DimensionLineDrawing(state) => state.set_edition_activated(ctx, activated),
            other => other,
        }
    }

    pub fn update_editable_property(
        self,
        ctx: &mut EditContext,
        property: EditableProperty,
        value: f64,
    ) -> State {
        match self {
            State::WallDrawing(state) => state.update_editable_property(ctx, property, value),
            State::RoomDrawing(state) => state.update_editable_property(ctx, property, value),
            State::DimensionLineDrawing(state) => {
                state.update_editable_property(ctx, property, value)
            }
            other => other,
        }
    }

    pub fn delete_selection(self, ctx: &mut EditContext) -> State {
        match self {
            State::Selection(state) => state.delete_selection(ctx),
            State::WallCreation(_)
            | State::RoomCreation(_)
            | State::DimensionLineCreation(_)
            | State::LabelCreation(_) => {
                let deletable = ctx.deletable_selected_items();
                ctx.delete_items(&deletable);
                self
            }
            other => other,
        }
    }
}
