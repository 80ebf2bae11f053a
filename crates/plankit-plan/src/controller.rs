//! Plan edit controller.
//!
//! [`PlanController`] owns the home being edited and a state machine of
//! gesture states. The view layer feeds it plain mouse and keyboard events
//! in model coordinates; the controller turns them into model changes,
//! feedback calls on the view and undoable records in its journal.

use plankit_model::{
    Furniture, Home, Level, LevelId, ListenerHandle, Selectable, UserPreferences, WallId,
};
use tracing::{debug, warn};

use crate::commands::PlanCommand;
use crate::context::EditContext;
use crate::states::{initial_state, DragAndDropState, State};
use crate::view::{EditableProperty, PlanView};
use crate::wall_ops;

/// Input mode the controller arms itself with between gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Selection,
    Panning,
    WallCreation,
    RoomCreation,
    DimensionLineCreation,
    LabelCreation,
}

/// Notifications fired while editing, so toolbars and menus can follow the
/// controller without polling it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    ModeChanged(Mode),
    /// Fired when a gesture starts or stops changing the home, which is
    /// when undo and redo availability flips.
    ModificationStateChanged(bool),
    ScaleChanged(f64),
}

pub struct PlanController {
    ctx: EditContext,
    state: Option<State>,
}

impl PlanController {
    pub fn new(home: Home, preferences: UserPreferences, view: Box<dyn PlanView>) -> Self {
        let mut ctx = EditContext::new(home, preferences, view);
        let state = initial_state(&mut ctx, Mode::Selection);
        Self {
            ctx,
            state: Some(state),
        }
    }

    /// Runs one event through the state machine and fires the mode and
    /// modification notifications the transition produced.
    fn dispatch(&mut self, event: impl FnOnce(State, &mut EditContext) -> State) {
        let state = self.state.take().expect("state machine re-entered");
        let old_mode = state.mode();
        let old_modification = state.is_modification_state();
        let state = event(state, &mut self.ctx);
        let new_mode = state.mode();
        let new_modification = state.is_modification_state();
        self.state = Some(state);
        if new_mode != old_mode {
            debug!(mode = ?new_mode, "mode changed");
            self.ctx.events.fire(&ControllerEvent::ModeChanged(new_mode));
        }
        if new_modification != old_modification {
            self.ctx
                .events
                .fire(&ControllerEvent::ModificationStateChanged(new_modification));
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.as_ref().expect("state machine re-entered").mode()
    }

    /// Whether a gesture is in the middle of changing the home.
    pub fn is_modification_state(&self) -> bool {
        self.state
            .as_ref()
            .expect("state machine re-entered")
            .is_modification_state()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.dispatch(|state, ctx| state.set_mode(ctx, mode));
    }

    /// Handles a mouse button press at (x, y) in model coordinates.
    pub fn press_mouse(
        &mut self,
        x: f64,
        y: f64,
        click_count: u32,
        shift_down: bool,
        duplication_activated: bool,
    ) {
        self.ctx.x_last_mouse_press = x;
        self.ctx.y_last_mouse_press = y;
        self.ctx.x_last_mouse_move = x;
        self.ctx.y_last_mouse_move = y;
        self.ctx.shift_down_last_mouse_press = shift_down;
        self.ctx.duplication_activated_last_mouse_press = duplication_activated;
        self.dispatch(|state, ctx| state.press_mouse(ctx, x, y, click_count, shift_down));
    }

    /// Handles the release of the mouse button pressed last.
    pub fn release_mouse(&mut self, x: f64, y: f64) {
        self.dispatch(|state, ctx| state.release_mouse(ctx, x, y));
    }

    /// Handles a mouse move to (x, y) in model coordinates, button down
    /// or not.
    pub fn move_mouse(&mut self, x: f64, y: f64) {
        self.ctx.x_last_mouse_move = x;
        self.ctx.y_last_mouse_move = y;
        self.dispatch(|state, ctx| state.move_mouse(ctx, x, y));
    }

    /// Cancels the gesture in progress, putting the edited items back where
    /// the gesture found them.
    pub fn escape(&mut self) {
        self.dispatch(|state, ctx| state.escape(ctx));
    }

    /// Moves the selection by (dx, dy) model units, typically bound to the
    /// arrow keys.
    pub fn move_selection(&mut self, dx: f64, dy: f64) {
        self.dispatch(|state, ctx| state.move_selection(ctx, dx, dy));
    }

    /// Tells the current gesture that the key inverting magnetism went down
    /// or up.
    pub fn toggle_magnetism(&mut self, toggled: bool) {
        self.dispatch(|state, ctx| state.toggle_magnetism(ctx, toggled));
    }

    /// Tells the current gesture that the key switching a move into a
    /// duplication went down or up.
    pub fn set_duplication_activated(&mut self, activated: bool) {
        self.dispatch(|state, ctx| state.activate_duplication(ctx, activated));
    }

    /// Starts or commits keyboard edition of the values driving the gesture
    /// in progress.
    pub fn set_edition_activated(&mut self, activated: bool) {
        self.dispatch(|state, ctx| state.set_edition_activated(ctx, activated));
    }

    /// Applies a value the user typed during keyboard edition.
    pub fn update_editable_property(&mut self, property: EditableProperty, value: f64) {
        self.dispatch(|state, ctx| state.update_editable_property(ctx, property, value));
    }

    /// Deletes the deletable part of the selection as one record.
    pub fn delete_selection(&mut self) {
        self.dispatch(|state, ctx| state.delete_selection(ctx));
    }

    /// Starts a drag and drop of furniture coming from outside the plan.
    pub fn start_dragged_items(&mut self, items: Vec<Furniture>, x: f64, y: f64) {
        self.dispatch(move |state, ctx| {
            let previous_mode = state.mode();
            DragAndDropState::enter(ctx, items, previous_mode).move_mouse(ctx, x, y)
        });
    }

    /// Drops the dragged furniture at (x, y), adding it to the home.
    pub fn drop_dragged_items(&mut self, x: f64, y: f64) {
        self.dispatch(|state, ctx| match state {
            State::DragAndDrop(state) => state.drop(ctx, x, y),
            other => {
                warn!("drop without a drag and drop in progress");
                other
            }
        });
    }

    /// Ends a drag and drop that left the plan without dropping.
    pub fn stop_dragged_items(&mut self) {
        self.dispatch(|state, ctx| match state {
            State::DragAndDrop(state) => state.stop(ctx),
            other => {
                warn!("stop without a drag and drop in progress");
                other
            }
        });
    }

    pub fn undo(&mut self) {
        if self.ctx.journal.undo(&mut self.ctx.home) {
            self.ctx.room_paths.invalidate();
        }
    }

    pub fn redo(&mut self) {
        if self.ctx.journal.redo(&mut self.ctx.home) {
            self.ctx.room_paths.invalidate();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.ctx.journal.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.ctx.journal.can_redo()
    }

    /// Gets the presentation name of the next edit to undo.
    pub fn undo_name(&self) -> Option<&'static str> {
        self.ctx.journal.undo_name()
    }

    /// Gets the presentation name of the next edit to redo.
    pub fn redo_name(&self) -> Option<&'static str> {
        self.ctx.journal.redo_name()
    }

    /// Reverses the direction of the selected walls, so their left and
    /// right sides swap.
    pub fn reverse_selected_walls_direction(&mut self) {
        let walls: Vec<WallId> = self
            .ctx
            .home
            .selected_items()
            .iter()
            .filter_map(|item| match item {
                Selectable::Wall(id) => Some(*id),
                _ => None,
            })
            .collect();
        if walls.is_empty() {
            return;
        }
        wall_ops::reverse_walls(&mut self.ctx.home, &walls);
        self.ctx.invalidate_room_paths();
        let selection = self.ctx.home.selected_items().to_vec();
        self.ctx.post_edit(
            "Reverse walls",
            PlanCommand::ReverseWalls { walls },
            selection.clone(),
            selection,
        );
    }

    /// Splits the selected wall in two halves at its middle point and
    /// selects the first half. Does nothing unless the selection holds
    /// exactly one wall.
    pub fn split_selected_wall(&mut self) {
        let wall = match self.ctx.home.selected_items() {
            [Selectable::Wall(id)] => *id,
            _ => return,
        };
        let Some(split) = wall_ops::split_wall(&mut self.ctx.home, wall) else {
            warn!(wall = wall.0, "split declined on a zero length wall");
            return;
        };
        self.ctx.invalidate_room_paths();
        let first = split.first.wall_id();
        self.ctx.select_item(Selectable::Wall(first));
        self.ctx.view.make_selection_visible();
        self.ctx.post_edit(
            "Split wall",
            PlanCommand::SplitWall(split),
            vec![Selectable::Wall(wall)],
            vec![Selectable::Wall(first)],
        );
    }

    /// Adds a level on top of the existing ones and selects it.
    pub fn add_level(&mut self) -> LevelId {
        let floor_thickness = self.ctx.preferences.new_floor_thickness;
        let levels = self.ctx.home.levels();
        let elevation = if levels.is_empty() {
            0.0
        } else {
            levels
                .iter()
                .map(|level| level.elevation + level.height)
                .fold(f64::MIN, f64::max)
                + floor_thickness
        };
        let name = format!("Level {}", levels.len());
        let level = Level::new(
            name,
            elevation,
            floor_thickness,
            self.ctx.preferences.new_wall_height,
        );
        let id = self.ctx.home.add_level(level);
        self.ctx.home.set_selected_level(Some(id));
        self.ctx.invalidate_room_paths();
        id
    }

    /// Selects the level new items land on and pickings search.
    pub fn set_selected_level(&mut self, level: Option<LevelId>) {
        self.ctx.home.set_selected_level(level);
        self.ctx.invalidate_room_paths();
    }

    /// Locks or unlocks the base plan. Locked walls, rooms, dimension
    /// lines, compass and base furniture stay selectable through their
    /// indicators but refuse modification gestures.
    pub fn set_base_plan_locked(&mut self, locked: bool) {
        self.ctx.home.set_base_plan_locked(locked);
    }

    /// Multiplies the scale by `factor`, within the supported zoom range.
    pub fn zoom(&mut self, factor: f64) {
        if self.ctx.viewport.zoom(factor) {
            self.ctx
                .events
                .fire(&ControllerEvent::ScaleChanged(self.ctx.viewport.scale()));
        }
    }

    pub fn set_scale(&mut self, scale: f64) {
        if self.ctx.viewport.set_scale(scale) {
            self.ctx
                .events
                .fire(&ControllerEvent::ScaleChanged(self.ctx.viewport.scale()));
        }
    }

    pub fn scale(&self) -> f64 {
        self.ctx.viewport.scale()
    }

    pub fn home(&self) -> &Home {
        &self.ctx.home
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: Fn(&ControllerEvent) + 'static,
    {
        self.ctx.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.ctx.events.unsubscribe(handle)
    }
}
