//! Label mode state. Labels have no drawing phase: a press asks the view
//! for the text and adds the label where the user clicked.

use plankit_model::{Label, Selectable};

use crate::context::EditContext;
use crate::controller::Mode;
use crate::states::{initial_state, State};
use crate::view::CursorKind;

pub struct LabelCreationState;

impl LabelCreationState {
    pub fn enter(ctx: &mut EditContext) -> State {
        ctx.view.set_cursor(CursorKind::Draw);
        State::LabelCreation(LabelCreationState)
    }

    pub fn set_mode(self, ctx: &mut EditContext, mode: Mode) -> State {
        initial_state(ctx, mode)
    }

    pub fn press_mouse(self, ctx: &mut EditContext, x: f64, y: f64) -> State {
        if let Some(text) = ctx.view.ask_label_text(x, y).filter(|text| !text.is_empty()) {
            let old_selection = ctx.home.selected_items().to_vec();
            let mut label = Label::new(x, y, text);
            label.level = ctx.home.selected_level();
            let id = ctx.home.add_label(label);
            ctx.post_add_labels(&[id], old_selection);
            ctx.select_item(Selectable::Label(id));
        }
        State::LabelCreation(self)
    }
}
